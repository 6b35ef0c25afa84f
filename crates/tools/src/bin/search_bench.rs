//! 合成局面で各探索アルゴリズムを走らせ、指し手・評価値・時間と計測値を出力する
//!
//! ```text
//! cargo run -p tools --release --bin search_bench -- --algorithm all --game take-away --stones 21
//! cargo run -p tools --release --bin search_bench -- --algorithm mtdf --game random --json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use log::info;
use tools::bench::{self, BenchResult, Workload};
use xiangqi_search::{Algorithm, SearchConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    Minimax,
    AlphaBeta,
    Negamax,
    Mtdf,
    Hybrid,
    /// 全アルゴリズム
    All,
}

impl AlgorithmArg {
    fn algorithms(self) -> Vec<Algorithm> {
        match self {
            AlgorithmArg::Minimax => vec![Algorithm::Minimax],
            AlgorithmArg::AlphaBeta => vec![Algorithm::AlphaBeta],
            AlgorithmArg::Negamax => vec![Algorithm::Negamax],
            AlgorithmArg::Mtdf => vec![Algorithm::Mtdf],
            AlgorithmArg::Hybrid => vec![Algorithm::Hybrid],
            AlgorithmArg::All => Algorithm::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GameArg {
    /// 石取りゲーム
    TakeAway,
    /// シード付きランダム木
    Random,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Benchmark the xiangqi search algorithms on synthetic positions")]
struct Cli {
    /// 探索アルゴリズム
    #[arg(long, value_enum, default_value_t = AlgorithmArg::All)]
    algorithm: AlgorithmArg,

    /// 探索深さ（未指定時: アルゴリズムごとの推奨値）
    #[arg(long)]
    depth: Option<u32>,

    /// 設定ファイル（TOML）。algorithm/depth はコマンドライン引数が優先
    #[arg(long)]
    config: Option<PathBuf>,

    /// 局面の種類
    #[arg(long, value_enum, default_value_t = GameArg::TakeAway)]
    game: GameArg,

    /// 石取りゲームの石数
    #[arg(long, default_value_t = 21)]
    stones: u8,

    /// 石取りゲームで1手に取れる最大数
    #[arg(long, default_value_t = 3)]
    max_take: u8,

    /// ランダム木のシード
    #[arg(long, default_value_t = 1)]
    tree_seed: u64,

    /// ランダム木の最大分岐数
    #[arg(long, default_value_t = 8)]
    branching: u8,

    /// ランダム木の最大手数
    #[arg(long, default_value_t = 16)]
    max_ply: u8,

    /// ランダム木の駒数（Hybrid の切り替えに使われる）
    #[arg(long, default_value_t = 32)]
    pieces: u32,

    /// 指す手数
    #[arg(long, default_value_t = 1)]
    plies: u32,

    /// 同値手選択の乱数シード
    #[arg(long)]
    seed: Option<u64>,

    /// JSONで出力
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn print_text(result: &BenchResult) {
    println!("== {} (depth {}) ==", result.algorithm, result.depth);
    for report in &result.moves {
        let route = report.route.map(|r| format!(" [{r}]")).unwrap_or_default();
        println!(
            "{:>5} {}  value={:>6}  time={:.3}s  nodes={}{route}",
            report.side.to_string(),
            report.mv,
            report.value.to_string(),
            report.elapsed.as_secs_f64(),
            report.nodes
        );
    }
    if let Some(outcome) = result.outcome {
        println!("outcome: {outcome:?}");
    }
    println!(
        "nodes={} moves={} tt_cutoffs={} nps={:.0}",
        result.monitor.nodes_evaluated,
        result.monitor.moves_generated,
        result.monitor.tt_cutoffs,
        result.monitor.nps
    );
    println!(
        "tt: {}/{} ({}‰) hit_rate={:.1}% evictions={}  eval_cache hit_rate={:.1}%",
        result.tt.len,
        result.tt.capacity,
        result.tt.hashfull,
        result.tt.hit_rate,
        result.tt.evictions,
        result.eval_cache_hit_rate
    );
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    if cli.plies == 0 {
        bail!("--plies must be >= 1");
    }

    let base = match &cli.config {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => SearchConfig::default(),
    };

    let workload = match cli.game {
        GameArg::TakeAway => Workload::TakeAway {
            stones: cli.stones,
            max_take: cli.max_take,
        },
        GameArg::Random => Workload::Random {
            seed: cli.tree_seed,
            branching: cli.branching,
            max_ply: cli.max_ply,
            pieces: cli.pieces,
        },
    };

    let mut results = Vec::new();
    for algorithm in cli.algorithm.algorithms() {
        let depth = cli
            .depth
            .or(cli.config.as_ref().map(|_| base.depth))
            .unwrap_or(algorithm.profile().recommended_depth);
        let config = SearchConfig {
            algorithm,
            depth,
            seed: cli.seed.or(base.seed),
            ..base.clone()
        };
        info!("running {algorithm} at depth {depth} on {workload:?}");
        let result = bench::run(workload, config, cli.plies)?;
        if !cli.json {
            print_text(&result);
        }
        results.push(result);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }
    Ok(())
}
