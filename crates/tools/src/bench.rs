//! 合成局面での探索ベンチマーク
//!
//! ドライバに指定手数だけ自己対局させ、各手の (指し手, 評価値, 時間) と
//! 計測カウンタ・置換表の使用状況をまとめる。

use anyhow::Result;
use log::{debug, info};
use serde::Serialize;
use xiangqi_search::config::SearchConfig;
use xiangqi_search::stats::MonitorSnapshot;
use xiangqi_search::synthetic::{RandomTree, TakeAway};
use xiangqi_search::{Algorithm, Decision, GamePosition, MoveReport, Outcome, SearchDriver, Side};

/// ベンチマークに使う局面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workload {
    /// 石取りゲーム（合流あり、終局まで読み切れる）
    TakeAway { stones: u8, max_take: u8 },
    /// シード付きランダム木
    Random {
        seed: u64,
        branching: u8,
        max_ply: u8,
        pieces: u32,
    },
}

/// 置換表の使用状況
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TableSummary {
    pub len: usize,
    pub capacity: usize,
    pub hashfull: u32,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub evictions: u64,
}

/// 1アルゴリズム分の結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchResult {
    pub algorithm: Algorithm,
    pub depth: u32,
    pub moves: Vec<MoveReport>,
    /// 指定手数の前に終局した場合の結果
    pub outcome: Option<Outcome>,
    pub monitor: MonitorSnapshot,
    pub tt: TableSummary,
    /// 評価キャッシュのヒット率（%）
    pub eval_cache_hit_rate: f64,
}

/// `workload` の初期局面から `plies` 手指す
pub fn run(workload: Workload, config: SearchConfig, plies: u32) -> Result<BenchResult> {
    match workload {
        Workload::TakeAway { stones, max_take } => {
            play(TakeAway::new(stones, max_take, Side::Red), config, plies)
        }
        Workload::Random {
            seed,
            branching,
            max_ply,
            pieces,
        } => play(
            RandomTree::new(seed, branching, max_ply).with_pieces(pieces),
            config,
            plies,
        ),
    }
}

fn play<P: GamePosition>(position: P, config: SearchConfig, plies: u32) -> Result<BenchResult> {
    let algorithm = config.algorithm;
    let depth = config.depth;
    let mut driver = SearchDriver::new(position, config)?;

    let mut history = Vec::new();
    let mut moves = Vec::new();
    let mut outcome = None;
    for _ in 0..plies {
        match driver.process(&mut history)? {
            Decision::Move(report) => moves.push(report),
            Decision::Terminal(result) => {
                info!("game over after {} plies: {result:?}", moves.len());
                outcome = Some(result);
                break;
            }
        }
    }

    let ctx = driver.context();
    debug!("{}", ctx.monitor().format_report());
    let stats = ctx.tt().stats();
    Ok(BenchResult {
        algorithm,
        depth,
        moves,
        outcome,
        monitor: ctx.monitor().snapshot(),
        tt: TableSummary {
            len: ctx.tt().len(),
            capacity: ctx.tt().capacity(),
            hashfull: ctx.tt().hashfull(),
            hits: stats.hits,
            misses: stats.misses,
            hit_rate: stats.hit_rate(),
            evictions: stats.evictions,
        },
        eval_cache_hit_rate: ctx.eval_cache().stats().hit_rate,
    })
}
