//! 探索設定
//!
//! 探索コアが「消費する」外部設定値を集約する。TOMLから読み込める。
//!
//! ```toml
//! algorithm = "negamax"
//! depth = 5
//! tt_capacity = 200000
//!
//! [ordering]
//! killer_bonus = 1000
//! capture_bonus = 500
//!
//! [hybrid]
//! piece_count = 10
//! move_count = 20
//! ```

use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::tt::DEFAULT_TT_CAPACITY;

/// 設定エラー
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// 探索アルゴリズム
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// 手の並べ替えなしのミニマックス（αβ枝刈り付き）
    Minimax,
    /// キラー手・History による並べ替え付きαβ
    #[default]
    AlphaBeta,
    /// 置換表付きネガマックス
    Negamax,
    /// ネガマックス上の MTD(f)
    Mtdf,
    /// 局面に応じてαβ系とモンテカルロを切り替える
    Hybrid,
}

/// アルゴリズムごとの推奨値
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmProfile {
    pub display_name: &'static str,
    pub recommended_depth: u32,
    pub min_depth: u32,
    pub max_depth: u32,
    /// 置換表を前提とするか
    pub requires_tt: bool,
    /// MTD(f) の反復回数（MTD(f) 以外は `None`）
    pub mtdf_iterations: Option<u32>,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Minimax,
        Algorithm::AlphaBeta,
        Algorithm::Negamax,
        Algorithm::Mtdf,
        Algorithm::Hybrid,
    ];

    /// 推奨探索深さ等のプロファイル
    pub const fn profile(self) -> AlgorithmProfile {
        match self {
            Algorithm::Minimax => AlgorithmProfile {
                display_name: "Minimax",
                recommended_depth: 4,
                min_depth: 2,
                max_depth: 5,
                requires_tt: false,
                mtdf_iterations: None,
            },
            Algorithm::AlphaBeta => AlgorithmProfile {
                display_name: "AlphaBeta++",
                recommended_depth: 5,
                min_depth: 3,
                max_depth: 7,
                requires_tt: false,
                mtdf_iterations: None,
            },
            Algorithm::Negamax => AlgorithmProfile {
                display_name: "Negamax",
                recommended_depth: 6,
                min_depth: 4,
                max_depth: 8,
                requires_tt: true,
                mtdf_iterations: None,
            },
            Algorithm::Mtdf => AlgorithmProfile {
                display_name: "MTD(f)",
                recommended_depth: 5,
                min_depth: 4,
                max_depth: 7,
                requires_tt: true,
                mtdf_iterations: Some(3),
            },
            Algorithm::Hybrid => AlgorithmProfile {
                display_name: "Hybrid",
                recommended_depth: 5,
                min_depth: 4,
                max_depth: 7,
                requires_tt: false,
                mtdf_iterations: None,
            },
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.profile().display_name)
    }
}

/// 手の並べ替えの重み
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingWeights {
    /// キラー手に一致したときの加点（他の要素の合計より大きいこと）
    pub killer_bonus: i32,
    /// 駒取りの加点
    pub capture_bonus: i32,
    /// History による加点を使うか（上限は `capture_bonus - 1`）
    pub history_enabled: bool,
}

impl Default for OrderingWeights {
    fn default() -> Self {
        Self {
            killer_bonus: 1000,
            capture_bonus: 500,
            history_enabled: true,
        }
    }
}

impl OrderingWeights {
    /// History 加点の上限
    #[inline]
    pub const fn history_cap(&self) -> i32 {
        if self.capture_bonus > 0 {
            self.capture_bonus - 1
        } else {
            0
        }
    }
}

/// Hybrid の切り替え閾値
///
/// 駒数が `piece_count` を超えるか、合法手数が `move_count` を超えればαβ系を使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HybridThresholds {
    pub piece_count: u32,
    pub move_count: u32,
}

impl Default for HybridThresholds {
    fn default() -> Self {
        Self {
            piece_count: 10,
            move_count: 20,
        }
    }
}

/// 探索設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    /// 目標探索深さ
    pub depth: u32,
    /// モンテカルロ探索に渡す時間（ミリ秒）
    pub mcts_time_ms: u64,
    /// 置換表の容量（エントリ数）
    pub tt_capacity: usize,
    /// 置換表を使うか（無効時は probe/store を行わない）
    pub tt_enabled: bool,
    /// `process` のたびに置換表をクリアするか
    pub clear_tt_between_searches: bool,
    /// 静的評価キャッシュの容量（0で無効）
    pub eval_cache_capacity: usize,
    pub ordering: OrderingWeights,
    pub hybrid: HybridThresholds,
    /// MTD(f) の反復上限
    pub mtdf_max_iterations: u32,
    /// MTD(f) の初期推定値
    pub mtdf_first_guess: i32,
    /// 同値手のランダム選択に使う乱数シード（None ならエントロピーから）
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            depth: 4,
            mcts_time_ms: 2000,
            tt_capacity: DEFAULT_TT_CAPACITY,
            tt_enabled: true,
            clear_tt_between_searches: false,
            eval_cache_capacity: 65_536,
            ordering: OrderingWeights::default(),
            hybrid: HybridThresholds::default(),
            mtdf_max_iterations: 32,
            mtdf_first_guess: 0,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// 推奨深さでアルゴリズムを指定した設定
    ///
    /// MTD(f) はプロファイルの反復回数を上限にする。
    pub fn for_algorithm(algorithm: Algorithm) -> Self {
        let profile = algorithm.profile();
        let defaults = Self::default();
        Self {
            algorithm,
            depth: profile.recommended_depth,
            mtdf_max_iterations: profile.mtdf_iterations.unwrap_or(defaults.mtdf_max_iterations),
            ..defaults
        }
    }

    /// TOML文字列から読み込む（検証込み）
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// TOMLファイルから読み込む（検証込み）
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// 設定値を検証する
    ///
    /// 探索を壊す値はエラー、推奨外の値は警告ログのみ。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::Invalid("depth must be >= 1".into()));
        }
        if self.tt_capacity == 0 {
            return Err(ConfigError::Invalid("tt_capacity must be >= 1".into()));
        }
        if self.mtdf_max_iterations == 0 {
            return Err(ConfigError::Invalid("mtdf_max_iterations must be >= 1".into()));
        }
        let w = &self.ordering;
        if w.capture_bonus < 0 {
            return Err(ConfigError::Invalid("ordering.capture_bonus must be >= 0".into()));
        }
        if w.killer_bonus < 2 * w.capture_bonus {
            return Err(ConfigError::Invalid(format!(
                "ordering.killer_bonus ({}) must be >= 2 * capture_bonus ({})",
                w.killer_bonus, w.capture_bonus
            )));
        }

        let profile = self.algorithm.profile();
        if !(profile.min_depth..=profile.max_depth).contains(&self.depth) {
            warn!(
                "depth {} is outside the recommended range {}..={} for {}",
                self.depth, profile.min_depth, profile.max_depth, self.algorithm
            );
        }
        if profile.requires_tt && !self.tt_enabled {
            warn!("{} runs without a transposition table", self.algorithm);
        }
        Ok(())
    }
}
