//! 置換表モジュール
//!
//! 探索結果をキャッシュする置換表（Transposition Table）。
//!
//! - `TTEntry`: エントリ（深さ・値・境界値種別）
//! - `TranspositionTable`: テーブル本体（容量制限付き、挿入順で追い出し）
//! - `TTStats`: ヒット/ミス等の統計

mod entry;
mod table;

pub use entry::TTEntry;
pub use table::{TTStats, TranspositionTable};

/// デフォルト容量（エントリ数）
pub const DEFAULT_TT_CAPACITY: usize = 100_000;
