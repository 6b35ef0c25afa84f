//! 探索エラー
//!
//! 合法手のない局面は正常な終局として扱うため、ここには含めない。
//! 設定の不備は `SearchDriver::new` が `ConfigError` で返す。

use crate::types::Move;

/// 探索エラー
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// 現在のノードの子に存在しない指し手で再ルートしようとした
    #[error("move {0} is not legal in the current position")]
    NoSuchMove(Move),
    /// 外部モンテカルロエンジンの失敗
    #[error(transparent)]
    MonteCarlo(#[from] anyhow::Error),
}
