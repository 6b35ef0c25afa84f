//! Hybrid 切り替え
//!
//! 局面の複雑さ（駒数・合法手数）を見て、αβ系かモンテカルロ系かを選ぶ。
//! 駒数か合法手数のどちらかが閾値を超えればαβ系、どちらも閾値以下なら
//! モンテカルロ系（未接続ならαβ系にフォールバック）。

use std::fmt;
use std::time::Duration;

use crate::config::HybridThresholds;
use crate::node::{NodeId, SearchTree};
use crate::position::GamePosition;
use crate::types::Move;

/// 外部のモンテカルロ木探索エンジン
///
/// 探索木は共有参照で渡される。エンジンは呼び出しの間だけ木を参照でき、
/// ノードを保持し続けてはならない（呼び出し後にドライバが木を再ルートする）。
pub trait MonteCarloEngine<P: GamePosition> {
    /// ログ表示用の名前
    fn name(&self) -> &str {
        "mcts"
    }

    /// `node` から指す手を `budget` 以内に選ぶ
    fn select_move(
        &mut self,
        tree: &SearchTree<P>,
        node: NodeId,
        budget: Duration,
    ) -> anyhow::Result<Move>;
}

/// 局面の複雑さ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Complexity {
    /// 駒数（両者合計）
    pub piece_count: u32,
    /// 合法手数
    pub move_count: u32,
}

impl Complexity {
    /// 展開済みのノードから測る
    pub fn of<P: GamePosition>(tree: &SearchTree<P>, id: NodeId) -> Complexity {
        let node = tree.node(id);
        Complexity {
            piece_count: node.position().piece_count(),
            move_count: u32::try_from(node.children().len()).unwrap_or(u32::MAX),
        }
    }
}

/// 選択された探索経路
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// 複雑な局面: αβ系
    Minimax,
    /// 単純な局面: モンテカルロ系
    MonteCarlo,
    /// 単純な局面だがモンテカルロ系が未接続
    MinimaxFallback,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Route::Minimax => "minimax",
            Route::MonteCarlo => "monte-carlo",
            Route::MinimaxFallback => "minimax (fallback)",
        };
        f.write_str(s)
    }
}

/// 経路を選ぶ
pub fn choose_route(
    complexity: Complexity,
    thresholds: &HybridThresholds,
    monte_carlo_available: bool,
) -> Route {
    if complexity.piece_count > thresholds.piece_count
        || complexity.move_count > thresholds.move_count
    {
        Route::Minimax
    } else if monte_carlo_available {
        Route::MonteCarlo
    } else {
        Route::MinimaxFallback
    }
}
