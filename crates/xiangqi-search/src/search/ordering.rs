//! 手の並べ替え
//!
//! 子ノードの並べ替えは1ノードにつき1回だけ行い（`sorted` フラグ）、以降は
//! 同じ順序を使い回す。スコアは以下の合計:
//!
//! - キラー手: `killer_bonus`（他の要素の合計を必ず上回る）
//! - 駒取り: `capture_bonus`
//! - History: 累積スコア（`capture_bonus - 1` で頭打ち）
//!
//! 同点は生成順を保つ（安定ソート）。

use crate::config::OrderingWeights;
use crate::node::{NodeId, SearchNode, SearchTree};
use crate::position::GamePosition;
use crate::types::Move;

/// 並べ替え戦略
pub trait MoveOrdering {
    /// 並べ替えを行うか
    fn enabled(&self) -> bool;

    /// `node` における指し手 `mv` の並べ替えスコア
    fn score<P: GamePosition>(&self, node: &SearchNode<P>, mv: Move, is_capture: bool) -> i32;

    /// `node` で `mv` がカットオフを起こしたときの更新
    fn record_cutoff<P: GamePosition>(&self, node: &mut SearchNode<P>, mv: Move, depth: u32);
}

/// 並べ替えなし（素のミニマックス）
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOrdering;

impl MoveOrdering for NoOrdering {
    #[inline]
    fn enabled(&self) -> bool {
        false
    }

    #[inline]
    fn score<P: GamePosition>(&self, _node: &SearchNode<P>, _mv: Move, _is_capture: bool) -> i32 {
        0
    }

    #[inline]
    fn record_cutoff<P: GamePosition>(&self, _node: &mut SearchNode<P>, _mv: Move, _depth: u32) {}
}

/// キラー手 + 駒取り + History
#[derive(Debug, Clone, Copy, Default)]
pub struct KillerHistoryOrdering {
    weights: OrderingWeights,
}

impl KillerHistoryOrdering {
    pub fn new(weights: OrderingWeights) -> Self {
        Self { weights }
    }

    #[inline]
    pub fn weights(&self) -> &OrderingWeights {
        &self.weights
    }
}

impl MoveOrdering for KillerHistoryOrdering {
    #[inline]
    fn enabled(&self) -> bool {
        true
    }

    fn score<P: GamePosition>(&self, node: &SearchNode<P>, mv: Move, is_capture: bool) -> i32 {
        let mut score = 0;
        if node.killers().contains(mv) {
            score += self.weights.killer_bonus;
        }
        if is_capture {
            score += self.weights.capture_bonus;
        }
        if self.weights.history_enabled {
            let cap = self.weights.history_cap().max(0);
            score += i32::try_from(node.history(mv)).unwrap_or(i32::MAX).min(cap);
        }
        score
    }

    fn record_cutoff<P: GamePosition>(&self, node: &mut SearchNode<P>, mv: Move, depth: u32) {
        node.record_cutoff(mv, depth, self.weights.history_enabled);
    }
}

/// `id` の子を並べ替える
///
/// 並べ替え済みのノード、および戦略が無効な場合は何もしない。
/// 並べ替えを行った場合は true を返す。
pub fn order_children<P, O>(tree: &mut SearchTree<P>, id: NodeId, ordering: &O) -> bool
where
    P: GamePosition,
    O: MoveOrdering,
{
    if !ordering.enabled() || tree.node(id).is_sorted() {
        return false;
    }

    let node = tree.node(id);
    let mut scored: Vec<(i32, NodeId)> = node
        .children()
        .iter()
        .map(|&child| {
            let score = match tree.node(child).parent_move() {
                Some(mv) => ordering.score(node, mv, node.position().is_capture(mv)),
                None => 0,
            };
            (score, child)
        })
        .collect();
    // 安定ソートなので同点は生成順のまま
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let order = scored.into_iter().map(|(_, child)| child).collect();
    tree.set_child_order(id, order);
    true
}
