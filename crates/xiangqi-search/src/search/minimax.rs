//! αβ枝刈り付きミニマックス
//!
//! 値は常に赤視点。`maximizing` が true のノードでは最大値、false では最小値を採る。
//! 子は探索前に `MoveOrdering` で1度だけ並べ替える。

use super::context::{SearchContext, Window};
use super::ordering::{MoveOrdering, order_children};
use crate::node::{NodeId, SearchTree};
use crate::position::GamePosition;
use crate::types::Value;

/// ミニマックス探索
///
/// `id` の評価値（赤視点）を返し、ノードの `value` に記録する。
/// 子は展開・並べ替え済みの状態で残る。
///
/// - 合法手なし: 深さによらず手番側の負け（`Value::MATE` を手番側視点で符号付け）
/// - depth 0: 静的評価
/// - βカット時: 切った手をキラー手・Historyとして記録
pub fn minimax<P, O>(
    tree: &mut SearchTree<P>,
    id: NodeId,
    depth: u32,
    maximizing: bool,
    window: Window,
    ctx: &mut SearchContext,
    ordering: &O,
) -> Value
where
    P: GamePosition,
    O: MoveOrdering,
{
    let Window {
        mut alpha,
        mut beta,
    } = Window::new(window.alpha, window.beta);

    if depth == 0 {
        let node = tree.node(id);
        let v = if node.has_no_moves() {
            node.position().side_to_move().relative(-Value::MATE)
        } else {
            ctx.evaluate(node.position())
        };
        tree.node_mut(id).set_value(v);
        return v;
    }

    ctx.expand(tree, id);
    if tree.node(id).is_terminal() {
        let v = tree.node(id).position().side_to_move().relative(-Value::MATE);
        tree.node_mut(id).set_value(v);
        return v;
    }

    order_children(tree, id, ordering);

    let child_count = tree.node(id).children().len();
    let mut best = if maximizing {
        -Value::INFINITE
    } else {
        Value::INFINITE
    };

    for i in 0..child_count {
        let child = tree.node(id).children()[i];
        let v = minimax(
            tree,
            child,
            depth - 1,
            !maximizing,
            Window { alpha, beta },
            ctx,
            ordering,
        );

        if maximizing {
            best = best.max(v);
            alpha = alpha.max(v);
        } else {
            best = best.min(v);
            beta = beta.min(v);
        }

        if alpha >= beta {
            if let Some(mv) = tree.node(child).parent_move() {
                ordering.record_cutoff(tree.node_mut(id), mv, depth);
            }
            break;
        }
    }

    tree.node_mut(id).set_value(best);
    best
}
