//! MTD(f)
//!
//! ヌルウィンドウのネガマックスを繰り返し、下界と上界を狭めて真の値に収束させる。
//! 探索間で置換表を共有するので、2回目以降のプローブは大半が置換表で打ち切られる。

use log::debug;

use super::context::{SearchContext, Window};
use super::negamax::negamax;
use crate::node::{NodeId, SearchTree};
use crate::position::GamePosition;
use crate::types::Value;

/// MTD(f) の結果（値はすべて手番側視点）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MtdfOutcome {
    /// 最後のプローブの値
    pub value: Value,
    pub lower: Value,
    pub upper: Value,
    /// 実行したプローブ数
    pub iterations: u32,
    /// 下界と上界が一致したか
    pub converged: bool,
    /// 各プローブ後の (lower, upper)
    pub trace: Vec<(Value, Value)>,
}

/// MTD(f) 探索
///
/// `first_guess` は ±`Value::MATE` に丸める。`max_iterations` 回で打ち切った場合は
/// `converged == false` となり、`value` は最後のプローブの値（境界値）になる。
pub fn mtdf<P: GamePosition>(
    tree: &mut SearchTree<P>,
    id: NodeId,
    depth: u32,
    first_guess: Value,
    max_iterations: u32,
    ctx: &mut SearchContext,
) -> MtdfOutcome {
    let mut g = first_guess.clamp(-Value::MATE, Value::MATE);
    let mut lower = -Value::INFINITE;
    let mut upper = Value::INFINITE;
    let mut trace = Vec::new();
    let mut iterations = 0;

    while lower < upper && iterations < max_iterations.max(1) {
        let beta = g.max(lower + 1);
        g = negamax(tree, id, depth, Window::null(beta), ctx);

        // 境界が交差しないように丸める
        if g < beta {
            upper = upper.min(g.max(lower));
        } else {
            lower = lower.max(g.min(upper));
        }
        iterations += 1;
        trace.push((lower, upper));
        debug!("mtdf iteration {iterations}: beta={beta} g={g} bounds=[{lower}, {upper}]");
    }

    MtdfOutcome {
        value: g,
        lower,
        upper,
        iterations,
        converged: lower >= upper,
        trace,
    }
}
