//! 置換表付きネガマックス
//!
//! 戻り値は手番側視点。子の値は符号を反転し、窓は `(-beta, -alpha)` にして再帰する。
//! ノードの `value` には他の探索と揃えて赤視点で記録する。

use super::context::{SearchContext, Window};
use crate::node::{NodeId, SearchTree};
use crate::position::GamePosition;
use crate::types::{Bound, Value};

/// ネガマックス探索
///
/// 1. 置換表を引き、EXACT ならその値を返す。LOWER/UPPER なら窓を狭め、
///    窓が閉じたら子を展開せずに格納値を返す（境界値であっても）。
/// 2. depth 0 なら手番側視点の静的評価（合法手がなければ `-Value::MATE`）を
///    EXACT で格納して返す。
/// 3. 子を展開し、合法手がなければ `-Value::MATE` を EXACT で格納して返す。
/// 4. 子を順に探索し、`alpha >= beta` で打ち切る。
/// 5. 結果を「呼び出し時の」窓で分類して格納する。
pub fn negamax<P: GamePosition>(
    tree: &mut SearchTree<P>,
    id: NodeId,
    depth: u32,
    window: Window,
    ctx: &mut SearchContext,
) -> Value {
    let original = Window::new(window.alpha, window.beta);
    let Window {
        mut alpha,
        mut beta,
    } = original;

    let stm = tree.node(id).position().side_to_move();
    let key = tree.node(id).position().fingerprint();

    if let Some(entry) = ctx.tt_probe(key, depth) {
        match entry.bound {
            Bound::Exact => {
                ctx.monitor_mut().record_tt_cutoff();
                tree.node_mut(id).set_value(stm.relative(entry.value));
                return entry.value;
            }
            Bound::Lower => alpha = alpha.max(entry.value),
            Bound::Upper => beta = beta.min(entry.value),
            Bound::None => {}
        }
        if alpha >= beta {
            ctx.monitor_mut().record_tt_cutoff();
            tree.node_mut(id).set_value(stm.relative(entry.value));
            return entry.value;
        }
    }

    if depth == 0 {
        let node = tree.node(id);
        let v = if node.has_no_moves() {
            -Value::MATE
        } else {
            stm.relative(ctx.evaluate(node.position()))
        };
        ctx.tt_store(key, depth, v, Bound::Exact);
        tree.node_mut(id).set_value(stm.relative(v));
        return v;
    }

    // 展開は一度だけ。合法手の有無は展開結果で判定する
    ctx.expand(tree, id);
    if tree.node(id).is_terminal() {
        let v = -Value::MATE;
        ctx.tt_store(key, depth, v, Bound::Exact);
        tree.node_mut(id).set_value(stm.relative(v));
        return v;
    }

    let child_count = tree.node(id).children().len();
    let mut best = -Value::INFINITE;
    for i in 0..child_count {
        let child = tree.node(id).children()[i];
        let v = -negamax(tree, child, depth - 1, Window::new(-beta, -alpha), ctx);
        best = best.max(v);
        alpha = alpha.max(v);
        if alpha >= beta {
            break;
        }
    }

    let bound = Bound::classify(best, original.alpha, original.beta);
    ctx.tt_store(key, depth, best, bound);
    tree.node_mut(id).set_value(stm.relative(best));
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::{RandomTree, TakeAway};
    use crate::types::{Move, Side};
    use std::cell::Cell;
    use std::rc::Rc;

    fn run(pos: TakeAway, depth: u32, ctx: &mut SearchContext) -> (Value, SearchTree<TakeAway>) {
        let mut tree = SearchTree::new(pos);
        let root = tree.root();
        let v = negamax(&mut tree, root, depth, Window::FULL, ctx);
        (v, tree)
    }

    #[test]
    fn test_value_is_side_to_move_perspective() {
        let mut ctx = SearchContext::new(1024, 0);
        // 手番側の勝ち形: 赤でも黒でも +MATE
        let (v, tree) = run(TakeAway::new(7, 3, Side::Red), 8, &mut ctx);
        assert_eq!(v, Value::MATE);
        assert_eq!(tree.node(tree.root()).value(), Some(Value::MATE));

        ctx.reset();
        let (v, tree) = run(TakeAway::new(7, 3, Side::Black), 8, &mut ctx);
        assert_eq!(v, Value::MATE);
        // ノードには赤視点で記録される
        assert_eq!(tree.node(tree.root()).value(), Some(-Value::MATE));
    }

    #[test]
    fn test_depth_zero_is_sign_adjusted_eval() {
        let mut ctx = SearchContext::new(1024, 0);
        let pos = TakeAway::new(5, 3, Side::Black);
        let (v, _) = run(pos, 0, &mut ctx);
        assert_eq!(v, Side::Black.relative(pos.evaluate()));
        let entry = ctx.tt().peek(pos.fingerprint()).copied();
        assert_eq!(entry.map(|e| e.bound), Some(Bound::Exact));
        assert_eq!(entry.map(|e| e.value), Some(v));
    }

    #[test]
    fn test_exact_hit_returns_without_expanding() {
        let mut ctx = SearchContext::new(1024, 0);
        let pos = TakeAway::new(9, 3, Side::Red);
        ctx.tt_mut().store(pos.fingerprint(), 5, Value::new(123), Bound::Exact);

        let (v, tree) = run(pos, 4, &mut ctx);
        assert_eq!(v, Value::new(123));
        assert!(!tree.node(tree.root()).is_expanded());
        assert_eq!(ctx.monitor().tt_cutoffs(), 1);
    }

    #[test]
    fn test_shallow_entry_is_ignored() {
        let mut ctx = SearchContext::new(1024, 0);
        let pos = TakeAway::new(9, 3, Side::Red);
        ctx.tt_mut().store(pos.fingerprint(), 2, Value::new(123), Bound::Exact);

        let (v, tree) = run(pos, 4, &mut ctx);
        assert_ne!(v, Value::new(123));
        assert!(tree.node(tree.root()).is_expanded());
    }

    #[test]
    fn test_bound_closes_window() {
        let mut ctx = SearchContext::new(1024, 0);
        let pos = TakeAway::new(9, 3, Side::Red);
        ctx.tt_mut().store(pos.fingerprint(), 6, Value::new(50), Bound::Lower);

        let mut tree = SearchTree::new(pos);
        let root = tree.root();
        // 下界 50 >= beta 40 で窓が閉じる
        let v = negamax(&mut tree, root, 3, Window::new(Value::new(0), Value::new(40)), &mut ctx);
        assert_eq!(v, Value::new(50));
        assert!(!tree.node(root).is_expanded());
    }

    #[test]
    fn test_fail_high_and_fail_low_bounds() {
        // 7石は手番勝ち (+MATE)。窓 (0, 10) では fail-high で LOWER
        let mut ctx = SearchContext::new(1024, 0);
        let pos = TakeAway::new(7, 3, Side::Red);
        let mut tree = SearchTree::new(pos);
        let root = tree.root();
        let v = negamax(&mut tree, root, 8, Window::new(Value::new(0), Value::new(10)), &mut ctx);
        assert!(v >= Value::new(10));
        let entry = ctx.tt().peek(pos.fingerprint()).copied();
        assert_eq!(entry.map(|e| e.bound), Some(Bound::Lower));

        // 8石は手番負け (-MATE)。窓 (0, 10) では fail-low で UPPER
        let mut ctx = SearchContext::new(1024, 0);
        let pos = TakeAway::new(8, 3, Side::Red);
        let mut tree = SearchTree::new(pos);
        let root = tree.root();
        let v = negamax(&mut tree, root, 9, Window::new(Value::new(0), Value::new(10)), &mut ctx);
        assert!(v <= Value::new(0));
        let entry = ctx.tt().peek(pos.fingerprint()).copied();
        assert_eq!(entry.map(|e| e.bound), Some(Bound::Upper));
    }

    #[test]
    fn test_terminal_sentinel_any_depth() {
        for side in [Side::Red, Side::Black] {
            for depth in 0..4 {
                let mut ctx = SearchContext::new(1024, 0);
                let pos = TakeAway::new(0, 3, side);
                let (v, _) = run(pos, depth, &mut ctx);
                assert_eq!(v, -Value::MATE);
                let entry = ctx.tt().peek(pos.fingerprint()).copied();
                assert_eq!(entry.map(|e| e.bound), Some(Bound::Exact));
                assert_eq!(entry.map(|e| e.depth), Some(depth));
            }
        }
    }

    #[test]
    fn test_tt_reuse_across_iterations() {
        let mut ctx = SearchContext::new(4096, 0);
        let pos = TakeAway::new(13, 3, Side::Red);
        let (first, _) = run(pos, 6, &mut ctx);
        let cutoffs = ctx.monitor().tt_cutoffs();
        let (second, tree) = run(pos, 6, &mut ctx);
        assert_eq!(first, second);
        assert!(ctx.monitor().tt_cutoffs() > cutoffs);
        assert!(!tree.node(tree.root()).is_expanded());
    }

    /// `has_legal_moves` を上書きしない局面。`successors` の呼び出し回数を数える
    #[derive(Clone)]
    struct CountingTree {
        inner: RandomTree,
        calls: Rc<Cell<usize>>,
    }

    impl GamePosition for CountingTree {
        fn side_to_move(&self) -> Side {
            self.inner.side_to_move()
        }

        fn successors(&self) -> Vec<(Move, Self)> {
            self.calls.set(self.calls.get() + 1);
            self.inner
                .successors()
                .into_iter()
                .map(|(mv, inner)| (mv, CountingTree { inner, calls: Rc::clone(&self.calls) }))
                .collect()
        }

        fn evaluate(&self) -> Value {
            self.inner.evaluate()
        }

        fn fingerprint(&self) -> u64 {
            self.inner.fingerprint()
        }

        fn is_capture(&self, mv: Move) -> bool {
            self.inner.is_capture(mv)
        }

        fn piece_count(&self) -> u32 {
            self.inner.piece_count()
        }
    }

    #[test]
    fn test_moves_generated_once_per_visited_node() {
        for seed in 0..8 {
            let calls = Rc::new(Cell::new(0));
            let pos = CountingTree { inner: RandomTree::new(seed, 4, 6), calls: Rc::clone(&calls) };
            let mut ctx = SearchContext::new(1024, 0);
            ctx.set_tt_enabled(false);
            let mut tree = SearchTree::new(pos);
            let root = tree.root();
            negamax(&mut tree, root, 4, Window::FULL, &mut ctx);

            // 内部ノードは展開で1回、深さ0の葉は合法手判定で1回だけ生成する
            let mut expanded = 0;
            let mut leaves = 0;
            let mut stack = vec![root];
            while let Some(id) = stack.pop() {
                let node = tree.node(id);
                if node.is_expanded() {
                    expanded += 1;
                    stack.extend_from_slice(node.children());
                } else if node.value().is_some() {
                    leaves += 1;
                }
            }
            assert!(expanded > 1, "seed {seed}");
            assert_eq!(calls.get(), expanded + leaves, "seed {seed}");
        }
    }
}
