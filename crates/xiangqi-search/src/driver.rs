//! 探索ドライバ
//!
//! 現在のノード（探索木のルート）を保持し、`process` のたびに設定された
//! アルゴリズムで探索して最善の子へ進む。置換表・評価キャッシュ・計測カウンタは
//! `SearchContext` としてドライバが所有し、手を跨いで使い回す。

use std::time::Duration;

use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::Serialize;

use crate::config::{Algorithm, ConfigError, SearchConfig};
use crate::error::SearchError;
use crate::hybrid::{Complexity, MonteCarloEngine, Route, choose_route};
use crate::node::{NodeId, SearchTree};
use crate::position::{GamePosition, Outcome};
use crate::search::{
    KillerHistoryOrdering, MtdfOutcome, NoOrdering, SearchContext, Window, minimax, mtdf,
    negamax,
};
use crate::stats::PerformanceMonitor;
use crate::types::{Move, Side, Value};

/// 1手分の探索結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveReport {
    /// 選んだ指し手
    pub mv: Move,
    /// 評価値（赤視点）
    pub value: Value,
    /// 探索時間
    pub elapsed: Duration,
    /// 実行したアルゴリズム
    pub algorithm: Algorithm,
    /// Hybrid が選んだ経路（Hybrid 以外は None）
    pub route: Option<Route>,
    /// 指した側
    pub side: Side,
    /// この探索で評価したノード数
    pub nodes: u64,
}

/// `process` の結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Decision {
    /// 指し手を選んだ
    Move(MoveReport),
    /// 合法手がない（終局）
    Terminal(Outcome),
}

impl Decision {
    pub fn as_move(&self) -> Option<&MoveReport> {
        match self {
            Decision::Move(report) => Some(report),
            Decision::Terminal(_) => None,
        }
    }
}

/// 実際に走らせる探索カーネル（Hybrid はここで αβ に解決される）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kernel {
    Minimax,
    AlphaBeta,
    Negamax,
    Mtdf,
}

impl Kernel {
    fn for_algorithm(algorithm: Algorithm) -> Kernel {
        match algorithm {
            Algorithm::Minimax => Kernel::Minimax,
            Algorithm::AlphaBeta | Algorithm::Hybrid => Kernel::AlphaBeta,
            Algorithm::Negamax => Kernel::Negamax,
            Algorithm::Mtdf => Kernel::Mtdf,
        }
    }
}

/// 探索ドライバ
pub struct SearchDriver<P: GamePosition> {
    tree: SearchTree<P>,
    config: SearchConfig,
    ctx: SearchContext,
    rng: Xoshiro256PlusPlus,
    monte_carlo: Option<Box<dyn MonteCarloEngine<P>>>,
    last_mtdf: Option<MtdfOutcome>,
}

impl<P: GamePosition> SearchDriver<P> {
    /// 局面と設定からドライバを作る（設定は検証される）
    pub fn new(position: P, config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::seed_from_u64(rand::random()),
        };
        Ok(Self {
            tree: SearchTree::new(position),
            ctx: SearchContext::from_config(&config),
            config,
            rng,
            monte_carlo: None,
            last_mtdf: None,
        })
    }

    /// モンテカルロエンジンを接続する（Hybrid で使用）
    pub fn with_monte_carlo(mut self, engine: Box<dyn MonteCarloEngine<P>>) -> Self {
        self.monte_carlo = Some(engine);
        self
    }

    #[inline]
    pub fn current_position(&self) -> &P {
        self.tree.node(self.tree.root()).position()
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.current_position().side_to_move()
    }

    #[inline]
    pub fn tree(&self) -> &SearchTree<P> {
        &self.tree
    }

    #[inline]
    pub fn context(&self) -> &SearchContext {
        &self.ctx
    }

    #[inline]
    pub fn monitor(&self) -> &PerformanceMonitor {
        self.ctx.monitor()
    }

    /// 計測カウンタのリセット（ドライバは自動ではリセットしない）
    pub fn reset_monitor(&mut self) {
        self.ctx.monitor_mut().reset();
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// 直前の MTD(f) の境界の推移
    pub fn last_mtdf_trace(&self) -> Option<&[(Value, Value)]> {
        self.last_mtdf.as_ref().map(|out| out.trace.as_slice())
    }

    pub fn last_mtdf(&self) -> Option<&MtdfOutcome> {
        self.last_mtdf.as_ref()
    }

    /// 設定されたアルゴリズムで1手探索し、指し手を `moves` に追加する
    pub fn process(&mut self, moves: &mut Vec<Move>) -> Result<Decision, SearchError> {
        self.process_with(self.config.algorithm, moves)
    }

    /// アルゴリズムを指定して1手探索する
    ///
    /// 合法手がなければ `Decision::Terminal` を返し、`moves` は変更しない。
    pub fn process_with(
        &mut self,
        algorithm: Algorithm,
        moves: &mut Vec<Move>,
    ) -> Result<Decision, SearchError> {
        if self.config.clear_tt_between_searches {
            self.ctx.tt_mut().clear();
        }

        let side = self.side_to_move();
        let nodes_before = self.ctx.monitor().nodes_evaluated();
        self.ctx.monitor_mut().start_timer();

        let root = self.tree.root();
        self.ctx.expand(&mut self.tree, root);
        if self.tree.node(root).is_terminal() {
            self.ctx.monitor_mut().end_timer();
            let outcome = self.current_position().terminal_outcome();
            info!("{side} has no legal moves: {outcome:?}");
            return Ok(Decision::Terminal(outcome));
        }

        let (route, picked) = if algorithm == Algorithm::Hybrid {
            match self.hybrid() {
                Ok((route, picked)) => (Some(route), picked),
                Err(err) => {
                    // 失敗した探索も計測に含める
                    self.ctx.monitor_mut().end_timer();
                    return Err(err);
                }
            }
        } else {
            self.search(Kernel::for_algorithm(algorithm));
            (None, None)
        };

        let value = self.tree.node(root).value();
        let chosen = match picked {
            Some(child) => {
                let mv = self.tree.node(child).parent_move();
                self.tree.reroot(child);
                mv
            }
            None => self.move_to_best_child(),
        };
        let Some(mv) = chosen else {
            self.ctx.monitor_mut().end_timer();
            return Ok(Decision::Terminal(self.current_position().terminal_outcome()));
        };
        let value = value
            .or(self.tree.node(self.tree.root()).value())
            .unwrap_or(Value::ZERO);

        moves.push(mv);
        let elapsed = self.ctx.monitor_mut().end_timer();
        let nodes = self.ctx.monitor().nodes_evaluated().saturating_sub(nodes_before);
        info!(
            "{} {side}: {mv} value={value} time={:.3}s nodes={nodes}",
            algorithm,
            elapsed.as_secs_f64()
        );

        Ok(Decision::Move(MoveReport {
            mv,
            value,
            elapsed,
            algorithm,
            route,
            side,
            nodes,
        }))
    }

    /// 相手の指し手でルートを進める
    pub fn apply_move(&mut self, mv: Move) -> Result<(), SearchError> {
        let root = self.tree.root();
        self.ctx.expand(&mut self.tree, root);
        let child = self
            .tree
            .child_by_move(root, mv)
            .ok_or(SearchError::NoSuchMove(mv))?;
        self.tree.reroot(child);
        Ok(())
    }

    /// ルートの評価値と等しい子の中から1つをランダムに選び、そこへ進む
    ///
    /// 等しい子がない場合（置換表で打ち切られた、子の値が境界値のみ等）は
    /// 手番側から見て最も良い値の子、それもなければ最初の子を選ぶ。
    /// 合法手がなければ None。
    pub fn move_to_best_child(&mut self) -> Option<Move> {
        let root = self.tree.root();
        let node = self.tree.node(root);
        let children = node.children();
        if children.is_empty() {
            return None;
        }

        let candidates: Vec<NodeId> = match node.value() {
            Some(v) => children
                .iter()
                .copied()
                .filter(|&c| self.tree.node(c).value() == Some(v))
                .collect(),
            None => Vec::new(),
        };

        let chosen = if candidates.is_empty() {
            let side = node.position().side_to_move();
            let mut best: Option<(Value, NodeId)> = None;
            for &c in children {
                let Some(v) = self.tree.node(c).value().map(|v| side.relative(v)) else {
                    continue;
                };
                if best.is_none_or(|(b, _)| v > b) {
                    best = Some((v, c));
                }
            }
            debug!("no child matches the root value; falling back to the best valued child");
            best.map_or(children[0], |(_, c)| c)
        } else {
            candidates[self.rng.random_range(0..candidates.len())]
        };

        let mv = self.tree.node(chosen).parent_move()?;
        self.tree.reroot(chosen);
        Some(mv)
    }

    /// ルートから探索する（子の選択は呼び出し側）
    fn search(&mut self, kernel: Kernel) {
        let root = self.tree.root();
        let depth = self.config.depth;
        let maximizing = self.side_to_move().is_maximizer();
        match kernel {
            Kernel::Minimax => {
                minimax(
                    &mut self.tree,
                    root,
                    depth,
                    maximizing,
                    Window::FULL,
                    &mut self.ctx,
                    &NoOrdering,
                );
            }
            Kernel::AlphaBeta => {
                let ordering = KillerHistoryOrdering::new(self.config.ordering);
                minimax(
                    &mut self.tree,
                    root,
                    depth,
                    maximizing,
                    Window::FULL,
                    &mut self.ctx,
                    &ordering,
                );
            }
            Kernel::Negamax => {
                negamax(&mut self.tree, root, depth, Window::FULL, &mut self.ctx);
            }
            Kernel::Mtdf => {
                let guess = Value::new(self.config.mtdf_first_guess);
                let max_iterations = self.config.mtdf_max_iterations;
                let out = mtdf(
                    &mut self.tree,
                    root,
                    depth,
                    guess,
                    max_iterations,
                    &mut self.ctx,
                );
                if !out.converged {
                    debug!(
                        "mtdf stopped after {} iterations without converging: [{}, {}]",
                        out.iterations, out.lower, out.upper
                    );
                }
                self.last_mtdf = Some(out);
            }
        }
        self.confirm_ties(kernel);
    }

    /// ルートの値と同値の子を確かめ直す
    ///
    /// fail-soft の打ち切りで得た子の値は境界値なので、ルートの値と一致していても
    /// 真の値が劣ることがある。同値の子が複数ある（または未評価の子がある）場合、
    /// ルートの値を境にしたヌルウィンドウで各子を再探索し、子の値を更新する。
    /// 真に同値の子だけが元の値のまま残る。
    fn confirm_ties(&mut self, kernel: Kernel) {
        let root = self.tree.root();
        let Some(target) = self.tree.node(root).value() else {
            return;
        };
        let candidates: Vec<NodeId> = self
            .tree
            .node(root)
            .children()
            .iter()
            .copied()
            .filter(|&c| self.tree.node(c).value().is_none_or(|v| v == target))
            .collect();
        let unvalued = candidates
            .iter()
            .any(|&c| self.tree.node(c).value().is_none());
        if candidates.len() <= 1 && !unvalued {
            return;
        }

        let side = self.side_to_move();
        let depth = self.config.depth.saturating_sub(1);
        for child in candidates {
            match kernel {
                Kernel::Minimax | Kernel::AlphaBeta => {
                    // 赤番: 子の値 >= target か、黒番: 子の値 <= target か
                    let window = if side.is_maximizer() {
                        Window::null(target)
                    } else {
                        Window::new(target, target + 1)
                    };
                    let maximizing = side.opponent().is_maximizer();
                    if kernel == Kernel::AlphaBeta {
                        let ordering = KillerHistoryOrdering::new(self.config.ordering);
                        minimax(
                            &mut self.tree,
                            child,
                            depth,
                            maximizing,
                            window,
                            &mut self.ctx,
                            &ordering,
                        );
                    } else {
                        minimax(
                            &mut self.tree,
                            child,
                            depth,
                            maximizing,
                            window,
                            &mut self.ctx,
                            &NoOrdering,
                        );
                    }
                }
                Kernel::Negamax | Kernel::Mtdf => {
                    // 子の手番側視点で <= -want か
                    let want = side.relative(target);
                    negamax(
                        &mut self.tree,
                        child,
                        depth,
                        Window::null(-want + 1),
                        &mut self.ctx,
                    );
                }
            }
        }
    }

    /// Hybrid: 局面の複雑さで経路を選んで探索する
    ///
    /// モンテカルロ経路ではエンジンが選んだ子を返す。
    fn hybrid(&mut self) -> Result<(Route, Option<NodeId>), SearchError> {
        let root = self.tree.root();
        let complexity = Complexity::of(&self.tree, root);
        let route = choose_route(complexity, &self.config.hybrid, self.monte_carlo.is_some());
        debug!(
            "hybrid route {route}: pieces={} moves={}",
            complexity.piece_count, complexity.move_count
        );

        match (route, self.monte_carlo.as_mut()) {
            (Route::MonteCarlo, Some(engine)) => {
                let budget = Duration::from_millis(self.config.mcts_time_ms);
                let mv = engine.select_move(&self.tree, root, budget)?;
                debug!("{} selected {mv}", engine.name());
                let child = self
                    .tree
                    .child_by_move(root, mv)
                    .ok_or(SearchError::NoSuchMove(mv))?;
                let value = self.ctx.evaluate(self.tree.node(child).position());
                self.tree.node_mut(child).set_value(value);
                self.tree.node_mut(root).set_value(value);
                Ok((route, Some(child)))
            }
            (Route::Minimax, _) => {
                self.search(Kernel::AlphaBeta);
                Ok((route, None))
            }
            (Route::MonteCarlo | Route::MinimaxFallback, _) => {
                warn!("no Monte-Carlo engine available; falling back to alpha-beta");
                self.search(Kernel::AlphaBeta);
                Ok((Route::MinimaxFallback, None))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashSet;
    use std::rc::Rc;

    use super::*;
    use crate::synthetic::{RandomTree, TakeAway};

    fn config(algorithm: Algorithm, depth: u32) -> SearchConfig {
        SearchConfig {
            algorithm,
            depth,
            seed: Some(7),
            ..SearchConfig::default()
        }
    }

    /// 最初の合法手を選ぶエンジン
    struct FirstMoveEngine {
        calls: Rc<Cell<u32>>,
    }

    impl<P: GamePosition> MonteCarloEngine<P> for FirstMoveEngine {
        fn select_move(
            &mut self,
            tree: &SearchTree<P>,
            node: NodeId,
            _budget: Duration,
        ) -> anyhow::Result<Move> {
            self.calls.set(self.calls.get() + 1);
            let child = tree.node(node).children().first().copied();
            child
                .and_then(|c| tree.node(c).parent_move())
                .ok_or_else(|| anyhow::anyhow!("no legal moves"))
        }
    }

    /// 固定の指し手を返すエンジン
    struct FixedEngine(Move);

    impl<P: GamePosition> MonteCarloEngine<P> for FixedEngine {
        fn select_move(
            &mut self,
            _tree: &SearchTree<P>,
            _node: NodeId,
            _budget: Duration,
        ) -> anyhow::Result<Move> {
            Ok(self.0)
        }
    }

    struct FailingEngine;

    impl<P: GamePosition> MonteCarloEngine<P> for FailingEngine {
        fn select_move(
            &mut self,
            _tree: &SearchTree<P>,
            _node: NodeId,
            _budget: Duration,
        ) -> anyhow::Result<Move> {
            anyhow::bail!("playout budget exhausted")
        }
    }

    #[test]
    fn test_move_to_best_child_only_picks_tied_children() {
        let pos = TakeAway::new(7, 3, Side::Red);
        let mut seen = HashSet::new();
        for seed in 0..32 {
            let mut cfg = config(Algorithm::AlphaBeta, 4);
            cfg.seed = Some(seed);
            let mut driver = SearchDriver::new(pos, cfg).unwrap();
            let root = driver.tree.root();
            driver.tree.expand(root);
            let children = driver.tree.node(root).children().to_vec();
            for (&c, v) in children.iter().zip([3, 7, 7]) {
                driver.tree.node_mut(c).set_value(Value::new(v));
            }
            driver.tree.node_mut(root).set_value(Value::new(7));

            let mv = driver.move_to_best_child().unwrap();
            assert_ne!(mv, pos.take_move(1));
            assert_eq!(driver.current_position().stones() as i32, 7 - pos.taken_by(mv) as i32);
            seen.insert(mv);
        }
        // 同値の2手はどちらも選ばれうる
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_move_to_best_child_fallback() {
        let pos = TakeAway::new(7, 3, Side::Black);
        let mut driver = SearchDriver::new(pos, config(Algorithm::AlphaBeta, 4)).unwrap();
        let root = driver.tree.root();
        driver.tree.expand(root);
        let children = driver.tree.node(root).children().to_vec();
        // 黒番: 赤視点で最も小さい値が最善
        for (&c, v) in children.iter().zip([3, -5, 1]) {
            driver.tree.node_mut(c).set_value(Value::new(v));
        }
        driver.tree.node_mut(root).set_value(Value::new(-100));
        assert_eq!(driver.move_to_best_child(), Some(pos.take_move(2)));

        // 値がなければ最初の子
        let mut driver = SearchDriver::new(pos, config(Algorithm::AlphaBeta, 4)).unwrap();
        let root = driver.tree.root();
        driver.tree.expand(root);
        assert_eq!(driver.move_to_best_child(), Some(pos.take_move(1)));

        // 合法手なし
        let mut driver =
            SearchDriver::new(TakeAway::new(0, 3, Side::Red), config(Algorithm::AlphaBeta, 4))
                .unwrap();
        let root = driver.tree.root();
        driver.tree.expand(root);
        assert_eq!(driver.move_to_best_child(), None);
    }

    #[test]
    fn test_terminal_root_reports_outcome() {
        let pos = TakeAway::new(0, 3, Side::Red);
        for algorithm in Algorithm::ALL {
            let mut driver = SearchDriver::new(pos, config(algorithm, 4)).unwrap();
            let mut moves = Vec::new();
            let decision = driver.process(&mut moves).unwrap();
            assert_eq!(decision, Decision::Terminal(Outcome::Win(Side::Black)));
            assert!(moves.is_empty());
        }
    }

    #[test]
    fn test_every_algorithm_finds_winning_move() {
        let pos = TakeAway::new(7, 3, Side::Red);
        for algorithm in Algorithm::ALL {
            let mut driver = SearchDriver::new(pos, config(algorithm, 8)).unwrap();
            let mut moves = Vec::new();
            let decision = driver.process(&mut moves).unwrap();
            let report = decision.as_move().unwrap();
            assert_eq!(report.mv, pos.take_move(3), "{algorithm}");
            assert_eq!(report.value, Value::MATE, "{algorithm}");
            assert_eq!(report.side, Side::Red);
            assert_eq!(moves, vec![report.mv]);
            assert_eq!(driver.current_position().stones(), 4);
            assert_eq!(driver.side_to_move(), Side::Black);
        }
    }

    #[test]
    fn test_self_play_to_the_end() {
        for algorithm in [Algorithm::AlphaBeta, Algorithm::Negamax, Algorithm::Mtdf] {
            let mut driver =
                SearchDriver::new(TakeAway::new(13, 3, Side::Red), config(algorithm, 14)).unwrap();
            let mut moves = Vec::new();
            let outcome = loop {
                match driver.process(&mut moves).unwrap() {
                    Decision::Move(_) => {}
                    Decision::Terminal(outcome) => break outcome,
                }
            };
            // 13 % 4 != 0 なので先手（赤）の勝ち
            assert_eq!(outcome, Outcome::Win(Side::Red), "{algorithm}");
            assert!(!moves.is_empty());
            assert_eq!(driver.monitor().snapshot().searches as usize, moves.len() + 1);
        }
    }

    #[test]
    fn test_algorithms_agree_on_root_value() {
        for seed in 0..6u64 {
            let pos = RandomTree::new(seed, 5, 8);
            let mut values = Vec::new();
            for algorithm in [
                Algorithm::Minimax,
                Algorithm::AlphaBeta,
                Algorithm::Negamax,
                Algorithm::Mtdf,
            ] {
                let mut driver = SearchDriver::new(pos, config(algorithm, 4)).unwrap();
                let mut moves = Vec::new();
                let decision = driver.process(&mut moves).unwrap();
                let report = decision.as_move().unwrap().clone();
                // 選んだ子の値はルートの値と一致する
                let root = driver.tree().root();
                assert_eq!(
                    driver.tree().node(root).value(),
                    Some(report.value),
                    "seed {seed} {algorithm}"
                );
                values.push(report.value);
            }
            assert!(values.windows(2).all(|w| w[0] == w[1]), "seed {seed}: {values:?}");
        }
    }

    #[test]
    fn test_mtdf_trace_is_recorded() {
        let pos = RandomTree::new(11, 4, 6);
        let mut driver = SearchDriver::new(pos, config(Algorithm::Mtdf, 4)).unwrap();
        assert!(driver.last_mtdf_trace().is_none());
        driver.process(&mut Vec::new()).unwrap();
        let trace = driver.last_mtdf_trace().unwrap();
        assert!(!trace.is_empty());
        assert!(trace.iter().all(|(lower, upper)| lower <= upper));
    }

    #[test]
    fn test_hybrid_falls_back_without_engine() {
        let pos = TakeAway::new(7, 3, Side::Red);
        let mut driver = SearchDriver::new(pos, config(Algorithm::Hybrid, 8)).unwrap();
        let decision = driver.process(&mut Vec::new()).unwrap();
        let report = decision.as_move().unwrap();
        assert_eq!(report.route, Some(Route::MinimaxFallback));
        assert_eq!(report.mv, pos.take_move(3));
    }

    #[test]
    fn test_hybrid_uses_engine_on_simple_positions() {
        let calls = Rc::new(Cell::new(0));
        let pos = TakeAway::new(7, 3, Side::Red);
        let engine = FirstMoveEngine {
            calls: Rc::clone(&calls),
        };
        let mut driver = SearchDriver::new(pos, config(Algorithm::Hybrid, 8))
            .unwrap()
            .with_monte_carlo(Box::new(engine));
        let mut moves = Vec::new();
        let decision = driver.process(&mut moves).unwrap();
        let report = decision.as_move().unwrap();
        assert_eq!(report.route, Some(Route::MonteCarlo));
        assert_eq!(report.mv, pos.take_move(1));
        assert_eq!(calls.get(), 1);
        assert_eq!(driver.current_position().stones(), 6);
        assert_eq!(moves, vec![pos.take_move(1)]);
    }

    #[test]
    fn test_hybrid_material_selects_minimax() {
        let calls = Rc::new(Cell::new(0));
        let pos = RandomTree::new(5, 5, 6).with_pieces(20);
        let engine = FirstMoveEngine {
            calls: Rc::clone(&calls),
        };
        let mut driver = SearchDriver::new(pos, config(Algorithm::Hybrid, 3))
            .unwrap()
            .with_monte_carlo(Box::new(engine));
        let decision = driver.process(&mut Vec::new()).unwrap();
        assert_eq!(decision.as_move().unwrap().route, Some(Route::Minimax));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_hybrid_engine_errors_propagate() {
        let pos = TakeAway::new(7, 3, Side::Red);
        let mut driver = SearchDriver::new(pos, config(Algorithm::Hybrid, 8))
            .unwrap()
            .with_monte_carlo(Box::new(FailingEngine));
        let err = driver.process(&mut Vec::new()).unwrap_err();
        assert!(matches!(err, SearchError::MonteCarlo(_)));
        // 失敗した呼び出しも計測を閉じて1回と数える
        assert_eq!(driver.monitor().snapshot().searches, 1);
        assert!(driver.process(&mut Vec::new()).is_err());
        assert_eq!(driver.monitor().snapshot().searches, 2);

        let illegal = TakeAway::new(3, 3, Side::Red).take_move(1);
        let mut driver = SearchDriver::new(pos, config(Algorithm::Hybrid, 8))
            .unwrap()
            .with_monte_carlo(Box::new(FixedEngine(illegal)));
        let err = driver.process(&mut Vec::new()).unwrap_err();
        assert!(matches!(err, SearchError::NoSuchMove(mv) if mv == illegal));
    }

    #[test]
    fn test_apply_move() {
        let pos = TakeAway::new(9, 3, Side::Red);
        let mut driver = SearchDriver::new(pos, config(Algorithm::Negamax, 4)).unwrap();
        driver.apply_move(pos.take_move(2)).unwrap();
        assert_eq!(driver.current_position().stones(), 7);
        assert_eq!(driver.side_to_move(), Side::Black);

        let err = driver.apply_move(pos.take_move(2)).unwrap_err();
        assert!(matches!(err, SearchError::NoSuchMove(_)));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let cfg = SearchConfig {
            depth: 0,
            ..SearchConfig::default()
        };
        let result = SearchDriver::new(TakeAway::new(5, 3, Side::Red), cfg);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_tt_disabled_leaves_table_empty() {
        let mut cfg = config(Algorithm::Negamax, 6);
        cfg.tt_enabled = false;
        let mut driver = SearchDriver::new(TakeAway::new(9, 3, Side::Red), cfg).unwrap();
        let decision = driver.process(&mut Vec::new()).unwrap();
        assert_eq!(decision.as_move().unwrap().mv, TakeAway::new(9, 3, Side::Red).take_move(1));
        assert!(driver.context().tt().is_empty());
    }

    #[test]
    fn test_clear_tt_between_searches() {
        let mut cfg = config(Algorithm::Negamax, 6);
        cfg.clear_tt_between_searches = true;
        let start = TakeAway::new(13, 3, Side::Red);
        let mut driver = SearchDriver::new(start, cfg).unwrap();
        driver.process(&mut Vec::new()).unwrap();
        assert!(driver.context().tt().peek(start.fingerprint()).is_some());
        driver.process(&mut Vec::new()).unwrap();
        // 2回目の探索前にクリアされ、初期局面は2回目の探索からは到達できない
        assert!(driver.context().tt().peek(start.fingerprint()).is_none());
        assert!(!driver.context().tt().is_empty());
    }
}
