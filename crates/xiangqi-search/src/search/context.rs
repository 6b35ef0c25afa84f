//! 探索コンテキストと探索窓

use crate::cache::RecencyCache;
use crate::config::SearchConfig;
use crate::node::{NodeId, SearchTree};
use crate::position::GamePosition;
use crate::stats::PerformanceMonitor;
use crate::tt::{TTEntry, TranspositionTable};
use crate::types::{Bound, Value};

/// 探索窓 (alpha, beta)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub alpha: Value,
    pub beta: Value,
}

impl Window {
    /// 制限なし
    pub const FULL: Window = Window {
        alpha: Value::new(-Value::INFINITE.raw()),
        beta: Value::INFINITE,
    };

    /// 窓を作る
    ///
    /// `beta <= alpha` の場合は `(alpha, alpha + 1)` の最小窓に広げる。
    #[inline]
    pub fn new(alpha: Value, beta: Value) -> Window {
        if beta <= alpha {
            Window {
                alpha,
                beta: alpha + 1,
            }
        } else {
            Window { alpha, beta }
        }
    }

    /// `beta` を上端とするヌルウィンドウ `(beta - 1, beta)`
    #[inline]
    pub fn null(beta: Value) -> Window {
        Window {
            alpha: beta - 1,
            beta,
        }
    }

    /// 手番を入れ替えた窓 `(-beta, -alpha)`
    #[inline]
    pub fn flipped(self) -> Window {
        Window::new(-self.beta, -self.alpha)
    }
}

/// 探索コンテキスト
///
/// 1回のトップレベル探索の間、置換表・評価キャッシュ・計測カウンタを共有する。
/// スレッド間共有は想定しない。
pub struct SearchContext {
    tt: TranspositionTable,
    eval_cache: RecencyCache<u64, Value>,
    monitor: PerformanceMonitor,
    tt_enabled: bool,
}

impl SearchContext {
    /// 容量を指定して作成（評価キャッシュ容量0で無効）
    pub fn new(tt_capacity: usize, eval_cache_capacity: usize) -> Self {
        Self {
            tt: TranspositionTable::new(tt_capacity),
            eval_cache: RecencyCache::new(eval_cache_capacity),
            monitor: PerformanceMonitor::new(),
            tt_enabled: true,
        }
    }

    /// 設定から作成
    pub fn from_config(config: &SearchConfig) -> Self {
        let mut ctx = Self::new(config.tt_capacity, config.eval_cache_capacity);
        ctx.tt_enabled = config.tt_enabled;
        ctx
    }

    #[inline]
    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    #[inline]
    pub fn tt_mut(&mut self) -> &mut TranspositionTable {
        &mut self.tt
    }

    #[inline]
    pub fn eval_cache(&self) -> &RecencyCache<u64, Value> {
        &self.eval_cache
    }

    #[inline]
    pub fn monitor(&self) -> &PerformanceMonitor {
        &self.monitor
    }

    #[inline]
    pub fn monitor_mut(&mut self) -> &mut PerformanceMonitor {
        &mut self.monitor
    }

    #[inline]
    pub fn tt_enabled(&self) -> bool {
        self.tt_enabled
    }

    pub fn set_tt_enabled(&mut self, enabled: bool) {
        self.tt_enabled = enabled;
    }

    /// 静的評価（赤視点）
    ///
    /// 評価ノード数を記録し、評価キャッシュが有効なら局面キーでメモ化する。
    pub fn evaluate<P: GamePosition>(&mut self, pos: &P) -> Value {
        self.monitor.record_node_evaluation(1);
        if self.eval_cache.capacity() == 0 {
            return pos.evaluate();
        }
        let key = pos.fingerprint();
        if let Some(&v) = self.eval_cache.get(&key) {
            return v;
        }
        let v = pos.evaluate();
        self.eval_cache.put(key, v);
        v
    }

    /// ノードを展開し、生成手数を記録する
    pub fn expand<P: GamePosition>(&mut self, tree: &mut SearchTree<P>, id: NodeId) -> usize {
        let generated = tree.expand(id);
        self.monitor.record_move_generation(generated as u64);
        generated
    }

    /// 置換表を検索（無効時は常にNone）
    #[inline]
    pub fn tt_probe(&mut self, key: u64, depth: u32) -> Option<TTEntry> {
        if !self.tt_enabled {
            return None;
        }
        self.tt.probe(key, depth)
    }

    /// 置換表に書き込む（無効時は何もしない）
    #[inline]
    pub fn tt_store(&mut self, key: u64, depth: u32, value: Value, bound: Bound) {
        if self.tt_enabled {
            self.tt.store(key, depth, value, bound);
        }
    }

    /// 置換表・評価キャッシュ・計測カウンタをすべてクリア
    pub fn reset(&mut self) {
        self.tt.clear();
        self.eval_cache.clear();
        self.monitor.reset();
    }
}
