//! TranspositionTable本体
//!
//! - 局面キー（fingerprint）-> エントリ のマップ
//! - 容量を超えたら最も古く挿入されたキーから追い出す
//! - probe/store操作

use std::collections::{HashMap, VecDeque};

use log::trace;

use super::entry::TTEntry;
use crate::types::{Bound, Value};

/// 置換表の統計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct TTStats {
    /// 要求深さを満たすエントリが見つかった回数
    pub hits: u64,
    /// 見つからなかった（または深さ不足の）回数
    pub misses: u64,
    /// 書き込み回数
    pub stores: u64,
    /// 容量超過による追い出し回数
    pub evictions: u64,
}

impl TTStats {
    /// ヒット率（%）
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64 * 100.0
        }
    }
}

/// 置換表
///
/// 上書きは常に行う（replace-always）。既存キーの上書きでは挿入順の位置は変わらない。
pub struct TranspositionTable {
    table: HashMap<u64, TTEntry>,
    /// 挿入順（追い出し順）
    order: VecDeque<u64>,
    capacity: usize,
    stats: TTStats,
}

impl TranspositionTable {
    /// 新しい置換表を作成（容量はエントリ数）
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            table: HashMap::new(),
            order: VecDeque::new(),
            capacity,
            stats: TTStats::default(),
        }
    }

    /// 置換表を検索
    ///
    /// 格納深さが `depth` 以上のエントリだけを返す。
    pub fn probe(&mut self, key: u64, depth: u32) -> Option<TTEntry> {
        match self.table.get(&key) {
            Some(entry) if entry.satisfies(depth) => {
                self.stats.hits += 1;
                Some(*entry)
            }
            _ => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// 統計を変えずにエントリを覗く
    pub fn peek(&self, key: u64) -> Option<&TTEntry> {
        self.table.get(&key)
    }

    /// エントリを書き込む
    ///
    /// 容量に達している場合は最も古いエントリを追い出してから挿入する。失敗はしない。
    pub fn store(&mut self, key: u64, depth: u32, value: Value, bound: Bound) {
        self.stats.stores += 1;
        let entry = TTEntry::new(depth, value, bound);

        if let Some(slot) = self.table.get_mut(&key) {
            *slot = entry;
            return;
        }

        if self.table.len() >= self.capacity {
            self.evict_oldest();
        }
        self.table.insert(key, entry);
        self.order.push_back(key);
    }

    fn evict_oldest(&mut self) {
        while let Some(old) = self.order.pop_front() {
            if self.table.remove(&old).is_some() {
                self.stats.evictions += 1;
                trace!("tt evict key={old:#018x}");
                return;
            }
        }
    }

    /// クリア（統計もリセット）
    pub fn clear(&mut self) {
        self.table.clear();
        self.order.clear();
        self.stats = TTStats::default();
    }

    /// 格納エントリ数
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// 空かどうか
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// 容量
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 置換表の使用率を1000分率で返す
    pub fn hashfull(&self) -> u32 {
        (self.table.len() as u64 * 1000 / self.capacity as u64) as u32
    }

    /// 統計
    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tt_probe_empty() {
        let mut tt = TranspositionTable::new(16);
        assert!(tt.probe(12345, 0).is_none());
        assert_eq!(tt.stats().misses, 1);
    }

    #[test]
    fn test_tt_store_and_probe_exact() {
        let mut tt = TranspositionTable::new(16);
        tt.store(42, 5, Value::new(77), Bound::Exact);

        for depth in 0..=5 {
            let e = tt.probe(42, depth).expect("depth <= stored depth must hit");
            assert_eq!(e.value, Value::new(77));
            assert_eq!(e.bound, Bound::Exact);
        }
        assert_eq!(tt.stats().hits, 6);
    }

    #[test]
    fn test_tt_rejects_shallow_entry() {
        let mut tt = TranspositionTable::new(16);
        tt.store(42, 3, Value::new(10), Bound::Lower);
        assert!(tt.probe(42, 4).is_none());
        assert!(tt.probe(42, 100).is_none());
        assert!(tt.probe(42, 3).is_some());
    }

    #[test]
    fn test_tt_overwrite_keeps_single_entry() {
        let mut tt = TranspositionTable::new(16);
        tt.store(1, 2, Value::new(5), Bound::Upper);
        tt.store(1, 1, Value::new(9), Bound::Exact);
        assert_eq!(tt.len(), 1);
        let e = tt.peek(1).unwrap();
        assert_eq!(e.depth, 1);
        assert_eq!(e.value, Value::new(9));
    }

    #[test]
    fn test_tt_evicts_oldest_inserted() {
        let mut tt = TranspositionTable::new(2);
        tt.store(1, 1, Value::new(1), Bound::Exact);
        tt.store(2, 1, Value::new(2), Bound::Exact);
        // 上書きしても挿入順は変わらない
        tt.store(1, 2, Value::new(11), Bound::Exact);
        tt.store(3, 1, Value::new(3), Bound::Exact);

        assert_eq!(tt.len(), 2);
        assert!(tt.peek(1).is_none());
        assert!(tt.peek(2).is_some());
        assert!(tt.peek(3).is_some());
        assert_eq!(tt.stats().evictions, 1);
    }

    #[test]
    fn test_tt_clear_and_hashfull() {
        let mut tt = TranspositionTable::new(4);
        assert_eq!(tt.hashfull(), 0);
        tt.store(1, 1, Value::ZERO, Bound::Exact);
        tt.store(2, 1, Value::ZERO, Bound::Exact);
        assert_eq!(tt.hashfull(), 500);

        tt.clear();
        assert!(tt.is_empty());
        assert!(tt.probe(1, 0).is_none());
        assert_eq!(tt.stats().stores, 0);
    }

    #[test]
    fn test_tt_zero_capacity_is_clamped() {
        let mut tt = TranspositionTable::new(0);
        assert_eq!(tt.capacity(), 1);
        tt.store(1, 1, Value::ZERO, Bound::Exact);
        tt.store(2, 1, Value::ZERO, Bound::Exact);
        assert_eq!(tt.len(), 1);
        assert!(tt.peek(2).is_some());
    }
}
