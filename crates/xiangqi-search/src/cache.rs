//! 汎用LRUキャッシュ（RecencyCache）
//!
//! 容量制限付きのキー -> 値ストア。参照したエントリを最新に昇格し、容量超過時は
//! 最も長く参照されていないエントリを追い出す。探索値そのものではなく、静的評価の
//! メモ化など付随的な用途に使う。
//!
//! 実装はスラブ上の双方向リスト + インデックスマップ。

use std::collections::HashMap;
use std::hash::Hash;

const NIL: usize = usize::MAX;

struct Slot<K, V> {
    key: K,
    value: V,
    prev: usize,
    next: usize,
}

/// キャッシュ統計
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// ヒット率（%）
    pub hit_rate: f64,
    pub size: usize,
}

/// LRUキャッシュ
pub struct RecencyCache<K, V> {
    map: HashMap<K, usize>,
    slots: Vec<Slot<K, V>>,
    /// 最新（most recently used）
    head: usize,
    /// 最古（least recently used）
    tail: usize,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl<K: Hash + Eq + Clone, V> RecencyCache<K, V> {
    /// 新しいキャッシュを作成
    ///
    /// 容量0は「何も保持しない」キャッシュになる。
    pub fn new(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity.min(1 << 16)),
            slots: Vec::with_capacity(capacity.min(1 << 16)),
            head: NIL,
            tail: NIL,
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// 値を取得し、最新に昇格する
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match self.map.get(key).copied() {
            Some(idx) => {
                self.hits += 1;
                self.promote(idx);
                Some(&self.slots[idx].value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// 順序も統計も変えずに参照する
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.map.get(key).map(|&idx| &self.slots[idx].value)
    }

    /// キーが存在するか（順序・統計は変えない）
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// 挿入または更新し、最新に昇格する
    ///
    /// 容量を超えた場合は追い出したエントリを返す。
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if self.capacity == 0 {
            return Some((key, value));
        }

        if let Some(&idx) = self.map.get(&key) {
            self.slots[idx].value = value;
            self.promote(idx);
            return None;
        }

        if self.slots.len() < self.capacity {
            let idx = self.slots.len();
            self.slots.push(Slot {
                key: key.clone(),
                value,
                prev: NIL,
                next: NIL,
            });
            self.map.insert(key, idx);
            self.push_front(idx);
            return None;
        }

        // 満杯: 最古スロットを再利用する
        let idx = self.tail;
        self.unlink(idx);
        let old_key = std::mem::replace(&mut self.slots[idx].key, key.clone());
        let old_value = std::mem::replace(&mut self.slots[idx].value, value);
        self.map.remove(&old_key);
        self.map.insert(key, idx);
        self.push_front(idx);
        Some((old_key, old_value))
    }

    /// 全エントリと統計をクリア
    pub fn clear(&mut self) {
        self.map.clear();
        self.slots.clear();
        self.head = NIL;
        self.tail = NIL;
        self.hits = 0;
        self.misses = 0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 統計を取得
    pub fn stats(&self) -> CacheStats {
        let total = self.hits + self.misses;
        let hit_rate = if total > 0 {
            self.hits as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            hit_rate,
            size: self.len(),
        }
    }

    /// 新しい順にキーを列挙する
    pub fn keys_by_recency(&self) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.len());
        let mut cur = self.head;
        while cur != NIL {
            keys.push(self.slots[cur].key.clone());
            cur = self.slots[cur].next;
        }
        keys
    }

    fn promote(&mut self, idx: usize) {
        if self.head == idx {
            return;
        }
        self.unlink(idx);
        self.push_front(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.slots[idx].prev, self.slots[idx].next);
        if prev != NIL {
            self.slots[prev].next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.slots[next].prev = prev;
        } else {
            self.tail = prev;
        }
        self.slots[idx].prev = NIL;
        self.slots[idx].next = NIL;
    }

    fn push_front(&mut self, idx: usize) {
        self.slots[idx].prev = NIL;
        self.slots[idx].next = self.head;
        if self.head != NIL {
            self.slots[self.head].prev = idx;
        }
        self.head = idx;
        if self.tail == NIL {
            self.tail = idx;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_evicts_least_recently_used() {
        let mut cache = RecencyCache::new(3);
        cache.put("A", 1);
        cache.put("B", 2);
        cache.put("C", 3);
        assert_eq!(cache.get(&"A"), Some(&1));

        // 参照されたAは残り、最古のBが追い出される
        assert_eq!(cache.put("D", 4), Some(("B", 2)));
        assert_eq!(cache.keys_by_recency(), vec!["D", "A", "C"]);
    }

    #[test]
    fn test_lru_access_then_insert_scenario() {
        // 容量2: A, B を入れ、A を参照、C を入れる -> B が追い出されて {A, C}
        let mut cache = RecencyCache::new(2);
        cache.put('A', 1);
        cache.put('B', 2);
        assert_eq!(cache.get(&'A'), Some(&1));
        assert_eq!(cache.put('C', 3), Some(('B', 2)));
        assert!(cache.contains(&'A'));
        assert!(cache.contains(&'C'));
        assert!(!cache.contains(&'B'));
    }

    #[test]
    fn test_lru_update_promotes() {
        let mut cache = RecencyCache::new(2);
        cache.put(1, "one");
        cache.put(2, "two");
        assert_eq!(cache.put(1, "uno"), None);
        cache.put(3, "three");
        assert_eq!(cache.peek(&1), Some(&"uno"));
        assert!(!cache.contains(&2));
    }

    #[test]
    fn test_lru_stats() {
        let mut cache = RecencyCache::new(4);
        cache.put(1u64, 10);
        assert!(cache.get(&1).is_some());
        assert!(cache.get(&2).is_none());
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
        assert!((stats.hit_rate - 50.0).abs() < f64::EPSILON);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn test_lru_peek_does_not_promote() {
        let mut cache = RecencyCache::new(2);
        cache.put(1, ());
        cache.put(2, ());
        let _ = cache.peek(&1);
        cache.put(3, ());
        assert!(!cache.contains(&1));
    }

    #[test]
    fn test_lru_zero_capacity() {
        let mut cache = RecencyCache::new(0);
        assert_eq!(cache.put(1, 1), Some((1, 1)));
        assert!(cache.is_empty());
    }
}
