//! 置換表エントリ

use crate::types::{Bound, Value};

/// 置換表エントリ
///
/// 値は格納時の手番視点。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    /// この値を計算したときの残り深さ
    pub depth: u32,
    /// 評価値（手番視点）
    pub value: Value,
    /// 境界値種別
    pub bound: Bound,
}

impl TTEntry {
    /// エントリを生成
    #[inline]
    pub const fn new(depth: u32, value: Value, bound: Bound) -> Self {
        Self {
            depth,
            value,
            bound,
        }
    }

    /// 要求深さに対して十分な精度を持つか
    ///
    /// 格納深さが要求深さ未満のエントリは使ってはならない。
    #[inline]
    pub const fn satisfies(&self, depth: u32) -> bool {
        self.depth >= depth
    }
}
