//! 手番（Side）

use super::Value;

/// 手番（赤/黒）
///
/// 評価値は赤視点なので、ミニマックスでは赤が最大化側になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Side {
    Red = 0,
    Black = 1,
}

impl Side {
    /// 手番の数
    pub const NUM: usize = 2;

    /// 相手番を返す
    #[inline]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    /// 最大化側かどうか
    #[inline]
    pub const fn is_maximizer(self) -> bool {
        matches!(self, Side::Red)
    }

    /// 赤視点の値に掛ける符号
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Side::Red => 1,
            Side::Black => -1,
        }
    }

    /// 赤視点の値を手番視点に変換する（逆変換も同じ）
    #[inline]
    pub fn relative(self, v: Value) -> Value {
        v * self.sign()
    }

    /// インデックスとして使用（配列アクセス用）
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::ops::Not for Side {
    type Output = Side;

    #[inline]
    fn not(self) -> Side {
        self.opponent()
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Red => f.write_str("RED"),
            Side::Black => f.write_str("BLACK"),
        }
    }
}
