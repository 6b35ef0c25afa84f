//! 盤上座標（Coord）と指し手（Move）
//!
//! 盤面表現は外部にあるため、ここでは (from, to) の座標ペアだけを扱う。

/// 盤の段数
pub const RANK_NB: u8 = 10;
/// 盤の筋数
pub const FILE_NB: u8 = 9;

/// 盤上の座標（段, 筋）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Coord {
    pub rank: u8,
    pub file: u8,
}

impl Coord {
    /// 座標を生成
    #[inline]
    pub const fn new(rank: u8, file: u8) -> Coord {
        Coord { rank, file }
    }

    /// 盤内かどうか
    #[inline]
    pub const fn is_on_board(self) -> bool {
        self.rank < RANK_NB && self.file < FILE_NB
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.rank, self.file)
    }
}

/// 指し手（移動元 -> 移動先）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
}

impl Move {
    /// 指し手を生成
    #[inline]
    pub const fn new(from: Coord, to: Coord) -> Move {
        Move { from, to }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

impl From<(Coord, Coord)> for Move {
    fn from((from, to): (Coord, Coord)) -> Move {
        Move { from, to }
    }
}

impl From<Move> for (Coord, Coord) {
    fn from(mv: Move) -> (Coord, Coord) {
        (mv.from, mv.to)
    }
}
