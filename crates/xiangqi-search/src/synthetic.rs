//! 合成局面
//!
//! 盤面実装を持たない探索コアのベンチマーク・テスト用の局面。
//!
//! - `TakeAway`: 石取りゲーム。手順前後で同一局面に合流する（置換表が効く）
//! - `RandomTree`: シードから決定的に生成されるランダムな木

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::position::GamePosition;
use crate::types::{Coord, FILE_NB, Move, Side, Value};

/// 石番号を盤上座標に写す
#[inline]
fn square_of(n: u8) -> Coord {
    Coord::new(n / FILE_NB, n % FILE_NB)
}

/// 石取りゲーム
///
/// 手番側は1〜`max_take`個の石を取る。石がなくなった局面で手番の側は指す手がなく負け。
/// 石数は盤のマス数（90）未満に制限する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TakeAway {
    stones: u8,
    max_take: u8,
    side: Side,
}

impl TakeAway {
    /// 評価値の大きさ
    pub const EVAL_MAGNITUDE: i32 = 100;

    pub fn new(stones: u8, max_take: u8, side: Side) -> Self {
        Self {
            stones: stones.min(89),
            max_take: max_take.clamp(1, 88),
            side,
        }
    }

    #[inline]
    pub fn stones(&self) -> u8 {
        self.stones
    }

    /// `take` 個取る指し手
    pub fn take_move(&self, take: u8) -> Move {
        Move::new(square_of(self.stones), square_of(self.stones.saturating_sub(take)))
    }

    /// 指し手から取った石の数
    pub fn taken_by(&self, mv: Move) -> u8 {
        let to = mv.to.rank * FILE_NB + mv.to.file;
        self.stones.saturating_sub(to)
    }
}

impl GamePosition for TakeAway {
    fn side_to_move(&self) -> Side {
        self.side
    }

    fn successors(&self) -> Vec<(Move, Self)> {
        (1..=self.max_take.min(self.stones))
            .map(|take| {
                let next = TakeAway {
                    stones: self.stones - take,
                    max_take: self.max_take,
                    side: self.side.opponent(),
                };
                (self.take_move(take), next)
            })
            .collect()
    }

    fn has_legal_moves(&self) -> bool {
        self.stones > 0
    }

    /// 石数が `max_take + 1` の倍数なら手番側の負け形
    fn evaluate(&self) -> Value {
        let for_side_to_move = if self.stones % (self.max_take + 1) == 0 {
            -Self::EVAL_MAGNITUDE
        } else {
            Self::EVAL_MAGNITUDE
        };
        self.side.relative(Value::new(for_side_to_move))
    }

    fn fingerprint(&self) -> u64 {
        ((self.max_take as u64) << 16) | ((self.stones as u64) << 1) | self.side.index() as u64
    }

    /// 最大数を取る手を「駒取り」とみなす
    fn is_capture(&self, mv: Move) -> bool {
        self.taken_by(mv) == self.max_take
    }

    fn piece_count(&self) -> u32 {
        self.stones as u32
    }
}

/// シードから決定的に生成されるランダムな木
///
/// 各ノードの分岐数・評価値・駒取りフラグは、そのノードのシードで初期化した
/// Xoshiro256PlusPlus から引く。`max_ply` に達したノードと、一定確率で選ばれる
/// ノードは合法手なし（終局）になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RandomTree {
    seed: u64,
    ply: u8,
    max_ply: u8,
    branching: u8,
    pieces: u32,
    side: Side,
}

/// 子ノードを持たない確率（1/N）
const TERMINAL_ONE_IN: u32 = 13;

impl RandomTree {
    pub fn new(seed: u64, branching: u8, max_ply: u8) -> Self {
        Self {
            seed,
            ply: 0,
            max_ply,
            branching: branching.clamp(1, 89),
            pieces: 32,
            side: Side::Red,
        }
    }

    /// 駒数を指定する（Hybrid の切り替えテスト用）
    pub fn with_pieces(mut self, pieces: u32) -> Self {
        self.pieces = pieces;
        self
    }

    fn rng(&self) -> Xoshiro256PlusPlus {
        Xoshiro256PlusPlus::seed_from_u64(self.seed)
    }

    fn child_count(&self) -> u8 {
        if self.ply >= self.max_ply {
            return 0;
        }
        let mut rng = self.rng();
        // ルートは必ず指し手を持つ
        if self.ply > 0 && rng.random_range(0..TERMINAL_ONE_IN) == 0 {
            return 0;
        }
        rng.random_range(1..=self.branching)
    }

    fn child_seed(&self, index: u8) -> u64 {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(self.seed ^ 0x9E37_79B9_7F4A_7C15);
        let mut seed = 0;
        for _ in 0..=index {
            seed = rng.random::<u64>();
        }
        seed
    }

    fn child_is_capture(&self, index: u8) -> bool {
        self.child_seed(index) % 4 == 0
    }
}

impl GamePosition for RandomTree {
    fn side_to_move(&self) -> Side {
        self.side
    }

    fn successors(&self) -> Vec<(Move, Self)> {
        let from = square_of(self.ply % 90);
        (0..self.child_count())
            .map(|i| {
                let capture = self.child_is_capture(i);
                let child = RandomTree {
                    seed: self.child_seed(i),
                    ply: self.ply + 1,
                    max_ply: self.max_ply,
                    branching: self.branching,
                    pieces: if capture { self.pieces.saturating_sub(1) } else { self.pieces },
                    side: self.side.opponent(),
                };
                (Move::new(from, square_of(i)), child)
            })
            .collect()
    }

    fn has_legal_moves(&self) -> bool {
        self.child_count() > 0
    }

    fn evaluate(&self) -> Value {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(self.seed.rotate_left(17));
        Value::new(rng.random_range(-500..=500))
    }

    fn fingerprint(&self) -> u64 {
        self.seed
    }

    fn is_capture(&self, mv: Move) -> bool {
        let index = mv.to.rank * FILE_NB + mv.to.file;
        index < self.child_count() && self.child_is_capture(index)
    }

    fn piece_count(&self) -> u32 {
        self.pieces
    }
}
