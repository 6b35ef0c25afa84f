//! 基本型
//!
//! - `Value`: 評価値
//! - `Bound`: 置換表の境界値種別
//! - `Side`: 手番
//! - `Coord` / `Move`: 座標と指し手

mod bound;
mod moves;
mod side;
mod value;

pub use bound::Bound;
pub use moves::{Coord, FILE_NB, Move, RANK_NB};
pub use side::Side;
pub use value::Value;
