//! 探索アルゴリズム
//!
//! - `minimax`: αβ枝刈り付きミニマックス（並べ替え戦略を差し替え可能）
//! - `negamax`: 置換表付きネガマックス
//! - `mtdf`: ネガマックスのヌルウィンドウ探索を繰り返す MTD(f)
//! - `ordering`: 手の並べ替え戦略（キラー手・History）
//!
//! 置換表・評価キャッシュ・計測カウンタは `SearchContext` にまとめ、探索関数へ
//! `&mut` で渡す。プロセス全体で共有するグローバル状態は持たない。

mod context;
pub mod minimax;
pub mod mtdf;
pub mod negamax;
pub mod ordering;

pub use context::{SearchContext, Window};
pub use minimax::minimax;
pub use mtdf::{MtdfOutcome, mtdf};
pub use negamax::negamax;
pub use ordering::{KillerHistoryOrdering, MoveOrdering, NoOrdering, order_children};
