//! 象棋（シャンチー）探索コア
//!
//! 盤面表現・合法手生成・静的評価は外部（`GamePosition` の実装）に任せ、
//! このクレートはその上のゲーム木探索を提供する。
//!
//! - `minimax`: αβ枝刈り付きミニマックス（キラー手・History による並べ替えは差し替え可能）
//! - `negamax`: 置換表付きネガマックス
//! - `mtdf`: ネガマックス上の MTD(f)
//! - `hybrid`: 局面の複雑さでαβ系と外部モンテカルロエンジンを切り替える
//! - `SearchDriver`: 探索して最善の子へ進み、指し手を返す
//!
//! 置換表・評価キャッシュ・計測カウンタは `SearchContext` にまとめて明示的に渡す。

pub mod cache;
pub mod config;
pub mod driver;
pub mod error;
pub mod hybrid;
pub mod node;
pub mod position;
pub mod search;
pub mod stats;
pub mod synthetic;
pub mod tt;
pub mod types;

pub use config::{Algorithm, ConfigError, SearchConfig};
pub use driver::{Decision, MoveReport, SearchDriver};
pub use error::SearchError;
pub use hybrid::{MonteCarloEngine, Route};
pub use node::{NodeId, SearchTree};
pub use position::{GamePosition, Outcome};
pub use search::SearchContext;
pub use types::{Bound, Coord, Move, Side, Value};
