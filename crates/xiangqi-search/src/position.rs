//! 局面の外部インターフェース
//!
//! 盤面表現・合法手生成・静的評価は探索コアの外側にある。探索はこのトレイトだけを
//! 通して局面に触れる。

use crate::types::{Move, Side, Value};

/// 終局結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Outcome {
    /// 指定した側の勝ち
    Win(Side),
    /// 引き分け
    Draw,
}

/// 探索対象の局面
///
/// 実装側への要求:
/// - `successors` は合法手とその結果局面を漏れなく返すこと
/// - `evaluate` は常に赤視点の値を返すこと（手番視点への変換は探索側が行う）
/// - `fingerprint` は同一の盤面配置に対して同一の値を返すこと
pub trait GamePosition: Clone {
    /// 手番
    fn side_to_move(&self) -> Side;

    /// 合法手と、それを指した後の局面の一覧
    fn successors(&self) -> Vec<(Move, Self)>;

    /// 合法手が1つ以上あるか
    ///
    /// 深さ0の葉で終局判定に使う。既定実装は `successors` を生成するので、
    /// 安価に判定できる実装は上書きすること。
    fn has_legal_moves(&self) -> bool {
        !self.successors().is_empty()
    }

    /// 静的評価（赤視点）
    fn evaluate(&self) -> Value;

    /// 置換表キー
    fn fingerprint(&self) -> u64;

    /// 移動先に相手の駒があるか
    fn is_capture(&self, mv: Move) -> bool;

    /// 盤上の駒数（両者合計）
    fn piece_count(&self) -> u32;

    /// 合法手がないときの終局結果
    ///
    /// 象棋では詰み・ステイルメイトのどちらも手番側の負け。
    fn terminal_outcome(&self) -> Outcome {
        Outcome::Win(self.side_to_move().opponent())
    }
}
