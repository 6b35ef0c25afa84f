//! 探索コアの開発用ツール

pub mod bench;
