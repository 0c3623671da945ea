//! preset-catalog CLI
//!
//! index.json を読み込み、カスケードフィルタで絞り込んだプリセットを
//! 一覧・ダウンロードする。

pub mod browse;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod report;
