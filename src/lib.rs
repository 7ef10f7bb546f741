//! 薬用植物AI識別ツール
//!
//! 検証 → Base64変換 → Gemini呼び出し → パース・正規化 → 表示

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod identifier;
pub mod render;
pub mod report;
pub mod upload;
