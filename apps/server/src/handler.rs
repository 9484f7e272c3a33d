//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置し、親モジュールで re-export する
//! - ハンドラは薄く保ち、検証とプローブはユースケースに委譲する
//!
//! ## ハンドラ一覧
//!
//! - `health`: ヘルスチェック
//! - `figma`: Figma インポート受付

pub mod figma;
pub mod health;

pub use figma::{FigmaState, add_figma_data};
pub use health::health_check;
