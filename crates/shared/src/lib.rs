//! # Healthdash 共有ユーティリティ
//!
//! サーバー（`healthdash-server`）とクライアント（`healthdash-client`）の
//! 双方から使用される型とユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - Figma インポート API のワイヤー型はここに置き、両側で同じ定義を使う
//! - 設定の解決（API ベース URL、フィーチャーフラグ、環境名）もここに集約する
//! - axum への依存は持たない（`IntoResponse` 変換はサーバー側の責務）

#[cfg(feature = "observability")]
pub mod canonical_log;
pub mod config;
pub mod correlation_id;
pub mod figma;
pub mod health;
pub mod observability;

pub use config::{ApiBaseSources, AppConfig, FeatureFlags};
pub use correlation_id::RequestId;
pub use figma::{AddFigmaDataBody, ImportResponse};
pub use health::HealthResponse;
