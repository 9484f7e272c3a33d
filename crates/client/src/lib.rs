//! # Healthdash クライアント
//!
//! ダッシュボードから Figma インポート API を呼び出すクライアント。
//!
//! - [`FigmaService`]: ローカル検証の後、`POST /api/figma/add_figma_data` を発行する
//! - [`ImportResult`]: 生のレスポンスをステータスと本文に読み出す
//! - [`ClientError`]: サーバーに届く前に発生したエラー
//!
//! サーバーが返したエラー（400 / 500）は [`ImportResult`] として返り、
//! [`ClientError`] とは区別される。

pub mod error;
pub mod figma_service;
pub mod import_result;

pub use error::ClientError;
pub use figma_service::FigmaService;
pub use import_result::ImportResult;
