//! # Healthdash サーバーライブラリ
//!
//! ダッシュボードの Figma インポート API を提供するサーバーのコアモジュール。
//!
//! ## モジュール構成
//!
//! - `app_builder`: State の組み立てとルーター構築
//! - `client`: 外部 API クライアント（Figma API）
//! - `config`: 環境変数からのサーバー設定読み込み
//! - `error`: エラー型と HTTP レスポンスへの変換
//! - `handler`: HTTP ハンドラ
//! - `middleware`: ミドルウェア（Request ID 付与）
//! - `usecase`: 入力検証とプローブのオーケストレーション

pub mod app_builder;
pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod usecase;
