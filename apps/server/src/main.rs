//! # Healthdash サーバー
//!
//! ダッシュボードから送られる Figma インポートリクエストを受け付ける API サーバー。
//!
//! ## アーキテクチャ
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  Dashboard   │────▶│    Server    │────▶│  Figma API   │
//! │   (client)   │     │  port: 3001  │     │ (プローブ)   │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! Figma API へのプローブは `NG_APP_FEATURE_FLAGS` に `allowFigmaOutbound`
//! が含まれる場合のみ行う。
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p healthdash-server
//!
//! # プローブを有効にして起動
//! NG_APP_FEATURE_FLAGS=allowFigmaOutbound PORT=8080 cargo run -p healthdash-server --release
//! ```

use std::net::SocketAddr;

use anyhow::Context as _;
use healthdash_server::{app_builder::build_app, config::ServerConfig};
use healthdash_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// サーバーのエントリーポイント
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. アプリケーション設定の読み込み
/// 3. トレーシングの初期化（環境名でログ形式を決める）
/// 4. ルーターの構築
/// 5. HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   let config = ServerConfig::from_env();

   let tracing_config = TracingConfig::from_env("server", &config.app.env);
   let service = tracing_config.service_name.clone();
   init_tracing(tracing_config);
   let _tracing_guard = tracing::info_span!("app", %service).entered();

   tracing::info!(
      env = %config.app.env,
      figma_outbound = config.app.feature_flags.allows_figma_outbound(),
      probe_timeout_ms = config.probe_timeout_ms(),
      "設定を読み込みました"
   );

   let app = build_app(&config);

   let addr: SocketAddr = format!("{}:{}", config.host, config.port)
      .parse()
      .context("アドレスのパースに失敗しました")?;

   let listener = TcpListener::bind(addr)
      .await
      .with_context(|| format!("{addr} へのバインドに失敗しました"))?;
   tracing::info!("サーバーが起動しました: http://{}", addr);
   tracing::info!("ヘルスチェック: http://{}{}", addr, config.health_path);

   axum::serve(listener, app).await?;

   Ok(())
}
