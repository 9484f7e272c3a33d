//! # アプリケーション構築
//!
//! State の初期化とルーター構築を担当する。
//! `main.rs` は設定読み込みとサーバー起動に集中する。

use std::sync::Arc;

use axum::{
   Router,
   middleware::from_fn,
   routing::{get, post},
};
use healthdash_shared::{canonical_log::CanonicalLogLineLayer, figma::ADD_FIGMA_DATA_PATH};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::{
   client::{FigmaApiClient, FigmaApiClientImpl},
   config::ServerConfig,
   handler::{FigmaState, add_figma_data, health_check},
   middleware::{assign_request_id, recover_panic},
   usecase::FigmaImportUseCase,
};

/// 設定から実クライアントを組み立ててルーターを構築する
pub fn build_app(config: &ServerConfig) -> Router {
   let figma_api_client: Arc<dyn FigmaApiClient> =
      Arc::new(FigmaApiClientImpl::new(&config.figma_api_base));
   build_app_with_client(config, figma_api_client)
}

/// Figma API クライアントを差し替えてルーターを構築する（テスト用のスタブ注入にも使う）
pub fn build_app_with_client(
   config: &ServerConfig,
   figma_api_client: Arc<dyn FigmaApiClient>,
) -> Router {
   let figma_state = Arc::new(FigmaState {
      import_usecase: FigmaImportUseCase::new(
         figma_api_client,
         config.app.clone(),
         config.probe_timeout,
      ),
   });

   // レイヤー順序（下に書いたものが外側）
   // 1. TraceLayer（最外）: HTTP リクエストのスパン
   // 2. assign_request_id: Request ID を発行し、以降のログに request_id を付与。
   //    パニック復旧レスポンスを 500 + Request ID に差し替える
   // 3. CanonicalLogLineLayer: /api/ 配下の完了サマリを request スパン内で出力
   // 4. CatchPanicLayer（最内）: ハンドラのパニックを 500 に変換
   Router::new()
      .route(&config.health_path, get(health_check))
      .route(ADD_FIGMA_DATA_PATH, post(add_figma_data))
      .with_state(figma_state)
      .layer(CatchPanicLayer::custom(recover_panic))
      .layer(CanonicalLogLineLayer)
      .layer(from_fn(assign_request_id))
      .layer(TraceLayer::new_for_http())
}
