//! # ヘルスチェックハンドラ
//!
//! サーバーの稼働状態を確認するためのエンドポイント。
//! パスは `NG_APP_HEALTHCHECK_PATH` で変更できる（デフォルト: `/healthz`）。

use axum::Json;
use healthdash_shared::HealthResponse;

/// Liveness Check（常に `"ok"` を返す）
pub async fn health_check() -> Json<HealthResponse> {
   Json(HealthResponse::ok(env!("CARGO_PKG_VERSION")))
}
