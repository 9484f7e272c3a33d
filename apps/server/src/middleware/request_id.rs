//! # Request ID 付与ミドルウェア
//!
//! リクエストごとに 8 文字の [`RequestId`] を発行し、以下に反映する。
//!
//! 1. リクエスト extensions（ハンドラが 500 レスポンスに含めるため）
//! 2. `request` スパンの `request_id` フィールド（以降のログすべてに自動付与）
//!
//! クライアントから送られた ID は使わず、常に新しく生成する。
//!
//! 内側でパニックから復旧したレスポンス（[`RecoveredPanic`]）は、
//! ここで `ServerFault` ボディ（500 + Request ID）に差し替える。

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use healthdash_shared::{ImportResponse, RequestId};
use tracing::Instrument;

use super::RecoveredPanic;
use crate::error::import_response;

/// Request ID を発行し、extensions とスパンに設定するミドルウェア
pub async fn assign_request_id(mut request: Request<Body>, next: Next) -> Response {
   let request_id = RequestId::generate();
   let span = tracing::info_span!("request", request_id = %request_id);

   request.extensions_mut().insert(request_id.clone());

   let response = next.run(request).instrument(span).await;

   if response.extensions().get::<RecoveredPanic>().is_some() {
      return import_response(ImportResponse::server_fault(request_id));
   }
   response
}
