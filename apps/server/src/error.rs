//! # エラーハンドリング
//!
//! インポート処理の内部エラー型と、[`ImportResponse`] から axum レスポンスへの変換。
//!
//! ## エラー分類
//!
//! | 分類 | HTTP | 扱い |
//! |------|------|------|
//! | 入力不正 | 400 | 失敗したフィールドごとにメッセージを返す |
//! | リモート拒否（404/403） | 400 | 固定メッセージ。Figma のボディは転送しない |
//! | リモート劣化（その他・通信失敗） | - | ログのみ。受付は継続する |
//! | 内部エラー | 500 | 汎用メッセージ + Request ID のみ返す |

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use healthdash_shared::ImportResponse;
use thiserror::Error;

use crate::client::FigmaApiError;

/// 入力検証後に発生しうる予期しないエラー
///
/// いずれも 500 + Request ID に変換され、内容はログにのみ出力する。
#[derive(Debug, Error)]
pub enum ImportError {
   /// Figma API クライアントの内部エラー
   #[error("Figma API クライアントで内部エラー: {0}")]
   FigmaApi(#[from] FigmaApiError),
}

/// レスポンスバリアントに対応する HTTP ステータス
pub fn status_of(response: &ImportResponse) -> StatusCode {
   match response {
      ImportResponse::Accepted { .. } => StatusCode::OK,
      ImportResponse::Rejected { .. } => StatusCode::BAD_REQUEST,
      ImportResponse::ServerFault { .. } => StatusCode::INTERNAL_SERVER_ERROR,
   }
}

/// [`ImportResponse`] を JSON ボディのレスポンスに変換する
pub fn import_response(response: ImportResponse) -> Response {
   (status_of(&response), Json(response)).into_response()
}

#[cfg(test)]
mod tests {
   use axum::body::to_bytes;
   use healthdash_shared::RequestId;

   use super::*;

   async fn response_status_and_body(response: Response) -> (StatusCode, serde_json::Value) {
      let status = response.status();
      let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
      (status, serde_json::from_slice(&body).unwrap())
   }

   #[tokio::test]
   async fn test_acceptedで200() {
      let (status, body) =
         response_status_and_body(import_response(ImportResponse::accepted("1", "k", "production"))).await;

      assert_eq!(status, StatusCode::OK);
      assert_eq!(body["message"], "Figma data accepted for processing");
   }

   #[tokio::test]
   async fn test_rejectedで400() {
      let (status, body) =
         response_status_and_body(import_response(ImportResponse::unauthorized())).await;

      assert_eq!(status, StatusCode::BAD_REQUEST);
      assert_eq!(body["error"], "Unauthorized");
   }

   #[tokio::test]
   async fn test_server_faultで500かつ内部情報を含まない() {
      let (status, body) = response_status_and_body(import_response(
         ImportResponse::server_fault(RequestId::from_string("abcd1234")),
      ))
      .await;

      assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
      assert_eq!(
         body,
         serde_json::json!({ "error": "Internal server error", "requestId": "abcd1234" })
      );
   }

   #[test]
   fn test_import_errorの表示に原因が含まれる() {
      let err = ImportError::from(FigmaApiError::InvalidUrl("bad".to_string()));

      assert!(err.to_string().contains("bad"));
   }
}
