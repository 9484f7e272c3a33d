//! # Figma インポート API のワイヤー型
//!
//! `POST /api/figma/add_figma_data` のリクエスト/レスポンス形状を定義する。
//!
//! ```text
//! 200: { "message", "projectId", "fileKey", "env" }
//! 400: { "error", "details": [..] }
//! 500: { "error", "requestId" }
//! ```

use serde::{Deserialize, Serialize};

use crate::RequestId;

/// エンドポイントのパス
pub const ADD_FIGMA_DATA_PATH: &str = "/api/figma/add_figma_data";

/// 受理時のメッセージ
pub const ACCEPTED_MESSAGE: &str = "Figma data accepted for processing";

/// 入力不正時のエラー
pub const INVALID_PAYLOAD_ERROR: &str = "Invalid request payload";

/// Figma ファイルが存在しない場合のエラー
pub const FILE_NOT_FOUND_ERROR: &str = "Figma file not found";

/// アクセストークンが無効な場合のエラー
pub const UNAUTHORIZED_ERROR: &str = "Unauthorized";

/// アクセストークンが無効な場合の詳細
pub const UNAUTHORIZED_DETAIL: &str = "Invalid accessToken or no access to the Figma file.";

/// 内部エラー時のエラー（詳細は返さない）
pub const INTERNAL_ERROR: &str = "Internal server error";

/// リクエストボディ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFigmaDataBody {
   pub file_key:     String,
   pub access_token: String,
}

/// インポートエンドポイントのレスポンス
///
/// HTTP ステータスとの対応:
///
/// - `Accepted` → 200
/// - `Rejected` → 400
/// - `ServerFault` → 500
///
/// `requestId` を含むのは `ServerFault` のみ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum ImportResponse {
   Accepted {
      message:    String,
      project_id: String,
      file_key:   String,
      env:        String,
   },
   Rejected {
      error:   String,
      details: Vec<String>,
   },
   ServerFault {
      error:      String,
      request_id: RequestId,
   },
}

impl ImportResponse {
   pub fn accepted(
      project_id: impl Into<String>,
      file_key: impl Into<String>,
      env: impl Into<String>,
   ) -> Self {
      Self::Accepted {
         message:    ACCEPTED_MESSAGE.to_string(),
         project_id: project_id.into(),
         file_key:   file_key.into(),
         env:        env.into(),
      }
   }

   pub fn rejected(error: impl Into<String>, details: Vec<String>) -> Self {
      Self::Rejected {
         error: error.into(),
         details,
      }
   }

   /// 入力不正（400）
   pub fn invalid_payload(details: Vec<String>) -> Self {
      Self::rejected(INVALID_PAYLOAD_ERROR, details)
   }

   /// Figma ファイルが存在しない（400）
   pub fn file_not_found(file_key: &str) -> Self {
      Self::rejected(
         FILE_NOT_FOUND_ERROR,
         vec![format!(
            "File key {file_key} does not exist or is not accessible."
         )],
      )
   }

   /// アクセストークンが無効（400）
   pub fn unauthorized() -> Self {
      Self::rejected(UNAUTHORIZED_ERROR, vec![UNAUTHORIZED_DETAIL.to_string()])
   }

   /// 内部エラー（500）
   ///
   /// エラー内容は返さず、ログ突き合わせ用の Request ID のみ含める。
   pub fn server_fault(request_id: RequestId) -> Self {
      Self::ServerFault {
         error: INTERNAL_ERROR.to_string(),
         request_id,
      }
   }

   /// 対応する HTTP ステータスコード
   pub fn status_code(&self) -> u16 {
      match self {
         Self::Accepted { .. } => 200,
         Self::Rejected { .. } => 400,
         Self::ServerFault { .. } => 500,
      }
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use serde_json::json;

   use super::*;

   #[test]
   fn test_acceptedのjson形状() {
      let response = ImportResponse::accepted("42", "abc", "production");

      assert_eq!(
         serde_json::to_value(&response).unwrap(),
         json!({
            "message": "Figma data accepted for processing",
            "projectId": "42",
            "fileKey": "abc",
            "env": "production"
         })
      );
      assert_eq!(response.status_code(), 200);
   }

   #[test]
   fn test_file_not_foundの詳細にファイルキーが含まれる() {
      let response = ImportResponse::file_not_found("KEY123");

      assert_eq!(
         serde_json::to_value(&response).unwrap(),
         json!({
            "error": "Figma file not found",
            "details": ["File key KEY123 does not exist or is not accessible."]
         })
      );
      assert_eq!(response.status_code(), 400);
   }

   #[test]
   fn test_server_faultはrequest_idのみを含む() {
      let response = ImportResponse::server_fault(RequestId::from_string("abcd1234"));

      assert_eq!(
         serde_json::to_value(&response).unwrap(),
         json!({ "error": "Internal server error", "requestId": "abcd1234" })
      );
      assert_eq!(response.status_code(), 500);
   }

   #[test]
   fn test_各形状のjsonから正しいバリアントに復元される() {
      let accepted: ImportResponse = serde_json::from_value(json!({
         "message": "Figma data accepted for processing",
         "projectId": "1",
         "fileKey": "k",
         "env": "dev"
      }))
      .unwrap();
      let rejected: ImportResponse =
         serde_json::from_value(json!({ "error": "Unauthorized", "details": ["x"] })).unwrap();
      let fault: ImportResponse = serde_json::from_value(json!({
         "error": "Internal server error",
         "requestId": "zzzz0000"
      }))
      .unwrap();

      assert_eq!(accepted, ImportResponse::accepted("1", "k", "dev"));
      assert_eq!(rejected, ImportResponse::rejected("Unauthorized", vec!["x".to_string()]));
      assert_eq!(
         fault,
         ImportResponse::server_fault(RequestId::from_string("zzzz0000"))
      );
   }

   #[test]
   fn test_リクエストボディはcamel_caseでシリアライズされる() {
      let body = AddFigmaDataBody {
         file_key:     "abc".to_string(),
         access_token: "token".to_string(),
      };

      assert_eq!(
         serde_json::to_value(&body).unwrap(),
         json!({ "fileKey": "abc", "accessToken": "token" })
      );
   }
}
