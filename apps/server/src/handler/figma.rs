//! # Figma インポート API ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /api/figma/add_figma_data?project_id=...` - Figma ファイルのインポート受付
//!
//! ## リクエストボディ
//!
//! ```json
//! { "fileKey": "...", "accessToken": "..." }
//! ```
//!
//! `Content-Type` が `application/json` でない場合、ボディが JSON として解釈できない
//! 場合、フィールドが文字列でない場合は、そのフィールドを欠落として扱い、
//! 400 の詳細メッセージで返す。

use std::sync::Arc;

use axum::{
   Extension,
   body::Bytes,
   extract::{Query, State, rejection::QueryRejection},
   http::{HeaderMap, header::CONTENT_TYPE},
   response::Response,
};
use healthdash_shared::RequestId;
use serde::Deserialize;
use serde_json::Value;

use crate::{
   error::import_response,
   usecase::{FigmaImportUseCase, ImportInput},
};

/// Figma インポート API の共有状態
pub struct FigmaState {
   pub import_usecase: FigmaImportUseCase,
}

/// クエリパラメータ
#[derive(Debug, Deserialize)]
pub struct AddFigmaDataQuery {
   pub project_id: Option<String>,
}

/// ボディから取り出したフィールド
#[derive(Default)]
struct BodyFields {
   file_key:     Option<String>,
   access_token: Option<String>,
}

/// `Content-Type` が `application/json`（パラメータ付き可、大文字小文字は区別しない）か
fn is_json_content_type(headers: &HeaderMap) -> bool {
   headers
      .get(CONTENT_TYPE)
      .and_then(|v| v.to_str().ok())
      .and_then(|v| v.split(';').next())
      .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

fn parse_body(body: &[u8]) -> BodyFields {
   let Ok(value) = serde_json::from_slice::<Value>(body) else {
      return BodyFields::default();
   };
   let string_field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);

   BodyFields {
      file_key:     string_field("fileKey"),
      access_token: string_field("accessToken"),
   }
}

/// POST /api/figma/add_figma_data
///
/// Request ID はミドルウェアが付与したものを使う。付与されていない場合はここで生成する。
pub async fn add_figma_data(
   State(state): State<Arc<FigmaState>>,
   request_id: Option<Extension<RequestId>>,
   query: Result<Query<AddFigmaDataQuery>, QueryRejection>,
   headers: HeaderMap,
   body: Bytes,
) -> Response {
   let request_id = request_id
      .map(|Extension(id)| id)
      .unwrap_or_else(RequestId::generate);
   let project_id = query.ok().and_then(|Query(q)| q.project_id);
   let fields = if is_json_content_type(&headers) {
      parse_body(&body)
   } else {
      BodyFields::default()
   };

   let response = state
      .import_usecase
      .execute(
         &request_id,
         ImportInput {
            project_id,
            file_key: fields.file_key,
            access_token: fields.access_token,
         },
      )
      .await;

   import_response(response)
}
