//! # Figma インポートユースケース
//!
//! 入力検証 → （フラグ有効時）Figma API プローブ → 受付レスポンス生成 を行う。
//!
//! ## 状態遷移
//!
//! ```text
//! 受信 → 検証 ─┬─ 不正 → Rejected (400)
//!              └─ 正常 → [プローブ] ─┬─ NotFound / Unauthorized → Rejected (400)
//!                                    └─ それ以外 → Accepted (200)
//! 検証後の予期しないエラー → ServerFault (500)
//! ```
//!
//! 受付はスタブであり、実際のインポート処理や永続化は行わない。

use std::{fmt, sync::Arc, time::Duration};

use healthdash_shared::{AppConfig, ImportResponse, RequestId};

use crate::{
   client::{FigmaApiClient, ProbeOutcome},
   error::ImportError,
};

/// project_id が不正な場合のメッセージ
pub const INVALID_PROJECT_ID: &str = "Missing or invalid project_id query parameter.";

/// fileKey が不正な場合のメッセージ
pub const INVALID_FILE_KEY: &str = "Missing or invalid fileKey in request body.";

/// accessToken が不正な場合のメッセージ
pub const INVALID_ACCESS_TOKEN: &str = "Missing or invalid accessToken in request body.";

/// 欠落として扱う project_id のリテラル値
const MISSING_PROJECT_ID_LITERALS: [&str; 2] = ["undefined", "null"];

/// 検証済みのインポートリクエスト
///
/// `project_id` はトリム済み。`file_key` と `access_token` は受け取った値をそのまま保持する。
#[derive(Clone, PartialEq, Eq)]
pub struct ImportRequest {
   pub project_id:   String,
   pub file_key:     String,
   pub access_token: String,
}

// アクセストークンをログに出さないため Debug は手動実装
impl fmt::Debug for ImportRequest {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("ImportRequest")
         .field("project_id", &self.project_id)
         .field("file_key", &self.file_key)
         .field("access_token", &"<redacted>")
         .finish()
   }
}

/// 入力検証の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
   Valid(ImportRequest),
   /// project_id, fileKey, accessToken の順に、失敗したフィールドごとのメッセージ
   Invalid(Vec<String>),
}

/// ハンドラから渡される未検証の入力
#[derive(Clone, Default)]
pub struct ImportInput {
   /// クエリパラメータ `project_id`
   pub project_id:   Option<String>,
   /// ボディの `fileKey`（文字列でない場合は `None`）
   pub file_key:     Option<String>,
   /// ボディの `accessToken`（文字列でない場合は `None`）
   pub access_token: Option<String>,
}

/// project_id を正規化する
///
/// トリムした結果が空、`"undefined"`、`"null"` のいずれかなら欠落とみなす。
pub fn normalize_project_id(raw: Option<&str>) -> Option<String> {
   raw.map(str::trim)
      .filter(|v| !v.is_empty() && !MISSING_PROJECT_ID_LITERALS.contains(v))
      .map(str::to_string)
}

fn is_blank(value: Option<&str>) -> bool {
   value.is_none_or(|v| v.trim().is_empty())
}

/// 3 つの必須フィールドを検証する
///
/// 最初の失敗で打ち切らず、すべてのフィールドを検証してエラーを蓄積する。
pub fn validate(
   project_id: Option<&str>,
   file_key: Option<&str>,
   access_token: Option<&str>,
) -> ValidationResult {
   let mut errors = Vec::new();
   if is_blank(project_id) {
      errors.push(INVALID_PROJECT_ID.to_string());
   }
   if is_blank(file_key) {
      errors.push(INVALID_FILE_KEY.to_string());
   }
   if is_blank(access_token) {
      errors.push(INVALID_ACCESS_TOKEN.to_string());
   }

   match (project_id, file_key, access_token) {
      (Some(project_id), Some(file_key), Some(access_token)) if errors.is_empty() => {
         ValidationResult::Valid(ImportRequest {
            project_id:   project_id.trim().to_string(),
            file_key:     file_key.to_string(),
            access_token: access_token.to_string(),
         })
      }
      _ => ValidationResult::Invalid(errors),
   }
}

/// Figma インポートユースケース
///
/// リクエスト間で共有する可変状態は持たない。
pub struct FigmaImportUseCase {
   figma_api_client: Arc<dyn FigmaApiClient>,
   app_config:       AppConfig,
   probe_timeout:    Duration,
}

impl FigmaImportUseCase {
   pub fn new(
      figma_api_client: Arc<dyn FigmaApiClient>,
      app_config: AppConfig,
      probe_timeout: Duration,
   ) -> Self {
      Self {
         figma_api_client,
         app_config,
         probe_timeout,
      }
   }

   /// インポートリクエストを処理する
   ///
   /// 戻り値のバリアントがそのまま HTTP ステータスに対応する。
   pub async fn execute(&self, request_id: &RequestId, input: ImportInput) -> ImportResponse {
      let project_id = normalize_project_id(input.project_id.as_deref());

      let request = match validate(
         project_id.as_deref(),
         input.file_key.as_deref(),
         input.access_token.as_deref(),
      ) {
         ValidationResult::Valid(request) => request,
         ValidationResult::Invalid(errors) => {
            tracing::warn!(
               project_id = project_id.as_deref().unwrap_or(""),
               has_project_id = project_id.is_some(),
               has_file_key = input.file_key.as_deref().is_some_and(|v| !v.is_empty()),
               has_access_token = input.access_token.as_deref().is_some_and(|v| !v.is_empty()),
               errors = ?errors,
               "入力検証に失敗しました"
            );
            return ImportResponse::invalid_payload(errors);
         }
      };

      match self.accept(&request).await {
         Ok(response) => response,
         Err(e) => {
            tracing::error!(
               error.category = "internal",
               error.kind = "figma_import",
               request_id = %request_id,
               "Figma インポートで予期しないエラー: {:?}",
               e
            );
            ImportResponse::server_fault(request_id.clone())
         }
      }
   }

   async fn accept(&self, request: &ImportRequest) -> Result<ImportResponse, ImportError> {
      let outcome = if self.app_config.feature_flags.allows_figma_outbound() {
         self.figma_api_client
            .probe_file(&request.file_key, &request.access_token, self.probe_timeout)
            .await?
      } else {
         ProbeOutcome::NotAttempted
      };

      match outcome {
         ProbeOutcome::NotAttempted | ProbeOutcome::Ok => {}
         ProbeOutcome::NotFound => {
            return Ok(ImportResponse::file_not_found(&request.file_key));
         }
         ProbeOutcome::Unauthorized => return Ok(ImportResponse::unauthorized()),
         ProbeOutcome::OtherNonOk {
            status,
            body_snippet,
         } => {
            tracing::warn!(
               error.category = "external_service",
               error.kind = "figma_probe",
               http.status_code = status,
               body = %body_snippet,
               "Figma プローブが非 OK を返しました（受付は継続）"
            );
         }
         ProbeOutcome::TransportFailure(message) => {
            tracing::warn!(
               error.category = "external_service",
               error.kind = "figma_probe",
               "Figma プローブに失敗しました（受付は継続）: {}",
               message
            );
         }
      }

      tracing::info!(
         project_id = %request.project_id,
         file_key = %request.file_key,
         env = %self.app_config.env,
         "Figma インポートを受け付けました"
      );

      Ok(ImportResponse::accepted(
         request.project_id.as_str(),
         request.file_key.as_str(),
         self.app_config.env.as_str(),
      ))
   }
}
