//! # Figma インポート API の呼び出し
//!
//! サーバー側と同じ 3 フィールドの必須チェックをローカルでも行い、
//! 欠落があればネットワークに出ずに [`ClientError::Validation`] を返す。
//! レスポンスは解釈せずにそのまま返す（[`crate::ImportResult`] で読み出す）。

use healthdash_shared::{AddFigmaDataBody, AppConfig, figma::ADD_FIGMA_DATA_PATH};

use crate::ClientError;

pub const PROJECT_ID_REQUIRED: &str = "projectId is required";
pub const FILE_KEY_REQUIRED: &str = "fileKey is required";
pub const ACCESS_TOKEN_REQUIRED: &str = "accessToken is required";

/// Figma インポート API クライアント
pub struct FigmaService {
   api_base:  String,
   origin:    String,
   transport: Result<reqwest::Client, String>,
}

impl FigmaService {
   /// 新しい FigmaService を作成する
   ///
   /// # 引数
   ///
   /// - `config`: 解決済みの設定（`api_base` が空なら相対 URL を組み立てる）
   /// - `origin`: 相対 URL を解決するオリジン（例: `http://localhost:3001`）
   ///
   /// HTTP クライアントの構築に失敗してもここではエラーにせず、
   /// 呼び出し時に [`ClientError::TransportUnavailable`] を返す。
   pub fn new(config: &AppConfig, origin: &str) -> Self {
      let transport = reqwest::Client::builder()
         .build()
         .map_err(|e| e.to_string());
      Self::with_transport(config, origin, transport)
   }

   /// 構築済みの HTTP クライアントを使う
   pub fn with_client(config: &AppConfig, origin: &str, client: reqwest::Client) -> Self {
      Self::with_transport(config, origin, Ok(client))
   }

   fn with_transport(
      config: &AppConfig,
      origin: &str,
      transport: Result<reqwest::Client, String>,
   ) -> Self {
      Self {
         api_base:  config.api_base.clone(),
         origin:    origin.trim_end_matches('/').to_string(),
         transport,
      }
   }

   /// リクエスト URL（`api_base` が空なら `/api/...` の相対形）
   pub fn request_url(&self, project_id: &str) -> String {
      format!(
         "{}{}?project_id={}",
         self.api_base,
         ADD_FIGMA_DATA_PATH,
         urlencoding::encode(project_id)
      )
   }

   /// 実際に送信する URL（相対形はオリジンで解決する）
   fn absolute_url(&self, project_id: &str) -> String {
      let url = self.request_url(project_id);
      if url.starts_with('/') {
         format!("{}{url}", self.origin)
      } else {
         url
      }
   }

   /// Figma データのインポートを依頼する
   ///
   /// `POST {api_base}/api/figma/add_figma_data?project_id=...` に
   /// `{ fileKey, accessToken }` を JSON で送る。
   /// 400 / 500 も `Ok` として返る。
   pub async fn add_figma_data(
      &self,
      project_id: &str,
      file_key: &str,
      access_token: &str,
   ) -> Result<reqwest::Response, ClientError> {
      validate(project_id, file_key, access_token)?;

      let client = self
         .transport
         .as_ref()
         .map_err(|e| ClientError::TransportUnavailable(e.clone()))?;

      let url = self.absolute_url(project_id);
      let body = AddFigmaDataBody {
         file_key:     file_key.to_string(),
         access_token: access_token.to_string(),
      };

      tracing::debug!(%url, "Figma インポートを送信します");

      let response = client.post(&url).json(&body).send().await?;
      Ok(response)
   }
}

/// 必須フィールドを検証する（最初の欠落で打ち切る）
fn validate(project_id: &str, file_key: &str, access_token: &str) -> Result<(), ClientError> {
   if project_id.trim().is_empty() {
      return Err(ClientError::Validation(PROJECT_ID_REQUIRED));
   }
   if file_key.trim().is_empty() {
      return Err(ClientError::Validation(FILE_KEY_REQUIRED));
   }
   if access_token.trim().is_empty() {
      return Err(ClientError::Validation(ACCESS_TOKEN_REQUIRED));
   }
   Ok(())
}
