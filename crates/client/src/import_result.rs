//! サーバーレスポンスの読み出し

use std::fmt;

use healthdash_shared::ImportResponse;

use crate::ClientError;

/// インポート API のレスポンス
///
/// ステータスと本文はそのまま保持し、本文が既知の形状であれば
/// `outcome` に構造化して格納する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportResult {
   pub status:  u16,
   pub body:    String,
   pub outcome: Option<ImportResponse>,
}

impl ImportResult {
   /// レスポンスのステータスと本文を読み出す
   pub async fn from_response(response: reqwest::Response) -> Result<Self, ClientError> {
      let status = response.status().as_u16();
      let body = response.text().await?;
      Ok(Self::from_parts(status, body))
   }

   pub fn from_parts(status: u16, body: String) -> Self {
      let outcome = serde_json::from_str(&body).ok();
      Self {
         status,
         body,
         outcome,
      }
   }

   pub fn is_accepted(&self) -> bool {
      matches!(self.outcome, Some(ImportResponse::Accepted { .. }))
   }
}

impl fmt::Display for ImportResult {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      write!(f, "Status: {}\n{}", self.status, self.body)
   }
}
