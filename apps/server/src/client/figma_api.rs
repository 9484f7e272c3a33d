//! # Figma API クライアント
//!
//! インポート受付前に、ファイルキーとアクセストークンが有効かを
//! Figma API に一度だけ問い合わせる（プローブ）。
//!
//! ## エンドポイント
//!
//! - `GET /v1/files/{file_key}` - ファイルメタデータの取得（`X-Figma-Token` ヘッダーで認証）
//!
//! ## ステータスの扱い
//!
//! | Figma のレスポンス | [`ProbeOutcome`] |
//! |--------------------|------------------|
//! | 2xx | `Ok` |
//! | 404 | `NotFound` |
//! | 403 | `Unauthorized` |
//! | その他 | `OtherNonOk` |
//! | 通信失敗・タイムアウト | `TransportFailure` |
//!
//! リトライは行わない。

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Figma API のデフォルトベース URL
pub const DEFAULT_FIGMA_API_BASE: &str = "https://api.figma.com";

/// プローブのデフォルトタイムアウト
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(3500);

/// アクセストークンを載せるヘッダー
const FIGMA_TOKEN_HEADER: &str = "X-Figma-Token";

/// ログに残すレスポンスボディの最大文字数
const BODY_SNIPPET_MAX_CHARS: usize = 512;

/// プローブの結果
///
/// リクエスト 1 件の処理中にのみ使用し、永続化しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
   /// フィーチャーフラグが無効でプローブしなかった
   NotAttempted,
   /// 2xx
   Ok,
   /// 404
   NotFound,
   /// 403
   Unauthorized,
   /// 上記以外の非 2xx
   OtherNonOk { status: u16, body_snippet: String },
   /// 通信失敗またはタイムアウト
   TransportFailure(String),
}

/// Figma API クライアントエラー
///
/// リモートの応答として表現できない内部的な失敗のみを表す。
/// 通信失敗は [`ProbeOutcome::TransportFailure`] として返す。
#[derive(Debug, Clone, Error)]
pub enum FigmaApiError {
   /// プローブ URL を構築できない（ベース URL の設定誤り等）
   #[error("プローブ URL を構築できません: {0}")]
   InvalidUrl(String),
}

/// Figma API クライアントトレイト
///
/// テスト時にスタブを使用できるようトレイトで定義。
#[async_trait]
pub trait FigmaApiClient: Send + Sync {
   /// ファイルの存在とアクセス権をプローブする
   ///
   /// `timeout` を超えた場合は実行中のリクエストを破棄し、
   /// `TransportFailure` を返す。
   async fn probe_file(
      &self,
      file_key: &str,
      access_token: &str,
      timeout: Duration,
   ) -> Result<ProbeOutcome, FigmaApiError>;
}

/// Figma API クライアント実装
pub struct FigmaApiClientImpl {
   base_url: String,
   client:   reqwest::Client,
}

impl FigmaApiClientImpl {
   /// 新しい FigmaApiClient を作成する
   ///
   /// # 引数
   ///
   /// - `base_url`: Figma API のベース URL（例: `https://api.figma.com`）
   pub fn new(base_url: &str) -> Self {
      Self {
         base_url: base_url.trim_end_matches('/').to_string(),
         client:   reqwest::Client::new(),
      }
   }

   fn file_url(&self, file_key: &str) -> Result<reqwest::Url, FigmaApiError> {
      let url = format!(
         "{}/v1/files/{}",
         self.base_url,
         urlencoding::encode(file_key)
      );
      reqwest::Url::parse(&url).map_err(|e| FigmaApiError::InvalidUrl(format!("{url}: {e}")))
   }
}

#[async_trait]
impl FigmaApiClient for FigmaApiClientImpl {
   async fn probe_file(
      &self,
      file_key: &str,
      access_token: &str,
      timeout: Duration,
   ) -> Result<ProbeOutcome, FigmaApiError> {
      let url = self.file_url(file_key)?;
      let request = self
         .client
         .get(url)
         .header(FIGMA_TOKEN_HEADER, access_token);

      // 非 2xx のボディ読み取りまでをタイムアウトの対象にする
      let call = async {
         let response = request.send().await?;
         Ok::<_, reqwest::Error>(classify_response(response).await)
      };

      let outcome = match tokio::time::timeout(timeout, call).await {
         Ok(Ok(outcome)) => outcome,
         Ok(Err(e)) => ProbeOutcome::TransportFailure(e.to_string()),
         Err(_) => ProbeOutcome::TransportFailure(format!(
            "タイムアウトしました（{} ms）",
            timeout.as_millis()
         )),
      };

      Ok(outcome)
   }
}

async fn classify_response(response: reqwest::Response) -> ProbeOutcome {
   match response.status() {
      status if status.is_success() => ProbeOutcome::Ok,
      reqwest::StatusCode::NOT_FOUND => ProbeOutcome::NotFound,
      reqwest::StatusCode::FORBIDDEN => ProbeOutcome::Unauthorized,
      status => {
         let body = response.text().await.unwrap_or_default();
         ProbeOutcome::OtherNonOk {
            status:       status.as_u16(),
            body_snippet: body.chars().take(BODY_SNIPPET_MAX_CHARS).collect(),
         }
      }
   }
}
