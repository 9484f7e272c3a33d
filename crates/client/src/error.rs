//! クライアントエラー型

use thiserror::Error;

/// サーバーのレスポンスを得られなかったことを表すエラー
///
/// サーバーが返した 4xx / 5xx はここには含まれない。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
   /// 必須フィールドの欠落（ネットワークには到達していない）
   #[error("{0}")]
   Validation(&'static str),

   /// HTTP クライアントを構築できない
   #[error("HTTP クライアントを利用できません: {0}")]
   TransportUnavailable(String),

   /// リクエストの送信またはレスポンスの読み出しに失敗した
   #[error("ネットワークエラー: {0}")]
   Transport(String),
}

impl From<reqwest::Error> for ClientError {
   fn from(err: reqwest::Error) -> Self {
      ClientError::Transport(err.to_string())
   }
}
