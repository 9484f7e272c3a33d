//! # リクエスト追跡用の Request ID
//!
//! サーバーエラー（500）のレスポンスとサーバーログを突き合わせるための識別子。
//!
//! ## 設計判断
//!
//! - **Newtype パターン**: `String` をラップし、他の文字列型との取り違えを防ぐ
//! - **8 文字の base36**: ユーザーが問い合わせ時に読み上げられる長さに抑える
//! - **一意性は保証しない**: 診断用であり主キーではないため、衝突は許容する
//!
//! ## 使用例
//!
//! ```rust
//! use healthdash_shared::RequestId;
//!
//! let id = RequestId::generate();
//! assert_eq!(id.as_str().len(), 8);
//! ```

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Request ID の文字数
pub const REQUEST_ID_LEN: usize = 8;

const CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// リクエストごとに発行する追跡用 ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
   /// 新しい Request ID を生成する
   pub fn generate() -> Self {
      let mut rng = rand::rng();
      let id = (0..REQUEST_ID_LEN)
         .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
         })
         .collect();
      Self(id)
   }

   /// 既存の文字列から作成する（テストやログからの復元用）
   pub fn from_string(s: impl Into<String>) -> Self {
      Self(s.into())
   }

   pub fn as_str(&self) -> &str {
      &self.0
   }

   pub fn into_inner(self) -> String {
      self.0
   }
}

impl fmt::Display for RequestId {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str(&self.0)
   }
}
