//! ヘルスチェックのレスポンス型

use serde::{Deserialize, Serialize};

/// 稼働状態を示す固定値
pub const HEALTH_OK: &str = "ok";

/// `GET {NG_APP_HEALTHCHECK_PATH}` のレスポンス
///
/// 依存先（Figma API）の状態は含めない。プロセスが応答できれば `"ok"`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
   pub status:  String,
   /// サーバークレートのバージョン
   pub version: String,
}

impl HealthResponse {
   pub fn ok(version: impl Into<String>) -> Self {
      Self {
         status:  HEALTH_OK.to_string(),
         version: version.into(),
      }
   }
}
