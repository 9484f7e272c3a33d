//! # サーバー設定
//!
//! 環境変数からサーバーの設定を読み込む。
//!
//! | 変数名 | 説明 |
//! |--------|------|
//! | `PORT` / `NG_APP_PORT` | ポート番号（デフォルト: `3001`） |
//! | `NG_APP_HEALTHCHECK_PATH` | ヘルスチェックのパス（デフォルト: `/healthz`） |
//! | `FIGMA_API_BASE` | Figma API のベース URL（デフォルト: `https://api.figma.com`） |
//! | `FIGMA_PROBE_TIMEOUT_MS` | プローブのタイムアウト（デフォルト: `3500`） |
//!
//! API ベース URL・フィーチャーフラグ・環境名は [`AppConfig`] を参照。

use std::{env, time::Duration};

use healthdash_shared::{AppConfig, figma::ADD_FIGMA_DATA_PATH};

use crate::client::{DEFAULT_FIGMA_API_BASE, DEFAULT_PROBE_TIMEOUT};

/// バインドアドレス
const DEFAULT_HOST: &str = "0.0.0.0";

/// ポート番号が未設定・不正な場合のデフォルト
const DEFAULT_PORT: u16 = 3001;

/// ヘルスチェックパスのデフォルト
const DEFAULT_HEALTH_PATH: &str = "/healthz";

/// サーバーの設定
#[derive(Debug, Clone)]
pub struct ServerConfig {
   /// バインドアドレス
   pub host:           String,
   /// ポート番号
   pub port:           u16,
   /// ヘルスチェックのパス
   pub health_path:    String,
   /// Figma API のベース URL
   pub figma_api_base: String,
   /// Figma API プローブのタイムアウト
   pub probe_timeout:  Duration,
   /// API ベース URL・フィーチャーフラグ・環境名
   pub app:            AppConfig,
}

impl ServerConfig {
   /// 環境変数から設定を読み込む
   ///
   /// 不正な値はデフォルトにフォールバックするため、失敗しない。
   pub fn from_env() -> Self {
      Self {
         host:           DEFAULT_HOST.to_string(),
         port:           parse_port(env::var("PORT").ok(), env::var("NG_APP_PORT").ok()),
         health_path:    parse_health_path(env::var("NG_APP_HEALTHCHECK_PATH").ok()),
         figma_api_base: env::var("FIGMA_API_BASE")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_FIGMA_API_BASE.to_string()),
         probe_timeout:  parse_probe_timeout(env::var("FIGMA_PROBE_TIMEOUT_MS").ok()),
         app:            AppConfig::from_env(),
      }
   }

   /// プローブのタイムアウト（ミリ秒、`u64` に収まらない場合は飽和させる）
   pub fn probe_timeout_ms(&self) -> u64 {
      u64::try_from(self.probe_timeout.as_millis()).unwrap_or(u64::MAX)
   }
}

impl Default for ServerConfig {
   fn default() -> Self {
      Self {
         host:           DEFAULT_HOST.to_string(),
         port:           DEFAULT_PORT,
         health_path:    DEFAULT_HEALTH_PATH.to_string(),
         figma_api_base: DEFAULT_FIGMA_API_BASE.to_string(),
         probe_timeout:  DEFAULT_PROBE_TIMEOUT,
         app:            AppConfig::default(),
      }
   }
}

/// `PORT` → `NG_APP_PORT` の順で最初の空でない値を採用する
///
/// 数値として解釈できない値や `0` は [`DEFAULT_PORT`] にフォールバックする。
fn parse_port(port: Option<String>, ng_app_port: Option<String>) -> u16 {
   port.filter(|v| !v.is_empty())
      .or_else(|| ng_app_port.filter(|v| !v.is_empty()))
      .and_then(|v| v.trim().parse::<u16>().ok())
      .filter(|&p| p != 0)
      .unwrap_or(DEFAULT_PORT)
}

/// ヘルスチェックのパスを正規化する（先頭に `/` を補う）
///
/// ルーターのパス構文（`{}` のキャプチャ、`*` のワイルドカード）やクエリ・空白を含む値、
/// インポート API と同じパスは [`DEFAULT_HEALTH_PATH`] にフォールバックする。
fn parse_health_path(value: Option<String>) -> String {
   let path = match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
      Some(path) if path.starts_with('/') => path,
      Some(path) => format!("/{path}"),
      None => return DEFAULT_HEALTH_PATH.to_string(),
   };

   let is_literal = !path
      .chars()
      .any(|c| matches!(c, '{' | '}' | '*' | '?' | '#') || c.is_whitespace() || c.is_control());

   if is_literal && path != ADD_FIGMA_DATA_PATH {
      path
   } else {
      DEFAULT_HEALTH_PATH.to_string()
   }
}

fn parse_probe_timeout(value: Option<String>) -> Duration {
   value
      .and_then(|v| v.trim().parse::<u64>().ok())
      .filter(|&ms| ms > 0)
      .map(Duration::from_millis)
      .unwrap_or(DEFAULT_PROBE_TIMEOUT)
}
