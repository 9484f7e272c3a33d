//! # アプリケーション設定の解決
//!
//! API ベース URL・フィーチャーフラグ・環境名を解決し、[`AppConfig`] にまとめる。
//!
//! ## 解決順序（API ベース URL）
//!
//! 1. プロセス全体の上書き値（[`ApiBaseSources::process_override`]）
//! 2. ウィンドウスコープの上書き値（[`ApiBaseSources::window_override`]）
//! 3. 環境変数 `NG_APP_API_BASE`
//! 4. いずれもなければ空文字列（相対パスを使う）
//!
//! グローバル変数を直接参照せず、合成ルート（サーバーの `main`、クライアントの
//! コンストラクタ）で [`ApiBaseSources`] を組み立てて渡す。
//!
//! ## 環境変数
//!
//! | 変数名 | 説明 |
//! |--------|------|
//! | `NG_APP_API_BASE` | API ベース URL（末尾の `/` は除去される） |
//! | `NG_APP_FEATURE_FLAGS` | フィーチャーフラグ文字列 |
//! | `NG_APP_NODE_ENV` / `NODE_ENV` | 環境名（未設定時は `production`） |

use std::env;

/// API ベース URL の環境変数名
pub const API_BASE_ENV: &str = "NG_APP_API_BASE";

/// フィーチャーフラグの環境変数名
pub const FEATURE_FLAGS_ENV: &str = "NG_APP_FEATURE_FLAGS";

/// Figma API への外部通信を許可するフラグ
pub const FIGMA_OUTBOUND_FLAG: &str = "allowFigmaOutbound";

/// 環境名が未設定の場合のデフォルト
pub const DEFAULT_ENV_NAME: &str = "production";

/// API ベース URL の候補値
///
/// 先頭から順に評価し、最初の空でない値を採用する。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiBaseSources {
   /// プロセス全体の上書き値（最優先）
   pub process_override: Option<String>,
   /// ウィンドウスコープの上書き値
   pub window_override:  Option<String>,
   /// 環境変数 `NG_APP_API_BASE` の値
   pub env_var:          Option<String>,
}

impl ApiBaseSources {
   /// 環境変数 `NG_APP_API_BASE` のみを候補とする
   pub fn from_env() -> Self {
      Self {
         env_var: env::var(API_BASE_ENV).ok(),
         ..Self::default()
      }
   }

   /// プロセス全体の上書き値を設定する
   pub fn with_process_override(mut self, value: impl Into<String>) -> Self {
      self.process_override = Some(value.into());
      self
   }

   /// ウィンドウスコープの上書き値を設定する
   pub fn with_window_override(mut self, value: impl Into<String>) -> Self {
      self.window_override = Some(value.into());
      self
   }

   /// API ベース URL を解決する
   ///
   /// 値が見つからない場合は空文字列を返す。エラーにはならない。
   pub fn resolve(&self) -> String {
      [
         self.process_override.as_deref(),
         self.window_override.as_deref(),
         self.env_var.as_deref(),
      ]
      .into_iter()
      .flatten()
      .find(|value| !value.is_empty())
      .map(|value| value.trim_end_matches('/').to_string())
      .unwrap_or_default()
   }
}

/// フィーチャーフラグ
///
/// 区切り文字で分割せず、部分文字列として含まれるかで判定する。
/// `"x,allowFigmaOutbound,y"` も `"allowFigmaOutboundLegacy"` も有効と判定される。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureFlags(String);

impl FeatureFlags {
   pub fn new(raw: impl Into<String>) -> Self {
      Self(raw.into())
   }

   /// 環境変数 `NG_APP_FEATURE_FLAGS` から読み込む（未設定時は空）
   pub fn from_env() -> Self {
      Self(env::var(FEATURE_FLAGS_ENV).unwrap_or_default())
   }

   /// 指定したフラグが含まれるか
   pub fn contains(&self, flag: &str) -> bool {
      self.0.contains(flag)
   }

   /// Figma API へのプローブが有効か
   pub fn allows_figma_outbound(&self) -> bool {
      self.contains(FIGMA_OUTBOUND_FLAG)
   }

   pub fn as_str(&self) -> &str {
      &self.0
   }
}

/// 環境名を解決する
///
/// `NG_APP_NODE_ENV` → `NODE_ENV` → `"production"` の順。空文字列は未設定として扱う。
pub fn resolve_env_name(ng_app_node_env: Option<String>, node_env: Option<String>) -> String {
   ng_app_node_env
      .filter(|v| !v.is_empty())
      .or_else(|| node_env.filter(|v| !v.is_empty()))
      .unwrap_or_else(|| DEFAULT_ENV_NAME.to_string())
}

/// 解決済みのアプリケーション設定
///
/// サーバーのハンドラ状態とクライアントの両方に、構築時に一度だけ渡す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
   /// API ベース URL（空文字列なら相対パス）
   pub api_base:      String,
   /// フィーチャーフラグ
   pub feature_flags: FeatureFlags,
   /// 環境名（200 レスポンスの `env` に含める）
   pub env:           String,
}

impl AppConfig {
   pub fn new(api_base: impl Into<String>, feature_flags: FeatureFlags, env: impl Into<String>) -> Self {
      Self {
         api_base: api_base.into(),
         feature_flags,
         env: env.into(),
      }
   }

   /// 環境変数から設定を読み込む
   pub fn from_env() -> Self {
      Self::from_sources(ApiBaseSources::from_env())
   }

   /// API ベース URL の候補を明示して読み込む
   ///
   /// フィーチャーフラグと環境名は環境変数から読む。
   pub fn from_sources(sources: ApiBaseSources) -> Self {
      Self {
         api_base:      sources.resolve(),
         feature_flags: FeatureFlags::from_env(),
         env:           resolve_env_name(
            env::var("NG_APP_NODE_ENV").ok(),
            env::var("NODE_ENV").ok(),
         ),
      }
   }
}

impl Default for AppConfig {
   fn default() -> Self {
      Self::new("", FeatureFlags::default(), DEFAULT_ENV_NAME)
   }
}

#[cfg(test)]
mod tests {
   // 環境変数を書き換えるとテスト間で競合するため、
   // 候補値を直接組み立てて検証する

   use pretty_assertions::assert_eq;

   use super::*;

   // ===== ApiBaseSources::resolve テスト =====

   #[test]
   fn test_resolve_候補がなければ空文字列を返す() {
      assert_eq!(ApiBaseSources::default().resolve(), "");
   }

   #[test]
   fn test_resolve_プロセス上書きが最優先される() {
      let sources = ApiBaseSources {
         process_override: Some("https://process.example.com".to_string()),
         window_override:  Some("https://window.example.com".to_string()),
         env_var:          Some("https://env.example.com".to_string()),
      };

      assert_eq!(sources.resolve(), "https://process.example.com");
   }

   #[test]
   fn test_resolve_ウィンドウ上書きが環境変数より優先される() {
      let sources = ApiBaseSources {
         env_var: Some("https://env.example.com".to_string()),
         ..ApiBaseSources::default()
      }
      .with_window_override("https://window.example.com");

      assert_eq!(sources.resolve(), "https://window.example.com");
   }

   #[test]
   fn test_resolve_空文字列の候補はスキップされる() {
      let sources = ApiBaseSources {
         process_override: Some(String::new()),
         window_override:  None,
         env_var:          Some("https://env.example.com".to_string()),
      };

      assert_eq!(sources.resolve(), "https://env.example.com");
   }

   #[test]
   fn test_resolve_末尾のスラッシュをすべて除去する() {
      let sources = ApiBaseSources::default().with_process_override("https://api.example.com///");

      assert_eq!(sources.resolve(), "https://api.example.com");
   }

   #[test]
   fn test_resolve_スラッシュのみの値は空文字列になる() {
      let sources = ApiBaseSources::default().with_process_override("/");

      assert_eq!(sources.resolve(), "");
   }

   // ===== FeatureFlags テスト =====

   #[test]
   fn test_allows_figma_outbound_フラグを含むとき有効() {
      assert!(FeatureFlags::new("allowFigmaOutbound").allows_figma_outbound());
      assert!(FeatureFlags::new("foo,allowFigmaOutbound,bar").allows_figma_outbound());
   }

   #[test]
   fn test_allows_figma_outbound_部分文字列でも有効() {
      assert!(FeatureFlags::new("xallowFigmaOutboundLegacy").allows_figma_outbound());
   }

   #[test]
   fn test_allows_figma_outbound_含まないとき無効() {
      assert!(!FeatureFlags::default().allows_figma_outbound());
      assert!(!FeatureFlags::new("allowfigmaoutbound").allows_figma_outbound());
      assert!(!FeatureFlags::new("allowFigma").allows_figma_outbound());
   }

   // ===== resolve_env_name テスト =====

   #[test]
   fn test_resolve_env_name_未設定のときproductionを返す() {
      assert_eq!(resolve_env_name(None, None), "production");
   }

   #[test]
   fn test_resolve_env_name_ng_app_node_envが優先される() {
      assert_eq!(
         resolve_env_name(Some("staging".to_string()), Some("development".to_string())),
         "staging"
      );
   }

   #[test]
   fn test_resolve_env_name_空文字列は未設定として扱う() {
      assert_eq!(
         resolve_env_name(Some(String::new()), Some("development".to_string())),
         "development"
      );
      assert_eq!(resolve_env_name(Some(String::new()), Some(String::new())), "production");
   }

   #[test]
   fn test_app_config_defaultは相対パスとproduction() {
      let config = AppConfig::default();

      assert_eq!(config.api_base, "");
      assert_eq!(config.env, "production");
      assert!(!config.feature_flags.allows_figma_outbound());
   }
}
