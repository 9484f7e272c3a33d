//! # Observability 基盤
//!
//! トレーシングの初期化設定。
//!
//! | 変数名 | 説明 |
//! |--------|------|
//! | `LOG_FORMAT` | `json` / `pretty`（大文字小文字は区別しない） |
//! | `RUST_LOG` | ログフィルタ（デフォルト: `info,healthdash=debug`） |
//!
//! `LOG_FORMAT` が未設定または不正な場合、環境名が `production` なら JSON、
//! それ以外は Pretty になる。

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_LOG_FILTER: &str = "info,healthdash=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
   Json,
   Pretty,
}

impl LogFormat {
   pub fn parse(value: &str) -> Option<Self> {
      match value.trim().to_ascii_lowercase().as_str() {
         "json" => Some(Self::Json),
         "pretty" => Some(Self::Pretty),
         _ => None,
      }
   }

   /// 環境名に応じたデフォルト
   pub fn default_for(env_name: &str) -> Self {
      if env_name == "production" {
         Self::Json
      } else {
         Self::Pretty
      }
   }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
   /// サービス名（呼び出し元の `app` スパンに設定する）
   pub service_name:    String,
   pub log_format:      LogFormat,
   /// `RUST_LOG` の値（未設定なら `None`）
   pub filter:          Option<String>,
   /// 解釈できなかった `LOG_FORMAT` の値（初期化後に警告として出力する）
   pub rejected_format: Option<String>,
}

impl TracingConfig {
   pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
      Self {
         service_name:    service_name.into(),
         log_format,
         filter:          None,
         rejected_format: None,
      }
   }

   /// 生の設定値から組み立てる
   pub fn from_sources(
      service_name: impl Into<String>,
      env_name: &str,
      log_format: Option<String>,
      filter: Option<String>,
   ) -> Self {
      let parsed = log_format.as_deref().map(LogFormat::parse);
      let rejected_format = match parsed {
         Some(None) => log_format,
         _ => None,
      };

      Self {
         service_name: service_name.into(),
         log_format:   parsed
            .flatten()
            .unwrap_or_else(|| LogFormat::default_for(env_name)),
         filter:       filter.filter(|v| !v.trim().is_empty()),
         rejected_format,
      }
   }

   /// `LOG_FORMAT` と `RUST_LOG` を読み込む
   pub fn from_env(service_name: impl Into<String>, env_name: &str) -> Self {
      Self::from_sources(
         service_name,
         env_name,
         std::env::var("LOG_FORMAT").ok(),
         std::env::var("RUST_LOG").ok(),
      )
   }
}

/// トレーシングを初期化する
///
/// `filter` が不正な場合は [`DEFAULT_LOG_FILTER`] を使い、警告を出力する。
#[cfg(feature = "observability")]
pub fn init_tracing(config: TracingConfig) {
   use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

   let (env_filter, filter_error) = match config.filter.as_deref().map(EnvFilter::try_new) {
      Some(Ok(filter)) => (filter, None),
      Some(Err(e)) => (EnvFilter::new(DEFAULT_LOG_FILTER), Some(e.to_string())),
      None => (EnvFilter::new(DEFAULT_LOG_FILTER), None),
   };

   let fmt_layer = match config.log_format {
      LogFormat::Json => tracing_subscriber::fmt::layer()
         .json()
         .flatten_event(true)
         .with_current_span(true)
         .with_span_list(false)
         .boxed(),
      LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
   };

   tracing_subscriber::registry()
      .with(env_filter)
      .with(fmt_layer)
      .init();

   if let Some(value) = config.rejected_format {
      tracing::warn!(log_format = %value, "不明な LOG_FORMAT のためデフォルトの形式を使用します");
   }
   if let Some(error) = filter_error {
      tracing::warn!(%error, "RUST_LOG を解釈できないため {DEFAULT_LOG_FILTER} を使用します");
   }
}
