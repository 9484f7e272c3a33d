//! # 外部 API クライアント
//!
//! Figma API との通信を担当する。

pub mod figma_api;

pub use figma_api::{
   DEFAULT_FIGMA_API_BASE,
   DEFAULT_PROBE_TIMEOUT,
   FigmaApiClient,
   FigmaApiClientImpl,
   FigmaApiError,
   ProbeOutcome,
};
