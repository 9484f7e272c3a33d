//! # ユースケース層
//!
//! ハンドラから呼ばれる処理本体。HTTP の詳細（抽出・ステータス）は持たない。

pub mod figma_import;

pub use figma_import::{
   FigmaImportUseCase,
   ImportInput,
   ImportRequest,
   ValidationResult,
   normalize_project_id,
   validate,
};
