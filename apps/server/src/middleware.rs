//! # ミドルウェア
//!
//! サーバー用のミドルウェアを提供する。

pub mod recover_panic;
pub mod request_id;

pub use recover_panic::{RecoveredPanic, recover_panic};
pub use request_id::assign_request_id;
