//! # パニックからの復旧
//!
//! ハンドラ内のパニックを `CatchPanicLayer` で捕捉し、500 + Request ID の
//! レスポンスに変換する。
//!
//! `CatchPanicLayer` のハンドラはリクエストを参照できないため、ここでは
//! [`RecoveredPanic`] マーカー付きの 500 を返すだけにとどめる。
//! Request ID を知っている [`assign_request_id`](super::assign_request_id) が
//! マーカーを見つけて `ServerFault` ボディに差し替える。

use std::any::Any;

use axum::{
   http::StatusCode,
   response::{IntoResponse, Response},
};

/// パニックから復旧したレスポンスに付くマーカー
#[derive(Debug, Clone, Copy)]
pub struct RecoveredPanic;

fn panic_message(panic: &(dyn Any + Send)) -> &str {
   panic
      .downcast_ref::<String>()
      .map(String::as_str)
      .or_else(|| panic.downcast_ref::<&str>().copied())
      .unwrap_or("<非文字列のパニック>")
}

/// `CatchPanicLayer::custom` に渡すハンドラ
///
/// request スパンの内側で呼ばれるため、ログには `request_id` が付く。
pub fn recover_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
   tracing::error!(
      error.category = "internal",
      error.kind = "panic",
      "リクエスト処理中にパニックが発生しました: {}",
      panic_message(panic.as_ref())
   );

   let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
   response.extensions_mut().insert(RecoveredPanic);
   response
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_panic_message_文字列のパニックを取り出す() {
      let owned: Box<dyn Any + Send> = Box::new("接続が切れました".to_string());
      let literal: Box<dyn Any + Send> = Box::new("境界外アクセス");
      let other: Box<dyn Any + Send> = Box::new(42_u8);

      assert_eq!(panic_message(owned.as_ref()), "接続が切れました");
      assert_eq!(panic_message(literal.as_ref()), "境界外アクセス");
      assert_eq!(panic_message(other.as_ref()), "<非文字列のパニック>");
   }

   #[test]
   fn test_recover_panicはマーカー付きの500を返す() {
      let response = recover_panic(Box::new("boom"));

      assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
      assert!(response.extensions().get::<RecoveredPanic>().is_some());
   }
}
