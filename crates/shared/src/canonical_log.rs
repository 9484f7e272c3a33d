//! # API リクエストログ
//!
//! `/api/` 配下のリクエストについて、受信時に 1 行、完了時にサマリを 1 行
//! （Canonical Log Line）出力する tower Layer。
//!
//! 完了ログにはステータスから導いた `import.outcome`
//! （`accepted` / `rejected` / `server_fault`）を含める。
//! Request ID ミドルウェアの内側に置くと `request_id` がスパン経由で付与される。
//!
//! ヘルスチェックなど `/api/` 以外は出力しない。

use std::{
   future::Future,
   pin::Pin,
   task::{Context, Poll},
   time::Instant,
};

use http::{Request, Response, StatusCode};
use tower::{Layer, Service};

fn is_api_path(path: &str) -> bool {
   path.starts_with("/api/")
}

/// ステータスコードからインポート結果の分類を得る
fn outcome_of(status: StatusCode) -> &'static str {
   if status.is_success() {
      "accepted"
   } else if status.is_client_error() {
      "rejected"
   } else if status.is_server_error() {
      "server_fault"
   } else {
      "other"
   }
}

/// 1 リクエスト分のログ出力
struct ApiRequestLog {
   method:  String,
   uri:     String,
   started: Instant,
}

impl ApiRequestLog {
   fn start<B>(req: &Request<B>) -> Self {
      let log = Self {
         method:  req.method().to_string(),
         uri:     req.uri().to_string(),
         started: Instant::now(),
      };
      tracing::info!(http.method = %log.method, http.uri = %log.uri, "API リクエスト受信");
      log
   }

   fn elapsed_ms(&self) -> u64 {
      u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
   }

   fn completed(&self, status: StatusCode) {
      tracing::info!(
         log.r#type = "canonical",
         http.method = %self.method,
         http.uri = %self.uri,
         http.status_code = status.as_u16(),
         http.latency_ms = self.elapsed_ms(),
         import.outcome = outcome_of(status),
         "API リクエスト完了"
      );
   }

   fn failed(&self, err: &dyn std::fmt::Display) {
      tracing::error!(
         log.r#type = "canonical",
         http.method = %self.method,
         http.uri = %self.uri,
         http.latency_ms = self.elapsed_ms(),
         error.message = %err,
         "API リクエスト処理エラー"
      );
   }
}

/// `/api/` 配下のリクエストを記録する Layer
#[derive(Clone, Debug)]
pub struct CanonicalLogLineLayer;

impl<S> Layer<S> for CanonicalLogLineLayer {
   type Service = CanonicalLogLineService<S>;

   fn layer(&self, inner: S) -> Self::Service {
      CanonicalLogLineService { inner }
   }
}

#[derive(Clone, Debug)]
pub struct CanonicalLogLineService<S> {
   inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CanonicalLogLineService<S>
where
   S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
   S::Future: Send + 'static,
   S::Error: std::fmt::Display + 'static,
   ReqBody: Send + 'static,
   ResBody: Send + 'static,
{
   type Error = S::Error;
   type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
   type Response = S::Response;

   fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
      self.inner.poll_ready(cx)
   }

   fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
      // poll_ready 済みの inner を取り出し、代わりにクローンを残す
      let clone = self.inner.clone();
      let mut inner = std::mem::replace(&mut self.inner, clone);

      let log = is_api_path(req.uri().path()).then(|| ApiRequestLog::start(&req));

      Box::pin(async move {
         let result = inner.call(req).await;
         if let Some(log) = log {
            match &result {
               Ok(response) => log.completed(response.status()),
               Err(err) => log.failed(err),
            }
         }
         result
      })
   }
}

#[cfg(test)]
mod tests {
   use std::{
      convert::Infallible,
      sync::{Arc, Mutex},
   };

   use tower::{ServiceExt, service_fn};
   use tracing_subscriber::layer::SubscriberExt;

   use super::*;

   /// 記録されたイベント（メッセージとフィールドのペア）
   #[derive(Debug, Default)]
   struct Recorded {
      level:  Option<tracing::Level>,
      fields: Vec<(String, String)>,
   }

   impl Recorded {
      fn get(&self, name: &str) -> Option<&str> {
         self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
      }
   }

   impl tracing::field::Visit for Recorded {
      fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
         self.fields.push((field.name().to_string(), value.to_string()));
      }

      fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
         self.fields
            .push((field.name().to_string(), format!("{value:?}")));
      }
   }

   #[derive(Clone, Default)]
   struct Recorder(Arc<Mutex<Vec<Recorded>>>);

   impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for Recorder {
      fn on_event(&self, event: &tracing::Event<'_>, _: tracing_subscriber::layer::Context<'_, S>) {
         let mut recorded = Recorded {
            level: Some(*event.metadata().level()),
            ..Recorded::default()
         };
         event.record(&mut recorded);
         self.0.lock().unwrap().push(recorded);
      }
   }

   async fn run<S>(service: S, path: &str) -> (Result<Response<()>, S::Error>, Vec<Recorded>)
   where
      S: Service<Request<()>, Response = Response<()>> + Clone + Send + 'static,
      S::Future: Send + 'static,
      S::Error: std::fmt::Display + 'static,
   {
      let recorder = Recorder::default();
      let _guard =
         tracing::subscriber::set_default(tracing_subscriber::registry().with(recorder.clone()));

      let request = Request::builder().method("POST").uri(path).body(()).unwrap();
      let result = CanonicalLogLineLayer.layer(service).oneshot(request).await;

      let events = std::mem::take(&mut *recorder.0.lock().unwrap());
      (result, events)
   }

   /// 固定のステータスを返すだけの Service
   #[derive(Clone)]
   struct Respond(StatusCode);

   impl Service<Request<()>> for Respond {
      type Error = Infallible;
      type Future = std::future::Ready<Result<Self::Response, Self::Error>>;
      type Response = Response<()>;

      fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
         Poll::Ready(Ok(()))
      }

      fn call(&mut self, _req: Request<()>) -> Self::Future {
         let mut response = Response::new(());
         *response.status_mut() = self.0;
         std::future::ready(Ok(response))
      }
   }

   #[test]
   fn test_outcome_of_ステータスから分類する() {
      assert_eq!(outcome_of(StatusCode::OK), "accepted");
      assert_eq!(outcome_of(StatusCode::BAD_REQUEST), "rejected");
      assert_eq!(outcome_of(StatusCode::INTERNAL_SERVER_ERROR), "server_fault");
      assert_eq!(outcome_of(StatusCode::MOVED_PERMANENTLY), "other");
   }

   #[test]
   fn test_is_api_path() {
      assert!(is_api_path("/api/figma/add_figma_data"));
      assert!(!is_api_path("/healthz"));
      assert!(!is_api_path("/apix"));
   }

   #[tokio::test]
   async fn test_apiリクエストは受信と完了の2行を出力する() {
      let (result, events) = run(
         Respond(StatusCode::OK),
         "/api/figma/add_figma_data?project_id=1",
      )
      .await;

      assert!(result.is_ok());
      assert_eq!(events.len(), 2);
      assert_eq!(events[0].get("message"), Some("API リクエスト受信"));
      assert_eq!(events[0].get("http.method"), Some("POST"));

      let summary = &events[1];
      assert_eq!(summary.level, Some(tracing::Level::INFO));
      assert_eq!(summary.get("log.type"), Some("canonical"));
      assert_eq!(
         summary.get("http.uri"),
         Some("/api/figma/add_figma_data?project_id=1")
      );
      assert_eq!(summary.get("http.status_code"), Some("200"));
      assert_eq!(summary.get("import.outcome"), Some("accepted"));
      assert!(summary.get("http.latency_ms").is_some());
   }

   #[tokio::test]
   async fn test_400はrejectedとして記録される() {
      let (_, events) = run(Respond(StatusCode::BAD_REQUEST), "/api/figma/add_figma_data").await;

      assert_eq!(events[1].get("import.outcome"), Some("rejected"));
   }

   #[tokio::test]
   async fn test_api以外のパスは出力しない() {
      let (_, events) = run(Respond(StatusCode::OK), "/healthz").await;

      assert!(events.is_empty());
   }

   #[tokio::test]
   async fn test_serviceエラーはerrorレベルで出力する() {
      let failing = service_fn(|_req: Request<()>| async {
         Err::<Response<()>, _>("接続がリセットされました".to_string())
      });

      let (result, events) = run(failing, "/api/figma/add_figma_data").await;

      assert!(result.is_err());
      assert_eq!(events[1].level, Some(tracing::Level::ERROR));
      assert_eq!(events[1].get("error.message"), Some("接続がリセットされました"));
   }
}
