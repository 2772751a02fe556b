use super::ServerState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use consult_application::{ConsultError, ConsultRecord, ErrorKind};
use consult_domain::{ConsultResult, Question};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct ConsultRequest {
    #[serde(default)]
    pub question: Option<String>,
    /// Stored with the history record when history is enabled
    #[serde(default)]
    pub user: Option<String>,
}

/// A [`ConsultError`] rendered as `{ "error": { kind, message } }`.
#[derive(Debug)]
pub struct ApiError(pub ConsultError);

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::ConfigurationError | ErrorKind::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.0.to_body() });
        (self.status(), Json(body)).into_response()
    }
}

impl From<ConsultError> for ApiError {
    fn from(e: ConsultError) -> Self {
        ApiError(e)
    }
}

pub async fn handle_consult(
    State(state): State<ServerState>,
    body: Result<Json<ConsultRequest>, JsonRejection>,
) -> Result<Json<ConsultResult>, ApiError> {
    let Json(request) = body.map_err(|rejection| {
        warn!("Rejected consult request body: {}", rejection);
        ConsultError::InvalidInput("request body must be JSON with a \"question\" field".to_string())
    })?;

    let question = request.question.unwrap_or_default();
    info!("POST /consult ({} chars)", question.chars().count());

    let result = state.service.run(&question).await?;

    if let Some(history) = state.history.clone()
        && let Ok(question) = Question::parse(question)
    {
        // History adapters do blocking file I/O
        let record = ConsultRecord::new(request.user, &question, &result);
        match tokio::task::spawn_blocking(move || history.record(&record)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Could not record consult: {}", e),
            Err(e) => warn!("History task did not complete: {}", e),
        }
    }

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::router;
    use async_trait::async_trait;
    use consult_application::{
        Completion, ConsultHistory, ConsultParams, ConsultService, HistoryError, ProviderClient,
        ProviderError, SynthesisBackend,
    };
    use consult_domain::ProviderId;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::thread::ThreadId;

    // ==================== Test Mocks ====================

    struct MockProvider {
        id: ProviderId,
        reply: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl MockProvider {
        fn new(name: &str, reply: Option<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                id: ProviderId::new(name).unwrap(),
                reply,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ProviderClient for MockProvider {
        fn identity(&self) -> &ProviderId {
            &self.id
        }

        async fn send(&self, _question: &str) -> Result<Completion, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Some(text) => Ok(Completion::new(text).with_reported_tokens(Some(7))),
                None => Err(ProviderError::Status {
                    status: 500,
                    body: "secret upstream detail".to_string(),
                }),
            }
        }
    }

    #[async_trait]
    impl SynthesisBackend for MockProvider {
        fn identity(&self) -> &ProviderId {
            &self.id
        }

        async fn synthesize(&self, _system: &str, _prompt: &str) -> Result<String, ProviderError> {
            Ok("Short summary.".to_string())
        }
    }

    #[derive(Default)]
    struct MemoryHistory {
        records: Mutex<Vec<ConsultRecord>>,
        threads: Mutex<Vec<ThreadId>>,
    }

    impl ConsultHistory for MemoryHistory {
        fn record(&self, record: &ConsultRecord) -> Result<(), HistoryError> {
            self.threads.lock().unwrap().push(std::thread::current().id());
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    // ==================== Helpers ====================

    fn service(providers: Vec<Arc<MockProvider>>) -> Arc<ConsultService> {
        let backend: Arc<dyn SynthesisBackend> = MockProvider::new("Summary", Some("unused"));
        let clients = providers
            .into_iter()
            .map(|p| p as Arc<dyn ProviderClient>)
            .collect();
        Arc::new(ConsultService::new(clients, backend, ConsultParams::default()))
    }

    async fn spawn(state: ServerState) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.unwrap();
        });
        format!("http://{}/consult", addr)
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_consult_returns_summary_and_answers() {
        let a = MockProvider::new("GPT-4 Turbo", Some("Rest."));
        let b = MockProvider::new("Claude 3", None);
        let history = Arc::new(MemoryHistory::default());
        let state = ServerState::new(service(vec![a.clone(), b.clone()]))
            .with_history(history.clone());
        let url = spawn(state).await;

        let response = reqwest::Client::new()
            .post(&url)
            .json(&serde_json::json!({ "question": "sore throat?", "user": "u-1" }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["summary"], "Short summary.");
        assert_eq!(body["answers"][0]["provider"], "GPT-4 Turbo");
        assert_eq!(body["answers"][0]["tokens"], 7);
        assert_eq!(body["answers"][0]["ok"], true);
        assert_eq!(body["answers"][1]["provider"], "Claude 3");
        assert_eq!(body["answers"][1]["ok"], false);
        assert!(body["answers"][1]["latencyMs"].is_u64());
        assert!(!body.to_string().contains("secret upstream detail"));

        let records = history.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user.as_deref(), Some("u-1"));
        assert_eq!(records[0].question, "sore throat?");
    }

    #[tokio::test]
    async fn test_history_is_written_off_the_runtime_thread() {
        let history = Arc::new(MemoryHistory::default());
        let state = ServerState::new(service(vec![MockProvider::new("A", Some("x"))]))
            .with_history(history.clone());
        let url = spawn(state).await;

        let response = reqwest::Client::new()
            .post(&url)
            .json(&serde_json::json!({ "question": "anything" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        // The current-thread test runtime drives the handler on this thread
        let threads = history.threads.lock().unwrap();
        assert_eq!(threads.len(), 1);
        assert_ne!(threads[0], std::thread::current().id());
    }

    #[tokio::test]
    async fn test_blank_question_is_bad_request() {
        let a = MockProvider::new("GPT-4 Turbo", Some("Rest."));
        let url = spawn(ServerState::new(service(vec![a.clone()]))).await;

        let response = reqwest::Client::new()
            .post(&url)
            .json(&serde_json::json!({ "question": "   " }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 400);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"]["kind"], "InvalidInput");
        assert_eq!(a.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let url = spawn(ServerState::new(service(vec![MockProvider::new("A", Some("x"))]))).await;

        let response = reqwest::Client::new()
            .post(&url)
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 400);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"]["kind"], "InvalidInput");
    }

    #[tokio::test]
    async fn test_no_providers_is_service_unavailable() {
        let url = spawn(ServerState::new(service(Vec::new()))).await;

        let response = reqwest::Client::new()
            .post(&url)
            .json(&serde_json::json!({ "question": "anything" }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 503);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"]["kind"], "ConfigurationError");
    }

    #[tokio::test]
    async fn test_cors_preflight_is_allowed() {
        let url = spawn(ServerState::new(service(vec![MockProvider::new("A", Some("x"))]))).await;

        let response = reqwest::Client::new()
            .request(reqwest::Method::OPTIONS, &url)
            .header("origin", "https://example.com")
            .header("access-control-request-method", "POST")
            .send()
            .await
            .unwrap();

        assert!(response.status().is_success());
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "*"
        );
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError(ConsultError::InvalidInput("x".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(ConsultError::Configuration("x".into())).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError(ConsultError::Internal("x".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
