//! HTTP surface: `POST /consult`
//!
//! A thin adapter over [`ConsultService`]. The handler holds no state of its
//! own between requests; a client disconnect drops the handler future, which
//! aborts every provider call still in flight.

mod handlers;

pub use handlers::{ApiError, ConsultRequest, handle_consult};

use axum::Router;
use axum::routing::post;
use consult_application::{ConsultHistory, ConsultService};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Shared, read-only state handed to every request
#[derive(Clone)]
pub struct ServerState {
    pub service: Arc<ConsultService>,
    pub history: Option<Arc<dyn ConsultHistory>>,
}

impl ServerState {
    pub fn new(service: Arc<ConsultService>) -> Self {
        Self {
            service,
            history: None,
        }
    }

    pub fn with_history(mut self, history: Arc<dyn ConsultHistory>) -> Self {
        self.history = Some(history);
        self
    }
}

/// Build the router with permissive CORS.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/consult", post(handle_consult))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve until `shutdown` is cancelled.
pub async fn serve(
    listener: TcpListener,
    state: ServerState,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
}
