use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use log::{debug, info};
use sift_embeddings::Embedder;
use sift_embeddings::protocol::{EmbedBatchResponse, EmbedItem, HealthResponse};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Clone)]
struct AppState {
    embedder: Arc<dyn Embedder>,
}

/// Build the service router. Exposed so tests can serve it on an
/// ephemeral port without going through [`run_service`].
pub fn router(embedder: Arc<dyn Embedder>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/embed_batch", post(embed_batch_handler))
        .with_state(AppState { embedder })
}

/// Serve the embedding endpoints on `addr` until the task is dropped.
pub async fn run_service(addr: SocketAddr, embedder: Arc<dyn Embedder>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Embedding service listening on {}", listener.local_addr()?);
    axum::serve(listener, router(embedder)).await?;
    Ok(())
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

async fn embed_batch_handler(
    State(state): State<AppState>,
    Json(batch): Json<Vec<EmbedItem>>,
) -> Result<Json<EmbedBatchResponse>, AppError> {
    let texts: Vec<String> = batch.iter().map(|item| item.content.clone()).collect();
    let vectors = state
        .embedder
        .encode_many(&texts)
        .await
        .map_err(AppError::internal)?;

    let mut results = HashMap::with_capacity(batch.len());
    for (item, vector) in batch.into_iter().zip(vectors) {
        results.insert(item.id, vector);
    }
    debug!("Embedded batch of {} items", results.len());
    Ok(Json(EmbedBatchResponse { results }))
}

struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    fn internal(err: impl std::fmt::Display) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}
