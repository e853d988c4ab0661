use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, warn};

use crate::application::{use_cases::DEFAULT_TOP_K, QueryLog};
use crate::connector::adapter::ChannelQueryLog;
use crate::connector::api::Container;
use crate::domain::{Document, QueryResponse};

#[derive(Clone)]
pub struct AppState {
    container: Arc<Container>,
    query_log: Arc<dyn QueryLog>,
}

impl AppState {
    pub fn new(container: Arc<Container>, query_log: Arc<dyn QueryLog>) -> Self {
        Self {
            container,
            query_log,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Deserialize)]
pub struct ApiQueryRequest {
    query: Option<String>,
    top_k: Option<usize>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct IngestedBody {
    id: String,
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/query", post(handle_query))
        .route("/documents", post(ingest_document))
        .with_state(state)
}

pub async fn run_server(config: ServerConfig, container: Container) -> anyhow::Result<()> {
    let state = AppState::new(Arc::new(container), Arc::new(ChannelQueryLog::new()));
    let app = app_router(state);
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| "invalid host/port for the query service")?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("semsearch listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

async fn handle_query(
    State(state): State<AppState>,
    Json(request): Json<ApiQueryRequest>,
) -> Result<Json<QueryResponse>, (StatusCode, Json<ErrorBody>)> {
    let query = request.query.unwrap_or_default();
    if query.is_empty() {
        return Err(no_query_provided());
    }

    // Fire-and-forget: the log never delays the response.
    state.query_log.record(&query);

    let k = request.top_k.unwrap_or(DEFAULT_TOP_K);
    match state.container.answer_use_case().execute(&query, k).await {
        Ok(response) => Ok(Json(response)),
        Err(e) if e.is_invalid_input() => {
            warn!("Rejected query: {e}");
            Err(no_query_provided())
        }
        Err(e) => {
            error!("Query pipeline failed: {e}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "Error processing query".to_string(),
                }),
            ))
        }
    }
}

async fn ingest_document(
    State(state): State<AppState>,
    Json(document): Json<Document>,
) -> Result<(StatusCode, Json<IngestedBody>), (StatusCode, Json<ErrorBody>)> {
    match state.container.ingest_use_case().execute(&document).await {
        Ok(()) => Ok((
            StatusCode::CREATED,
            Json(IngestedBody { id: document.id }),
        )),
        Err(e) if e.is_invalid_input() => {
            warn!("Rejected document: {e}");
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: "Invalid document".to_string(),
                }),
            ))
        }
        Err(e) => {
            error!("Ingestion failed: {e}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "Error ingesting document".to_string(),
                }),
            ))
        }
    }
}

fn no_query_provided() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: "No query provided".to_string(),
        }),
    )
}
