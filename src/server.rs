use crate::datasource::{DataQueryResponse, WorksDataSource};
use crate::error::Result;
use crate::models::{DataQueryRequest, Dataset, HealthStatus};
use axum::{
    extract::State,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Application state containing the shared data source
#[derive(Clone)]
pub struct AppState {
    datasource: Arc<WorksDataSource>,
}

impl AppState {
    pub fn new(datasource: WorksDataSource) -> Self {
        Self {
            datasource: Arc::new(datasource),
        }
    }
}

/// Create the HTTP router exposing the data source operations
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/ping", get(ping_endpoint))
        .route("/api/datasets", get(datasets_endpoint))
        .route("/api/query", post(query_endpoint))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness of this service only; `/api/ping` checks the backend
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "graphworks-datasource"
    }))
}

async fn ping_endpoint(State(state): State<AppState>) -> Result<Json<HealthStatus>> {
    let health = state.datasource.check_connection().await?;
    Ok(Json(health))
}

async fn datasets_endpoint(State(state): State<AppState>) -> Result<Json<Vec<Dataset>>> {
    let datasets = state.datasource.list_datasets().await?;
    Ok(Json(datasets))
}

async fn query_endpoint(
    State(state): State<AppState>,
    Json(request): Json<DataQueryRequest>,
) -> Result<Json<DataQueryResponse>> {
    info!("Processing query request with {} targets", request.targets.len());
    let response = state.datasource.query(&request).await?;
    Ok(Json(response))
}
