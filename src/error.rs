use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type for data source operations
pub type Result<T> = std::result::Result<T, DatasourceError>;

/// Errors that can occur while querying GraphWorks and shaping its response
#[derive(Error, Debug)]
pub enum DatasourceError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("GraphWorks returned HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("Invalid query: {message}")]
    InvalidQuery { message: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Frame assembly failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

impl DatasourceError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Network failures and non-2xx statuses. Authentication failures land
    /// here as well; they are not told apart.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::HttpStatus { .. })
    }
}

impl IntoResponse for DatasourceError {
    fn into_response(self) -> Response {
        let status = match &self {
            DatasourceError::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            DatasourceError::Transport(_)
            | DatasourceError::HttpStatus { .. }
            | DatasourceError::MalformedResponse { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
