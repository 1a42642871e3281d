use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use jester_llm::GenerationError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Generation(GenerationError::RemoteUnavailable(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::Generation(GenerationError::RemoteJobFailed { .. })
            | ApiError::Generation(GenerationError::MalformedRemoteResponse(_)) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidBody(_) => "invalid_request",
            ApiError::Generation(err) => err.kind(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ApiError::InvalidBody(_) => tracing::warn!("Rejected request: {}", self),
            ApiError::Generation(err) => tracing::error!("Error generating joke: {}", err),
        }

        (
            status,
            Json(json!({
                "error": self.kind(),
                "message": self.to_string(),
            })),
        )
            .into_response()
    }
}
