use axum::{body::Bytes, routing::post, Extension, Json, Router};
use serde::Deserialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::{app_module::AppState, error::ApiError};

#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub topic: Option<String>,
}

impl GenerateRequest {
    /// An empty body means `{}`. Anything else must be a JSON object,
    /// whatever content type the caller declared.
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))
    }
}

pub fn joke_router() -> Router {
    Router::new().route("/generate", post(generate))
}

pub async fn generate(
    Extension(ctx): Extension<AppState>,
    body: Bytes,
) -> Result<Json<String>, ApiError> {
    let request = GenerateRequest::from_body(&body)?;
    let span = tracing::info_span!("generate", request_id = %Uuid::new_v4());

    let joke = ctx
        .service
        .joke_service
        .generate(request.topic.as_deref())
        .instrument(span)
        .await?;

    Ok(Json(joke))
}
