use crate::error::ApiError;
use crate::state::AppState;
use axum::{Json, Router, routing::get};
use edge_revenue_types::ApiEnvelope;
use serde::{Deserialize, Serialize};

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(health))
}

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[tracing::instrument(name = "GET /api/health")]
pub async fn health() -> Result<Json<ApiEnvelope<HealthResponse>>, ApiError> {
    Ok(Json(ApiEnvelope::ok(HealthResponse {
        status: "ok".to_string(),
    })))
}
