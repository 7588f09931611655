use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use edge_revenue_core::{RepositoryError, StoreError};
use edge_revenue_types::ApiEnvelope;

/// API-layer error. Serializes into the `{success: false, error}` envelope
/// with the matching status code. Constructors log at the appropriate
/// level; internal errors keep their detail out of the response body.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::warn!("Bad request: {}", msg);
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg,
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::warn!("Not found: {}", msg);
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg,
        }
    }

    pub fn too_many_requests(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::warn!("Too many requests: {}", msg);
        Self {
            status: StatusCode::TOO_MANY_REQUESTS,
            message: msg,
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::error!("Internal error: {}", msg);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal server error".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ApiEnvelope::<()>::err(self.message)),
        )
            .into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(what) => Self::not_found(format!("{what} not found")),
            other => Self::internal(other.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::internal(err.to_string())
    }
}
