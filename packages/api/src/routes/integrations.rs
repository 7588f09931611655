use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use chrono::Utc;
use edge_revenue_core::UserRepository;
use edge_revenue_core::repository::DEMO_USER_ID;
use edge_revenue_types::{
    ApiEnvelope, IntegrationAccount, IntegrationPlatform, PullResult, Value, create_id,
};
use serde::Serialize;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_integrations).post(create_integration))
        .route("/{id}", delete(delete_integration))
        .route("/{id}/pull", post(pull_integration))
}

#[tracing::instrument(name = "GET /api/integrations", skip(state))]
pub async fn list_integrations(
    State(state): State<AppState>,
) -> Result<Json<ApiEnvelope<Vec<IntegrationAccount>>>, ApiError> {
    let accounts = state.accounts.list().await?;
    Ok(Json(ApiEnvelope::ok(accounts)))
}

/// Body is parsed by hand so malformed requests come back as the 400
/// envelope instead of an extractor rejection.
#[tracing::instrument(name = "POST /api/integrations", skip(state, body))]
pub async fn create_integration(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<ApiEnvelope<IntegrationAccount>>, ApiError> {
    let account_name = body
        .get("accountName")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default();
    if account_name.is_empty() {
        return Err(ApiError::bad_request("platform and accountName required"));
    }

    let platform: IntegrationPlatform = body
        .get("platform")
        .cloned()
        .and_then(|value| serde_json::from_value(value).ok())
        .ok_or_else(|| ApiError::bad_request("platform and accountName required"))?;

    let account = state
        .accounts
        .create(IntegrationAccount {
            id: create_id(),
            platform,
            account_name: account_name.to_string(),
            last_pulled_at: None,
        })
        .await?;
    Ok(Json(ApiEnvelope::ok(account)))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub id: String,
    pub removed_series: usize,
}

/// Removes the account and, with it, every revenue row it owns.
#[tracing::instrument(name = "DELETE /api/integrations/{id}", skip(state))]
pub async fn delete_integration(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiEnvelope<DeleteResult>>, ApiError> {
    if !state.accounts.delete(&id).await? {
        return Err(ApiError::not_found(format!(
            "integration account {id} not found"
        )));
    }
    let removed_series = state.revenue.delete_for_account(&id).await?;
    Ok(Json(ApiEnvelope::ok(DeleteResult { id, removed_series })))
}

/// Mock pull. The limit check and the increment are separate store
/// operations, so two concurrent pulls can both pass the check; at demo
/// scale that is accepted.
#[tracing::instrument(name = "POST /api/integrations/{id}/pull", skip(state))]
pub async fn pull_integration(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiEnvelope<PullResult>>, ApiError> {
    let now = Utc::now();
    let today = now.date_naive();
    let today_str = today.format("%Y-%m-%d").to_string();

    let user = state
        .users
        .get(DEMO_USER_ID)
        .await?
        .ok_or_else(|| ApiError::not_found("user not found"))?;
    if !UserRepository::check_limit(&user, &today_str) {
        return Err(ApiError::too_many_requests(
            "Daily pull limit reached for your plan",
        ));
    }

    let inserted = state
        .revenue
        .pull_mock_data(&state.accounts, &state.mock, &id, now)
        .await?;
    state
        .users
        .increment_daily_pull(DEMO_USER_ID, &today_str, today)
        .await?;

    Ok(Json(ApiEnvelope::ok(PullResult {
        inserted,
        message: format!("Successfully pulled {inserted} new records."),
    })))
}
