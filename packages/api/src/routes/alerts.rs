use crate::error::ApiError;
use crate::routes::DateRange;
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{Query, State},
    routing::post,
};
use chrono::Utc;
use edge_revenue_core::reports::detect_anomalies;
use edge_revenue_types::{AnomalyReport, ApiEnvelope};
use serde::Deserialize;

pub fn routes() -> Router<AppState> {
    Router::new().route("/check", post(check_alerts))
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertQuery {
    pub account_id: Option<String>,
}

/// Day-over-day anomaly scan over the account's last-30-days raw series.
/// Only days with actual data participate; gaps are skipped silently.
#[tracing::instrument(name = "POST /api/alerts/check", skip(state))]
pub async fn check_alerts(
    State(state): State<AppState>,
    Query(query): Query<AlertQuery>,
) -> Result<Json<ApiEnvelope<AnomalyReport>>, ApiError> {
    let account_id = query
        .account_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("accountId is required"))?;

    if state.accounts.get(account_id).await?.is_none() {
        return Err(ApiError::not_found(format!(
            "integration account {account_id} not found"
        )));
    }

    let range = DateRange::last_30_days(Utc::now().date_naive());
    let rows = state
        .revenue
        .get_for_range(account_id, &range.start_str(), &range.end_str())
        .await?;
    let anomalies = detect_anomalies(&rows);

    Ok(Json(ApiEnvelope::ok(AnomalyReport { anomalies })))
}
