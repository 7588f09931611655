use crate::error::ApiError;
use crate::routes::DateRange;
use crate::state::AppState;
use axum::{
    Router,
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use edge_revenue_core::reports::build_daily_series;
use serde::Deserialize;

pub fn routes() -> Router<AppState> {
    Router::new().route("/csv", get(export_csv))
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    pub account_id: Option<String>,
}

/// CSV dump of the last-30-days window, one row per calendar day (gaps
/// filled with zeros), dollar amounts with two decimals.
#[tracing::instrument(name = "GET /api/export/csv", skip(state))]
pub async fn export_csv(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let account_id = query
        .account_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("accountId is required"))?;

    let range = DateRange::last_30_days(Utc::now().date_naive());
    let rows = state
        .revenue
        .get_for_range(account_id, &range.start_str(), &range.end_str())
        .await?;
    let series = build_daily_series(&rows, account_id, range.start, range.end);

    let mut csv = String::from("Date,Revenue,Spend\n");
    for row in &series {
        csv.push_str(&format!(
            "{},{:.2},{:.2}\n",
            row.date,
            row.revenue_cents as f64 / 100.0,
            row.spend_cents as f64 / 100.0
        ));
    }

    let disposition = format!(
        "attachment; filename=\"export-{}-{}.csv\"",
        account_id,
        range.end_str()
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}
