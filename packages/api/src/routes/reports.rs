use crate::error::ApiError;
use crate::routes::{AccountSelector, DateRange, ReportQuery};
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use edge_revenue_core::reports::{
    CohortPeriod, breakdown, build_daily_series, cohort_by_period, summarize,
};
use edge_revenue_types::series::AGGREGATED_ACCOUNT_ID;
use edge_revenue_types::{AdvancedReport, AggregatedReport, ApiEnvelope, RevenueSeries};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/daily", get(daily_report))
        .route("/advanced", get(advanced_report))
}

/// Gap-filled per-day series, for one account or an aggregated group.
#[tracing::instrument(name = "GET /api/reports/daily", skip(state))]
pub async fn daily_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ApiEnvelope<Vec<RevenueSeries>>>, ApiError> {
    let selector = AccountSelector::from_query(&query)?;
    let today = Utc::now().date_naive();
    let range = DateRange::resolve(query.start.as_deref(), query.end.as_deref(), today)?;

    let (rows, series_account) = fetch_rows(&state, &selector, &range).await?;
    let series = build_daily_series(&rows, &series_account, range.start, range.end);
    Ok(Json(ApiEnvelope::ok(series)))
}

/// Summary totals plus cohorts; group queries add the per-spend-account
/// breakdown computed from the raw rows.
#[tracing::instrument(name = "GET /api/reports/advanced", skip(state))]
pub async fn advanced_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Response, ApiError> {
    let selector = AccountSelector::from_query(&query)?;
    let today = Utc::now().date_naive();
    let range = DateRange::resolve(query.start.as_deref(), query.end.as_deref(), today)?;
    let period = match query.period.as_deref() {
        Some(raw) => CohortPeriod::from_string(raw)
            .ok_or_else(|| ApiError::bad_request(format!("unknown period '{raw}'")))?,
        None => CohortPeriod::Week,
    };

    let (rows, _) = fetch_rows(&state, &selector, &range).await?;
    let summary = summarize(&rows);
    let cohorts = cohort_by_period(&rows, period);
    let report = AdvancedReport {
        total_revenue: summary.total_revenue,
        total_spend: summary.total_spend,
        ltv: summary.ltv,
        roi: summary.roi,
        cohorts,
    };

    match selector {
        AccountSelector::Single(_) => Ok(Json(ApiEnvelope::ok(report)).into_response()),
        AccountSelector::Group { spend_accounts, .. } => {
            let mut raw_spend_rows = Vec::new();
            for account_id in &spend_accounts {
                raw_spend_rows.extend(
                    state
                        .revenue
                        .get_for_range(account_id, &range.start_str(), &range.end_str())
                        .await?,
                );
            }
            let spend_accounts_breakdown = breakdown(&raw_spend_rows, &spend_accounts);
            Ok(Json(ApiEnvelope::ok(AggregatedReport {
                report,
                spend_accounts_breakdown,
            }))
            .into_response())
        }
    }
}

/// Raw rows for the selector, plus the account id synthetic gap rows
/// should carry.
async fn fetch_rows(
    state: &AppState,
    selector: &AccountSelector,
    range: &DateRange,
) -> Result<(Vec<RevenueSeries>, String), ApiError> {
    match selector {
        AccountSelector::Single(account_id) => {
            let rows = state
                .revenue
                .get_for_range(account_id, &range.start_str(), &range.end_str())
                .await?;
            Ok((rows, account_id.clone()))
        }
        AccountSelector::Group {
            spend_accounts,
            revenue_account,
        } => {
            let rows = state
                .revenue
                .get_aggregated_for_group(
                    spend_accounts,
                    revenue_account,
                    &range.start_str(),
                    &range.end_str(),
                )
                .await?;
            Ok((rows, AGGREGATED_ACCOUNT_ID.to_string()))
        }
    }
}
