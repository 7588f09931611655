use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::State,
    routing::{get, put},
};
use edge_revenue_core::repository::DEMO_USER_ID;
use edge_revenue_types::{ApiEnvelope, PricingTier, User, UserPlan, Value};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route("/me/plan", put(set_plan))
}

#[tracing::instrument(name = "GET /api/users/me", skip(state))]
pub async fn me(State(state): State<AppState>) -> Result<Json<ApiEnvelope<User>>, ApiError> {
    let user = state
        .users
        .get(DEMO_USER_ID)
        .await?
        .ok_or_else(|| ApiError::not_found("user not found"))?;
    Ok(Json(ApiEnvelope::ok(user)))
}

/// Mock billing: switches the demo user's plan tier. No payment flow, the
/// settings page simply picks a tier.
#[tracing::instrument(name = "PUT /api/users/me/plan", skip(state, body))]
pub async fn set_plan(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<ApiEnvelope<User>>, ApiError> {
    let plan: UserPlan = body
        .get("plan")
        .cloned()
        .and_then(|value| serde_json::from_value(value).ok())
        .ok_or_else(|| ApiError::bad_request("plan must be free, pro or enterprise"))?;

    let user = state.users.set_plan(DEMO_USER_ID, plan).await?;
    Ok(Json(ApiEnvelope::ok(user)))
}

/// Plan tiers with their daily pull limits, backing the pricing page.
#[tracing::instrument(name = "GET /api/pricing")]
pub async fn pricing() -> Result<Json<ApiEnvelope<Vec<PricingTier>>>, ApiError> {
    let tiers = [UserPlan::Free, UserPlan::Pro, UserPlan::Enterprise]
        .into_iter()
        .map(|plan| PricingTier {
            plan,
            daily_pull_limit: plan.daily_pull_limit(),
        })
        .collect();
    Ok(Json(ApiEnvelope::ok(tiers)))
}
