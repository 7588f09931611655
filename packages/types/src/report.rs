//! Wire shapes for the report endpoints. Amounts here are dollars, not
//! cents, because they feed charts and tables directly.

use serde::{Deserialize, Serialize};

/// One cohort bucket. The field keeps its historical name `week` even for
/// the day/month groupings added later, so existing chart code keeps
/// working against whichever period the caller requested.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortBucket {
    pub week: String,
    pub revenue: f64,
    pub spend: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedReport {
    pub total_revenue: f64,
    pub total_spend: f64,
    pub ltv: f64,
    pub roi: f64,
    pub cohorts: Vec<CohortBucket>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendBreakdown {
    pub account_id: String,
    pub total_spend: f64,
}

/// Group-report variant: the advanced report plus a per-spend-account
/// breakdown for cross-checking the spend total.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedReport {
    #[serde(flatten)]
    pub report: AdvancedReport,
    pub spend_accounts_breakdown: Vec<SpendBreakdown>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyKind {
    Spike,
    Drop,
}

/// A day-over-day revenue movement beyond the alert threshold. `change` is
/// a ratio (0.30 = +30%); a jump from zero revenue serializes as null, the
/// same way the frontend received `Infinity` before.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anomaly {
    pub date: String,
    #[serde(rename = "type")]
    pub kind: AnomalyKind,
    pub metric: String,
    pub change: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyReport {
    pub anomalies: Vec<Anomaly>,
}

/// Outcome of a pull request against an integration account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullResult {
    pub inserted: usize,
    pub message: String,
}

/// One row of the pricing page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingTier {
    pub plan: super::UserPlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_pull_limit: Option<u32>,
}
