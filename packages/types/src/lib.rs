//! Shared types for the EdgeRevenue workspace: domain records, report DTOs
//! and the uniform response envelope every JSON endpoint speaks.

pub use anyhow::{Error, Result, anyhow, bail};
pub use serde_json::Value;

pub mod account;
pub mod envelope;
pub mod report;
pub mod series;
pub mod user;

pub use account::{IntegrationAccount, IntegrationPlatform};
pub use envelope::ApiEnvelope;
pub use report::{
    AdvancedReport, AggregatedReport, Anomaly, AnomalyKind, AnomalyReport, CohortBucket,
    PricingTier, PullResult, SpendBreakdown,
};
pub use series::RevenueSeries;
pub use user::{DailyPull, User, UserPlan};

pub mod json {
    pub use serde_json::{Value, from_slice, from_str, from_value, json, to_string, to_value};
}

/// Random id for newly created records.
pub fn create_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
