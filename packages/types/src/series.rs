use serde::{Deserialize, Serialize};

/// Account id carried by synthetic rows produced by group aggregation.
pub const AGGREGATED_ACCOUNT_ID: &str = "aggregated";

/// One day of revenue/spend for one account. Identity is the composite key
/// `accountId:date`, so there is at most one row per account per day. Rows
/// are created by a pull and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSeries {
    pub id: String,
    pub account_id: String,
    /// Fixed-width `YYYY-MM-DD`, so lexicographic order is date order.
    pub date: String,
    pub revenue_cents: i64,
    pub spend_cents: i64,
}

impl RevenueSeries {
    /// Composite key enforcing one row per (account, date).
    pub fn key_of(account_id: &str, date: &str) -> String {
        format!("{account_id}:{date}")
    }

    /// A zero-valued row used when filling gaps in a date range.
    pub fn zero(account_id: &str, date: &str) -> Self {
        Self {
            id: Self::key_of(account_id, date),
            account_id: account_id.to_string(),
            date: date.to_string(),
            revenue_cents: 0,
            spend_cents: 0,
        }
    }
}
