use crate::error::ApiError;
use chrono::{Duration, NaiveDate};
use serde::Deserialize;

pub mod alerts;
pub mod export;
pub mod health;
pub mod integrations;
pub mod reports;
pub mod users;

/// Days in the default reporting window (today plus the 29 days before).
const DEFAULT_WINDOW_DAYS: i64 = 29;

/// Query parameters shared by the report endpoints. Either `account_id`
/// selects a single account, or `spend_accounts` (csv) together with
/// `revenue_account` selects a group.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub account_id: Option<String>,
    pub spend_accounts: Option<String>,
    pub revenue_account: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub period: Option<String>,
}

#[derive(Clone, Debug)]
pub(crate) enum AccountSelector {
    Single(String),
    Group {
        spend_accounts: Vec<String>,
        revenue_account: String,
    },
}

impl AccountSelector {
    pub(crate) fn from_query(query: &ReportQuery) -> Result<Self, ApiError> {
        if let Some(account_id) = query.account_id.as_deref() {
            if account_id.trim().is_empty() {
                return Err(ApiError::bad_request("accountId must not be empty"));
            }
            return Ok(Self::Single(account_id.trim().to_string()));
        }

        match (
            query.spend_accounts.as_deref(),
            query.revenue_account.as_deref(),
        ) {
            (Some(spend_csv), Some(revenue_account)) if !revenue_account.trim().is_empty() => {
                let spend_accounts: Vec<String> = spend_csv
                    .split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
                    .collect();
                if spend_accounts.is_empty() {
                    return Err(ApiError::bad_request("spendAccounts must not be empty"));
                }
                Ok(Self::Group {
                    spend_accounts,
                    revenue_account: revenue_account.trim().to_string(),
                })
            }
            _ => Err(ApiError::bad_request(
                "accountId or spendAccounts+revenueAccount is required",
            )),
        }
    }
}

/// Inclusive reporting range. Missing bounds fall back to the fixed
/// last-30-days window ending today.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub(crate) fn resolve(
        start: Option<&str>,
        end: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self, ApiError> {
        let end = match end {
            Some(raw) => parse_date(raw, "end")?,
            None => today,
        };
        let start = match start {
            Some(raw) => parse_date(raw, "start")?,
            None => end - Duration::days(DEFAULT_WINDOW_DAYS),
        };
        Ok(Self { start, end })
    }

    pub(crate) fn last_30_days(today: NaiveDate) -> Self {
        Self {
            start: today - Duration::days(DEFAULT_WINDOW_DAYS),
            end: today,
        }
    }

    pub(crate) fn start_str(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub(crate) fn end_str(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

fn parse_date(raw: &str, param: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ApiError::bad_request(format!("{param} must be YYYY-MM-DD, got '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(
        account_id: Option<&str>,
        spend: Option<&str>,
        revenue: Option<&str>,
    ) -> ReportQuery {
        ReportQuery {
            account_id: account_id.map(str::to_string),
            spend_accounts: spend.map(str::to_string),
            revenue_account: revenue.map(str::to_string),
            start: None,
            end: None,
            period: None,
        }
    }

    #[test]
    fn selector_prefers_single_account() {
        let selector =
            AccountSelector::from_query(&query(Some("fb1"), Some("fb2"), Some("ga1"))).unwrap();
        assert!(matches!(selector, AccountSelector::Single(id) if id == "fb1"));
    }

    #[test]
    fn selector_parses_group_csv() {
        let selector =
            AccountSelector::from_query(&query(None, Some("fb1, fb2,,"), Some("ga1"))).unwrap();
        match selector {
            AccountSelector::Group {
                spend_accounts,
                revenue_account,
            } => {
                assert_eq!(spend_accounts, ["fb1", "fb2"]);
                assert_eq!(revenue_account, "ga1");
            }
            _ => panic!("expected group selector"),
        }
    }

    #[test]
    fn selector_rejects_missing_parameters() {
        assert!(AccountSelector::from_query(&query(None, None, None)).is_err());
        assert!(AccountSelector::from_query(&query(None, Some("fb1"), None)).is_err());
        assert!(AccountSelector::from_query(&query(None, Some(",,"), Some("ga1"))).is_err());
    }

    #[test]
    fn range_defaults_to_the_last_30_days() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 4).unwrap();
        let range = DateRange::resolve(None, None, today).unwrap();
        assert_eq!(range.start_str(), "2025-07-06");
        assert_eq!(range.end_str(), "2025-08-04");
    }

    #[test]
    fn range_rejects_malformed_dates() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 4).unwrap();
        assert!(DateRange::resolve(Some("08/01/2025"), None, today).is_err());
        assert!(DateRange::resolve(None, Some("2025-13-40"), today).is_err());
    }

    #[test]
    fn explicit_bounds_are_honored() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 4).unwrap();
        let range =
            DateRange::resolve(Some("2025-08-01"), Some("2025-08-02"), today).unwrap();
        assert_eq!(range.start_str(), "2025-08-01");
        assert_eq!(range.end_str(), "2025-08-02");
    }
}
