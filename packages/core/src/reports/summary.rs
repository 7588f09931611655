use edge_revenue_types::RevenueSeries;
use std::collections::HashSet;

/// Totals over the raw (non-gap-filled) rows in range, in dollars.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Summary {
    pub total_revenue: f64,
    pub total_spend: f64,
    pub unique_days: usize,
    /// Average revenue per day with data.
    pub ltv: f64,
    /// `(revenue - spend) / spend` as a percentage.
    pub roi: f64,
}

/// Zero spend yields `roi = 0` and zero days with data yields `ltv = 0`;
/// neither is ever NaN or infinite.
pub fn summarize(rows: &[RevenueSeries]) -> Summary {
    let revenue_cents: i64 = rows.iter().map(|row| row.revenue_cents).sum();
    let spend_cents: i64 = rows.iter().map(|row| row.spend_cents).sum();
    let unique_days = rows
        .iter()
        .map(|row| row.date.as_str())
        .collect::<HashSet<_>>()
        .len();

    let total_revenue = revenue_cents as f64 / 100.0;
    let total_spend = spend_cents as f64 / 100.0;

    let ltv = if unique_days > 0 {
        total_revenue / unique_days as f64
    } else {
        0.0
    };
    let roi = if spend_cents == 0 {
        0.0
    } else {
        (revenue_cents - spend_cents) as f64 / spend_cents as f64 * 100.0
    };

    Summary {
        total_revenue,
        total_spend,
        unique_days,
        ltv,
        roi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(account_id: &str, date: &str, revenue_cents: i64, spend_cents: i64) -> RevenueSeries {
        RevenueSeries {
            id: RevenueSeries::key_of(account_id, date),
            account_id: account_id.to_string(),
            date: date.to_string(),
            revenue_cents,
            spend_cents,
        }
    }

    #[test]
    fn totals_ltv_and_roi() {
        let rows = vec![
            row("fb1", "2025-08-01", 10_000, 5_000),
            row("fb1", "2025-08-02", 20_000, 5_000),
        ];
        let summary = summarize(&rows);
        assert_eq!(summary.total_revenue, 300.0);
        assert_eq!(summary.total_spend, 100.0);
        assert_eq!(summary.unique_days, 2);
        assert_eq!(summary.ltv, 150.0);
        assert_eq!(summary.roi, 200.0);
    }

    #[test]
    fn unique_days_counts_dates_not_rows() {
        let rows = vec![
            row("fb1", "2025-08-01", 10_000, 0),
            row("ga1", "2025-08-01", 10_000, 0),
        ];
        let summary = summarize(&rows);
        assert_eq!(summary.unique_days, 1);
        assert_eq!(summary.ltv, 200.0);
    }

    #[test]
    fn empty_input_is_all_zeros() {
        let summary = summarize(&[]);
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn zero_spend_means_zero_roi_not_infinity() {
        let rows = vec![row("ga1", "2025-08-01", 10_000, 0)];
        let summary = summarize(&rows);
        assert_eq!(summary.roi, 0.0);
        assert!(summary.roi.is_finite());
        assert!(summary.ltv.is_finite());
    }

    #[test]
    fn negative_roi_when_spend_exceeds_revenue() {
        let rows = vec![row("fb1", "2025-08-01", 5_000, 10_000)];
        assert_eq!(summarize(&rows).roi, -50.0);
    }
}
