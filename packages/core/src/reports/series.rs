use chrono::{Duration, NaiveDate};
use edge_revenue_types::RevenueSeries;
use std::collections::HashMap;

/// Gap-filling: one entry per calendar day in `[start, end]` inclusive.
/// Days without a raw row get a zero-valued synthetic row carrying
/// `account_id` and the composite id `accountId:date`. The walk runs from
/// `end` back to `start`; the result is sorted ascending by date string
/// before return.
pub fn build_daily_series(
    rows: &[RevenueSeries],
    account_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<RevenueSeries> {
    if end < start {
        return Vec::new();
    }

    let by_date: HashMap<&str, &RevenueSeries> =
        rows.iter().map(|row| (row.date.as_str(), row)).collect();

    let mut series = Vec::with_capacity((end - start).num_days() as usize + 1);
    let mut cursor = end;
    while cursor >= start {
        let date = cursor.format("%Y-%m-%d").to_string();
        match by_date.get(date.as_str()) {
            Some(row) => series.push((*row).clone()),
            None => series.push(RevenueSeries::zero(account_id, &date)),
        }
        cursor -= Duration::days(1);
    }

    series.sort_by(|a, b| a.date.cmp(&b.date));
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn row(account_id: &str, d: &str, revenue_cents: i64, spend_cents: i64) -> RevenueSeries {
        RevenueSeries {
            id: RevenueSeries::key_of(account_id, d),
            account_id: account_id.to_string(),
            date: d.to_string(),
            revenue_cents,
            spend_cents,
        }
    }

    #[test]
    fn one_entry_per_day_sorted_without_duplicates() {
        let rows = vec![
            row("fb1", "2025-08-03", 100, 50),
            row("fb1", "2025-08-01", 300, 70),
        ];
        let series = build_daily_series(&rows, "fb1", date("2025-07-06"), date("2025-08-04"));

        assert_eq!(series.len(), 30);
        let dates: Vec<&str> = series.iter().map(|r| r.date.as_str()).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
        assert_eq!(dates.iter().collect::<HashSet<_>>().len(), 30);
    }

    #[test]
    fn gaps_become_zero_rows_with_synthesized_ids() {
        let rows = vec![row("fb1", "2025-08-02", 100, 50)];
        let series = build_daily_series(&rows, "fb1", date("2025-08-01"), date("2025-08-03"));

        assert_eq!(series.len(), 3);
        assert_eq!(series[0].id, "fb1:2025-08-01");
        assert_eq!(series[0].revenue_cents, 0);
        assert_eq!(series[0].spend_cents, 0);
        assert_eq!(series[1].revenue_cents, 100);
        assert_eq!(series[2].id, "fb1:2025-08-03");
    }

    #[test]
    fn single_day_range_yields_one_entry() {
        let series = build_daily_series(&[], "agg", date("2025-08-04"), date("2025-08-04"));
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].account_id, "agg");
    }

    #[test]
    fn inverted_range_yields_nothing() {
        let series = build_daily_series(&[], "fb1", date("2025-08-04"), date("2025-08-01"));
        assert!(series.is_empty());
    }

    #[test]
    fn month_boundary_is_walked_correctly() {
        let series = build_daily_series(&[], "fb1", date("2025-06-28"), date("2025-07-02"));
        let dates: Vec<&str> = series.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(
            dates,
            ["2025-06-28", "2025-06-29", "2025-06-30", "2025-07-01", "2025-07-02"]
        );
    }
}
