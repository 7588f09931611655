use edge_revenue_types::{RevenueSeries, SpendBreakdown};

/// Per-account spend totals over raw rows, in dollars, one entry per
/// supplied spend account id. Computed from the raw rows independently of
/// the aggregated group series, so the sum over the breakdown equals the
/// raw spend of exactly those accounts; the group summary's spend can sit
/// above it by the revenue account's own contribution.
pub fn breakdown(rows: &[RevenueSeries], spend_account_ids: &[String]) -> Vec<SpendBreakdown> {
    spend_account_ids
        .iter()
        .map(|account_id| {
            let spend_cents: i64 = rows
                .iter()
                .filter(|row| &row.account_id == account_id)
                .map(|row| row.spend_cents)
                .sum();
            SpendBreakdown {
                account_id: account_id.clone(),
                total_spend: spend_cents as f64 / 100.0,
            }
        })
        .collect()
}
