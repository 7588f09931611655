//! Seedable mock data source. The demo "pull" pretends these rows came from
//! the platform APIs. Generation is split from the aggregation engine and
//! takes an explicit seed so fixtures are deterministic.

use chrono::{Duration, NaiveDate};
use edge_revenue_types::{IntegrationAccount, IntegrationPlatform, RevenueSeries};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Days of history generated per account.
const HISTORY_DAYS: i64 = 30;

#[derive(Clone, Debug)]
pub struct MockSource {
    accounts: Vec<IntegrationAccount>,
    series: Vec<RevenueSeries>,
}

impl MockSource {
    /// Generates the demo fixture set: two spend-heavy Facebook accounts
    /// and two revenue-only AdSense accounts, each with `HISTORY_DAYS` of
    /// history ending at `today`.
    pub fn generate(seed: u64, today: NaiveDate) -> Self {
        let accounts = vec![
            fixture_account("fb1", IntegrationPlatform::FacebookAds, "Primary FB Campaign"),
            fixture_account("ga1", IntegrationPlatform::GoogleAdsense, "Main Content Site"),
            fixture_account("fb2", IntegrationPlatform::FacebookAds, "Secondary FB Campaign"),
            fixture_account("ga2", IntegrationPlatform::GoogleAdsense, "Blog AdSense"),
        ];

        let mut rng = StdRng::seed_from_u64(seed);
        let mut series = Vec::with_capacity(accounts.len() * HISTORY_DAYS as usize);
        for account in &accounts {
            for offset in 0..HISTORY_DAYS {
                let date = (today - Duration::days(offset))
                    .format("%Y-%m-%d")
                    .to_string();
                let (revenue_cents, spend_cents) = match account.platform {
                    IntegrationPlatform::FacebookAds => {
                        // Spend-heavy: $10-$60 spend at 90%-140% return.
                        let spend = rng.random_range(1000..6000);
                        let revenue = (spend as f64 * rng.random_range(0.9..1.4)) as i64;
                        (revenue, spend)
                    }
                    IntegrationPlatform::GoogleAdsense => {
                        // Revenue-only: $20-$100, no spend.
                        (rng.random_range(2000..10000), 0)
                    }
                };
                series.push(RevenueSeries {
                    id: RevenueSeries::key_of(&account.id, &date),
                    account_id: account.id.clone(),
                    date,
                    revenue_cents,
                    spend_cents,
                });
            }
        }

        Self { accounts, series }
    }

    pub fn accounts(&self) -> &[IntegrationAccount] {
        &self.accounts
    }

    /// The rows a pull for this account would fetch from the platform.
    pub fn series_for_account(&self, account_id: &str) -> Vec<RevenueSeries> {
        self.series
            .iter()
            .filter(|row| row.account_id == account_id)
            .cloned()
            .collect()
    }
}

fn fixture_account(
    id: &str,
    platform: IntegrationPlatform,
    name: &str,
) -> IntegrationAccount {
    IntegrationAccount {
        id: id.to_string(),
        platform,
        account_name: name.to_string(),
        last_pulled_at: None,
    }
}
