use super::{IntegrationAccountRepository, RepositoryError};
use crate::mock::MockSource;
use crate::store::EntityStore;
use chrono::{DateTime, Utc};
use edge_revenue_types::RevenueSeries;
use edge_revenue_types::series::AGGREGATED_ACCOUNT_ID;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

const KIND: &str = "revenue_series";

/// Owns `RevenueSeries` records, one per account per day, keyed by the
/// composite id `accountId:date`.
#[derive(Clone, Debug)]
pub struct RevenueSeriesRepository {
    store: Arc<dyn EntityStore>,
}

impl RevenueSeriesRepository {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Full scan. Acceptable at demo scale only; a real deployment would
    /// replace this with an indexed range query while preserving the
    /// ordering and filtering contracts of the callers below.
    pub async fn list_all(&self) -> Result<Vec<RevenueSeries>, RepositoryError> {
        let ids = self.store.list_ids(KIND).await?;
        let mut rows = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(value) = self.store.get(KIND, &id).await? {
                rows.push(serde_json::from_value(value)?);
            }
        }
        Ok(rows)
    }

    /// Idempotent mock pull. Inserts only rows whose composite key is not
    /// already persisted, then stamps the account's `last_pulled_at` even
    /// when nothing new was inserted. Returns the number of inserted rows.
    pub async fn pull_mock_data(
        &self,
        accounts: &IntegrationAccountRepository,
        source: &MockSource,
        account_id: &str,
        now: DateTime<Utc>,
    ) -> Result<usize, RepositoryError> {
        if accounts.get(account_id).await?.is_none() {
            return Err(RepositoryError::NotFound(format!(
                "integration account {account_id}"
            )));
        }

        let existing: HashSet<String> = self.store.list_ids(KIND).await?.into_iter().collect();

        let mut inserted = 0;
        for row in source.series_for_account(account_id) {
            if existing.contains(&row.id) {
                continue;
            }
            self.store
                .put(KIND, &row.id, serde_json::to_value(&row)?)
                .await?;
            inserted += 1;
        }

        accounts.record_pull(account_id, now).await?;
        tracing::debug!(account_id, inserted, "pull completed");
        Ok(inserted)
    }

    /// Rows for one account with `start <= date <= end`, ascending by date.
    /// Bounds compare lexicographically, which is date order for the
    /// fixed-width `YYYY-MM-DD` format. No gap-filling here.
    pub async fn get_for_range(
        &self,
        account_id: &str,
        start: &str,
        end: &str,
    ) -> Result<Vec<RevenueSeries>, RepositoryError> {
        let mut rows: Vec<RevenueSeries> = self
            .list_all()
            .await?
            .into_iter()
            .filter(|row| {
                row.account_id == account_id
                    && row.date.as_str() >= start
                    && row.date.as_str() <= end
            })
            .collect();
        rows.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(rows)
    }

    /// Group aggregation: one synthetic row per date present in any
    /// contributing account's rows within range. Revenue comes from the
    /// revenue account alone; spend sums the spend accounts plus the
    /// revenue account's own spend. A revenue account that is also listed
    /// among the spend accounts therefore has its spend counted twice.
    pub async fn get_aggregated_for_group(
        &self,
        spend_account_ids: &[String],
        revenue_account_id: &str,
        start: &str,
        end: &str,
    ) -> Result<Vec<RevenueSeries>, RepositoryError> {
        let spend_ids: HashSet<&str> = spend_account_ids.iter().map(String::as_str).collect();
        let mut by_date: BTreeMap<String, (i64, i64)> = BTreeMap::new();

        for row in self.list_all().await? {
            if row.date.as_str() < start || row.date.as_str() > end {
                continue;
            }
            let contributes_spend = spend_ids.contains(row.account_id.as_str());
            let contributes_revenue = row.account_id == revenue_account_id;
            if !contributes_spend && !contributes_revenue {
                continue;
            }
            let entry = by_date.entry(row.date.clone()).or_default();
            if contributes_revenue {
                entry.0 += row.revenue_cents;
                entry.1 += row.spend_cents;
            }
            if contributes_spend {
                entry.1 += row.spend_cents;
            }
        }

        Ok(by_date
            .into_iter()
            .map(|(date, (revenue_cents, spend_cents))| RevenueSeries {
                id: RevenueSeries::key_of(AGGREGATED_ACCOUNT_ID, &date),
                account_id: AGGREGATED_ACCOUNT_ID.to_string(),
                date,
                revenue_cents,
                spend_cents,
            })
            .collect())
    }

    /// Bulk delete when the owning account goes away. Returns the number of
    /// rows removed.
    pub async fn delete_for_account(&self, account_id: &str) -> Result<usize, RepositoryError> {
        let rows = self.list_all().await?;
        let mut removed = 0;
        for row in rows {
            if row.account_id == account_id && self.store.delete(KIND, &row.id).await? {
                removed += 1;
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 4).unwrap()
    }

    async fn seeded_repos() -> (
        IntegrationAccountRepository,
        RevenueSeriesRepository,
        MockSource,
    ) {
        let store: Arc<dyn EntityStore> = Arc::new(MemoryStore::new());
        let accounts = IntegrationAccountRepository::new(store.clone());
        let revenue = RevenueSeriesRepository::new(store);
        let source = MockSource::generate(7, today());
        for account in source.accounts() {
            accounts.create(account.clone()).await.unwrap();
        }
        (accounts, revenue, source)
    }

    fn row(account_id: &str, date: &str, revenue_cents: i64, spend_cents: i64) -> RevenueSeries {
        RevenueSeries {
            id: RevenueSeries::key_of(account_id, date),
            account_id: account_id.to_string(),
            date: date.to_string(),
            revenue_cents,
            spend_cents,
        }
    }

    async fn insert(repo: &RevenueSeriesRepository, rows: &[RevenueSeries]) {
        for r in rows {
            repo.store
                .put(KIND, &r.id, serde_json::to_value(r).unwrap())
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn pull_is_idempotent_and_always_stamps() {
        let (accounts, revenue, source) = seeded_repos().await;

        let first = revenue
            .pull_mock_data(&accounts, &source, "fb1", Utc::now())
            .await
            .unwrap();
        assert_eq!(first, 30);
        let stamp_one = accounts.get("fb1").await.unwrap().unwrap().last_pulled_at;
        assert!(stamp_one.is_some());

        let second = revenue
            .pull_mock_data(&accounts, &source, "fb1", Utc::now())
            .await
            .unwrap();
        assert_eq!(second, 0);
        let stamp_two = accounts.get("fb1").await.unwrap().unwrap().last_pulled_at;
        assert!(stamp_two >= stamp_one);
    }

    #[tokio::test]
    async fn pull_unknown_account_is_not_found() {
        let (accounts, revenue, source) = seeded_repos().await;
        let err = revenue
            .pull_mock_data(&accounts, &source, "nope", Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn range_query_is_inclusive_sorted_and_scoped() {
        let (_, revenue, _) = seeded_repos().await;
        insert(
            &revenue,
            &[
                row("fb1", "2025-08-03", 100, 50),
                row("fb1", "2025-08-01", 300, 70),
                row("fb1", "2025-08-04", 200, 60),
                row("fb1", "2025-07-31", 999, 99),
                row("ga1", "2025-08-02", 400, 0),
            ],
        )
        .await;

        let rows = revenue
            .get_for_range("fb1", "2025-08-01", "2025-08-04")
            .await
            .unwrap();
        let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["2025-08-01", "2025-08-03", "2025-08-04"]);
        assert!(rows.iter().all(|r| r.account_id == "fb1"));
    }

    #[tokio::test]
    async fn group_aggregation_sums_spend_union_and_revenue_account_spend() {
        let (_, revenue, _) = seeded_repos().await;
        insert(
            &revenue,
            &[
                row("fb1", "2025-08-01", 1000, 500),
                row("fb2", "2025-08-01", 0, 300),
                row("ga1", "2025-08-01", 2000, 25),
                row("ga1", "2025-08-02", 1500, 0),
                row("other", "2025-08-01", 9999, 9999),
            ],
        )
        .await;

        let rows = revenue
            .get_aggregated_for_group(
                &["fb1".into(), "fb2".into()],
                "ga1",
                "2025-08-01",
                "2025-08-02",
            )
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].account_id, AGGREGATED_ACCOUNT_ID);
        assert_eq!(rows[0].id, "aggregated:2025-08-01");
        assert_eq!(rows[0].revenue_cents, 2000);
        // fb1 + fb2 spend plus the revenue account's own spend.
        assert_eq!(rows[0].spend_cents, 500 + 300 + 25);
        assert_eq!(rows[1].date, "2025-08-02");
        assert_eq!(rows[1].revenue_cents, 1500);
        assert_eq!(rows[1].spend_cents, 0);
    }

    #[tokio::test]
    async fn revenue_account_listed_as_spend_account_double_counts() {
        let (_, revenue, _) = seeded_repos().await;
        insert(&revenue, &[row("ga1", "2025-08-01", 1000, 40)]).await;

        let rows = revenue
            .get_aggregated_for_group(&["ga1".into()], "ga1", "2025-08-01", "2025-08-01")
            .await
            .unwrap();
        assert_eq!(rows[0].spend_cents, 80);
    }

    #[tokio::test]
    async fn deleting_an_account_removes_every_row() {
        let (accounts, revenue, source) = seeded_repos().await;
        revenue
            .pull_mock_data(&accounts, &source, "fb1", Utc::now())
            .await
            .unwrap();
        revenue
            .pull_mock_data(&accounts, &source, "ga1", Utc::now())
            .await
            .unwrap();

        let removed = revenue.delete_for_account("fb1").await.unwrap();
        assert_eq!(removed, 30);

        let remaining = revenue
            .get_for_range("fb1", "0000-01-01", "9999-12-31")
            .await
            .unwrap();
        assert!(remaining.is_empty());
        assert_eq!(revenue.list_all().await.unwrap().len(), 30);
    }
}
