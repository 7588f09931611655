use super::RepositoryError;
use crate::store::EntityStore;
use chrono::{Duration, NaiveDate};
use edge_revenue_types::{DailyPull, User, UserPlan};
use std::sync::Arc;

const KIND: &str = "user";

/// The single demo user everything is billed against.
pub const DEMO_USER_ID: &str = "demo-user";

/// Rolling window width for `daily_pulls`, in days.
const PULL_WINDOW_DAYS: i64 = 30;

/// Owns the demo `User` record: plan tier plus the rolling window of daily
/// pull counts backing the rate limit.
#[derive(Clone, Debug)]
pub struct UserRepository {
    store: Arc<dyn EntityStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, id: &str) -> Result<Option<User>, RepositoryError> {
        match self.store.get(KIND, id).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    pub async fn put(&self, user: &User) -> Result<(), RepositoryError> {
        self.store
            .put(KIND, &user.id, serde_json::to_value(user)?)
            .await?;
        Ok(())
    }

    async fn require(&self, id: &str) -> Result<User, RepositoryError> {
        self.get(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("user {id}")))
    }

    pub async fn set_plan(&self, id: &str, plan: UserPlan) -> Result<User, RepositoryError> {
        let mut user = self.require(id).await?;
        user.plan = plan;
        self.put(&user).await?;
        Ok(user)
    }

    /// True iff the recorded pull count for `date` is still below the
    /// plan's daily limit. The check and the increment are separate store
    /// operations; two concurrent pulls can both pass the check before
    /// either increments.
    pub fn check_limit(user: &User, date: &str) -> bool {
        match user.plan.daily_pull_limit() {
            Some(limit) => user.pull_count_on(date) < limit,
            None => true,
        }
    }

    /// Prunes window entries older than `PULL_WINDOW_DAYS` relative to
    /// `today` (not relative to `date`), then increments or inserts the
    /// entry for `date`.
    pub async fn increment_daily_pull(
        &self,
        id: &str,
        date: &str,
        today: NaiveDate,
    ) -> Result<User, RepositoryError> {
        let mut user = self.require(id).await?;

        let cutoff = (today - Duration::days(PULL_WINDOW_DAYS))
            .format("%Y-%m-%d")
            .to_string();
        user.daily_pulls.retain(|entry| entry.date >= cutoff);

        match user.daily_pulls.iter_mut().find(|entry| entry.date == date) {
            Some(entry) => entry.count += 1,
            None => user.daily_pulls.push(DailyPull {
                date: date.to_string(),
                count: 1,
            }),
        }

        self.put(&user).await?;
        Ok(user)
    }
}
