use chrono::Utc;
use edge_revenue_core::repository::DEMO_USER_ID;
use edge_revenue_core::{
    EntityStore, IntegrationAccountRepository, MockSource, RepositoryError,
    RevenueSeriesRepository, UserRepository,
};
use edge_revenue_types::{User, UserPlan};
use std::sync::Arc;

pub type AppState = Arc<State>;

/// Shared request state: the repositories over one entity store, the mock
/// data source pulls draw from, and the plan the demo user starts on.
#[derive(Debug)]
pub struct State {
    pub accounts: IntegrationAccountRepository,
    pub revenue: RevenueSeriesRepository,
    pub users: UserRepository,
    pub mock: MockSource,
    demo_plan: UserPlan,
}

impl State {
    pub fn new(store: Arc<dyn EntityStore>, mock: MockSource, demo_plan: UserPlan) -> Self {
        Self {
            accounts: IntegrationAccountRepository::new(store.clone()),
            revenue: RevenueSeriesRepository::new(store.clone()),
            users: UserRepository::new(store),
            mock,
            demo_plan,
        }
    }

    /// Seeds the demo integration accounts and the demo user on first
    /// start. Idempotent: existing records are left alone.
    pub async fn ensure_seed(&self) -> Result<(), RepositoryError> {
        if self.accounts.list().await?.is_empty() {
            for account in self.mock.accounts() {
                self.accounts.create(account.clone()).await?;
            }
            tracing::info!(count = self.mock.accounts().len(), "seeded demo accounts");
        }

        if self.users.get(DEMO_USER_ID).await?.is_none() {
            self.users
                .put(&User {
                    id: DEMO_USER_ID.to_string(),
                    plan: self.demo_plan,
                    daily_pulls: Vec::new(),
                    created_at: Some(Utc::now()),
                })
                .await?;
            tracing::info!(plan = ?self.demo_plan, "seeded demo user");
        }

        Ok(())
    }
}
