use super::RepositoryError;
use crate::store::EntityStore;
use chrono::{DateTime, Utc};
use edge_revenue_types::IntegrationAccount;
use std::sync::Arc;

const KIND: &str = "integration_account";

/// Owns `IntegrationAccount` records.
#[derive(Clone, Debug)]
pub struct IntegrationAccountRepository {
    store: Arc<dyn EntityStore>,
}

impl IntegrationAccountRepository {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<IntegrationAccount>, RepositoryError> {
        let ids = self.store.list_ids(KIND).await?;
        let mut accounts = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(value) = self.store.get(KIND, &id).await? {
                accounts.push(serde_json::from_value(value)?);
            }
        }
        Ok(accounts)
    }

    pub async fn get(&self, id: &str) -> Result<Option<IntegrationAccount>, RepositoryError> {
        match self.store.get(KIND, id).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    pub async fn create(
        &self,
        account: IntegrationAccount,
    ) -> Result<IntegrationAccount, RepositoryError> {
        self.store
            .put(KIND, &account.id, serde_json::to_value(&account)?)
            .await?;
        Ok(account)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, RepositoryError> {
        Ok(self.store.delete(KIND, id).await?)
    }

    /// Stamps `last_pulled_at`. Every pull stamps, including pulls that
    /// inserted zero new rows.
    pub async fn record_pull(
        &self,
        id: &str,
        now: DateTime<Utc>,
    ) -> Result<IntegrationAccount, RepositoryError> {
        let mut account = self
            .get(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("integration account {id}")))?;
        account.last_pulled_at = Some(now);
        self.store
            .put(KIND, id, serde_json::to_value(&account)?)
            .await?;
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use edge_revenue_types::IntegrationPlatform;

    fn account(id: &str) -> IntegrationAccount {
        IntegrationAccount {
            id: id.to_string(),
            platform: IntegrationPlatform::FacebookAds,
            account_name: format!("Account {id}"),
            last_pulled_at: None,
        }
    }

    #[tokio::test]
    async fn create_list_delete() {
        let repo = IntegrationAccountRepository::new(Arc::new(MemoryStore::new()));
        repo.create(account("fb2")).await.unwrap();
        repo.create(account("fb1")).await.unwrap();

        let listed = repo.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        // Index order, not insertion order.
        assert_eq!(listed[0].id, "fb1");

        assert!(repo.delete("fb1").await.unwrap());
        assert!(!repo.delete("fb1").await.unwrap());
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn record_pull_stamps_and_requires_existence() {
        let repo = IntegrationAccountRepository::new(Arc::new(MemoryStore::new()));
        repo.create(account("fb1")).await.unwrap();

        let now = Utc::now();
        let stamped = repo.record_pull("fb1", now).await.unwrap();
        assert_eq!(stamped.last_pulled_at, Some(now));

        let err = repo.record_pull("missing", now).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }
}
