//! Typed repositories over the entity store. Every multi-row operation here
//! is a composition of single-key store calls; concurrent writers can
//! interleave between them.

mod accounts;
mod revenue;
mod users;

pub use accounts::IntegrationAccountRepository;
pub use revenue::RevenueSeriesRepository;
pub use users::{DEMO_USER_ID, UserRepository};

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("{0} not found")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
