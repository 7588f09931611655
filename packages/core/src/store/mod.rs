//! Keyed entity store abstraction.
//!
//! The store persists JSON-serializable records under `(kind, id)` and keeps
//! a secondary index per entity kind: an ordered set of ids. Individual key
//! operations are serialized by the backend; there are no multi-key
//! transactions, so every multi-row operation in the repositories is a
//! client-side composition with no isolation guarantee.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use edge_revenue_types::Value;
use std::fmt::Debug;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait EntityStore: Send + Sync + Debug {
    async fn get(&self, kind: &str, id: &str) -> Result<Option<Value>, StoreError>;

    /// Upsert. Also registers `id` in the kind's index.
    async fn put(&self, kind: &str, id: &str, value: Value) -> Result<(), StoreError>;

    /// Returns whether a record was actually removed.
    async fn delete(&self, kind: &str, id: &str) -> Result<bool, StoreError>;

    /// All ids of a kind, ascending.
    async fn list_ids(&self, kind: &str) -> Result<Vec<String>, StoreError>;
}
