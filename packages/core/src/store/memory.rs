use super::{EntityStore, StoreError};
use async_trait::async_trait;
use dashmap::DashMap;
use edge_revenue_types::Value;
use parking_lot::Mutex;
use std::collections::{BTreeSet, HashMap};

/// In-memory backend for the demo deployment. Records live in a concurrent
/// map keyed by `(kind, id)`; the per-kind index is a `BTreeSet` so
/// `list_ids` comes back ordered without a sort.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: DashMap<(String, String), Value>,
    indices: Mutex<HashMap<String, BTreeSet<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn get(&self, kind: &str, id: &str) -> Result<Option<Value>, StoreError> {
        Ok(self
            .records
            .get(&(kind.to_string(), id.to_string()))
            .map(|entry| entry.value().clone()))
    }

    async fn put(&self, kind: &str, id: &str, value: Value) -> Result<(), StoreError> {
        self.records
            .insert((kind.to_string(), id.to_string()), value);
        self.indices
            .lock()
            .entry(kind.to_string())
            .or_default()
            .insert(id.to_string());
        Ok(())
    }

    async fn delete(&self, kind: &str, id: &str) -> Result<bool, StoreError> {
        let removed = self
            .records
            .remove(&(kind.to_string(), id.to_string()))
            .is_some();
        if let Some(index) = self.indices.lock().get_mut(kind) {
            index.remove(id);
        }
        Ok(removed)
    }

    async fn list_ids(&self, kind: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .indices
            .lock()
            .get(kind)
            .map(|index| index.iter().cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edge_revenue_types::json::json;

    #[tokio::test]
    async fn put_get_delete_round_trip() {
        let store = MemoryStore::new();
        store
            .put("widget", "a", json!({"value": 1}))
            .await
            .unwrap();

        let fetched = store.get("widget", "a").await.unwrap();
        assert_eq!(fetched, Some(json!({"value": 1})));

        assert!(store.delete("widget", "a").await.unwrap());
        assert!(!store.delete("widget", "a").await.unwrap());
        assert_eq!(store.get("widget", "a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn index_stays_ordered_and_deduplicated() {
        let store = MemoryStore::new();
        for id in ["b", "a", "c", "a"] {
            store.put("widget", id, json!({})).await.unwrap();
        }
        assert_eq!(store.list_ids("widget").await.unwrap(), ["a", "b", "c"]);

        store.delete("widget", "b").await.unwrap();
        assert_eq!(store.list_ids("widget").await.unwrap(), ["a", "c"]);
    }

    #[tokio::test]
    async fn kinds_are_isolated() {
        let store = MemoryStore::new();
        store.put("widget", "a", json!({})).await.unwrap();
        store.put("gadget", "z", json!({})).await.unwrap();

        assert_eq!(store.list_ids("widget").await.unwrap(), ["a"]);
        assert_eq!(store.list_ids("gadget").await.unwrap(), ["z"]);
        assert_eq!(store.get("widget", "z").await.unwrap(), None);
    }
}
