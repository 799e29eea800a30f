use crate::services::store::{DocumentStore, StoreStatus};
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use service_core::error::AppError;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Process-local [`DocumentStore`] for demos and tests.
///
/// Documents keep insertion order. Filters match on top-level equality.
/// [`InMemoryStore::failing`] builds a store whose every operation fails,
/// standing in for an unreachable database.
pub struct InMemoryStore {
    collections: Mutex<BTreeMap<String, Vec<Document>>>,
    failure: Option<String>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            collections: Mutex::new(BTreeMap::new()),
            failure: None,
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            collections: Mutex::new(BTreeMap::new()),
            failure: Some(message.into()),
        }
    }

    /// Number of documents held in `collection`.
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .map(|c| c.get(collection).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    fn check_available(&self) -> Result<(), AppError> {
        match &self.failure {
            Some(msg) => Err(AppError::DatabaseError(anyhow::anyhow!(msg.clone()))),
            None => Ok(()),
        }
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Vec<Document>>>, AppError> {
        self.collections.lock().map_err(|e| {
            AppError::InternalError(anyhow::anyhow!("In-memory store mutex poisoned: {}", e))
        })
    }
}

fn matches_filter(doc: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, expected)| doc.get(key) == Some(expected))
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn insert_one(
        &self,
        collection: &str,
        mut record: Document,
    ) -> Result<Option<Document>, AppError> {
        self.check_available()?;
        if !record.contains_key("_id") {
            record.insert("_id", Bson::ObjectId(ObjectId::new()));
        }
        self.lock()?
            .entry(collection.to_string())
            .or_default()
            .push(record.clone());
        Ok(Some(record))
    }

    async fn find(
        &self,
        collection: &str,
        filter: Document,
        limit: i64,
    ) -> Result<Vec<Document>, AppError> {
        self.check_available()?;
        // Mirrors the driver: a non-positive limit means no limit.
        let limit = usize::try_from(limit).ok().filter(|l| *l > 0).unwrap_or(usize::MAX);
        let collections = self.lock()?;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| matches_filter(d, &filter))
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, AppError> {
        self.check_available()?;
        Ok(self.lock()?.keys().cloned().collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check_available()
    }

    async fn status(&self) -> StoreStatus {
        match &self.failure {
            Some(msg) => StoreStatus::Faulted { error: msg.clone() },
            None => match self.list_collection_names().await {
                Ok(collections) => StoreStatus::Connected { collections },
                Err(e) => StoreStatus::Faulted {
                    error: e.to_string(),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn insert_assigns_object_id() {
        let store = InMemoryStore::new();

        let stored = store
            .insert_one("notes", doc! { "text": "hi" })
            .await
            .unwrap()
            .unwrap();

        assert!(matches!(stored.get("_id"), Some(Bson::ObjectId(_))));
        assert_eq!(store.count("notes"), 1);
    }

    #[tokio::test]
    async fn find_keeps_insertion_order_and_limit() {
        let store = InMemoryStore::new();
        for n in 0..5 {
            store.insert_one("notes", doc! { "n": n }).await.unwrap();
        }

        let docs = store.find("notes", doc! {}, 3).await.unwrap();
        let ns: Vec<i32> = docs.iter().map(|d| d.get_i32("n").unwrap()).collect();
        assert_eq!(ns, vec![0, 1, 2]);

        let all = store.find("notes", doc! {}, 0).await.unwrap();
        assert_eq!(all.len(), 5);
    }

    #[tokio::test]
    async fn find_applies_equality_filter() {
        let store = InMemoryStore::new();
        store.insert_one("notes", doc! { "tag": "a" }).await.unwrap();
        store.insert_one("notes", doc! { "tag": "b" }).await.unwrap();

        let docs = store.find("notes", doc! { "tag": "b" }, 10).await.unwrap();
        assert_eq!(docs.len(), 1);
    }

    #[tokio::test]
    async fn unknown_collection_is_empty() {
        let store = InMemoryStore::new();
        assert!(store.find("missing", doc! {}, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn status_lists_collections() {
        let store = InMemoryStore::new();
        store.insert_one("b", doc! {}).await.unwrap();
        store.insert_one("a", doc! {}).await.unwrap();

        assert_eq!(
            store.status().await,
            StoreStatus::Connected {
                collections: vec!["a".to_string(), "b".to_string()]
            }
        );
    }

    #[tokio::test]
    async fn failing_store_rejects_everything() {
        let store = InMemoryStore::failing("connection refused");

        assert!(store.insert_one("notes", doc! {}).await.is_err());
        assert!(store.find("notes", doc! {}, 1).await.is_err());
        assert!(store.ping().await.is_err());
        assert_eq!(
            store.status().await,
            StoreStatus::Faulted {
                error: "connection refused".to_string()
            }
        );
        assert_eq!(store.count("notes"), 0);
    }
}
