use async_trait::async_trait;
use mongodb::bson::Document;
use service_core::error::AppError;

/// Outcome of probing a store for the diagnostic endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreStatus {
    /// The adapter exists but holds no connection (missing URL or name).
    NotInitialized,
    /// A connection exists but listing collections failed.
    Faulted { error: String },
    /// Connected and able to list collections.
    Connected { collections: Vec<String> },
}

/// Minimal document store used by the API.
///
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert `record` into `collection`, returning it with its `_id` set.
    async fn insert_one(
        &self,
        collection: &str,
        record: Document,
    ) -> Result<Option<Document>, AppError>;

    /// Up to `limit` documents matching `filter`, in the store's natural order.
    async fn find(
        &self,
        collection: &str,
        filter: Document,
        limit: i64,
    ) -> Result<Vec<Document>, AppError>;

    async fn list_collection_names(&self) -> Result<Vec<String>, AppError>;

    /// Cheap liveness round-trip used by the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;

    /// Capability check. Never fails; problems are folded into the status.
    async fn status(&self) -> StoreStatus;
}
