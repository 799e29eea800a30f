use crate::models::CONTACT_COLLECTION;
use crate::services::store::{DocumentStore, StoreStatus};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{ClientOptions, FindOptions, IndexOptions},
    Client as MongoClient, Database, IndexModel,
};
use service_core::error::AppError;
use std::time::Duration;

#[derive(Clone)]
struct Connection {
    client: MongoClient,
    db: Database,
}

/// MongoDB-backed [`DocumentStore`].
///
/// Built once at startup. Without a URL and database name the handle stays
/// uninitialized: every operation fails and [`DocumentStore::status`]
/// reports [`StoreStatus::NotInitialized`].
#[derive(Clone)]
pub struct MongoStore {
    conn: Option<Connection>,
}

impl MongoStore {
    pub async fn connect(
        uri: &str,
        database: &str,
        server_selection_timeout: Duration,
    ) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB");
        let mut options = ClientOptions::parse(uri).await.map_err(|e| {
            // The URI may carry credentials, so it is never logged.
            tracing::error!("Failed to parse MongoDB connection string: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;
        options.server_selection_timeout = Some(server_selection_timeout);
        options.app_name = Some("portfolio-service".to_string());

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "MongoDB client ready");
        Ok(Self {
            conn: Some(Connection { client, db }),
        })
    }

    pub fn uninitialized() -> Self {
        Self { conn: None }
    }

    pub fn is_initialized(&self) -> bool {
        self.conn.is_some()
    }

    pub fn client(&self) -> Option<&MongoClient> {
        self.conn.as_ref().map(|c| &c.client)
    }

    pub fn database_name(&self) -> Option<&str> {
        self.conn.as_ref().map(|c| c.db.name())
    }

    fn db(&self) -> Result<&Database, AppError> {
        self.conn
            .as_ref()
            .map(|c| &c.db)
            .ok_or_else(|| AppError::DatabaseError(anyhow::anyhow!("Database not initialized")))
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        let db = self.db()?;
        tracing::info!("Creating MongoDB indexes for portfolio-service");

        // Newest-first reads of the contact inbox
        let created_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at_idx".to_string())
                    .build(),
            )
            .build();

        db.collection::<Document>(CONTACT_COLLECTION)
            .create_index(created_index, None)
            .await
            .map_err(|e| db_error("create_index", e))?;

        tracing::info!("Successfully created all MongoDB indexes");
        Ok(())
    }
}

fn db_error(operation: &'static str, e: mongodb::error::Error) -> AppError {
    tracing::error!(operation, "MongoDB operation failed: {}", e);
    metrics::counter!("store_errors_total", "operation" => operation).increment(1);
    AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert_one(
        &self,
        collection: &str,
        mut record: Document,
    ) -> Result<Option<Document>, AppError> {
        let result = self
            .db()?
            .collection::<Document>(collection)
            .insert_one(&record, None)
            .await
            .map_err(|e| db_error("insert_one", e))?;

        record.insert("_id", result.inserted_id);
        Ok(Some(record))
    }

    async fn find(
        &self,
        collection: &str,
        filter: Document,
        limit: i64,
    ) -> Result<Vec<Document>, AppError> {
        let find_options = FindOptions::builder().limit(limit).build();

        let cursor = self
            .db()?
            .collection::<Document>(collection)
            .find(filter, find_options)
            .await
            .map_err(|e| db_error("find", e))?;

        cursor
            .try_collect::<Vec<Document>>()
            .await
            .map_err(|e| db_error("find", e))
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, AppError> {
        self.db()?
            .list_collection_names(None)
            .await
            .map_err(|e| db_error("list_collection_names", e))
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.db()?
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| db_error("ping", e))?;
        Ok(())
    }

    async fn status(&self) -> StoreStatus {
        if !self.is_initialized() {
            return StoreStatus::NotInitialized;
        }
        match self.list_collection_names().await {
            Ok(collections) => StoreStatus::Connected { collections },
            Err(e) => StoreStatus::Faulted {
                error: store_error_message(&e),
            },
        }
    }
}

/// Driver message without the `AppError` variant prefix.
fn store_error_message(err: &AppError) -> String {
    match err {
        AppError::DatabaseError(inner) => inner.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn uninitialized_store_reports_not_initialized() {
        let store = MongoStore::uninitialized();

        assert!(!store.is_initialized());
        assert_eq!(store.database_name(), None);
        assert_eq!(store.status().await, StoreStatus::NotInitialized);
    }

    #[tokio::test]
    async fn uninitialized_store_rejects_operations() {
        let store = MongoStore::uninitialized();

        let err = store
            .insert_one(CONTACT_COLLECTION, doc! { "name": "Ada" })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DatabaseError(_)));

        assert!(store.ping().await.is_err());
        assert!(store.find(CONTACT_COLLECTION, doc! {}, 5).await.is_err());
    }

    #[tokio::test]
    async fn malformed_uri_fails_to_connect() {
        let result = MongoStore::connect("not-a-mongo-uri", "portfolio", Duration::from_secs(1)).await;
        assert!(matches!(result, Err(AppError::DatabaseError(_))));
    }
}
