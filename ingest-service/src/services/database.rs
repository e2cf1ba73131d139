use crate::services::DocumentStore;
use async_trait::async_trait;
use mongodb::{
    bson::{doc, Bson, Document},
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;

#[derive(Clone)]
pub struct MongoStore {
    client: MongoClient,
    db: Database,
    collection: String,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(
            database = %database,
            collection = %collection,
            "MongoDB client ready"
        );
        Ok(Self {
            client,
            db,
            collection: collection.to_string(),
        })
    }

    pub fn documents(&self) -> Collection<Document> {
        self.db.collection(&self.collection)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert(&self, document: Document) -> Result<Bson, AppError> {
        let result = self.documents().insert_one(document, None).await.map_err(|e| {
            tracing::error!(collection = %self.collection, "Failed to insert document: {}", e);
            AppError::from(e)
        })?;
        Ok(result.inserted_id)
    }

    async fn find_by_id(&self, id: &Bson) -> Result<Option<Document>, AppError> {
        self.documents()
            .find_one(doc! { "_id": id.clone() }, None)
            .await
            .map_err(|e| {
                tracing::error!(collection = %self.collection, "Failed to read document back: {}", e);
                AppError::from(e)
            })
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
