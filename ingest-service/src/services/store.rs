use async_trait::async_trait;
use mongodb::bson::{Bson, Document};
use service_core::error::AppError;

/// Persistence seam for inserted documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persists `document` and returns its `_id`, generating one if absent.
    async fn insert(&self, document: Document) -> Result<Bson, AppError>;

    async fn find_by_id(&self, id: &Bson) -> Result<Option<Document>, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}
