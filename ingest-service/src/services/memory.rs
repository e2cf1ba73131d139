//! In-process document store, for running without a database.

use crate::models::ID_FIELD;
use crate::services::DocumentStore;
use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use mongodb::bson::{oid::ObjectId, Bson, Document};
use service_core::error::AppError;

#[derive(Default)]
pub struct MemoryStore {
    documents: DashMap<String, Document>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

// Numerically equal ids collide, as in MongoDB; everything else is keyed by
// its Extended JSON, which keeps ObjectId("..") and the string ".." apart.
fn key_for(id: &Bson) -> String {
    match id {
        Bson::Int32(i) => format!("number:{}", i),
        Bson::Int64(i) => format!("number:{}", i),
        Bson::Double(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            format!("number:{}", *f as i64)
        }
        Bson::Double(f) => format!("number:{:?}", f),
        other => other.clone().into_relaxed_extjson().to_string(),
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, document: Document) -> Result<Bson, AppError> {
        let (id, document) = match document.get(ID_FIELD) {
            Some(id) => (id.clone(), document),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                let mut with_id = Document::new();
                with_id.insert(ID_FIELD, id.clone());
                for (key, value) in document {
                    with_id.insert(key, value);
                }
                (id, with_id)
            }
        };

        match self.documents.entry(key_for(&id)) {
            Entry::Occupied(_) => Err(AppError::Conflict(anyhow::anyhow!(
                "duplicate key: {} {}",
                ID_FIELD,
                key_for(&id)
            ))),
            Entry::Vacant(slot) => {
                slot.insert(document);
                Ok(id)
            }
        }
    }

    async fn find_by_id(&self, id: &Bson) -> Result<Option<Document>, AppError> {
        Ok(self
            .documents
            .get(&key_for(id))
            .map(|entry| entry.value().clone()))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn generates_id_first() {
        let store = MemoryStore::new();
        let id = store.insert(doc! { "name": "a" }).await.unwrap();

        assert!(matches!(id, Bson::ObjectId(_)));
        let stored = store.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.keys().next().map(String::as_str), Some(ID_FIELD));
        assert_eq!(stored.get_str("name").unwrap(), "a");
    }

    #[tokio::test]
    async fn keeps_caller_supplied_id() {
        let store = MemoryStore::new();
        let id = store
            .insert(doc! { "_id": "custom", "n": 1 })
            .await
            .unwrap();

        assert_eq!(id, Bson::String("custom".into()));
        assert!(store.find_by_id(&id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn duplicate_id_conflicts() {
        let store = MemoryStore::new();
        store.insert(doc! { "_id": 1 }).await.unwrap();

        let err = store.insert(doc! { "_id": 1 }).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn numerically_equal_ids_conflict() {
        let store = MemoryStore::new();
        store.insert(doc! { "_id": 1_i32, "n": "int32" }).await.unwrap();

        for id in [Bson::Int64(1), Bson::Double(1.0)] {
            let err = store.insert(doc! { "_id": id.clone() }).await.unwrap_err();
            assert!(matches!(err, AppError::Conflict(_)), "{id:?}");

            let found = store.find_by_id(&id).await.unwrap().unwrap();
            assert_eq!(found.get_str("n").unwrap(), "int32");
        }

        store.insert(doc! { "_id": 1.5 }).await.unwrap();
        store.insert(doc! { "_id": "1" }).await.unwrap();
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn object_id_and_hex_string_are_distinct_keys() {
        let store = MemoryStore::new();
        let oid = ObjectId::new();
        store.insert(doc! { "_id": oid }).await.unwrap();
        store.insert(doc! { "_id": oid.to_hex() }).await.unwrap();

        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn missing_id_reads_none() {
        let store = MemoryStore::new();
        let found = store
            .find_by_id(&Bson::ObjectId(ObjectId::new()))
            .await
            .unwrap();
        assert!(found.is_none());
    }
}
