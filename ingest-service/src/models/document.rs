//! Mapping between caller-supplied JSON and stored BSON documents.
//!
//! Payloads are opaque: nothing is validated beyond "top level is an object",
//! which is what the database itself requires of a document.

use mongodb::bson::{self, Bson, Document};
use serde_json::{Map, Number, Value};
use service_core::error::AppError;

/// Field the database uses as the primary key.
pub const ID_FIELD: &str = "_id";

/// Largest accepted request body, matching MongoDB's 16 MiB document limit.
pub const MAX_DOCUMENT_BYTES: usize = 16 * 1024 * 1024;

/// Converts a JSON payload into a BSON document, unmodified.
pub fn document_from_json(value: &Value) -> Result<Document, AppError> {
    if !value.is_object() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "document must be a JSON object, got {}",
            json_kind(value)
        )));
    }

    bson::to_document(value).map_err(|e| AppError::BadRequest(anyhow::Error::new(e)))
}

/// Renders a stored document as plain JSON.
pub fn document_to_json(document: Document) -> Value {
    Value::Object(
        document
            .into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect::<Map<String, Value>>(),
    )
}

/// Plain JSON form of a BSON value: ObjectIds become hex strings and dates
/// RFC 3339 strings instead of Extended JSON wrappers.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(i) => Value::Number(i.into()),
        Bson::Int64(i) => Value::Number(i.into()),
        Bson::Double(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        Bson::String(s) => Value::String(s),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Value::String(s),
            Err(_) => Value::Number(dt.timestamp_millis().into()),
        },
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(doc) => document_to_json(doc),
        other => other.into_relaxed_extjson(),
    }
}

/// String form of a document identifier as returned to callers.
pub fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => bson_to_json(other.clone()).to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
