pub mod document;

pub use document::{
    bson_to_json, document_from_json, document_to_json, id_to_string, ID_FIELD,
    MAX_DOCUMENT_BYTES,
};
