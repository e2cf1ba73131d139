use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const INSERTED_MESSAGE: &str = "Data inserted successfully";
pub const RETRIEVED_MESSAGE: &str = "Data retrieved successfully";

#[derive(Debug, Serialize, Deserialize)]
pub struct InsertResponse {
    pub message: String,
    pub id: String,
    pub data: Value,
}

impl InsertResponse {
    pub fn new(id: String, data: Value) -> Self {
        Self {
            message: INSERTED_MESSAGE.to_string(),
            id,
            data,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn retrieved() -> Self {
        Self {
            message: RETRIEVED_MESSAGE.to_string(),
        }
    }
}
