pub mod documents;

pub use documents::{InsertResponse, MessageResponse};
