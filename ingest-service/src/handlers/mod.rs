pub mod documents;
pub mod health;

pub use documents::{get_data, insert_data};
pub use health::root;
