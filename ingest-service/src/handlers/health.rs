pub const RUNNING_MESSAGE: &str = "API is running";

pub async fn root() -> &'static str {
    RUNNING_MESSAGE
}
