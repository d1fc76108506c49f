pub mod arn;
pub mod log_stream;
pub mod resources;
pub mod user_pool;
pub mod strings;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl From<String> for ValidationError {
    fn from(value: String) -> Self {
        ValidationError(value)
    }
}

impl From<&str> for ValidationError {
    fn from(value: &str) -> Self {
        ValidationError(value.to_owned())
    }
}

impl From<resources::TwoPartIdError> for ValidationError {
    fn from(e: resources::TwoPartIdError) -> Self {
        ValidationError(e.to_string())
    }
}
