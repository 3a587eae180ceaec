use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextCraftError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Returned for both nonexistent records and records owned by another
    /// user; the two cases are indistinguishable to callers.
    #[error("Transformation not found")]
    NotFound,

    /// The generation backend failed. The underlying cause is logged at the
    /// call site and never carried in the error itself.
    #[error("Failed to transform text using AI service")]
    Generation,

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TextCraftError>;
