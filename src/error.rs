use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Connection(String),
    #[error("{0}")]
    Schema(String),
    #[error("{0}")]
    Validation(String),
    #[error("Failed to save {key}: {response}")]
    Device { key: String, response: String },
}
