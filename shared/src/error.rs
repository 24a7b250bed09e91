use thiserror::Error;
use serde_json::Error as JsonError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum SharedError {
    /// The request never produced a response body.
    #[error("Network error: {0}")]
    Network(String),

    /// The body was received but is not the JSON we expect.
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<JsonError> for SharedError {
    fn from(error: JsonError) -> Self {
        Self::Parse(error.to_string())
    }
}

impl From<std::io::Error> for SharedError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SharedError>;
