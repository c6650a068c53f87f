use std::path::PathBuf;

use callboard_core::DecodeError;

/// All errors that can be returned by a CallSource implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No call with the given id exists in the collection.
    #[error("call not found: {id}")]
    NotFound { id: String },

    /// The backing file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file is not valid JSON.
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The JSON is not a call collection.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A source-specific failure (remote fetch, etc.).
    #[error("call source error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
