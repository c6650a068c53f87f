//! Resolving where one-shot commands read their calls from.

use std::path::PathBuf;

use callboard_core::CallRecord;
use callboard_storage::{JsonFileSource, StoreError};

use crate::remote::{RemoteClient, RemoteError};

/// A local collection file or a running server.
#[derive(Debug, Clone)]
pub(crate) enum CallInput {
    File(PathBuf),
    Remote(String),
}

/// Why a single-call lookup failed.
#[derive(Debug)]
pub(crate) enum LookupError {
    NotFound(String),
    Failed(String),
}

impl CallInput {
    /// Load the full collection.
    pub(crate) fn load(&self) -> Result<Vec<CallRecord>, String> {
        match self {
            CallInput::File(path) => JsonFileSource::open(path)
                .map(|source| source.records().to_vec())
                .map_err(|e| format!("error: {}", e)),
            CallInput::Remote(url) => RemoteClient::new(url)
                .list_calls()
                .map_err(|e| format!("error: {}", e)),
        }
    }

    /// Look up one call by id.
    pub(crate) fn find(&self, id: &str) -> Result<CallRecord, LookupError> {
        match self {
            CallInput::File(path) => {
                let source = JsonFileSource::open(path)
                    .map_err(|e| LookupError::Failed(format!("error: {}", e)))?;
                source
                    .records()
                    .iter()
                    .find(|c| c.id == id)
                    .cloned()
                    .ok_or_else(|| {
                        LookupError::NotFound(StoreError::NotFound { id: id.to_string() }.to_string())
                    })
            }
            CallInput::Remote(url) => match RemoteClient::new(url).get_call(id) {
                Ok(call) => Ok(call),
                Err(RemoteError::NotFound(msg)) => {
                    Err(LookupError::NotFound(format!("call not found: {} ({})", id, msg)))
                }
                Err(e) => Err(LookupError::Failed(format!("error: {}", e))),
            },
        }
    }
}
