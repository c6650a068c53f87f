use std::path::{Path, PathBuf};

use async_trait::async_trait;
use callboard_core::{decode_calls, CallRecord};

use crate::error::StoreError;
use crate::traits::CallSource;

/// A call collection loaded once from a JSON file and served from memory.
///
/// Malformed entries are dropped at load time and logged; the remaining
/// records are served unchanged for the life of the source.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: Option<PathBuf>,
    records: Vec<CallRecord>,
    rejected: usize,
}

impl JsonFileSource {
    /// Read and decode `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let doc: serde_json::Value =
            serde_json::from_str(&text).map_err(|source| StoreError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        let report = decode_calls(&doc)?;
        for rejected in &report.rejected {
            tracing::warn!(file = %path.display(), "skipping malformed call record: {}", rejected);
        }
        tracing::info!(
            file = %path.display(),
            calls = report.records.len(),
            rejected = report.rejected.len(),
            "loaded call collection"
        );

        Ok(JsonFileSource {
            path: Some(path.to_path_buf()),
            rejected: report.rejected.len(),
            records: report.records,
        })
    }

    /// Serve an in-memory collection.
    pub fn from_records(records: Vec<CallRecord>) -> Self {
        JsonFileSource {
            path: None,
            records,
            rejected: 0,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of entries dropped as malformed at load time.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn records(&self) -> &[CallRecord] {
        &self.records
    }
}

#[async_trait]
impl CallSource for JsonFileSource {
    async fn list_calls(&self) -> Result<Vec<CallRecord>, StoreError> {
        Ok(self.records.clone())
    }

    async fn get_call(&self, id: &str) -> Result<CallRecord, StoreError> {
        self.records
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }
}
