//! Blocking HTTP client for a running `callboard serve` instance.
//!
//! Reads the `{data, success, error}` envelope and runs the payload through
//! the same boundary validation as local files.

use std::time::Duration;

use callboard_core::{decode_call, decode_calls, ApiResponse, CallRecord};
use serde_json::Value;

/// Overall deadline for one request.
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub(crate) enum RemoteError {
    #[error("could not reach {url}: {message}")]
    Transport { url: String, message: String },

    #[error("server returned an unreadable response ({status}): {message}")]
    BadResponse { status: u16, message: String },

    /// The server answered 404 with a failure envelope.
    #[error("{0}")]
    NotFound(String),

    /// The server answered with `success: false`.
    #[error("server reported failure ({status}): {message}")]
    Failed { status: u16, message: String },
}

pub(crate) struct RemoteClient {
    base_url: String,
    agent: ureq::Agent,
}

impl RemoteClient {
    pub(crate) fn new(base_url: &str) -> Self {
        // Non-2xx responses still carry an envelope worth reading.
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
            .build();
        RemoteClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: ureq::Agent::new_with_config(config),
        }
    }

    /// GET `/api/calls`
    pub(crate) fn list_calls(&self) -> Result<Vec<CallRecord>, RemoteError> {
        let (status, data) = self.fetch("/api/calls")?;
        let report = decode_calls(&data).map_err(|e| RemoteError::BadResponse {
            status,
            message: e.to_string(),
        })?;
        for rejected in &report.rejected {
            tracing::warn!(url = %self.base_url, "skipping malformed call record: {}", rejected);
        }
        Ok(report.records)
    }

    /// GET `/api/calls/{id}`
    pub(crate) fn get_call(&self, id: &str) -> Result<CallRecord, RemoteError> {
        let (status, data) = self.fetch(&format!("/api/calls/{}", encode_segment(id)))?;
        decode_call(&data).map_err(|message| RemoteError::BadResponse { status, message })
    }

    fn fetch(&self, path: &str) -> Result<(u16, Value), RemoteError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "fetching");

        let response = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| RemoteError::Transport {
                url: url.clone(),
                message: e.to_string(),
            })?;
        let status = response.status().as_u16();

        let envelope: ApiResponse<Value> = response
            .into_body()
            .read_json()
            .map_err(|e| RemoteError::BadResponse {
                status,
                message: e.to_string(),
            })?;

        match envelope.into_result() {
            Ok(data) => Ok((status, data)),
            Err(message) if status == 404 => Err(RemoteError::NotFound(message)),
            Err(message) => Err(RemoteError::Failed { status, message }),
        }
    }
}

/// Percent-encode a path segment.
fn encode_segment(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
