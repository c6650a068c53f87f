//! Decoding call collections from untrusted JSON.
//!
//! The main entry point is [`decode_calls`], which walks a
//! `&serde_json::Value` entry by entry, validates every field, and
//! reports malformed entries instead of failing the whole collection.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use crate::types::{parse_timestamp, CallRecord, CallStatus, Outcome};

/// Errors that reject a document as a whole.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// The document is neither an array nor an object with a `calls` array.
    #[error("expected an array of calls or an object with a 'calls' array")]
    NotACollection,

    /// Strict decoding found at least one malformed entry.
    #[error("{}", summarize_rejections(.0))]
    Rejected(Vec<RejectedRecord>),
}

fn summarize_rejections(rejected: &[RejectedRecord]) -> String {
    match rejected.first() {
        Some(first) => format!(
            "{} malformed call record(s); first: {}",
            rejected.len(),
            first
        ),
        None => "no malformed call records".to_string(),
    }
}

/// A single entry that failed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRecord {
    /// Position in the source array.
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub reason: String,
}

impl std::fmt::Display for RejectedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.id {
            Some(id) => write!(f, "entry {} ('{}'): {}", self.index, id, self.reason),
            None => write!(f, "entry {}: {}", self.index, self.reason),
        }
    }
}

/// Result of lenient decoding: valid records plus what was dropped.
#[derive(Debug, Clone, Default)]
pub struct DecodeReport {
    pub records: Vec<CallRecord>,
    pub rejected: Vec<RejectedRecord>,
}

impl DecodeReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Fail unless every entry decoded.
    pub fn into_strict(self) -> Result<Vec<CallRecord>, DecodeError> {
        if self.rejected.is_empty() {
            Ok(self.records)
        } else {
            Err(DecodeError::Rejected(self.rejected))
        }
    }
}

/// Decode a call collection: either `{"calls": [...]}` or a bare array.
///
/// Entries with a duplicate `id` are rejected; the first occurrence wins.
pub fn decode_calls(doc: &Value) -> Result<DecodeReport, DecodeError> {
    let entries = match doc {
        Value::Array(items) => items,
        Value::Object(map) => map
            .get("calls")
            .and_then(|c| c.as_array())
            .ok_or(DecodeError::NotACollection)?,
        _ => return Err(DecodeError::NotACollection),
    };

    let mut report = DecodeReport::default();
    let mut seen = HashSet::new();

    for (index, entry) in entries.iter().enumerate() {
        let id = entry.get("id").and_then(|v| v.as_str()).map(str::to_string);
        match decode_call(entry) {
            Ok(record) => {
                if seen.insert(record.id.clone()) {
                    report.records.push(record);
                } else {
                    report.rejected.push(RejectedRecord {
                        index,
                        id,
                        reason: "duplicate id".to_string(),
                    });
                }
            }
            Err(reason) => report.rejected.push(RejectedRecord { index, id, reason }),
        }
    }

    Ok(report)
}

/// Decode and validate a single call object.
pub fn decode_call(obj: &Value) -> Result<CallRecord, String> {
    if !obj.is_object() {
        return Err("entry is not an object".to_string());
    }

    let id = required_str(obj, "id")?;
    if id.is_empty() {
        return Err("'id' must not be empty".to_string());
    }

    let date = required_str(obj, "date")?;
    if parse_timestamp(&date).is_none() {
        return Err(format!("'date' is not an ISO 8601 timestamp: '{}'", date));
    }

    let status: CallStatus = required_str(obj, "status")?.parse()?;
    let outcome: Outcome = required_str(obj, "outcome")?.parse()?;

    let questions_asked = required_u64(obj, "questionsAsked")?;
    let questions_asked = u32::try_from(questions_asked)
        .map_err(|_| "'questionsAsked' is out of range".to_string())?;

    let notes = match obj.get("notes") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err("'notes' must be a string".to_string()),
    };

    let tags = match obj.get("tags") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|t| {
                t.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| "'tags' must contain only strings".to_string())
            })
            .collect::<Result<_, _>>()?,
        Some(_) => return Err("'tags' must be an array".to_string()),
    };

    Ok(CallRecord {
        id,
        prospect_name: required_str(obj, "prospectName")?,
        date,
        duration: required_u64(obj, "duration")?,
        status,
        outcome,
        talk_time_ratio: required_unit(obj, "talkTimeRatio")?,
        questions_asked,
        sentiment_score: required_unit(obj, "sentimentScore")?,
        notes,
        tags,
    })
}

fn required_str(obj: &Value, field: &str) -> Result<String, String> {
    match obj.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(format!("'{}' must be a string", field)),
        None => Err(format!("missing required field '{}'", field)),
    }
}

fn required_u64(obj: &Value, field: &str) -> Result<u64, String> {
    let value = obj
        .get(field)
        .ok_or_else(|| format!("missing required field '{}'", field))?;
    value
        .as_u64()
        .ok_or_else(|| format!("'{}' must be a non-negative integer", field))
}

/// A finite number in `[0, 1]`.
fn required_unit(obj: &Value, field: &str) -> Result<f64, String> {
    let value = obj
        .get(field)
        .ok_or_else(|| format!("missing required field '{}'", field))?
        .as_f64()
        .ok_or_else(|| format!("'{}' must be a number", field))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("'{}' must be between 0 and 1, got {}", field, value));
    }
    Ok(value)
}
