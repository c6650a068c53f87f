use std::path::Path;
use std::process;

use callboard_core::decode_calls;

use crate::{report_error, OutputFormat};

static CALLS_SCHEMA_STR: &str = include_str!("../../../../schema/calls-schema.json");

/// Check a collection file against the JSON Schema, then against the
/// decoder's semantic rules (timestamps, unique ids).
pub(crate) fn cmd_validate(file: &Path, output: OutputFormat, quiet: bool) {
    let schema: serde_json::Value = match serde_json::from_str(CALLS_SCHEMA_STR) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("internal error: failed to parse embedded calls schema: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let doc_str = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", file.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let doc: serde_json::Value = match serde_json::from_str(&doc_str) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("error parsing JSON in '{}': {}", file.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let validator = match jsonschema::validator_for(&schema) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("internal error: failed to compile calls schema: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let mut errors: Vec<String> = validator
        .iter_errors(&doc)
        .map(|e| format!("{}", e))
        .collect();

    // Schema-valid documents can still carry bad timestamps or duplicate ids.
    let mut call_count = 0;
    if errors.is_empty() {
        match decode_calls(&doc) {
            Ok(report) => {
                call_count = report.records.len();
                errors.extend(report.rejected.iter().map(|r| r.to_string()));
            }
            Err(e) => errors.push(e.to_string()),
        }
    }

    if errors.is_empty() {
        if !quiet {
            match output {
                OutputFormat::Text => println!("valid ({} calls)", call_count),
                OutputFormat::Json => {
                    println!("{}", serde_json::json!({ "valid": true, "calls": call_count }))
                }
            }
        }
    } else {
        match output {
            OutputFormat::Text => {
                if !quiet {
                    eprintln!("invalid call collection");
                    for err in &errors {
                        eprintln!("  - {}", err);
                    }
                }
            }
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "valid": false,
                    "errors": errors
                });
                eprintln!(
                    "{}",
                    serde_json::to_string_pretty(&json).unwrap_or_default()
                );
            }
        }
        process::exit(1);
    }
}
