use std::process;

use callboard_core::format::{format_date, format_duration, format_percent};
use callboard_core::{filter_and_sort, CallRecord, OutcomeFilter, SortKey, ViewParameters};

use crate::input::CallInput;
use crate::{print_json, report_error, OutputFormat};

pub(crate) fn cmd_list(
    input: &CallInput,
    search: &str,
    outcome: &str,
    sort: &str,
    limit: Option<usize>,
    output: OutputFormat,
    quiet: bool,
) {
    let params = match parse_view(search, outcome, sort) {
        Ok(p) => p,
        Err(msg) => {
            report_error(&format!("error: {}", msg), output, quiet);
            process::exit(1);
        }
    };

    let calls = match input.load() {
        Ok(c) => c,
        Err(msg) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let selected = filter_and_sort(&calls, &params);
    let matching = selected.len();
    let shown: Vec<&CallRecord> = selected.into_iter().take(limit.unwrap_or(usize::MAX)).collect();

    match output {
        OutputFormat::Json => print_json(&shown),
        OutputFormat::Text => {
            if shown.is_empty() {
                println!("No calls found matching your criteria.");
            } else {
                println!(
                    "{:<10} {:<13} {:<24} {:<14} {:>7} {:>6} {:>9}",
                    "ID", "DATE", "PROSPECT", "OUTCOME", "LENGTH", "TALK", "SENTIMENT"
                );
                for call in &shown {
                    println!("{}", table_row(call));
                }
            }
            if !quiet {
                println!();
                println!("Showing {} of {} calls", shown.len(), calls.len());
                if shown.len() < matching {
                    println!("({} more match; raise --limit to see them)", matching - shown.len());
                }
            }
        }
    }
}

/// Build [`ViewParameters`] from raw CLI strings.
pub(crate) fn parse_view(search: &str, outcome: &str, sort: &str) -> Result<ViewParameters, String> {
    let outcome_filter: OutcomeFilter = outcome.parse()?;
    let sort_key: SortKey = sort.parse()?;
    Ok(ViewParameters::new()
        .with_search(search)
        .with_outcome(outcome_filter)
        .with_sort(sort_key))
}

fn table_row(call: &CallRecord) -> String {
    format!(
        "{:<10} {:<13} {:<24} {:<14} {:>7} {:>6} {:>9}",
        truncate(&call.id, 10),
        format_date(&call.date),
        truncate(&call.prospect_name, 24),
        call.outcome.label(),
        format_duration(call.duration),
        format_percent(call.talk_time_ratio),
        format_percent(call.sentiment_score),
    )
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
