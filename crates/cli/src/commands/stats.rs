use std::process;

use callboard_core::{aggregate, filter, AggregateStats, OutcomeFilter, ViewParameters};
use serde::Serialize;

use crate::input::CallInput;
use crate::{print_json, report_error, OutputFormat};

/// Stats over the whole collection and over the current view.
#[derive(Debug, Serialize)]
pub(crate) struct StatsReport {
    pub(crate) overall: AggregateStats,
    pub(crate) filtered: AggregateStats,
}

pub(crate) fn cmd_stats(
    input: &CallInput,
    search: &str,
    outcome: &str,
    output: OutputFormat,
    quiet: bool,
) {
    let outcome_filter: OutcomeFilter = match outcome.parse() {
        Ok(f) => f,
        Err(msg) => {
            report_error(&format!("error: {}", msg), output, quiet);
            process::exit(1);
        }
    };
    let params = ViewParameters::new()
        .with_search(search)
        .with_outcome(outcome_filter);

    let calls = match input.load() {
        Ok(c) => c,
        Err(msg) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let report = StatsReport {
        overall: aggregate(&calls),
        filtered: aggregate(filter(&calls, &params)),
    };

    match output {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            print!("{}", render_stats("All calls", &report.overall));
            if params != ViewParameters::new() {
                println!();
                print!("{}", render_stats("Matching calls", &report.filtered));
            }
        }
    }
}

pub(crate) fn render_stats(title: &str, stats: &AggregateStats) -> String {
    format!(
        "{}\n  Total calls:    {}\n  Qualified:      {} ({}%)\n  Avg duration:   {}m\n  Avg sentiment:  {}%\n",
        title,
        stats.total,
        stats.qualified_count,
        stats.qualified_rate.round() as i64,
        stats.avg_duration_minutes.round() as i64,
        (stats.avg_sentiment * 100.0).round() as i64,
    )
}
