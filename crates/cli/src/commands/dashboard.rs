use std::process;

use callboard_core::format::{format_date, format_duration};
use callboard_core::{Dashboard, DashboardFilter};
use time::OffsetDateTime;

use super::stats::render_stats;
use crate::input::CallInput;
use crate::{print_json, report_error, OutputFormat};

pub(crate) fn cmd_dashboard(
    input: &CallInput,
    filter: &str,
    show_all: bool,
    output: OutputFormat,
    quiet: bool,
) {
    let filter: DashboardFilter = match filter.parse() {
        Ok(f) => f,
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

    let dashboard = Dashboard::build(&calls, filter, show_all, OffsetDateTime::now_utc());

    match output {
        OutputFormat::Json => print_json(&dashboard),
        OutputFormat::Text => print!("{}", render_dashboard(&dashboard)),
    }
}

fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut out = render_stats("Sales Dashboard", &dashboard.stats);

    if !dashboard.charts.outcomes.is_empty() {
        out.push_str("\nOutcomes\n");
        for slice in &dashboard.charts.outcomes {
            out.push_str(&format!("  {:<14} {}\n", slice.name, slice.value));
        }
    }

    out.push_str("\nCall length\n");
    for bucket in &dashboard.charts.durations {
        out.push_str(&format!(
            "  {:<7} {:>3} {}\n",
            bucket.range,
            bucket.count,
            "#".repeat(bucket.count)
        ));
    }

    if !dashboard.charts.daily.is_empty() {
        out.push_str("\nDaily calls (qualified / not qualified)\n");
        for point in &dashboard.charts.daily {
            out.push_str(&format!(
                "  {:<7} {} / {}\n",
                point.label, point.qualified, point.not_qualified
            ));
        }
    }

    out.push_str(&format!(
        "\nCalls ({}: {} of {})\n",
        dashboard.filter,
        dashboard.calls.len(),
        dashboard.matching
    ));
    if dashboard.calls.is_empty() {
        out.push_str("  No calls found.\n");
    }
    for call in &dashboard.calls {
        out.push_str(&format!(
            "  {:<13} {:<24} {:<14} {}\n",
            format_date(&call.date),
            call.prospect_name,
            call.outcome.label(),
            format_duration(call.duration)
        ));
    }
    out
}
