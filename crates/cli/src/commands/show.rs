use std::process;

use callboard_core::format::{format_date, format_duration, format_percent};
use callboard_core::CallRecord;

use crate::input::{CallInput, LookupError};
use crate::{print_json, report_error, OutputFormat};

pub(crate) fn cmd_show(input: &CallInput, id: &str, output: OutputFormat, quiet: bool) {
    let call = match input.find(id) {
        Ok(c) => c,
        Err(LookupError::NotFound(msg)) | Err(LookupError::Failed(msg)) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    match output {
        OutputFormat::Json => print_json(&call),
        OutputFormat::Text => print!("{}", render_detail(&call)),
    }
}

/// Multi-line detail view of one call.
fn render_detail(call: &CallRecord) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", call.prospect_name));
    out.push_str(&format!("{}  [{}]\n\n", format_date(&call.date), call.outcome.label()));
    out.push_str(&format!("  Duration:        {}\n", format_duration(call.duration)));
    out.push_str(&format!("  Talk time:       {}\n", format_percent(call.talk_time_ratio)));
    out.push_str(&format!("  Questions asked: {}\n", call.questions_asked));
    out.push_str(&format!("  Sentiment:       {}\n", format_percent(call.sentiment_score)));
    out.push_str(&format!("  Status:          {}\n", call.status));
    out.push_str(&format!("  Outcome:         {}\n", call.outcome.label()));
    if let Some(notes) = &call.notes {
        out.push_str(&format!("\nNotes:\n  {}\n", notes));
    }
    if !call.tags.is_empty() {
        out.push_str(&format!("\nTags: {}\n", call.tags.join(", ")));
    }
    out
}
