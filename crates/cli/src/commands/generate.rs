use std::path::Path;
use std::process;

use rand::rngs::StdRng;
use rand::SeedableRng;
use time::OffsetDateTime;

use crate::generate::mock_calls;
use crate::{report_error, OutputFormat};

pub(crate) fn cmd_generate(
    count: usize,
    seed: Option<u64>,
    out: Option<&Path>,
    output: OutputFormat,
    quiet: bool,
) {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let calls = mock_calls(&mut rng, count, OffsetDateTime::now_utc());

    let doc = serde_json::json!({ "calls": calls });
    let text = match serde_json::to_string_pretty(&doc) {
        Ok(t) => t,
        Err(e) => {
            report_error(&format!("error: serialization failed: {}", e), output, quiet);
            process::exit(1);
        }
    };

    match out {
        Some(path) => {
            if let Err(e) = std::fs::write(path, format!("{}\n", text)) {
                let msg = format!("error writing '{}': {}", path.display(), e);
                report_error(&msg, output, quiet);
                process::exit(1);
            }
            if !quiet {
                match output {
                    OutputFormat::Text => {
                        eprintln!("wrote {} calls to {}", count, path.display())
                    }
                    OutputFormat::Json => eprintln!(
                        "{}",
                        serde_json::json!({ "written": count, "path": path.display().to_string() })
                    ),
                }
            }
        }
        None => println!("{}", text),
    }
}
