mod commands;
mod generate;
mod input;
mod remote;
mod serve;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::input::CallInput;

/// Default location of the bundled call collection.
pub(crate) const DEFAULT_DATA_PATH: &str = "data/calls.json";

/// Default port for `callboard serve`.
const DEFAULT_PORT: u16 = 3000;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Sales call analytics: list, inspect, and summarise call records.
#[derive(Parser)]
#[command(name = "callboard", version, about = "Sales call analytics dashboard backend")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where a command reads calls from.
#[derive(clap::Args, Debug, Clone)]
struct SourceArgs {
    /// Call collection JSON file (default: $CALLBOARD_DATA or data/calls.json)
    #[arg(long, conflicts_with = "remote")]
    data: Option<PathBuf>,
    /// Base URL of a running `callboard serve` instance
    #[arg(long)]
    remote: Option<String>,
}

impl SourceArgs {
    fn into_input(self) -> CallInput {
        match self.remote {
            Some(url) => CallInput::Remote(url),
            None => CallInput::File(resolve_data_path(self.data)),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to listen on (default: $CALLBOARD_PORT or 3000)
        #[arg(long)]
        port: Option<u16>,
        /// Call collection JSON file (default: $CALLBOARD_DATA or data/calls.json)
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// List calls, optionally searched, filtered, and sorted
    List {
        #[command(flatten)]
        source: SourceArgs,
        /// Case-insensitive search over prospect name, notes, and tags
        #[arg(long, default_value = "")]
        search: String,
        /// Outcome to keep (all, qualified, not-qualified, follow-up, closed-won, closed-lost)
        #[arg(long, default_value = "all")]
        outcome: String,
        /// Sort key (date, name, duration, sentiment)
        #[arg(long, default_value = "date")]
        sort: String,
        /// Show at most this many calls
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show one call in detail
    Show {
        /// Call id
        id: String,
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Aggregate statistics over all calls and the filtered subset
    Stats {
        #[command(flatten)]
        source: SourceArgs,
        /// Case-insensitive search over prospect name, notes, and tags
        #[arg(long, default_value = "")]
        search: String,
        /// Outcome to keep
        #[arg(long, default_value = "all")]
        outcome: String,
    },

    /// Dashboard snapshot: stats, chart datasets, and a call preview
    Dashboard {
        #[command(flatten)]
        source: SourceArgs,
        /// Quick filter (all, qualified, recent)
        #[arg(long, default_value = "all")]
        filter: String,
        /// Include every matching call instead of the preview
        #[arg(long)]
        all: bool,
    },

    /// Validate a call collection file against the JSON Schema
    Validate {
        /// Path to the call collection JSON file
        file: PathBuf,
    },

    /// Generate a mock call collection for demos
    Generate {
        /// Number of calls to generate
        #[arg(long, default_value = "30")]
        count: usize,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(matches!(cli.command, Commands::Serve { .. }));

    match cli.command {
        Commands::Serve { port, data } => {
            let config = serve::ServeConfig {
                port: port.unwrap_or_else(env_port),
                data: resolve_data_path(data),
            };
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    report_error(
                        &format!("failed to create tokio runtime: {}", e),
                        cli.output,
                        cli.quiet,
                    );
                    process::exit(1);
                }
            };
            if let Err(e) = rt.block_on(serve::start_server(config)) {
                report_error(&format!("Server error: {}", e), cli.output, cli.quiet);
                process::exit(1);
            }
        }
        Commands::List {
            source,
            search,
            outcome,
            sort,
            limit,
        } => {
            commands::list::cmd_list(
                &source.into_input(),
                &search,
                &outcome,
                &sort,
                limit,
                cli.output,
                cli.quiet,
            );
        }
        Commands::Show { id, source } => {
            commands::show::cmd_show(&source.into_input(), &id, cli.output, cli.quiet);
        }
        Commands::Stats {
            source,
            search,
            outcome,
        } => {
            commands::stats::cmd_stats(
                &source.into_input(),
                &search,
                &outcome,
                cli.output,
                cli.quiet,
            );
        }
        Commands::Dashboard {
            source,
            filter,
            all,
        } => {
            commands::dashboard::cmd_dashboard(
                &source.into_input(),
                &filter,
                all,
                cli.output,
                cli.quiet,
            );
        }
        Commands::Validate { file } => {
            commands::validate::cmd_validate(&file, cli.output, cli.quiet);
        }
        Commands::Generate { count, seed, out } => {
            commands::generate::cmd_generate(count, seed, out.as_deref(), cli.output, cli.quiet);
        }
    }
}

/// Install the stderr tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the server logs at info and the
/// one-shot commands only surface warnings.
fn init_logging(serving: bool) {
    let default_directives = if serving {
        "callboard=info,tower_http=info"
    } else {
        "callboard=warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directives.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn resolve_data_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var_os("CALLBOARD_DATA").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
}

fn env_port() -> u16 {
    std::env::var("CALLBOARD_PORT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}

/// Print `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) {
    let pretty = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"serialization error: {}\"}}", e));
    println!("{}", pretty);
}
