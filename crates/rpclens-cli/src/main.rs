use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rpclens_core::analyze::{DEFAULT_RESULTS_DIR, DEFAULT_SUMMARY_NAME};
use rpclens_core::{analyze, AnalyzerConfig, RpclensError};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "rpclens",
    about = "Compare RPC endpoints from load-test result files",
    version
)]
struct Args {
    /// Directory holding one JSON results file per endpoint.
    #[arg(long, default_value = DEFAULT_RESULTS_DIR)]
    results_dir: PathBuf,

    /// File name of the summary written into the results directory.
    #[arg(long, default_value = DEFAULT_SUMMARY_NAME)]
    summary_name: String,

    /// Also export the ranked summaries as CSV to this path.
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl From<Args> for AnalyzerConfig {
    fn from(args: Args) -> Self {
        AnalyzerConfig {
            results_dir: args.results_dir,
            summary_name: args.summary_name,
            csv_path: args.csv,
        }
    }
}

// Logs go to stderr; stdout carries the report.
fn init_logging(log_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = AnalyzerConfig::from(args);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match analyze(&config, &mut out) {
        Ok(outcome) => {
            tracing::info!(
                "Analyzed {} endpoints ({} files skipped)",
                outcome.summaries.len(),
                outcome.failures.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            let _ = writeln!(out, "✗ Error: {e}");
            if matches!(e, RpclensError::ResultsDirMissing(_)) {
                let _ = writeln!(out, "\nRun the RPC load tests first to produce result files.");
            }
            if !e.is_environment() {
                tracing::error!("Analysis failed: {e}");
            }
            ExitCode::from(1)
        }
    }
}
