use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::engine::reducer::reduce;
use crate::error::RpclensError;
use crate::metrics::io::{discover_result_files, read_records};
use crate::report::{render_header, render_report};
use crate::results::export::{write_csv, write_summary};
use crate::results::{rank_summaries, EndpointSummary};

pub const DEFAULT_RESULTS_DIR: &str = "test-results";
pub const DEFAULT_SUMMARY_NAME: &str = "analysis-summary.json";

/// Where to read results from and where to write the artifacts.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub results_dir: PathBuf,
    /// File name of the summary artifact inside `results_dir`.
    pub summary_name: String,
    /// Optional CSV export of the ranked summaries.
    pub csv_path: Option<PathBuf>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            summary_name: DEFAULT_SUMMARY_NAME.to_string(),
            csv_path: None,
        }
    }
}

impl AnalyzerConfig {
    pub fn summary_path(&self) -> PathBuf {
        self.results_dir.join(&self.summary_name)
    }
}

/// A results file that could not be read or reduced.
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub file_name: String,
    pub reason: String,
}

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    /// Summaries in ranked order, as written to the artifact.
    pub summaries: Vec<EndpointSummary>,
    pub failures: Vec<FileFailure>,
    pub summary_path: PathBuf,
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn summarize_file(path: &Path) -> Result<EndpointSummary, RpclensError> {
    let records = read_records(path)?;
    Ok(reduce(&records, &display_name(path)))
}

/// Run the whole analysis: discover, reduce, rank, render and persist.
///
/// Console output goes to `out`. Files that fail to load are reported and
/// skipped; the run fails only when the results directory is missing or
/// empty, or when no file could be summarized at all. Nothing is written to
/// disk in those cases.
pub fn analyze(
    config: &AnalyzerConfig,
    out: &mut impl Write,
) -> Result<AnalysisOutcome, RpclensError> {
    let files = discover_result_files(&config.results_dir, &config.summary_name)?;
    info!(
        "Analyzing {} result files in {}",
        files.len(),
        config.results_dir.display()
    );

    render_header(out, Utc::now())?;
    writeln!(out, "Found {} test result file(s)\n", files.len())?;

    let mut summaries = Vec::with_capacity(files.len());
    let mut failures = Vec::new();
    for path in &files {
        match summarize_file(path) {
            Ok(summary) => {
                debug!("Reduced {}", summary.file_name);
                summaries.push(summary);
            }
            Err(e) => {
                let file_name = display_name(path);
                warn!("Skipping {file_name}: {e}");
                writeln!(out, "⚠ Error analyzing {file_name}: {e}")?;
                failures.push(FileFailure {
                    file_name,
                    reason: e.to_string(),
                });
            }
        }
    }

    if summaries.is_empty() {
        return Err(RpclensError::NoSummaries);
    }

    let summaries = rank_summaries(summaries);
    render_report(out, &summaries)?;

    let summary_path = config.summary_path();
    write_summary(&summaries, &summary_path)?;
    if let Some(csv_path) = &config.csv_path {
        write_csv(&summaries, csv_path)?;
        writeln!(out, "✓ CSV export saved to: {}", csv_path.display())?;
    }
    writeln!(
        out,
        "✓ Analysis summary saved to: {}\n",
        summary_path.display()
    )?;

    Ok(AnalysisOutcome {
        summaries,
        failures,
        summary_path,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
