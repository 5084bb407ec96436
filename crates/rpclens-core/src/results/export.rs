use std::path::Path;

use serde::Serialize;
use tracing::info;

use super::EndpointSummary;
use crate::error::RpclensError;

// ---------------------------------------------------------------------------
// JSON export
// ---------------------------------------------------------------------------

/// Export summaries as pretty-printed JSON.
pub fn export_json(summaries: &[EndpointSummary]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(summaries)
}

/// Write the summary artifact, replacing any previous content.
pub fn write_summary(
    summaries: &[EndpointSummary],
    path: impl AsRef<Path>,
) -> Result<(), RpclensError> {
    let content = export_json(summaries)?;
    std::fs::write(path.as_ref(), content)?;
    info!(
        "Wrote {} summaries to {}",
        summaries.len(),
        path.as_ref().display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// One CSV row. Statistic columns are left empty for error summaries.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    file_name: &'a str,
    error: Option<&'a str>,
    total_count: Option<u64>,
    success_count: Option<u64>,
    failed_count: Option<u64>,
    success_rate_percent: Option<f64>,
    avg_latency_ms: Option<f64>,
    median_latency_ms: Option<f64>,
    p95_latency_ms: Option<f64>,
    p99_latency_ms: Option<f64>,
    max_latency_ms: Option<f64>,
    avg_gas: Option<f64>,
    total_gas: Option<f64>,
    total_data_kb: Option<f64>,
    rate_limited_count: Option<u64>,
}

impl<'a> From<&'a EndpointSummary> for CsvRow<'a> {
    fn from(summary: &'a EndpointSummary) -> Self {
        let s = summary.stats();
        Self {
            file_name: &summary.file_name,
            error: summary.error(),
            total_count: s.map(|s| s.total_count),
            success_count: s.map(|s| s.success_count),
            failed_count: s.map(|s| s.failed_count),
            success_rate_percent: s.map(|s| s.success_rate_percent),
            avg_latency_ms: s.map(|s| s.avg_latency_ms),
            median_latency_ms: s.map(|s| s.median_latency_ms),
            p95_latency_ms: s.map(|s| s.p95_latency_ms),
            p99_latency_ms: s.map(|s| s.p99_latency_ms),
            max_latency_ms: s.map(|s| s.max_latency_ms),
            avg_gas: s.map(|s| s.avg_gas),
            total_gas: s.map(|s| s.total_gas),
            total_data_kb: s.map(|s| s.total_data_kb),
            rate_limited_count: s.map(|s| s.rate_limited_count),
        }
    }
}

/// Write one row per summary, in the given order, with a header row.
pub fn export_csv<W: std::io::Write>(
    summaries: &[EndpointSummary],
    out: W,
) -> Result<(), RpclensError> {
    let mut writer = csv::Writer::from_writer(out);
    for summary in summaries {
        writer.serialize(CsvRow::from(summary))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the CSV export to `path`.
pub fn write_csv(summaries: &[EndpointSummary], path: impl AsRef<Path>) -> Result<(), RpclensError> {
    let file = std::fs::File::create(path.as_ref())?;
    export_csv(summaries, file)?;
    info!("Wrote CSV export to {}", path.as_ref().display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
