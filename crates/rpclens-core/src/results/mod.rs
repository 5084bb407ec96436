pub mod export;

use serde::{Deserialize, Serialize};

/// Error recorded for a results file that parsed but held no records.
pub const NO_METRICS_ERROR: &str = "No metrics found";

/// Statistics for one endpoint (one results file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EndpointSummary {
    /// Name of the results file the summary was reduced from.
    pub file_name: String,
    #[serde(flatten)]
    pub outcome: SummaryOutcome,
}

/// Either an error (no numeric fields) or the full statistics set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SummaryOutcome {
    Failed { error: String },
    Stats(EndpointStats),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EndpointStats {
    pub total_count: u64,
    pub success_count: u64,
    pub failed_count: u64,
    pub success_rate_percent: f64,
    /// Latency aggregates (ms) cover only records that carry a latency.
    pub avg_latency_ms: f64,
    pub median_latency_ms: f64,
    pub p95_latency_ms: f64,
    pub p99_latency_ms: f64,
    pub max_latency_ms: f64,
    /// Gas aggregates cover only records that carry a gas figure.
    pub avg_gas: f64,
    pub total_gas: f64,
    /// Payload volume across every record, in KiB.
    pub total_data_kb: f64,
    pub rate_limited_count: u64,
}

impl EndpointSummary {
    pub fn failed(file_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            outcome: SummaryOutcome::Failed {
                error: error.into(),
            },
        }
    }

    pub fn with_stats(file_name: impl Into<String>, stats: EndpointStats) -> Self {
        Self {
            file_name: file_name.into(),
            outcome: SummaryOutcome::Stats(stats),
        }
    }

    pub fn stats(&self) -> Option<&EndpointStats> {
        match &self.outcome {
            SummaryOutcome::Stats(stats) => Some(stats),
            SummaryOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            SummaryOutcome::Failed { error } => Some(error),
            SummaryOutcome::Stats(_) => None,
        }
    }

    /// Success rate used for ranking. Error summaries rank as 0%.
    pub fn success_rate(&self) -> f64 {
        self.stats().map_or(0.0, |s| s.success_rate_percent)
    }
}

/// Sort summaries by success rate, highest first.
///
/// The sort is stable: summaries with equal rates keep their input order.
pub fn rank_summaries(mut summaries: Vec<EndpointSummary>) -> Vec<EndpointSummary> {
    summaries.sort_by(|a, b| b.success_rate().total_cmp(&a.success_rate()));
    summaries
}

/// Summaries that carry statistics, paired with those statistics.
pub fn valid_results(
    summaries: &[EndpointSummary],
) -> impl Iterator<Item = (&EndpointSummary, &EndpointStats)> {
    summaries.iter().filter_map(|s| s.stats().map(|st| (s, st)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
