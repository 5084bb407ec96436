use crate::metrics::MeasurementRecord;
use crate::results::{EndpointStats, EndpointSummary, NO_METRICS_ERROR};

// ---------------------------------------------------------------------------
// Percentile helpers
// ---------------------------------------------------------------------------

/// Nearest-rank percentile over an ascending slice.
///
/// Selects index `floor(p * n)` with no interpolation. `p` is a fraction in
/// `[0.0, 1.0)`. Returns 0 for an empty slice.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = (p * sorted.len() as f64).floor() as usize;
    sorted[idx]
}

/// Element at index `floor(n / 2)`: the upper-middle value for even `n`.
pub fn median(sorted: &[f64]) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    sorted[sorted.len() / 2]
}

fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

// ---------------------------------------------------------------------------
// MetricsReducer
// ---------------------------------------------------------------------------

/// Accumulates records from one results file into [`EndpointStats`].
///
/// Sums are kept as `f64`, so very large gas or payload figures lose
/// precision instead of overflowing.
#[derive(Debug, Default)]
pub struct MetricsReducer {
    total: u64,
    successes: u64,
    /// Only records that carry a latency contribute here.
    latencies: Vec<f64>,
    latency_sum: f64,
    gas_samples: usize,
    gas_sum: f64,
    data_bytes: f64,
    rate_limited: u64,
}

impl MetricsReducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a single record into the running totals.
    pub fn record(&mut self, record: &MeasurementRecord) {
        self.total += 1;
        if record.success {
            self.successes += 1;
        }
        if let Some(ms) = record.latency_ms {
            self.latencies.push(ms);
            self.latency_sum += ms;
        }
        if let Some(gas) = record.gas_used {
            self.gas_samples += 1;
            self.gas_sum += gas;
        }
        self.data_bytes += record.data_size;
        if record.is_rate_limited() {
            self.rate_limited += 1;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn stats(&self) -> EndpointStats {
        let mut sorted = self.latencies.clone();
        sorted.sort_unstable_by(f64::total_cmp);

        let success_rate_percent = if self.total > 0 {
            self.successes as f64 / self.total as f64 * 100.0
        } else {
            0.0
        };

        EndpointStats {
            total_count: self.total,
            success_count: self.successes,
            failed_count: self.total - self.successes,
            success_rate_percent,
            avg_latency_ms: mean(self.latency_sum, sorted.len()),
            median_latency_ms: median(&sorted),
            p95_latency_ms: percentile(&sorted, 0.95),
            p99_latency_ms: percentile(&sorted, 0.99),
            max_latency_ms: sorted.last().copied().unwrap_or(0.0),
            avg_gas: mean(self.gas_sum, self.gas_samples),
            total_gas: self.gas_sum,
            total_data_kb: self.data_bytes / 1024.0,
            rate_limited_count: self.rate_limited,
        }
    }
}

/// Reduce one file's records to an [`EndpointSummary`].
///
/// An empty collection yields an error summary with no statistics.
pub fn reduce(records: &[MeasurementRecord], file_name: &str) -> EndpointSummary {
    let mut reducer = MetricsReducer::new();
    for record in records {
        reducer.record(record);
    }
    if reducer.is_empty() {
        return EndpointSummary::failed(file_name, NO_METRICS_ERROR);
    }
    EndpointSummary::with_stats(file_name, reducer.stats())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
