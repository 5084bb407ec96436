pub mod recommend;

use std::io::{self, Write};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::results::{EndpointSummary, SummaryOutcome};

pub use recommend::{recommend, Recommendation, Tier, HIGH_LATENCY_MS};

/// Characters between the left and right box borders.
pub const INNER_WIDTH: usize = 79;

// ---------------------------------------------------------------------------
// Box-drawing helpers
// ---------------------------------------------------------------------------

fn rule(out: &mut impl Write, left: char, right: char) -> io::Result<()> {
    writeln!(out, "{left}{}{right}", "═".repeat(INNER_WIDTH))
}

fn top(out: &mut impl Write) -> io::Result<()> {
    rule(out, '╔', '╗')
}

fn divider(out: &mut impl Write) -> io::Result<()> {
    rule(out, '╠', '╣')
}

fn bottom(out: &mut impl Write) -> io::Result<()> {
    rule(out, '╚', '╝')?;
    writeln!(out)
}

/// Print `text` inside the box, padded to the right border.
///
/// Text wider than the box is printed as-is and pushes the border out.
pub(crate) fn boxed(out: &mut impl Write, text: &str) -> io::Result<()> {
    let pad = INNER_WIDTH.saturating_sub(text.chars().count());
    writeln!(out, "║{text}{}║", " ".repeat(pad))
}

fn blank(out: &mut impl Write) -> io::Result<()> {
    boxed(out, "")
}

fn centered(out: &mut impl Write, title: &str) -> io::Result<()> {
    let width = title.chars().count();
    let left = INNER_WIDTH.saturating_sub(width) / 2;
    boxed(out, &format!("{}{title}", " ".repeat(left)))
}

fn titled(out: &mut impl Write, title: &str) -> io::Result<()> {
    top(out)?;
    centered(out, title)
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Banner printed once at the start of a run.
pub fn render_header(out: &mut impl Write, generated_at: DateTime<Utc>) -> io::Result<()> {
    writeln!(out)?;
    titled(out, "RPC TEST RESULTS ANALYSIS")?;
    centered(
        out,
        &format!(
            "Generated {}",
            generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ),
    )?;
    bottom(out)
}

/// One row per summary; error summaries get an `ERROR` row.
pub fn render_comparison_table(
    out: &mut impl Write,
    summaries: &[EndpointSummary],
) -> io::Result<()> {
    titled(out, "RPC ENDPOINT COMPARISON")?;
    divider(out)?;
    boxed(
        out,
        " Endpoint          Success Rate   Avg Lat   P95 Lat   P99 Lat   Rate Limited",
    )?;
    divider(out)?;

    for summary in summaries {
        let row = match &summary.outcome {
            SummaryOutcome::Failed { error } => {
                format!(" {:<17} ERROR: {error}", summary.file_name)
            }
            SummaryOutcome::Stats(s) => format!(
                " {:<17} {:>6.1}%     {:>6.0}ms  {:>6.0}ms  {:>6.0}ms  {:>6}",
                summary.file_name,
                s.success_rate_percent,
                s.avg_latency_ms,
                s.p95_latency_ms,
                s.p99_latency_ms,
                s.rate_limited_count,
            ),
        };
        boxed(out, &row)?;
    }

    bottom(out)
}

/// Full statistics for each summary that has them.
pub fn render_detailed_results(
    out: &mut impl Write,
    summaries: &[EndpointSummary],
) -> io::Result<()> {
    titled(out, "DETAILED RESULTS")?;
    bottom(out)?;

    for summary in summaries {
        let Some(s) = summary.stats() else {
            continue;
        };

        writeln!(out, "━━━ {} ━━━", summary.file_name)?;
        writeln!(
            out,
            "  Transactions:    {} total, {} successful, {} failed",
            s.total_count, s.success_count, s.failed_count
        )?;
        writeln!(out, "  Success Rate:    {:.1}%", s.success_rate_percent)?;
        writeln!(
            out,
            "  Latency:         avg={:.0}ms, median={:.0}ms, p95={:.0}ms, p99={:.0}ms, max={:.0}ms",
            s.avg_latency_ms,
            s.median_latency_ms,
            s.p95_latency_ms,
            s.p99_latency_ms,
            s.max_latency_ms
        )?;
        writeln!(out, "  Gas:             avg={:.0}, total={:.0}", s.avg_gas, s.total_gas)?;
        writeln!(out, "  Data:            {:.1} KB total", s.total_data_kb)?;
        writeln!(
            out,
            "  Rate Limited:    {} transactions",
            s.rate_limited_count
        )?;
        writeln!(out)?;
    }

    Ok(())
}

/// Verdict for the best endpoint plus any cross-endpoint warnings.
pub fn render_recommendations(
    out: &mut impl Write,
    summaries: &[EndpointSummary],
) -> io::Result<()> {
    titled(out, "RECOMMENDATIONS")?;
    divider(out)?;

    let Some(rec) = recommend(summaries) else {
        boxed(out, " ✗ No valid test results found")?;
        return bottom(out);
    };

    boxed(out, &format!(" Best Endpoint: {}", rec.best.file_name))?;
    boxed(
        out,
        &format!("   Success Rate: {:.1}%", rec.best_stats.success_rate_percent),
    )?;
    boxed(
        out,
        &format!("   Avg Latency:  {:.0}ms", rec.best_stats.avg_latency_ms),
    )?;
    blank(out)?;

    boxed(out, &format!(" {} {}", rec.tier.marker(), rec.tier.headline()))?;
    blank(out)?;
    boxed(out, &format!(" {}", rec.tier.verdict()))?;
    blank(out)?;
    boxed(out, &format!(" {}", rec.tier.steps_heading()))?;
    for (i, step) in rec.tier.steps().iter().enumerate() {
        boxed(out, &format!("   {}. {step}", i + 1))?;
    }
    blank(out)?;

    if rec.high_latency {
        boxed(out, " ⚠ HIGH LATENCY DETECTED")?;
        blank(out)?;
        boxed(out, " Average latency >2 seconds will cause buffering issues.")?;
        boxed(out, " Receivers may experience stuttering or delays.")?;
        blank(out)?;
    }

    if rec.rate_limited {
        boxed(out, " ⚠ RATE LIMITING DETECTED")?;
        blank(out)?;
        boxed(out, " RPC provider is rate limiting requests.")?;
        boxed(out, " Implement exponential backoff and RPC rotation.")?;
        blank(out)?;
    }

    bottom(out)
}

/// Comparison table, detailed results and recommendations, in that order.
pub fn render_report(out: &mut impl Write, summaries: &[EndpointSummary]) -> io::Result<()> {
    render_comparison_table(out, summaries)?;
    render_detailed_results(out, summaries)?;
    render_recommendations(out, summaries)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
