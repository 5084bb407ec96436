use crate::results::{valid_results, EndpointStats, EndpointSummary};

/// Average latency above which receivers start buffering.
pub const HIGH_LATENCY_MS: f64 = 2000.0;

/// Verdict tier for the best endpoint's success rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// 95% and above.
    Excellent,
    /// 80% up to (not including) 95%.
    Moderate,
    Poor,
}

impl Tier {
    pub fn from_success_rate(rate: f64) -> Self {
        if rate >= 95.0 {
            Tier::Excellent
        } else if rate >= 80.0 {
            Tier::Moderate
        } else {
            Tier::Poor
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            Tier::Excellent => "✓",
            Tier::Moderate => "⚠",
            Tier::Poor => "✗",
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            Tier::Excellent => "EXCELLENT RESULTS",
            Tier::Moderate => "MODERATE RESULTS",
            Tier::Poor => "POOR RESULTS",
        }
    }

    pub fn verdict(self) -> &'static str {
        match self {
            Tier::Excellent => "This RPC endpoint is highly suitable for production use.",
            Tier::Moderate => "RPC endpoint works but has reliability issues.",
            Tier::Poor => "RPC endpoint is not suitable for production use in current state.",
        }
    }

    pub fn steps_heading(self) -> &'static str {
        match self {
            Tier::Excellent => "Next Steps:",
            Tier::Moderate => "Recommended Mitigations:",
            Tier::Poor => "Critical Actions Required:",
        }
    }

    pub fn steps(self) -> &'static [&'static str] {
        match self {
            Tier::Excellent => &[
                "Proceed with full streaming implementation",
                "Deploy relay and receiver components",
                "Run end-to-end integration tests",
            ],
            Tier::Moderate => &[
                "Implement RPC rotation with multiple endpoints",
                "Add transaction retry logic (max 3 retries)",
                "Consider reducing FPS to 10-12 for better reliability",
                "Monitor rate limiting and implement backoff",
            ],
            Tier::Poor => &[
                "Use paid RPC service (Alchemy: $50/mo, Chainstack: $79/mo)",
                "Significantly reduce FPS (try 5-8 FPS)",
                "Test alternative RPC providers",
                "Consider alternative architectures (IPFS + on-chain pointers)",
            ],
        }
    }
}

/// Outcome of the recommendation pass over valid summaries.
#[derive(Debug, Clone)]
pub struct Recommendation<'a> {
    pub best: &'a EndpointSummary,
    pub best_stats: &'a EndpointStats,
    pub tier: Tier,
    /// Some valid endpoint averaged above [`HIGH_LATENCY_MS`].
    pub high_latency: bool,
    /// Some valid endpoint saw at least one rate-limited transaction.
    pub rate_limited: bool,
}

/// Pick the best endpoint and collect warnings. `None` when no summary
/// carries statistics.
///
/// Ties on success rate go to the summary that comes first.
pub fn recommend(summaries: &[EndpointSummary]) -> Option<Recommendation<'_>> {
    let mut best: Option<(&EndpointSummary, &EndpointStats)> = None;
    let mut high_latency = false;
    let mut rate_limited = false;

    for (summary, stats) in valid_results(summaries) {
        if best.map_or(true, |(_, b)| stats.success_rate_percent > b.success_rate_percent) {
            best = Some((summary, stats));
        }
        high_latency |= stats.avg_latency_ms > HIGH_LATENCY_MS;
        rate_limited |= stats.rate_limited_count > 0;
    }

    best.map(|(summary, stats)| Recommendation {
        best: summary,
        best_stats: stats,
        tier: Tier::from_success_rate(stats.success_rate_percent),
        high_latency,
        rate_limited,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::tests::make_summary;
    use crate::results::{SummaryOutcome, NO_METRICS_ERROR};

    fn with(summary: &mut EndpointSummary, f: impl FnOnce(&mut EndpointStats)) {
        if let SummaryOutcome::Stats(s) = &mut summary.outcome {
            f(s);
        }
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(Tier::from_success_rate(100.0), Tier::Excellent);
        assert_eq!(Tier::from_success_rate(95.0), Tier::Excellent);
        assert_eq!(Tier::from_success_rate(94.9), Tier::Moderate);
        assert_eq!(Tier::from_success_rate(80.0), Tier::Moderate);
        assert_eq!(Tier::from_success_rate(79.9), Tier::Poor);
        assert_eq!(Tier::from_success_rate(0.0), Tier::Poor);
    }

    #[test]
    fn no_valid_results_yields_none() {
        let summaries = vec![EndpointSummary::failed("e.json", NO_METRICS_ERROR)];
        assert!(recommend(&summaries).is_none());
        assert!(recommend(&[]).is_none());
    }

    #[test]
    fn best_is_highest_rate() {
        let summaries = vec![
            make_summary("a.json", 70.0),
            EndpointSummary::failed("e.json", NO_METRICS_ERROR),
            make_summary("b.json", 88.0),
        ];
        let rec = recommend(&summaries).expect("recommendation");
        assert_eq!(rec.best.file_name, "b.json");
        assert_eq!(rec.tier, Tier::Moderate);
    }

    #[test]
    fn best_ties_go_to_first() {
        let summaries = vec![make_summary("a.json", 95.0), make_summary("b.json", 95.0)];
        let rec = recommend(&summaries).expect("recommendation");
        assert_eq!(rec.best.file_name, "a.json");
        assert_eq!(rec.tier, Tier::Excellent);
    }

    #[test]
    fn warnings_consider_every_valid_summary() {
        let best = make_summary("best.json", 99.0);
        let mut slow = make_summary("slow.json", 60.0);
        with(&mut slow, |s| s.avg_latency_ms = 2000.5);
        let mut limited = make_summary("limited.json", 50.0);
        with(&mut limited, |s| s.rate_limited_count = 1);

        let all = [best, slow, limited];
        let rec = recommend(&all).expect("recommendation");
        assert_eq!(rec.best.file_name, "best.json");
        assert!(rec.high_latency);
        assert!(rec.rate_limited);
    }

    #[test]
    fn latency_threshold_is_exclusive() {
        let mut s = make_summary("a.json", 99.0);
        with(&mut s, |s| s.avg_latency_ms = 2000.0);
        let rec = recommend(std::slice::from_ref(&s)).expect("recommendation");
        assert!(!rec.high_latency);
        assert!(!rec.rate_limited);
    }

    #[test]
    fn every_tier_has_guidance() {
        for tier in [Tier::Excellent, Tier::Moderate, Tier::Poor] {
            assert!(!tier.steps().is_empty());
            assert!(!tier.verdict().is_empty());
        }
    }
}
