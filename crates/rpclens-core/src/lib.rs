pub mod analyze;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod report;
pub mod results;

pub use analyze::{analyze, AnalysisOutcome, AnalyzerConfig};
pub use error::RpclensError;
