pub mod reducer;

pub use reducer::{median, percentile, reduce, MetricsReducer};
