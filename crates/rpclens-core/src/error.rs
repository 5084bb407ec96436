use std::path::PathBuf;

use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum RpclensError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No {} directory found", .0.display())]
    ResultsDirMissing(PathBuf),

    #[error("No test result files found in {}", .0.display())]
    NoResultFiles(PathBuf),

    #[error("No valid results to analyze")]
    NoSummaries,
}

impl RpclensError {
    /// Whether this error aborts the whole run rather than a single file.
    pub fn is_environment(&self) -> bool {
        matches!(
            self,
            RpclensError::ResultsDirMissing(_)
                | RpclensError::NoResultFiles(_)
                | RpclensError::NoSummaries
        )
    }
}

impl Serialize for RpclensError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
