use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::RpclensError;
use crate::metrics::MeasurementRecord;

/// Read one results file: a JSON array of [`MeasurementRecord`]s.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<MeasurementRecord>, RpclensError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let records: Vec<MeasurementRecord> = serde_json::from_str(&content)?;
    debug!(
        "Loaded {} records from {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(records)
}

/// List every `.json` file in `dir`, sorted by file name.
///
/// `exclude` names a file (typically the summary artifact from a previous
/// run) that is skipped even though it matches.
pub fn discover_result_files(dir: &Path, exclude: &str) -> Result<Vec<PathBuf>, RpclensError> {
    if !dir.is_dir() {
        return Err(RpclensError::ResultsDirMissing(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let is_excluded = path.file_name().and_then(|n| n.to_str()) == Some(exclude);
        if is_json && !is_excluded {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        return Err(RpclensError::NoResultFiles(dir.to_path_buf()));
    }
    Ok(files)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
