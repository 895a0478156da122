use std::path::Path;

use chrono::{DateTime, Local};

use crate::error::StoreError;

const RAW_PREFIX: &str = "speedtest_";
pub const RAW_EXTENSION: &str = "json";
pub const EXPOSITION_EXTENSION: &str = "prom";

/// `speedtest_<YYYYMMDD_HHMMSS>` for the given capture time.
#[must_use]
pub fn raw_stem(captured_at: &DateTime<Local>) -> String {
    format!("{}{}", RAW_PREFIX, captured_at.format("%Y%m%d_%H%M%S"))
}

/// File name for the `attempt`-th candidate of `stem`; attempt 0 has no suffix.
#[must_use]
pub fn raw_file_name(stem: &str, attempt: u32) -> String {
    if attempt == 0 {
        format!("{}.{}", stem, RAW_EXTENSION)
    } else {
        format!("{}_{}.{}", stem, attempt, RAW_EXTENSION)
    }
}

/// Output file name for a raw artifact: same base name, `.prom` extension.
///
/// # Errors
///
/// Returns an error when `raw_path` has no file name component.
pub fn output_file_name(raw_path: &Path) -> Result<String, StoreError> {
    let stem = raw_path
        .file_stem()
        .ok_or_else(|| StoreError::MissingFileName {
            path: raw_path.to_path_buf(),
        })?;
    Ok(format!(
        "{}.{}",
        stem.to_string_lossy(),
        EXPOSITION_EXTENSION
    ))
}

pub(super) fn is_raw_artifact(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(RAW_EXTENSION)
}
