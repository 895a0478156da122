use std::path::Path;

use crate::error::AppError;

use super::report::{BatchReport, FailureStage};

/// Receives every per-item outcome of a batch.
pub trait BatchObserver: Send + Sync {
    fn cleared(&self, dir: &str, removed: usize);
    fn probe_succeeded(&self, interface: &str, raw_path: &Path);
    fn probe_failed(&self, interface: &str, error: &AppError);
    fn conversions_found(&self, count: usize);
    fn converted(&self, raw_path: &Path, output_path: &Path);
    fn conversion_failed(&self, raw_path: &Path, error: &AppError);
    fn finished(&self, report: &BatchReport);
}

/// Observer that turns batch outcomes into `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl BatchObserver for TracingObserver {
    fn cleared(&self, dir: &str, removed: usize) {
        tracing::debug!("Cleared {} file(s) from {} directory", removed, dir);
    }

    fn probe_succeeded(&self, interface: &str, raw_path: &Path) {
        tracing::debug!("Probe on {} stored {}", interface, raw_path.display());
    }

    fn probe_failed(&self, interface: &str, error: &AppError) {
        tracing::error!("Speedtest on interface {} failed: {}", interface, error);
    }

    fn conversions_found(&self, count: usize) {
        tracing::info!("Found {} JSON files to process", count);
    }

    fn converted(&self, raw_path: &Path, output_path: &Path) {
        tracing::debug!("Converted {} -> {}", raw_path.display(), output_path.display());
    }

    fn conversion_failed(&self, raw_path: &Path, error: &AppError) {
        tracing::error!("Failed to process {}: {}", raw_path.display(), error);
    }

    fn finished(&self, report: &BatchReport) {
        if report.is_clean() {
            tracing::info!("Successfully processed {} files", report.outputs.len());
        } else {
            tracing::warn!(
                "Processed {} files; {} interface(s) and {} file(s) failed",
                report.outputs.len(),
                report.failures_in(FailureStage::Probe),
                report.failures_in(FailureStage::Convert)
            );
        }
    }
}
