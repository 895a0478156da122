use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;

use crate::error::{AppError, AppResult};
use crate::store::ArtifactStore;

use super::ProbeExecutor;

/// Runs a probe and persists its stdout as a raw artifact.
#[derive(Clone)]
pub struct ProbeRunner {
    executor: Arc<dyn ProbeExecutor>,
    store: Arc<dyn ArtifactStore>,
}

impl ProbeRunner {
    #[must_use]
    pub fn new(executor: Arc<dyn ProbeExecutor>, store: Arc<dyn ArtifactStore>) -> Self {
        Self { executor, store }
    }

    /// Probes `interface` and returns the path of the stored raw artifact.
    ///
    /// # Errors
    ///
    /// Returns a probe error when the command cannot run, exits non-zero or
    /// times out (nothing is written in that case), and a store error when the
    /// artifact cannot be written.
    pub async fn run(&self, interface: &str) -> AppResult<PathBuf> {
        tracing::info!("Starting speedtest on interface: {}", interface);
        let stdout = self
            .executor
            .execute(interface)
            .await
            .map_err(AppError::probe)?;
        let captured_at = Local::now();
        let path = self
            .store
            .write_raw(captured_at, &stdout)
            .await
            .map_err(AppError::store)?;
        tracing::info!("Speedtest results saved to: {}", path.display());
        Ok(path)
    }
}
