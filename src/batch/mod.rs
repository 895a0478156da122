//! Probe-all-then-convert-all orchestration.
//!
//! A batch clears the raw directory, probes every interface in order, clears
//! the output directory and then converts every raw artifact found on disk.
//! Per-interface and per-file failures are reported and skipped; only failing
//! to clear or list a directory aborts the batch.
mod observer;
mod report;


use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;

use crate::error::{AppError, AppResult};
use crate::extract::parse_measurement;
use crate::probe::{ProbeExecutor, ProbeRunner};
use crate::render::{render, write_exposition};
use crate::store::ArtifactStore;

pub use observer::{BatchObserver, TracingObserver};
pub use report::{BatchFailure, BatchReport, FailureStage};

pub struct Batch {
    runner: ProbeRunner,
    store: Arc<dyn ArtifactStore>,
    observer: Arc<dyn BatchObserver>,
}

impl Batch {
    #[must_use]
    pub fn new(
        executor: Arc<dyn ProbeExecutor>,
        store: Arc<dyn ArtifactStore>,
        observer: Arc<dyn BatchObserver>,
    ) -> Self {
        Self {
            runner: ProbeRunner::new(executor, Arc::clone(&store)),
            store,
            observer,
        }
    }

    /// Runs the full batch over `interfaces`.
    ///
    /// # Errors
    ///
    /// Returns an error only when a directory cannot be cleared or the raw
    /// directory cannot be listed.
    pub async fn run(&self, interfaces: &[String]) -> AppResult<BatchReport> {
        let mut report = BatchReport::default();
        self.probe_into(interfaces, &mut report).await?;
        self.convert_into(&mut report).await?;
        self.observer.finished(&report);
        Ok(report)
    }

    /// Clears the raw directory and probes every interface, without converting.
    ///
    /// # Errors
    ///
    /// Returns an error when the raw directory cannot be cleared.
    pub async fn probe_all(&self, interfaces: &[String]) -> AppResult<BatchReport> {
        let mut report = BatchReport::default();
        self.probe_into(interfaces, &mut report).await?;
        self.observer.finished(&report);
        Ok(report)
    }

    /// Clears the output directory and converts whatever raw artifacts exist.
    ///
    /// # Errors
    ///
    /// Returns an error when the output directory cannot be cleared or the raw
    /// directory cannot be listed.
    pub async fn convert_all(&self) -> AppResult<BatchReport> {
        let mut report = BatchReport::default();
        self.convert_into(&mut report).await?;
        self.observer.finished(&report);
        Ok(report)
    }

    /// Extracts, renders and writes the output for one raw artifact.
    ///
    /// # Errors
    ///
    /// Returns an error when the artifact cannot be read or parsed or the
    /// output cannot be written.
    pub async fn convert_one(&self, raw_path: &Path) -> AppResult<PathBuf> {
        let bytes = self
            .store
            .read_raw(raw_path)
            .await
            .map_err(AppError::store)?;
        let metric =
            parse_measurement(raw_path, &bytes, Local::now()).map_err(AppError::extract)?;
        let exposition = render(&metric);
        write_exposition(self.store.as_ref(), raw_path, &exposition).await
    }

    async fn probe_into(&self, interfaces: &[String], report: &mut BatchReport) -> AppResult<()> {
        let removed = self.store.clear_raw().await.map_err(AppError::store)?;
        self.observer.cleared("raw", removed);

        for interface in interfaces {
            match self.runner.run(interface).await {
                Ok(path) => {
                    self.observer.probe_succeeded(interface, &path);
                    report.probed.push(path);
                }
                Err(err) => {
                    self.observer.probe_failed(interface, &err);
                    report.record_failure(FailureStage::Probe, interface.clone(), err.to_string());
                }
            }
        }
        Ok(())
    }

    async fn convert_into(&self, report: &mut BatchReport) -> AppResult<()> {
        let removed = self.store.clear_output().await.map_err(AppError::store)?;
        self.observer.cleared("output", removed);

        let raw_paths = self.store.list_raw().await.map_err(AppError::store)?;
        self.observer.conversions_found(raw_paths.len());
        for raw_path in raw_paths {
            match self.convert_one(&raw_path).await {
                Ok(output) => {
                    self.observer.converted(&raw_path, &output);
                    report.outputs.push(output);
                }
                Err(err) => {
                    self.observer.conversion_failed(&raw_path, &err);
                    report.record_failure(
                        FailureStage::Convert,
                        raw_path.display().to_string(),
                        err.to_string(),
                    );
                }
            }
        }
        Ok(())
    }
}
