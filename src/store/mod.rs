//! Raw and rendered artifact storage.
//!
//! The raw directory doubles as the conversion work queue: conversion looks at
//! every raw artifact present on disk, not only the ones produced by the
//! current run. [`ArtifactStore`] makes that listing explicit so the batch can
//! run against an in-memory store in tests.
mod fs;
#[cfg(test)]
pub(crate) mod memory;
mod naming;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Local};

use crate::error::StoreError;

pub use fs::FsArtifactStore;
pub use naming::{EXPOSITION_EXTENSION, RAW_EXTENSION, output_file_name, raw_file_name, raw_stem};

#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Removes every file in the raw directory and returns how many were removed.
    /// A missing directory counts as already empty.
    async fn clear_raw(&self) -> Result<usize, StoreError>;

    /// Removes every file in the output directory; same contract as [`ArtifactStore::clear_raw`].
    async fn clear_output(&self) -> Result<usize, StoreError>;

    /// Persists one probe's stdout under a name derived from `captured_at`.
    /// Never overwrites an existing artifact.
    async fn write_raw(
        &self,
        captured_at: DateTime<Local>,
        contents: &[u8],
    ) -> Result<PathBuf, StoreError>;

    /// All raw artifacts currently stored, sorted by file name.
    async fn list_raw(&self) -> Result<Vec<PathBuf>, StoreError>;

    async fn read_raw(&self, path: &Path) -> Result<Vec<u8>, StoreError>;

    /// Writes the rendered text for `raw_path` and returns the output path.
    async fn write_output(&self, raw_path: &Path, contents: &str) -> Result<PathBuf, StoreError>;
}
