use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Local};
use tokio::io::AsyncWriteExt;

use crate::error::StoreError;

use super::ArtifactStore;
use super::naming::{is_raw_artifact, output_file_name, raw_file_name, raw_stem};

/// Upper bound on `_<n>` suffixes tried when captures share a second.
const MAX_NAME_ATTEMPTS: u32 = 100;

/// Artifact store backed by two directories on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    raw_dir: PathBuf,
    output_dir: PathBuf,
}

impl FsArtifactStore {
    #[must_use]
    pub fn new(raw_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            raw_dir: raw_dir.into(),
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl ArtifactStore for FsArtifactStore {
    async fn clear_raw(&self) -> Result<usize, StoreError> {
        clear_files(&self.raw_dir).await
    }

    async fn clear_output(&self) -> Result<usize, StoreError> {
        clear_files(&self.output_dir).await
    }

    async fn write_raw(
        &self,
        captured_at: DateTime<Local>,
        contents: &[u8],
    ) -> Result<PathBuf, StoreError> {
        ensure_dir(&self.raw_dir).await?;
        let stem = raw_stem(&captured_at);

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let path = self.raw_dir.join(raw_file_name(&stem, attempt));
            let file = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(err) => return Err(StoreError::Write { path, source: err }),
            };
            if let Err(err) = write_all(file, contents).await {
                if let Err(cleanup_err) = tokio::fs::remove_file(&path).await {
                    tracing::warn!(
                        "Failed to remove partial artifact {}: {}",
                        path.display(),
                        cleanup_err
                    );
                }
                return Err(StoreError::Write { path, source: err });
            }
            return Ok(path);
        }

        Err(StoreError::NamesExhausted {
            stem,
            attempts: MAX_NAME_ATTEMPTS,
        })
    }

    async fn list_raw(&self) -> Result<Vec<PathBuf>, StoreError> {
        let list_err = |err| StoreError::List {
            path: self.raw_dir.clone(),
            source: err,
        };
        let mut entries = match tokio::fs::read_dir(&self.raw_dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(list_err(err)),
        };

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(list_err)? {
            let file_type = entry.file_type().await.map_err(list_err)?;
            let path = entry.path();
            if !file_type.is_dir() && is_raw_artifact(&path) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    async fn read_raw(&self, path: &Path) -> Result<Vec<u8>, StoreError> {
        tokio::fs::read(path).await.map_err(|err| StoreError::Read {
            path: path.to_path_buf(),
            source: err,
        })
    }

    async fn write_output(&self, raw_path: &Path, contents: &str) -> Result<PathBuf, StoreError> {
        ensure_dir(&self.output_dir).await?;
        let path = self.output_dir.join(output_file_name(raw_path)?);
        tokio::fs::write(&path, contents)
            .await
            .map_err(|err| StoreError::Write {
                path: path.clone(),
                source: err,
            })?;
        Ok(path)
    }
}

async fn ensure_dir(dir: &Path) -> Result<(), StoreError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|err| StoreError::CreateDir {
            path: dir.to_path_buf(),
            source: err,
        })
}

async fn write_all(mut file: tokio::fs::File, contents: &[u8]) -> Result<(), std::io::Error> {
    file.write_all(contents).await?;
    file.flush().await?;
    file.sync_all().await
}

/// Deletes the files directly inside `dir`; subdirectories are left alone.
async fn clear_files(dir: &Path) -> Result<usize, StoreError> {
    let clear_err = |err| StoreError::Clear {
        path: dir.to_path_buf(),
        source: err,
    };
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(err) => return Err(clear_err(err)),
    };

    let mut removed = 0usize;
    while let Some(entry) = entries.next_entry().await.map_err(clear_err)? {
        let file_type = entry.file_type().await.map_err(clear_err)?;
        if file_type.is_dir() {
            continue;
        }
        match tokio::fs::remove_file(entry.path()).await {
            Ok(()) => removed = removed.saturating_add(1),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(clear_err(err)),
        }
    }
    Ok(removed)
}
