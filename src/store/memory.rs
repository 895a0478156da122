use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Local};

use crate::error::StoreError;

use super::ArtifactStore;
use super::naming::{is_raw_artifact, output_file_name, raw_file_name, raw_stem};

const MAX_NAME_ATTEMPTS: u32 = 100;

/// Store operation forced to fail with `PermissionDenied`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailingOp {
    ClearRaw,
    ListRaw,
    ClearOutput,
}

/// In-memory artifact store used to drive the batch without touching disk.
#[derive(Debug)]
pub(crate) struct MemoryArtifactStore {
    raw_dir: PathBuf,
    output_dir: PathBuf,
    raw: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
    output: Mutex<BTreeMap<PathBuf, String>>,
    failing: Option<FailingOp>,
}

impl MemoryArtifactStore {
    pub(crate) fn new() -> Self {
        Self {
            raw_dir: PathBuf::from("mem/raw"),
            output_dir: PathBuf::from("mem/prom"),
            raw: Mutex::new(BTreeMap::new()),
            output: Mutex::new(BTreeMap::new()),
            failing: None,
        }
    }

    pub(crate) fn failing(op: FailingOp) -> Self {
        Self {
            failing: Some(op),
            ..Self::new()
        }
    }

    fn denied(&self, op: FailingOp) -> Option<std::io::Error> {
        (self.failing == Some(op))
            .then(|| std::io::Error::from(std::io::ErrorKind::PermissionDenied))
    }

    /// Seeds a raw artifact as if an earlier run had left it behind.
    pub(crate) fn insert_raw(&self, name: &str, contents: &[u8]) -> Result<PathBuf, String> {
        let path = self.raw_dir.join(name);
        self.raw
            .lock()
            .map_err(|_poisoned| "raw map poisoned".to_owned())?
            .insert(path.clone(), contents.to_vec());
        Ok(path)
    }

    pub(crate) fn raw_paths(&self) -> Result<Vec<PathBuf>, String> {
        Ok(self
            .raw
            .lock()
            .map_err(|_poisoned| "raw map poisoned".to_owned())?
            .keys()
            .cloned()
            .collect())
    }

    pub(crate) fn raw_contents(&self, path: &Path) -> Result<Option<Vec<u8>>, String> {
        Ok(self
            .raw
            .lock()
            .map_err(|_poisoned| "raw map poisoned".to_owned())?
            .get(path)
            .cloned())
    }

    pub(crate) fn output_text(&self, path: &Path) -> Result<Option<String>, String> {
        Ok(self
            .output
            .lock()
            .map_err(|_poisoned| "output map poisoned".to_owned())?
            .get(path)
            .cloned())
    }

    pub(crate) fn output_count(&self) -> Result<usize, String> {
        Ok(self
            .output
            .lock()
            .map_err(|_poisoned| "output map poisoned".to_owned())?
            .len())
    }

    pub(crate) fn insert_output(&self, name: &str, contents: &str) -> Result<(), String> {
        self.output
            .lock()
            .map_err(|_poisoned| "output map poisoned".to_owned())?
            .insert(self.output_dir.join(name), contents.to_owned());
        Ok(())
    }
}

fn poisoned(path: &Path) -> std::io::Error {
    std::io::Error::other(format!("lock poisoned for {}", path.display()))
}

#[async_trait]
impl ArtifactStore for MemoryArtifactStore {
    async fn clear_raw(&self) -> Result<usize, StoreError> {
        if let Some(source) = self.denied(FailingOp::ClearRaw) {
            return Err(StoreError::Clear {
                path: self.raw_dir.clone(),
                source,
            });
        }
        let mut raw = self.raw.lock().map_err(|_poisoned| StoreError::Clear {
            path: self.raw_dir.clone(),
            source: poisoned(&self.raw_dir),
        })?;
        let removed = raw.len();
        raw.clear();
        Ok(removed)
    }

    async fn clear_output(&self) -> Result<usize, StoreError> {
        if let Some(source) = self.denied(FailingOp::ClearOutput) {
            return Err(StoreError::Clear {
                path: self.output_dir.clone(),
                source,
            });
        }
        let mut output = self.output.lock().map_err(|_poisoned| StoreError::Clear {
            path: self.output_dir.clone(),
            source: poisoned(&self.output_dir),
        })?;
        let removed = output.len();
        output.clear();
        Ok(removed)
    }

    async fn write_raw(
        &self,
        captured_at: DateTime<Local>,
        contents: &[u8],
    ) -> Result<PathBuf, StoreError> {
        let mut raw = self.raw.lock().map_err(|_poisoned| StoreError::Write {
            path: self.raw_dir.clone(),
            source: poisoned(&self.raw_dir),
        })?;
        let stem = raw_stem(&captured_at);
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let path = self.raw_dir.join(raw_file_name(&stem, attempt));
            if raw.contains_key(&path) {
                continue;
            }
            raw.insert(path.clone(), contents.to_vec());
            return Ok(path);
        }
        Err(StoreError::NamesExhausted {
            stem,
            attempts: MAX_NAME_ATTEMPTS,
        })
    }

    async fn list_raw(&self) -> Result<Vec<PathBuf>, StoreError> {
        if let Some(source) = self.denied(FailingOp::ListRaw) {
            return Err(StoreError::List {
                path: self.raw_dir.clone(),
                source,
            });
        }
        let raw = self.raw.lock().map_err(|_poisoned| StoreError::List {
            path: self.raw_dir.clone(),
            source: poisoned(&self.raw_dir),
        })?;
        Ok(raw
            .keys()
            .filter(|path| is_raw_artifact(path))
            .cloned()
            .collect())
    }

    async fn read_raw(&self, path: &Path) -> Result<Vec<u8>, StoreError> {
        let raw = self.raw.lock().map_err(|_poisoned| StoreError::Read {
            path: path.to_path_buf(),
            source: poisoned(path),
        })?;
        raw.get(path).cloned().ok_or_else(|| StoreError::Read {
            path: path.to_path_buf(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })
    }

    async fn write_output(&self, raw_path: &Path, contents: &str) -> Result<PathBuf, StoreError> {
        let path = self.output_dir.join(output_file_name(raw_path)?);
        let mut output = self.output.lock().map_err(|_poisoned| StoreError::Write {
            path: path.clone(),
            source: poisoned(&path),
        })?;
        output.insert(path.clone(), contents.to_owned());
        Ok(path)
    }
}
