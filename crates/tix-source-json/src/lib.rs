//! tix-source-json
//!
//! Filesystem-backed JSON snapshots of a wallet's mined transactions, replayable
//! through the classifier as a [`TransactionSource`].

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tix_core::{MemorySource, SourceError, TransactionSource};
use tix_domain::TransactionBatch;

const TMP_SUFFIX: &str = "tmp";

/// Block heights and header timestamps are 32-bit unsigned on the wire.
pub const MAX_HEIGHT: i64 = u32::MAX as i64;
pub const MAX_TIMESTAMP: i64 = u32::MAX as i64;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("{field} {value} is outside 0..={max}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        max: i64,
    },
}

impl From<SnapshotError> for SourceError {
    fn from(err: SnapshotError) -> Self {
        match err {
            SnapshotError::Io(io) => SourceError::Io(io),
            SnapshotError::Serde(message) => SourceError::Malformed(message),
            err @ SnapshotError::OutOfRange { .. } => SourceError::Malformed(err.to_string()),
        }
    }
}

/// Chain tip plus the wallet's mined transactions, one batch per block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub current_height: i64,
    #[serde(default)]
    pub batches: Vec<TransactionBatch>,
}

impl Snapshot {
    pub fn new(current_height: i64) -> Self {
        Self {
            current_height,
            batches: Vec::new(),
        }
    }

    /// Loads a snapshot from the provided filesystem path.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let data = fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(|err| SnapshotError::Serde(err.to_string()))
    }

    /// Writes the snapshot by staging to a temporary file and renaming it into place.
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|err| SnapshotError::Serde(err.to_string()))?;
        let tmp = tmp_path(path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

/// Replays a snapshot file batch by batch.
///
/// Heights and timestamps are range-checked as they are served, so a bad block
/// ends the scan with the batches before it already classified.
#[derive(Debug, Clone)]
pub struct JsonSnapshotSource {
    path: PathBuf,
    inner: MemorySource,
}

impl JsonSnapshotSource {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SnapshotError> {
        let path = path.into();
        let snapshot = Snapshot::load(&path)?;
        tracing::debug!(
            path = %path.display(),
            batches = snapshot.batches.len(),
            current_height = snapshot.current_height,
            "snapshot loaded"
        );
        Ok(Self {
            path,
            inner: MemorySource::new(snapshot.current_height, snapshot.batches),
        })
    }
}

impl TransactionSource for JsonSnapshotSource {
    fn current_height(&mut self) -> Result<i64, SourceError> {
        let height = self.inner.current_height()?;
        check_range("current height", height, MAX_HEIGHT)?;
        Ok(height)
    }

    fn next_batch(&mut self) -> Result<Option<TransactionBatch>, SourceError> {
        let batch = self.inner.next_batch()?;
        if let Some(batch) = &batch {
            check_batch(batch).map_err(|err| {
                tracing::warn!(path = %self.path.display(), %err, "snapshot block rejected");
                err
            })?;
        }
        Ok(batch)
    }
}

fn check_batch(batch: &TransactionBatch) -> Result<(), SnapshotError> {
    check_range("block height", batch.height, MAX_HEIGHT)?;
    check_range("block timestamp", batch.timestamp, MAX_TIMESTAMP)
}

fn check_range(field: &'static str, value: i64, max: i64) -> Result<(), SnapshotError> {
    if (0..=max).contains(&value) {
        Ok(())
    } else {
        Err(SnapshotError::OutOfRange { field, value, max })
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), SnapshotError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
