//! Append-only record store backed by a JSON snapshot file.
//!
//! # Responsibilities
//! - Serialize concurrent appenders (whole-snapshot read-modify-write
//!   is one critical section)
//! - Guarantee durability: a successful append survives restart
//! - Guarantee atomic visibility: no reader ever sees a truncated or
//!   malformed snapshot
//!
//! # Design Decisions
//! - Writes land in a temp file in the same directory, are fsynced,
//!   then renamed over the snapshot
//! - A missing snapshot initializes to an empty collection

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// One accepted credential submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    #[serde(rename = "emailOrPhone")]
    pub email_or_phone: String,

    /// bcrypt digest. Never the plaintext.
    pub password: String,

    /// Client-supplied timestamp, stored as given.
    pub timestamp: Value,

    /// Server-observed origin address.
    pub ip: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("store snapshot corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Exclusive owner of the persisted snapshot.
pub struct RecordStore {
    path: PathBuf,
    // Serializes the read-modify-write cycle across appenders.
    write_lock: Mutex<()>,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record to the snapshot.
    ///
    /// Once this returns Ok the record is on disk; concurrent appends
    /// are serialized so none is lost or duplicated.
    pub async fn append(&self, record: SubmissionRecord) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_snapshot().await?;
        records.push(record);
        self.write_snapshot(&records).await
    }

    /// Read the full ordered sequence of records.
    pub async fn load(&self) -> Result<Vec<SubmissionRecord>, StoreError> {
        self.read_snapshot().await
    }

    async fn read_snapshot(&self) -> Result<Vec<SubmissionRecord>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                if bytes.iter().all(|b| b.is_ascii_whitespace()) {
                    return Ok(Vec::new());
                }
                Ok(serde_json::from_slice(&bytes)?)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_snapshot(&self, records: &[SubmissionRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(records)?;

        let tmp = self.path.with_extension("json.tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&json).await?;
        // Durability: flush file contents before the rename makes the
        // new snapshot visible.
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
