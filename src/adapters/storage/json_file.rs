use super::RetryPolicy;
use crate::domain::model::ExamRecord;
use crate::domain::ports::RecordStore;
use crate::utils::error::{Result, StorageError};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::fs::{File, OpenOptions, TryLockError};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const LOCK_POLL_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy)]
enum LockKind {
    Shared,
    Exclusive,
}

/// Durable store: one JSON array in a single file, shared by every writer.
/// Writers hold an exclusive lock while rewriting; readers hold a shared one,
/// so a read always sees a complete document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    retry: RetryPolicy,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, retry: RetryPolicy) -> Self {
        Self {
            path: path.into(),
            retry,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, source: std::io::Error) -> StorageError {
        StorageError::Unavailable {
            path: self.path.display().to_string(),
            source,
        }
    }

    /// Up to `max_retries` attempts, each waiting at most `retry_delay` for
    /// the lock. A failing lock call waits out the delay before the next try.
    fn lock_with_retry(&self, file: &File, kind: LockKind) -> Result<()> {
        let attempts = self.retry.max_retries;

        for attempt in 1..=attempts {
            match wait_for_lock(file, kind, self.retry.retry_delay) {
                Ok(true) => {
                    if attempt > 1 {
                        tracing::debug!("Acquired {:?} lock on attempt {}/{}", kind, attempt, attempts);
                    }
                    return Ok(());
                }
                Ok(false) => {
                    tracing::debug!("Data file still locked, attempt {}/{}", attempt, attempts);
                }
                Err(e) => {
                    tracing::warn!("Locking data file failed on attempt {}/{}: {}", attempt, attempts, e);
                    std::thread::sleep(self.retry.retry_delay);
                }
            }
        }

        tracing::warn!("Giving up on data file lock after {} attempts", attempts);
        Err(StorageError::LockContended { attempts }.into())
    }

    fn read_blocking(&self) -> Result<Vec<ExamRecord>> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Data file {} does not exist yet", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.unavailable(e).into()),
        };

        self.lock_with_retry(&file, LockKind::Shared)?;
        let mut contents = Vec::new();
        let read = file.read_to_end(&mut contents);
        release(&file);
        read.map_err(|e| self.unavailable(e))?;

        Ok(decode_records(&contents))
    }

    fn append_blocking(&self, record: &ExamRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .map_err(|e| self.unavailable(e))?;

        self.lock_with_retry(&file, LockKind::Exclusive)?;
        let outcome = rewrite_locked(&mut file, record);
        release(&file);

        let total = outcome?;
        tracing::debug!("Appended record, {} entries stored", total);
        Ok(())
    }
}

/// Polls for the lock until `window` elapses. `Ok(false)` means the lock
/// stayed held by someone else for the whole window.
fn wait_for_lock(file: &File, kind: LockKind, window: Duration) -> std::io::Result<bool> {
    let deadline = Instant::now() + window;
    loop {
        let attempt = match kind {
            LockKind::Shared => file.try_lock_shared(),
            LockKind::Exclusive => file.try_lock(),
        };
        match attempt {
            Ok(()) => return Ok(true),
            Err(TryLockError::WouldBlock) if Instant::now() < deadline => {
                std::thread::sleep(LOCK_POLL_INTERVAL);
            }
            Err(TryLockError::WouldBlock) => return Ok(false),
            Err(TryLockError::Error(e)) => return Err(e),
        }
    }
}

fn release(file: &File) {
    if let Err(e) = file.unlock() {
        tracing::warn!("Failed to release data file lock: {}", e);
    }
}

/// Top-level array elements. Empty, truncated or non-array content yields none.
fn decode_elements(bytes: &[u8]) -> Vec<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Vec::new();
    }
    match serde_json::from_slice(bytes) {
        Ok(Value::Array(elements)) => elements,
        Ok(_) => {
            tracing::warn!("Data file does not hold a JSON array, treating as empty");
            Vec::new()
        }
        Err(e) => {
            tracing::warn!("Data file content is malformed, treating as empty: {}", e);
            Vec::new()
        }
    }
}

/// Elements that are not valid records are skipped one by one.
fn decode_records(bytes: &[u8]) -> Vec<ExamRecord> {
    decode_elements(bytes)
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| match serde_json::from_value::<ExamRecord>(element) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping unreadable record at index {}: {}", index, e);
                None
            }
        })
        .collect()
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    Ok(out)
}

/// Read, append, truncate and rewrite. Caller must hold the exclusive lock.
/// Existing elements are carried over verbatim, readable or not.
fn rewrite_locked(file: &mut File, record: &ExamRecord) -> Result<usize> {
    let mut contents = Vec::new();
    file.read_to_end(&mut contents).map_err(StorageError::Write)?;

    let mut elements = decode_elements(&contents);
    elements.push(serde_json::to_value(record)?);
    let encoded = encode(&elements)?;

    file.set_len(0).map_err(StorageError::Write)?;
    file.seek(SeekFrom::Start(0)).map_err(StorageError::Write)?;
    file.write_all(&encoded).map_err(StorageError::Write)?;
    file.flush().map_err(StorageError::Write)?;

    Ok(elements.len())
}

async fn run_blocking<T, F>(task: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(task).await {
        Ok(result) => result,
        Err(e) => Err(StorageError::Write(std::io::Error::other(e)).into()),
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn read_all(&self) -> Result<Vec<ExamRecord>> {
        let store = self.clone();
        run_blocking(move || store.read_blocking()).await
    }

    async fn append(&self, record: ExamRecord) -> Result<()> {
        let store = self.clone();
        run_blocking(move || store.append_blocking(&record)).await
    }
}
