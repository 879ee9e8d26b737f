pub mod json_file;
pub mod transient;

pub use json_file::JsonFileStore;
pub use transient::TransientStore;

use crate::domain::ports::RecordStore;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total lock attempts before giving up.
    pub max_retries: u32,
    /// How long one attempt waits for the lock to free up.
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            retry_delay: Duration::from_millis(50),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    #[default]
    Durable,
    Transient,
}

impl StoreMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreMode::Durable => "durable",
            StoreMode::Transient => "transient",
        }
    }
}

/// Builds the store for one request in the configured deployment mode.
pub fn open_store(mode: StoreMode, data_file: &Path, retry: RetryPolicy) -> Box<dyn RecordStore> {
    match mode {
        StoreMode::Durable => Box::new(JsonFileStore::new(data_file, retry)),
        StoreMode::Transient => Box::new(TransientStore::new()),
    }
}
