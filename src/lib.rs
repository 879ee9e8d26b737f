pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::storage::{open_store, JsonFileStore, RetryPolicy, StoreMode, TransientStore};
pub use crate::config::IntakeConfig;
pub use crate::core::intake::{IntakeOutcome, IntakeService};
pub use crate::utils::error::{IntakeError, Result, StorageError};
