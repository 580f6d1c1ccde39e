use crate::config::{self, Config};
use crate::error::AppError;
use std::path::PathBuf;
use tracing::warn;

mod file_store;
mod memory;

pub use file_store::FileStorage;
pub use memory::MemoryStorage;

pub const STORAGE_DIR_ENV_VAR: &str = "TODOS_STORAGE_DIR";

/// A string key/value store the task list is saved into.
pub trait Storage {
    /// Returns `None` when nothing has been stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError>;
}

/// Directory the file backend writes into.
///
/// `TODOS_STORAGE_DIR` wins over the configured `storage_dir`, which wins
/// over the per-user application directory.
pub fn storage_dir(config: &Config) -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(STORAGE_DIR_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if let Some(dir) = config.storage_dir.as_ref() {
        return Ok(dir.clone());
    }

    config::app_dir()
}

/// The backend the binary writes through.
///
/// Falls back to process memory when no storage directory can be resolved,
/// so the task list still works for the lifetime of the process.
#[derive(Debug)]
pub enum Backend {
    File(FileStorage),
    Memory(MemoryStorage),
}

impl Backend {
    pub fn open(config: &Config) -> Self {
        Self::from_dir(storage_dir(config))
    }

    fn from_dir(dir: Result<PathBuf, AppError>) -> Self {
        match dir {
            Ok(dir) => Backend::File(FileStorage::new(dir)),
            Err(err) => {
                warn!(error = %err, "no storage directory, keeping tasks in memory");
                Backend::Memory(MemoryStorage::new())
            }
        }
    }
}

impl Storage for Backend {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        match self {
            Backend::File(storage) => storage.get(key),
            Backend::Memory(storage) => storage.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        match self {
            Backend::File(storage) => storage.set(key, value),
            Backend::Memory(storage) => storage.set(key, value),
        }
    }
}

pub(crate) fn validate_key(key: &str) -> Result<(), AppError> {
    if key.is_empty() {
        return Err(AppError::invalid_input("storage key is required"));
    }
    let valid = key
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
    if !valid {
        return Err(AppError::invalid_input(format!(
            "storage key '{key}' may only contain letters, digits, '-' and '_'"
        )));
    }
    Ok(())
}
