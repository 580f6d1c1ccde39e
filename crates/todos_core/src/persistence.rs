//! Saves and restores the task list through a [`Storage`] backend.
//!
//! Persistence is best effort: a missing, unreadable or malformed value loads
//! as an empty list, and a failed write is logged and dropped.

use crate::error::AppError;
use crate::model::Task;
use crate::storage::Storage;
use std::collections::HashSet;
use tracing::{debug, warn};

pub const STORAGE_KEY: &str = "todos";

pub fn load(storage: &dyn Storage) -> Vec<Task> {
    match try_load(storage) {
        Ok(tasks) => {
            debug!(count = tasks.len(), "loaded tasks");
            tasks
        }
        Err(err) => {
            warn!(error = %err, "discarding stored tasks");
            Vec::new()
        }
    }
}

pub fn save(storage: &mut dyn Storage, tasks: &[Task]) {
    if let Err(err) = try_save(storage, tasks) {
        warn!(error = %err, count = tasks.len(), "failed to save tasks");
    }
}

pub fn try_load(storage: &dyn Storage) -> Result<Vec<Task>, AppError> {
    match storage.get(STORAGE_KEY)? {
        Some(raw) => decode(&raw),
        None => Ok(Vec::new()),
    }
}

pub fn try_save(storage: &mut dyn Storage, tasks: &[Task]) -> Result<(), AppError> {
    let content = encode(tasks)?;
    storage.set(STORAGE_KEY, &content)
}

pub fn encode(tasks: &[Task]) -> Result<String, AppError> {
    serde_json::to_string(tasks).map_err(|err| AppError::invalid_data(err.to_string()))
}

pub fn decode(raw: &str) -> Result<Vec<Task>, AppError> {
    let tasks: Vec<Task> =
        serde_json::from_str(raw).map_err(|err| AppError::invalid_data(err.to_string()))?;

    let mut seen = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        if !seen.insert(task.id) {
            return Err(AppError::invalid_data(format!("duplicate task id {}", task.id)));
        }
        if task.text.trim().is_empty() {
            return Err(AppError::invalid_data(format!("task {} has blank text", task.id)));
        }
    }

    Ok(tasks)
}
