use crate::filter;
use crate::model::{Filter, Task};
use crate::persistence;
use crate::storage::Storage;
use std::collections::HashSet;
use time::OffsetDateTime;
use tracing::debug;

/// The ordered task list plus the active filter.
///
/// Every mutation is written through to storage before the call returns.
/// None of the operations fail: blank text and unknown ids are no-ops.
#[derive(Debug)]
pub struct TaskStore<S: Storage> {
    tasks: Vec<Task>,
    filter: Filter,
    storage: S,
}

impl<S: Storage> TaskStore<S> {
    /// Opens the store with whatever the storage currently holds.
    pub fn open(storage: S) -> Self {
        let tasks = persistence::load(&storage);
        Self {
            tasks,
            filter: Filter::default(),
            storage,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn visible(&self) -> Vec<&Task> {
        filter::visible(&self.tasks, self.filter)
    }

    pub fn active_count(&self) -> usize {
        filter::active_count(&self.tasks)
    }

    pub fn completed_count(&self) -> usize {
        filter::completed_count(&self.tasks)
    }

    pub fn add(&mut self, text: &str) -> Option<Task> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        let task = Task::new(self.next_id(), trimmed);
        debug!(id = task.id, "adding task");
        self.tasks.push(task.clone());
        self.persist();
        Some(task)
    }

    pub fn toggle(&mut self, id: u64) -> Option<Task> {
        let toggled = self.tasks.iter_mut().find(|task| task.id == id).map(|task| {
            task.completed = !task.completed;
            task.clone()
        });
        debug!(id, found = toggled.is_some(), "toggling task");
        self.persist();
        toggled
    }

    pub fn delete(&mut self, id: u64) -> Option<Task> {
        let removed = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .map(|index| self.tasks.remove(index));
        debug!(id, found = removed.is_some(), "deleting task");
        self.persist();
        removed
    }

    /// Removes every completed task and returns how many went.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(Task::is_active);
        let removed = before - self.tasks.len();
        debug!(removed, "cleared completed tasks");
        self.persist();
        removed
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    fn persist(&mut self) {
        persistence::save(&mut self.storage, &self.tasks);
    }

    // Wall-clock millis, bumped past the highest id in use so ids never collide.
    fn next_id(&self) -> u64 {
        let now = u64::try_from(OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000)
            .unwrap_or(0);
        let candidate = match self.tasks.iter().map(|task| task.id).max() {
            Some(highest) => now.max(highest.saturating_add(1)),
            None => now,
        };
        if self.get(candidate).is_none() {
            return candidate;
        }

        // `u64::MAX` is taken: reuse the first free id from `now` upwards, then from zero.
        let taken: HashSet<u64> = self.tasks.iter().map(|task| task.id).collect();
        (now..=u64::MAX)
            .chain(0..now)
            .find(|id| !taken.contains(id))
            .unwrap_or(now)
    }
}
