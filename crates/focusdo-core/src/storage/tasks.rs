//! JSON-file task persistence with change notification.
//!
//! Tasks are stored as a serialized array at `~/.config/focusdo/tasks.json`,
//! loaded once at open. An absent or undecodable file falls back to three
//! seed tasks rather than propagating an error; write failures are logged
//! and surfaced to the caller instead of being swallowed.

use std::path::PathBuf;

use crate::error::{CoreError, StorageError};
use crate::events::{Event, EventBus, SubscriberId};
use crate::task::{Priority, TaskItem};
use chrono::Utc;
use uuid::Uuid;

use super::data_dir;

/// Owned task list. Construct one at process start and pass it by handle;
/// there is no global instance.
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<TaskItem>,
    bus: EventBus,
}

impl TaskStore {
    /// Open the store at the default data directory.
    pub fn open() -> Result<Self, CoreError> {
        Ok(Self::open_at(data_dir()?.join("tasks.json")))
    }

    /// Open the store backed by an explicit file path.
    pub fn open_at(path: PathBuf) -> Self {
        let tasks = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Vec<TaskItem>>(&content) {
                Ok(tasks) => tasks,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "tasks file corrupt, seeding defaults");
                    Self::seed_tasks()
                }
            },
            Err(_) => Self::seed_tasks(),
        };
        Self {
            path,
            tasks,
            bus: EventBus::new(),
        }
    }

    fn seed_tasks() -> Vec<TaskItem> {
        ["Finish the landing page design", "Reply to emails", "Take a 30-minute walk"]
            .into_iter()
            .filter_map(|title| TaskItem::new(title, Priority::Medium).ok())
            .collect()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn list(&self) -> &[TaskItem] {
        &self.tasks
    }

    pub fn get(&self, id: Uuid) -> Option<&TaskItem> {
        self.tasks.iter().find(|t| t.id == id)
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Append a new task and persist.
    pub fn add(&mut self, title: impl Into<String>, priority: Priority) -> Result<TaskItem, CoreError> {
        let task = TaskItem::new(title, priority)?;
        self.tasks.push(task.clone());
        self.save()?;
        Ok(task)
    }

    /// Flip a task's completion flag. Returns false when the id is unknown.
    pub fn toggle(&mut self, id: Uuid) -> Result<bool, CoreError> {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.is_completed = !task.is_completed;
                self.save()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a task. Returns false when the id is unknown.
    pub fn delete(&mut self, id: Uuid) -> Result<bool, CoreError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    // ── Observation ──────────────────────────────────────────────────

    /// Subscribe to `TasksChanged` notifications.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriberId
    where
        F: Fn(&Event) + Send + 'static,
    {
        self.bus.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.bus.unsubscribe(id)
    }

    fn save(&self) -> Result<(), CoreError> {
        let content = serde_json::to_string_pretty(&self.tasks)?;
        std::fs::write(&self.path, content).map_err(|source| {
            tracing::error!(path = %self.path.display(), error = %source, "failed to write tasks file");
            StorageError::WriteFailed {
                path: self.path.clone(),
                source,
            }
        })?;
        self.bus.emit(&Event::TasksChanged {
            count: self.tasks.len(),
            at: Utc::now(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn temp_store() -> (tempfile::TempDir, TaskStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::open_at(dir.path().join("tasks.json"));
        (dir, store)
    }

    #[test]
    fn missing_file_seeds_three_tasks() {
        let (_dir, store) = temp_store();
        assert_eq!(store.list().len(), 3);
    }

    #[test]
    fn corrupt_file_seeds_three_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, "not json at all").unwrap();
        let store = TaskStore::open_at(path);
        assert_eq!(store.list().len(), 3);
    }

    #[test]
    fn crud_roundtrips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");

        let mut store = TaskStore::open_at(path.clone());
        let task = store.add("Water the plants", Priority::Low).unwrap();
        assert!(store.toggle(task.id).unwrap());

        let reloaded = TaskStore::open_at(path.clone());
        let loaded = reloaded.get(task.id).unwrap();
        assert_eq!(loaded.title, "Water the plants");
        assert!(loaded.is_completed);

        let mut store = TaskStore::open_at(path);
        assert!(store.delete(task.id).unwrap());
        assert!(store.get(task.id).is_none());
    }

    #[test]
    fn unknown_ids_are_reported() {
        let (_dir, mut store) = temp_store();
        assert!(!store.toggle(Uuid::new_v4()).unwrap());
        assert!(!store.delete(Uuid::new_v4()).unwrap());
    }

    #[test]
    fn blank_titles_are_rejected() {
        let (_dir, mut store) = temp_store();
        assert!(store.add("  ", Priority::High).is_err());
        assert_eq!(store.list().len(), 3);
    }

    #[test]
    fn mutations_notify_subscribers() {
        let (_dir, mut store) = temp_store();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen2 = Arc::clone(&seen);
        let id = store.subscribe(move |event| {
            if matches!(event, Event::TasksChanged { .. }) {
                seen2.fetch_add(1, Ordering::SeqCst);
            }
        });

        let task = store.add("Stretch", Priority::Medium).unwrap();
        store.toggle(task.id).unwrap();
        store.delete(task.id).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 3);

        store.unsubscribe(id);
        store.add("Another", Priority::Medium).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 3);
    }
}
