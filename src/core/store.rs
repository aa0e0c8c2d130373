//! The in-memory task collection.
//!
//! [`TaskStore`] owns the ordered task sequence and applies every mutation.
//! Tasks are addressed by [`TaskId`]; positions are only used to translate a
//! list selection into an id. The visible list is always rendered from
//! [`TaskStore::rows`], so it cannot drift out of step with the store.

use tracing::debug;

use super::task::{Task, TaskDraft, TaskId};

/// Ordered collection of tasks.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
    dirty: bool,
}

impl TaskStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> TaskId {
        let id = TaskId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Appends a new pending task. Any text is accepted.
    pub fn add(&mut self, draft: TaskDraft) -> TaskId {
        let id = self.allocate_id();
        debug!(task_id = %id, description = %draft.description, "adding task");
        self.tasks.push(Task::from_draft(id, draft, false));
        self.dirty = true;
        id
    }

    /// Appends a task read from a file, keeping its completion flag.
    ///
    /// Unlike [`TaskStore::add`] this does not mark the store as modified.
    pub fn push_loaded(&mut self, draft: TaskDraft, completed: bool) -> TaskId {
        let id = self.allocate_id();
        self.tasks.push(Task::from_draft(id, draft, completed));
        id
    }

    /// Marks a task as completed.
    ///
    /// Returns `false` (and changes nothing) if `id` is unknown. Marking an
    /// already completed task is allowed and leaves it completed.
    pub fn mark_completed(&mut self, id: TaskId) -> bool {
        let Some(task) = self.get_mut(id) else {
            return false;
        };
        if !task.completed {
            task.completed = true;
            self.dirty = true;
        }
        debug!(task_id = %id, "task marked completed");
        true
    }

    /// Overwrites the description, due date and priority of a task.
    ///
    /// The completion flag is preserved. Returns `false` if `id` is unknown.
    pub fn update(&mut self, id: TaskId, draft: TaskDraft) -> bool {
        let Some(task) = self.get_mut(id) else {
            return false;
        };
        task.apply(draft);
        self.dirty = true;
        debug!(task_id = %id, "task updated");
        true
    }

    /// Removes a task. Later tasks move up by one position.
    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let index = self.position(id)?;
        let removed = self.tasks.remove(index);
        self.dirty = true;
        debug!(task_id = %id, index, "task removed");
        Some(removed)
    }

    /// Removes every task.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Replaces the whole sequence with fresh tasks built from `records`.
    pub fn replace_all<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = (TaskDraft, bool)>,
    {
        self.clear();
        for (draft, completed) in records {
            self.push_loaded(draft, completed);
        }
        self.dirty = false;
    }

    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id() == id)
    }

    /// Returns the current position of a task in the sequence.
    #[must_use]
    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == id)
    }

    /// Returns the id of the task at `index`, if in range.
    #[must_use]
    pub fn id_at(&self, index: usize) -> Option<TaskId> {
        self.tasks.get(index).map(Task::id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    /// One canonical row label per task, in order.
    #[must_use]
    pub fn rows(&self) -> Vec<String> {
        self.tasks.iter().map(Task::row_label).collect()
    }

    /// Returns true if the store changed since the last load or save.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

impl<'a> IntoIterator for &'a TaskStore {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
