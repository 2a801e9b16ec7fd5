//! Board Model
//!
//! The ordered in-memory board: categories in display order, each with its
//! tasks in display order. The UI renders it as a projection; drag-and-drop
//! mutates it directly, and persistence payloads are built from it.
//!
//! Orders are always dense `1..N` per scope: every mutation renumbers.

use leptos_dragdrop::Placement;

use crate::api::payloads::{CategoryRelocation, TaskDeletion, TaskRelocation};
use crate::models::{Category, CategoryId, Snapshot, Task, TaskId};

/// Placement of a dragged task: relative to a task, or into an empty category
pub type TaskPlacement = Placement<TaskId, CategoryId>;

/// Placement of a dragged category, relative to another category
pub type CategoryPlacement = Placement<CategoryId>;

/// One category with its tasks
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub category: Category,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    columns: Vec<Column>,
}

/// Differences between two boards, by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardDiff {
    pub categories_added: Vec<CategoryId>,
    pub categories_removed: Vec<CategoryId>,
    pub categories_changed: Vec<CategoryId>,
    pub tasks_added: Vec<TaskId>,
    pub tasks_removed: Vec<TaskId>,
    pub tasks_changed: Vec<TaskId>,
}

impl BoardDiff {
    pub fn is_empty(&self) -> bool {
        self.categories_added.is_empty()
            && self.categories_removed.is_empty()
            && self.categories_changed.is_empty()
            && self.tasks_added.is_empty()
            && self.tasks_removed.is_empty()
            && self.tasks_changed.is_empty()
    }
}

impl Board {
    /// Build from a server snapshot, sorted by `order` (ties by id).
    /// Tasks pointing at a missing category are dropped.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let Snapshot { mut categories, tasks } = snapshot;
        categories.sort_by_key(|c| (c.order, c.id));

        let mut columns: Vec<Column> = categories
            .into_iter()
            .map(|category| Column { category, tasks: Vec::new() })
            .collect();

        for task in tasks {
            match columns.iter_mut().find(|col| col.category.id == task.belongs_to) {
                Some(col) => col.tasks.push(task),
                None => tracing::warn!(task = task.id, category = task.belongs_to, "dropping task of unknown category"),
            }
        }
        for col in &mut columns {
            col.tasks.sort_by_key(|t| (t.order, t.id));
        }
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn category_ids(&self) -> Vec<CategoryId> {
        self.columns.iter().map(|col| col.category.id).collect()
    }

    pub fn column(&self, id: CategoryId) -> Option<&Column> {
        self.columns.iter().find(|col| col.category.id == id)
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.column(id).map(|col| &col.category)
    }

    /// Task ids of a category, in display order
    pub fn task_ids(&self, category_id: CategoryId) -> Vec<TaskId> {
        self.column(category_id)
            .map(|col| col.tasks.iter().map(|t| t.id).collect())
            .unwrap_or_default()
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.columns.iter().flat_map(|col| &col.tasks).find(|t| t.id == id)
    }

    pub fn category_count(&self) -> usize {
        self.columns.len()
    }

    pub fn task_count(&self, category_id: CategoryId) -> usize {
        self.column(category_id).map_or(0, |col| col.tasks.len())
    }

    pub fn is_empty_category(&self, id: CategoryId) -> bool {
        self.task_count(id) == 0
    }

    pub fn category_index(&self, id: CategoryId) -> Option<usize> {
        self.columns.iter().position(|col| col.category.id == id)
    }

    /// (column index, index within column)
    pub fn locate_task(&self, id: TaskId) -> Option<(usize, usize)> {
        self.columns.iter().enumerate().find_map(|(ci, col)| {
            col.tasks.iter().position(|t| t.id == id).map(|ti| (ci, ti))
        })
    }

    // ========================
    // Mutations
    // ========================

    /// Insert at the record's `order` (clamped), or replace an existing one
    pub fn insert_category(&mut self, category: Category) {
        if let Some(idx) = self.category_index(category.id) {
            self.columns[idx].category = category;
            return;
        }
        let at = slot_index(category.order, self.columns.len());
        self.columns.insert(at, Column { category, tasks: Vec::new() });
        self.renumber();
    }

    /// Returns the previous name
    pub fn rename_category(&mut self, id: CategoryId, name: &str) -> Option<String> {
        let idx = self.category_index(id)?;
        Some(std::mem::replace(&mut self.columns[idx].category.name, name.to_string()))
    }

    pub fn remove_category(&mut self, id: CategoryId) -> Option<Column> {
        let idx = self.category_index(id)?;
        let removed = self.columns.remove(idx);
        self.renumber();
        Some(removed)
    }

    /// Insert into its category at `order` (clamped). False if the category is unknown.
    pub fn insert_task(&mut self, task: Task) -> bool {
        self.remove_task(task.id);
        let Some(ci) = self.category_index(task.belongs_to) else {
            return false;
        };
        let tasks = &mut self.columns[ci].tasks;
        let at = slot_index(task.order, tasks.len());
        tasks.insert(at, task);
        self.renumber();
        true
    }

    /// Overwrite a task's content in place; position is untouched.
    /// Returns the previous record.
    pub fn replace_task(&mut self, task: Task) -> Option<Task> {
        let (ci, ti) = self.locate_task(task.id)?;
        let slot = &mut self.columns[ci].tasks[ti];
        let previous = slot.clone();
        *slot = Task { belongs_to: previous.belongs_to, order: previous.order, ..task };
        Some(previous)
    }

    /// Apply a record the server confirmed for the local task `local_id`,
    /// moving it if its place differs. The server may re-create a relocated
    /// task under a new id; the card then takes over that id where it stands.
    pub fn apply_server_task(&mut self, local_id: TaskId, task: Task) {
        if local_id != task.id {
            tracing::debug!(old = local_id, new = task.id, "server re-issued task id");
            if let Some((ci, ti)) = self.locate_task(local_id) {
                self.columns[ci].tasks[ti].id = task.id;
            }
        }
        let local_place = self.task(task.id).map(|t| (t.belongs_to, t.order));
        if local_place == Some((task.belongs_to, task.order)) {
            self.replace_task(task);
        } else {
            tracing::debug!(task = task.id, "server placed task elsewhere, moving");
            self.insert_task(task);
        }
    }

    pub fn remove_task(&mut self, id: TaskId) -> Option<Task> {
        let (ci, ti) = self.locate_task(id)?;
        let removed = self.columns[ci].tasks.remove(ti);
        self.renumber();
        Some(removed)
    }

    /// Move a dragged category. Returns true if the order changed.
    pub fn place_category(&mut self, id: CategoryId, placement: CategoryPlacement) -> bool {
        let (Placement::Before(pivot) | Placement::After(pivot)) = placement else {
            return false;
        };
        if pivot == id {
            return false;
        }
        let Some(from) = self.category_index(id) else { return false };
        if self.category_index(pivot).is_none() {
            return false;
        }

        let before = self.category_ids();
        let column = self.columns.remove(from);
        // pivot is present, it was not the removed column
        let Some(pivot_idx) = self.category_index(pivot) else {
            self.columns.insert(from, column);
            return false;
        };
        let at = match placement {
            Placement::After(_) => pivot_idx + 1,
            _ => pivot_idx,
        };
        self.columns.insert(at, column);
        self.renumber();
        self.category_ids() != before
    }

    /// Move a dragged task. Returns true if its category or index changed.
    pub fn place_task(&mut self, id: TaskId, placement: TaskPlacement) -> bool {
        let Some(from) = self.locate_task(id) else { return false };
        let target_exists = match placement {
            Placement::Before(pivot) | Placement::After(pivot) => pivot != id && self.task(pivot).is_some(),
            Placement::AppendTo(category) => self.category_index(category).is_some(),
        };
        if !target_exists {
            return false;
        }

        let mut task = self.columns[from.0].tasks.remove(from.1);
        let (ci, at) = match placement {
            Placement::AppendTo(category) => {
                let ci = self.category_index(category).unwrap_or(from.0);
                (ci, self.columns[ci].tasks.len())
            }
            Placement::Before(pivot) | Placement::After(pivot) => {
                let (ci, ti) = self.locate_task(pivot).unwrap_or(from);
                let at = if matches!(placement, Placement::After(_)) { ti + 1 } else { ti };
                (ci, at)
            }
        };
        task.belongs_to = self.columns[ci].category.id;
        self.columns[ci].tasks.insert(at, task);
        self.renumber();
        self.locate_task(id) != Some(from)
    }

    // ========================
    // Payloads
    // ========================

    /// `relocateCategory` body for the category's current place
    pub fn category_relocation(&self, id: CategoryId) -> Option<CategoryRelocation> {
        let idx = self.category_index(id)?;
        Some(CategoryRelocation { id, order: idx as i64 + 1 })
    }

    /// `relocateTask` body for the task's current place
    pub fn task_relocation(&self, id: TaskId) -> Option<TaskRelocation> {
        let (ci, ti) = self.locate_task(id)?;
        let col = &self.columns[ci];
        let mut body = TaskRelocation::from(&col.tasks[ti]);
        body.belongs_to = col.category.id;
        body.order = ti as i64 + 1;
        Some(body)
    }

    /// `deleteTask` body, computed before the task is removed
    pub fn task_deletion(&self, id: TaskId) -> Option<TaskDeletion> {
        let (ci, ti) = self.locate_task(id)?;
        Some(TaskDeletion {
            belongs_to: self.columns[ci].category.id,
            id,
            order: ti as i64 + 1,
        })
    }

    // ========================
    // Reconciliation
    // ========================

    /// What differs between `self` and `other`
    pub fn diff(&self, other: &Board) -> BoardDiff {
        let mut diff = BoardDiff::default();

        for col in &self.columns {
            match other.category(col.category.id) {
                None => diff.categories_removed.push(col.category.id),
                Some(theirs) if theirs != &col.category => diff.categories_changed.push(col.category.id),
                Some(_) => {}
            }
        }
        for col in &other.columns {
            if self.column(col.category.id).is_none() {
                diff.categories_added.push(col.category.id);
            }
        }

        let ours = self.columns.iter().flat_map(|col| &col.tasks);
        for task in ours {
            match other.task(task.id) {
                None => diff.tasks_removed.push(task.id),
                Some(theirs) if theirs != task => diff.tasks_changed.push(task.id),
                Some(_) => {}
            }
        }
        for task in other.columns.iter().flat_map(|col| &col.tasks) {
            if self.task(task.id).is_none() {
                diff.tasks_added.push(task.id);
            }
        }
        diff
    }

    /// Adopt the authoritative board if it differs; returns what changed
    pub fn reconcile(&mut self, authoritative: Board) -> BoardDiff {
        let diff = self.diff(&authoritative);
        if !diff.is_empty() {
            *self = authoritative;
        }
        diff
    }

    fn renumber(&mut self) {
        for (ci, col) in self.columns.iter_mut().enumerate() {
            col.category.order = ci as i64 + 1;
            let category_id = col.category.id;
            for (ti, task) in col.tasks.iter_mut().enumerate() {
                task.order = ti as i64 + 1;
                task.belongs_to = category_id;
            }
        }
    }
}

// 1-based order to insertion index, clamped to [0, len]
fn slot_index(order: i64, len: usize) -> usize {
    usize::try_from(order.saturating_sub(1)).unwrap_or(0).min(len)
}
