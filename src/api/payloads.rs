//! Request bodies, one per route

use serde::{Deserialize, Serialize};

use crate::models::{CategoryId, Task, TaskId, TaskState};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCategory {
    pub order: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRename {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryRef {
    pub id: CategoryId,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryRelocation {
    pub id: CategoryId,
    pub order: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub belongs_to: CategoryId,
    pub title: String,
    pub order: i64,
    pub state: TaskState,
    pub due: String,
    pub details: String,
}

impl NewTask {
    /// Blank task appended to a category
    pub fn blank(belongs_to: CategoryId, order: i64) -> Self {
        Self {
            belongs_to,
            title: String::new(),
            order,
            state: TaskState::Open,
            due: String::new(),
            details: String::new(),
        }
    }
}

/// `updateTask` body: every editable field, no order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskUpdate {
    pub id: TaskId,
    pub title: String,
    pub details: String,
    pub due: String,
    pub state: TaskState,
    pub belongs_to: CategoryId,
}

impl From<&Task> for TaskUpdate {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            details: task.details.clone(),
            due: task.due.clone(),
            state: task.state,
            belongs_to: task.belongs_to,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaskDeletion {
    pub belongs_to: CategoryId,
    pub id: TaskId,
    /// Position before the delete, so the server can compact
    pub order: i64,
}

/// `relocateTask` body: the full record at its new place
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRelocation {
    pub id: TaskId,
    pub title: String,
    pub details: String,
    pub due: String,
    pub state: TaskState,
    pub belongs_to: CategoryId,
    pub order: i64,
}

impl From<&Task> for TaskRelocation {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            details: task.details.clone(),
            due: task.due.clone(),
            state: task.state,
            belongs_to: task.belongs_to,
            order: task.order,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Login/register answer
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub jwt: String,
}

/// Error body the server sends with non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
