//! Frontend Models
//!
//! Data structures matching the server's JSON records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

pub type CategoryId = i64;
pub type TaskId = i64;

/// Category record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// 1-based position among categories
    pub order: i64,
}

/// Completion state, `0`/`1` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum TaskState {
    #[default]
    Open,
    Done,
}

impl TaskState {
    pub fn toggled(self) -> Self {
        match self {
            TaskState::Open => TaskState::Done,
            TaskState::Done => TaskState::Open,
        }
    }

    pub fn is_done(self) -> bool {
        self == TaskState::Done
    }
}

impl From<i64> for TaskState {
    fn from(value: i64) -> Self {
        if value == 0 { TaskState::Open } else { TaskState::Done }
    }
}

impl From<TaskState> for i64 {
    fn from(state: TaskState) -> Self {
        match state {
            TaskState::Open => 0,
            TaskState::Done => 1,
        }
    }
}

/// Task record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub details: String,
    /// `datetime-local` value, empty when unset
    pub due: String,
    pub state: TaskState,
    pub belongs_to: CategoryId,
    /// 1-based position within its category
    pub order: i64,
}

const DUE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

impl Task {
    pub fn due_at(&self) -> Option<NaiveDateTime> {
        let due = self.due.trim();
        DUE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(due, fmt).ok())
    }

    /// Open and past its due time
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        !self.state.is_done() && self.due_at().is_some_and(|due| due < now)
    }
}

/// Full account state as returned by `GET /tasks/get`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub categories: Vec<Category>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tasks: Vec<Task>,
}

// The server encodes empty lists as `null`
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(due: &str, state: TaskState) -> Task {
        Task {
            id: 1,
            title: "Einkaufen".to_string(),
            details: String::new(),
            due: due.to_string(),
            state,
            belongs_to: 1,
            order: 1,
        }
    }

    #[test]
    fn test_snapshot_with_null_lists() {
        let snapshot: Snapshot = serde_json::from_str(r#"{"categories":null,"tasks":null}"#).unwrap();
        assert!(snapshot.categories.is_empty());
        assert!(snapshot.tasks.is_empty());
    }

    #[test]
    fn test_snapshot_ignores_owner_field() {
        let json = r#"{
            "categories":[{"id":3,"belongs_to":9,"name":"Arbeit","order":1}],
            "tasks":[{"id":5,"belongs_to":3,"order":1,"title":"a","details":"","state":1,"due":""}]
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.categories[0].name, "Arbeit");
        assert_eq!(snapshot.tasks[0].state, TaskState::Done);
        assert_eq!(snapshot.tasks[0].belongs_to, 3);
    }

    #[test]
    fn test_state_wire_values() {
        assert_eq!(serde_json::to_string(&TaskState::Done).unwrap(), "1");
        assert_eq!(serde_json::to_string(&TaskState::Open).unwrap(), "0");
        assert_eq!(serde_json::from_str::<TaskState>("2").unwrap(), TaskState::Done);
        assert_eq!(TaskState::Open.toggled(), TaskState::Done);
    }

    #[test]
    fn test_overdue() {
        let now = NaiveDateTime::parse_from_str("2024-05-02T12:00", "%Y-%m-%dT%H:%M").unwrap();
        assert!(task("2024-05-01T09:30", TaskState::Open).is_overdue(now));
        assert!(!task("2024-05-01T09:30", TaskState::Done).is_overdue(now));
        assert!(!task("2024-05-03T09:30:00", TaskState::Open).is_overdue(now));
        assert!(!task("", TaskState::Open).is_overdue(now));
    }
}
