//! Actions accepted by the state reducer.
//!
//! The serialized form is `{"type": "ADD_TASK", "payload": {...}}`. Any
//! unrecognized `type` deserializes to [`Action::Unknown`] whatever its
//! payload, and the reducer ignores it.

use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::task::{Task, TaskId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Replace the whole collection (after a load).
    SetTasks(Vec<Task>),
    /// Append one task.
    AddTask(Task),
    /// Replace the task with the same id.
    UpdateTask(Task),
    DeleteTask(TaskId),
    /// Flip `completed` on the task with this id.
    ToggleTask(TaskId),
    SetLoading(bool),
    Unknown,
}

/// Wire shape of the recognized actions.
#[derive(Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
enum KnownAction {
    SetTasks(Vec<Task>),
    AddTask(Task),
    UpdateTask(Task),
    DeleteTask(TaskId),
    ToggleTask(TaskId),
    SetLoading(bool),
}

impl From<KnownAction> for Action {
    fn from(known: KnownAction) -> Self {
        match known {
            KnownAction::SetTasks(tasks) => Self::SetTasks(tasks),
            KnownAction::AddTask(task) => Self::AddTask(task),
            KnownAction::UpdateTask(task) => Self::UpdateTask(task),
            KnownAction::DeleteTask(id) => Self::DeleteTask(id),
            KnownAction::ToggleTask(id) => Self::ToggleTask(id),
            KnownAction::SetLoading(loading) => Self::SetLoading(loading),
        }
    }
}

const KNOWN_KINDS: [&str; 6] = [
    "SET_TASKS",
    "ADD_TASK",
    "UPDATE_TASK",
    "DELETE_TASK",
    "TOGGLE_TASK",
    "SET_LOADING",
];

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| D::Error::missing_field("type"))?;
        if !KNOWN_KINDS.contains(&kind) {
            return Ok(Self::Unknown);
        }
        KnownAction::deserialize(value)
            .map(Self::from)
            .map_err(D::Error::custom)
    }
}

impl Action {
    /// Wire name of the action, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SetTasks(_) => "SET_TASKS",
            Self::AddTask(_) => "ADD_TASK",
            Self::UpdateTask(_) => "UPDATE_TASK",
            Self::DeleteTask(_) => "DELETE_TASK",
            Self::ToggleTask(_) => "TOGGLE_TASK",
            Self::SetLoading(_) => "SET_LOADING",
            Self::Unknown => "UNKNOWN",
        }
    }
}
