use std::fmt;
use std::str::FromStr;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Literal the UI layer passes for "no value" in date/time pickers.
pub const NULL_PLACEHOLDER: &str = "null";

/// Row id assigned by the durable store. Never reused.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for TaskId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = std::num::ParseIntError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A single to-do item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: Option<String>,
    pub time: Option<String>,
    pub completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for creating a task.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    #[must_use]
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }
}

/// Full overwrite of a task's editable fields.
///
/// Every field is written. `completed` falls back to `false` and the
/// optional text fields fall back to empty/NULL when left unset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUpdate {
    pub title: String,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub completed: Option<bool>,
}

impl TaskUpdate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    #[must_use]
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    #[must_use]
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }
}

/// Normalize an optional date/time value for storage.
///
/// Absent values, the empty string, and the literal `"null"` all map to
/// `None`. Anything else is kept verbatim.
pub fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.is_empty() && *v != NULL_PLACEHOLDER)
        .map(str::to_string)
}

/// Current UTC time as a fixed-width RFC 3339 string.
///
/// Microsecond precision with a `Z` suffix keeps lexical order equal to
/// chronological order, which the `created_at DESC` listing relies on.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_drops_placeholder_and_empty() {
        assert_eq!(normalize_optional_text(None), None);
        assert_eq!(normalize_optional_text(Some("")), None);
        assert_eq!(normalize_optional_text(Some("null")), None);
    }

    #[test]
    fn normalize_keeps_other_values_verbatim() {
        assert_eq!(
            normalize_optional_text(Some("2026-10-19")),
            Some("2026-10-19".to_string())
        );
        // No format validation
        assert_eq!(
            normalize_optional_text(Some("next tuesday")),
            Some("next tuesday".to_string())
        );
        assert_eq!(normalize_optional_text(Some("NULL")), Some("NULL".to_string()));
    }

    #[test]
    fn timestamp_is_fixed_width_utc() {
        let ts = now_timestamp();
        assert!(ts.ends_with('Z'), "got: {ts}");
        // 2026-10-19T12:34:56.123456Z
        assert_eq!(ts.len(), 27, "got: {ts}");
    }

    #[test]
    fn task_id_parse_and_display() {
        let id: TaskId = " 42 ".parse().unwrap();
        assert_eq!(id, TaskId::new(42));
        assert_eq!(id.to_string(), "42");
        assert!("abc".parse::<TaskId>().is_err());
    }

    #[test]
    fn task_serializes_with_column_names() {
        let task = Task {
            id: TaskId::new(7),
            title: "Buy milk".into(),
            description: String::new(),
            date: None,
            time: Some("09:00".into()),
            completed: false,
            created_at: "2026-10-19T00:00:00.000000Z".into(),
            updated_at: "2026-10-19T00:00:00.000000Z".into(),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["date"], serde_json::Value::Null);
        assert_eq!(json["time"], "09:00");
        assert_eq!(json["created_at"], "2026-10-19T00:00:00.000000Z");
    }

    #[test]
    fn builders_fill_optional_fields() {
        let new = NewTask::new("Call mom").with_date("2026-10-20").with_time("18:00");
        assert_eq!(new.title, "Call mom");
        assert_eq!(new.description, None);
        assert_eq!(new.date.as_deref(), Some("2026-10-20"));

        let update = TaskUpdate::new("X").with_description("Y").with_completed(true);
        assert_eq!(update.completed, Some(true));
        assert_eq!(update.description.as_deref(), Some("Y"));
    }
}
