/// SQL DDL for the task database.
///
/// A single idempotent statement. It never drops or alters an existing
/// table, so it is safe to run on every start.
pub const CREATE_TASKS: &str = r#"
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    date TEXT,
    time TEXT,
    completed INTEGER DEFAULT 0,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
    updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
);
"#;

/// Applied when a connection is opened. Busy timeout is set separately
/// from [`crate::DatabaseOptions`].
pub const PRAGMAS: &str = r#"
PRAGMA journal_mode = WAL;
PRAGMA synchronous = NORMAL;
"#;

/// Column list shared by every `SELECT`/`RETURNING` so that
/// [`crate::row_helpers::task_from_row`] can read by index.
pub const TASK_COLUMNS: &str =
    "id, title, description, date, time, completed, created_at, updated_at";
