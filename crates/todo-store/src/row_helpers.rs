use todo_core::{Task, TaskId};

use crate::error::StoreError;

const TABLE: &str = "tasks";

/// Get a required column value from a row, returning CorruptRow on failure.
pub fn get<T: rusqlite::types::FromSql>(
    row: &rusqlite::Row<'_>,
    idx: usize,
    column: &'static str,
) -> Result<T, StoreError> {
    row.get(idx).map_err(|e| StoreError::CorruptRow {
        table: TABLE,
        column,
        detail: e.to_string(),
    })
}

/// Get an optional column value.
pub fn get_opt<T: rusqlite::types::FromSql>(
    row: &rusqlite::Row<'_>,
    idx: usize,
    column: &'static str,
) -> Result<Option<T>, StoreError> {
    get(row, idx, column)
}

/// Map a row selected with [`crate::schema::TASK_COLUMNS`] to a [`Task`].
pub fn task_from_row(row: &rusqlite::Row<'_>) -> Result<Task, StoreError> {
    let completed: i64 = get(row, 5, "completed")?;
    Ok(Task {
        id: TaskId::new(get(row, 0, "id")?),
        title: get(row, 1, "title")?,
        description: get_opt(row, 2, "description")?.unwrap_or_default(),
        date: get_opt(row, 3, "date")?,
        time: get_opt(row, 4, "time")?,
        completed: completed != 0,
        created_at: get(row, 6, "created_at")?,
        updated_at: get(row, 7, "updated_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CREATE_TASKS, TASK_COLUMNS};
    use rusqlite::Connection;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(CREATE_TASKS).unwrap();
        conn
    }

    fn read_first(conn: &Connection) -> Result<Task, StoreError> {
        conn.query_row(&format!("SELECT {TASK_COLUMNS} FROM tasks"), [], |row| {
            Ok(task_from_row(row))
        })
        .unwrap()
    }

    #[test]
    fn null_description_reads_as_empty() {
        let conn = conn();
        conn.execute(
            "INSERT INTO tasks (title, description, created_at, updated_at) VALUES ('a', NULL, 't', 't')",
            [],
        )
        .unwrap();
        let task = read_first(&conn).unwrap();
        assert_eq!(task.description, "");
        assert_eq!(task.date, None);
        assert!(!task.completed);
    }

    #[test]
    fn non_integer_completed_is_corrupt() {
        let conn = conn();
        conn.execute(
            "INSERT INTO tasks (title, completed, created_at, updated_at) VALUES ('a', 'yes', 't', 't')",
            [],
        )
        .unwrap();
        let result = read_first(&conn);
        assert!(matches!(
            result,
            Err(StoreError::CorruptRow { table: "tasks", column: "completed", .. })
        ));
    }

    #[test]
    fn missing_timestamp_is_corrupt() {
        let conn = conn();
        conn.execute(
            "INSERT INTO tasks (title, created_at, updated_at) VALUES ('a', NULL, 't')",
            [],
        )
        .unwrap();
        let result = read_first(&conn);
        assert!(matches!(
            result,
            Err(StoreError::CorruptRow { column: "created_at", .. })
        ));
    }
}
