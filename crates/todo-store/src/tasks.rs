use rusqlite::{params, OptionalExtension};
use tracing::instrument;

use todo_core::task::normalize_optional_text;
use todo_core::{NewTask, Task, TaskId, TaskUpdate};

use crate::database::Database;
use crate::error::StoreError;
use crate::row_helpers::task_from_row;
use crate::schema::{CREATE_TASKS, TASK_COLUMNS};

/// Parameterized statements against the `tasks` table.
///
/// Timestamps are supplied by the caller so that one mutation uses a single
/// wall-clock reading for every column it writes.
pub struct TaskRepo {
    db: Database,
}

impl TaskRepo {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create the table if it does not exist yet.
    #[instrument(skip(self))]
    pub fn create_table(&self) -> Result<(), StoreError> {
        self.db.with_conn(|conn| {
            conn.execute_batch(CREATE_TASKS)?;
            Ok(())
        })
    }

    /// All tasks, most recently created first.
    #[instrument(skip(self))]
    pub fn list(&self) -> Result<Vec<Task>, StoreError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at DESC, id DESC"
            ))?;
            let rows = stmt
                .query_map([], |row| Ok(task_from_row(row)))?
                .collect::<Result<Vec<_>, _>>()?;
            rows.into_iter().collect()
        })
    }

    #[instrument(skip(self), fields(task_id = %id))]
    pub fn get(&self, id: TaskId) -> Result<Option<Task>, StoreError> {
        self.db.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                params![id.get()],
                |row| Ok(task_from_row(row)),
            )
            .optional()?
            .transpose()
        })
    }

    /// Insert a new, not yet completed task and return it with its assigned id.
    #[instrument(skip(self, task), fields(title = %task.title))]
    pub fn insert(&self, task: &NewTask, now: &str) -> Result<Task, StoreError> {
        let description = task.description.clone().unwrap_or_default();
        let date = normalize_optional_text(task.date.as_deref());
        let time = normalize_optional_text(task.time.as_deref());

        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO tasks (title, description, date, time, completed, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, 0, ?5, ?5)",
                params![task.title, description, date, time, now],
            )?;
            let id = TaskId::new(conn.last_insert_rowid());

            Ok(Task {
                id,
                title: task.title.clone(),
                description,
                date,
                time,
                completed: false,
                created_at: now.to_string(),
                updated_at: now.to_string(),
            })
        })
    }

    /// Overwrite every editable column. Returns `None` if no row has this id.
    #[instrument(skip(self, changes), fields(task_id = %id))]
    pub fn update(
        &self,
        id: TaskId,
        changes: &TaskUpdate,
        now: &str,
    ) -> Result<Option<Task>, StoreError> {
        let description = changes.description.clone().unwrap_or_default();
        let date = normalize_optional_text(changes.date.as_deref());
        let time = normalize_optional_text(changes.time.as_deref());
        let completed = changes.completed.unwrap_or(false);

        self.db.with_conn(|conn| {
            conn.query_row(
                &format!(
                    "UPDATE tasks SET title = ?1, description = ?2, date = ?3, time = ?4,
                     completed = ?5, updated_at = ?6
                     WHERE id = ?7
                     RETURNING {TASK_COLUMNS}"
                ),
                params![changes.title, description, date, time, completed, now, id.get()],
                |row| Ok(task_from_row(row)),
            )
            .optional()?
            .transpose()
        })
    }

    /// Flip `completed` based on the stored value. Returns the updated row,
    /// or `None` if no row has this id.
    #[instrument(skip(self), fields(task_id = %id))]
    pub fn toggle_completed(&self, id: TaskId, now: &str) -> Result<Option<Task>, StoreError> {
        self.db.with_conn(|conn| {
            conn.query_row(
                &format!(
                    "UPDATE tasks SET completed = CASE WHEN completed THEN 0 ELSE 1 END,
                     updated_at = ?1
                     WHERE id = ?2
                     RETURNING {TASK_COLUMNS}"
                ),
                params![now, id.get()],
                |row| Ok(task_from_row(row)),
            )
            .optional()?
            .transpose()
        })
    }

    /// Remove a row. Returns `false` if no row had this id.
    #[instrument(skip(self), fields(task_id = %id))]
    pub fn delete(&self, id: TaskId) -> Result<bool, StoreError> {
        self.db.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id.get()])?;
            Ok(removed > 0)
        })
    }
}
