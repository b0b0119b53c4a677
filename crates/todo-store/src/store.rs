//! Async storage seam consumed by the gateway.
//!
//! `rusqlite` is synchronous, so [`SqliteTaskStore`] runs each [`TaskRepo`]
//! call on the blocking pool with a cloned [`Database`] handle.

use async_trait::async_trait;

use todo_core::{NewTask, Task, TaskId, TaskUpdate};

use crate::database::Database;
use crate::error::StoreError;
use crate::tasks::TaskRepo;

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Ensure the `tasks` table exists.
    async fn create_table(&self) -> Result<(), StoreError>;

    /// All tasks, most recently created first.
    async fn list(&self) -> Result<Vec<Task>, StoreError>;

    async fn insert(&self, task: NewTask, now: String) -> Result<Task, StoreError>;

    async fn update(
        &self,
        id: TaskId,
        changes: TaskUpdate,
        now: String,
    ) -> Result<Option<Task>, StoreError>;

    /// Flip the stored `completed` flag and return the updated row.
    async fn toggle_completed(&self, id: TaskId, now: String) -> Result<Option<Task>, StoreError>;

    async fn delete(&self, id: TaskId) -> Result<bool, StoreError>;
}

/// [`TaskStore`] backed by a SQLite [`Database`].
#[derive(Clone)]
pub struct SqliteTaskStore {
    db: Database,
}

impl SqliteTaskStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    async fn run<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(TaskRepo) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let repo = TaskRepo::new(self.db.clone());
        tokio::task::spawn_blocking(move || f(repo)).await?
    }
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    async fn create_table(&self) -> Result<(), StoreError> {
        self.run(|repo| repo.create_table()).await
    }

    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        self.run(|repo| repo.list()).await
    }

    async fn insert(&self, task: NewTask, now: String) -> Result<Task, StoreError> {
        self.run(move |repo| repo.insert(&task, &now)).await
    }

    async fn update(
        &self,
        id: TaskId,
        changes: TaskUpdate,
        now: String,
    ) -> Result<Option<Task>, StoreError> {
        self.run(move |repo| repo.update(id, &changes, &now)).await
    }

    async fn toggle_completed(&self, id: TaskId, now: String) -> Result<Option<Task>, StoreError> {
        self.run(move |repo| repo.toggle_completed(id, &now)).await
    }

    async fn delete(&self, id: TaskId) -> Result<bool, StoreError> {
        self.run(move |repo| repo.delete(id)).await
    }
}
