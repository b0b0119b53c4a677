//! Async persistence gateway.
//!
//! Every operation talks to the [`TaskStore`] first and dispatches exactly
//! one action afterwards. A failed store call dispatches nothing and rolls
//! nothing back, so memory is left as it was.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, instrument, warn};

use todo_core::task::now_timestamp;
use todo_core::{Action, NewTask, StateStore, Task, TaskId, TaskState, TaskUpdate};
use todo_store::{Database, SqliteTaskStore, TaskStore};

use crate::error::GatewayError;
use crate::settings::DatabaseSettings;

pub struct TaskGateway {
    store: Arc<dyn TaskStore>,
    state: StateStore,
}

impl TaskGateway {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self {
            store,
            state: StateStore::new(),
        }
    }

    /// Open the configured SQLite file and wrap it in a gateway.
    pub fn open(settings: &DatabaseSettings) -> Result<Self, GatewayError> {
        let db = Database::open_with_options(&settings.path(), &settings.options())?;
        Ok(Self::new(Arc::new(SqliteTaskStore::new(db))))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Observation
    // ─────────────────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Arc<TaskState> {
        self.state.snapshot()
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.state.snapshot().tasks().to_vec()
    }

    pub fn loading(&self) -> bool {
        self.state.snapshot().loading()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<TaskState>> {
        self.state.subscribe()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────

    /// Create the table if needed, then load. Run once at startup.
    pub async fn start(&self) -> Result<(), GatewayError> {
        self.initialize().await?;
        self.load().await
    }

    /// Ensure the `tasks` table exists. Never drops or alters it.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> Result<(), GatewayError> {
        self.store.create_table().await.map_err(|e| {
            warn!(error = %e, "failed to initialize task table");
            GatewayError::from(e)
        })
    }

    /// Replace memory with the stored rows, newest first.
    ///
    /// `loading` is true for the duration and always reset afterwards. On
    /// failure the task collection is left unchanged.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<(), GatewayError> {
        self.state.dispatch(Action::SetLoading(true));
        let result = self.store.list().await;
        let outcome = match result {
            Ok(tasks) => {
                info!(count = tasks.len(), "tasks loaded");
                self.state.dispatch(Action::SetTasks(tasks));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to load tasks");
                Err(GatewayError::from(e))
            }
        };
        self.state.dispatch(Action::SetLoading(false));
        outcome
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────

    /// Insert a task and append it to memory with its assigned id.
    #[instrument(skip(self, task), fields(title = %task.title))]
    pub async fn add(&self, task: NewTask) -> Result<Task, GatewayError> {
        let created = self.store.insert(task, now_timestamp()).await?;
        info!(task_id = %created.id, "task added");
        self.state.dispatch(Action::AddTask(created.clone()));
        Ok(created)
    }

    /// Overwrite a task's editable fields and refresh `updated_at`.
    ///
    /// A row that memory never held is appended instead of replaced.
    #[instrument(skip(self, changes))]
    pub async fn update(&self, id: TaskId, changes: TaskUpdate) -> Result<Task, GatewayError> {
        let updated = self
            .store
            .update(id, changes, now_timestamp())
            .await?
            .ok_or(GatewayError::NotFound(id))?;
        let action = if self.state.snapshot().contains(id) {
            Action::UpdateTask(updated.clone())
        } else {
            Action::AddTask(updated.clone())
        };
        self.state.dispatch(action);
        Ok(updated)
    }

    /// Flip `completed` using the stored value as the source of truth.
    ///
    /// When memory agrees with what was on disk, a `TOGGLE_TASK` is
    /// dispatched; the in-memory `updated_at` then lags the row until the
    /// next load. A stale in-memory copy is replaced with the persisted row
    /// (`UPDATE_TASK`), and a task memory never held is appended (`ADD_TASK`).
    #[instrument(skip(self))]
    pub async fn toggle(&self, id: TaskId) -> Result<Task, GatewayError> {
        let toggled = self
            .store
            .toggle_completed(id, now_timestamp())
            .await?
            .ok_or(GatewayError::NotFound(id))?;

        let in_memory = self.state.snapshot().get(id).map(|t| t.completed);
        let action = match in_memory {
            Some(completed) if completed != toggled.completed => Action::ToggleTask(id),
            Some(_) => {
                warn!(task_id = %id, "in-memory task was stale, reconciling from disk");
                Action::UpdateTask(toggled.clone())
            }
            None => Action::AddTask(toggled.clone()),
        };
        self.state.dispatch(action);
        Ok(toggled)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: TaskId) -> Result<(), GatewayError> {
        if !self.store.delete(id).await? {
            return Err(GatewayError::NotFound(id));
        }
        self.state.dispatch(Action::DeleteTask(id));
        Ok(())
    }
}
