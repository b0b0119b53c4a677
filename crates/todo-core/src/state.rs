use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::action::Action;
use crate::reducer::reduce;
use crate::task::{Task, TaskId};

/// Snapshot of the in-memory task list.
///
/// The collection is shared behind an `Arc` so actions that only touch the
/// loading flag do not copy it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskState {
    pub(crate) tasks: Arc<[Task]>,
    pub(crate) loading: bool,
}

impl Default for TaskState {
    fn default() -> Self {
        Self {
            tasks: Arc::from(Vec::new()),
            loading: false,
        }
    }
}

impl TaskState {
    pub fn new(tasks: Vec<Task>, loading: bool) -> Self {
        Self {
            tasks: Arc::from(tasks),
            loading,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> Vec<TaskId> {
        self.tasks.iter().map(|t| t.id).collect()
    }
}

/// Owner of the current [`TaskState`].
///
/// Every change goes through [`StateStore::dispatch`]. Observers hold a
/// `watch::Receiver` and are only notified when the reducer produced a new
/// state.
pub struct StateStore {
    tx: watch::Sender<Arc<TaskState>>,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore {
    pub fn new() -> Self {
        Self::with_state(TaskState::default())
    }

    pub fn with_state(state: TaskState) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(state));
        Self { tx }
    }

    /// Apply an action. Returns `true` if the state changed.
    pub fn dispatch(&self, action: Action) -> bool {
        let kind = action.kind();
        let changed = self.tx.send_if_modified(|current| {
            let next = reduce(current, &action);
            if Arc::ptr_eq(&next, current) {
                false
            } else {
                *current = next;
                true
            }
        });
        debug!(action = kind, changed, "dispatched");
        changed
    }

    pub fn snapshot(&self) -> Arc<TaskState> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<TaskState>> {
        self.tx.subscribe()
    }
}
