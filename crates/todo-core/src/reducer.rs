//! Pure reducer over [`TaskState`].
//!
//! `reduce` never mutates its input. When an action leaves the state as it
//! was (unknown action, missing id, same loading flag) the input `Arc` is
//! returned as-is so callers can detect the no-op with `Arc::ptr_eq`.

use std::sync::Arc;

use crate::action::Action;
use crate::state::TaskState;
use crate::task::Task;

pub fn reduce(state: &Arc<TaskState>, action: &Action) -> Arc<TaskState> {
    match action {
        Action::SetTasks(tasks) => Arc::new(TaskState {
            tasks: Arc::from(tasks.as_slice()),
            loading: state.loading,
        }),
        Action::AddTask(task) => {
            let tasks: Vec<Task> = state
                .tasks
                .iter()
                .cloned()
                .chain(std::iter::once(task.clone()))
                .collect();
            with_tasks(state, tasks)
        }
        Action::UpdateTask(task) => {
            if !state.contains(task.id) {
                return Arc::clone(state);
            }
            let tasks = state
                .tasks
                .iter()
                .map(|t| if t.id == task.id { task.clone() } else { t.clone() })
                .collect();
            with_tasks(state, tasks)
        }
        Action::DeleteTask(id) => {
            if !state.contains(*id) {
                return Arc::clone(state);
            }
            let tasks = state.tasks.iter().filter(|t| t.id != *id).cloned().collect();
            with_tasks(state, tasks)
        }
        Action::ToggleTask(id) => {
            if !state.contains(*id) {
                return Arc::clone(state);
            }
            let tasks = state
                .tasks
                .iter()
                .map(|t| {
                    let mut t = t.clone();
                    if t.id == *id {
                        t.completed = !t.completed;
                    }
                    t
                })
                .collect();
            with_tasks(state, tasks)
        }
        Action::SetLoading(loading) => {
            if state.loading == *loading {
                return Arc::clone(state);
            }
            Arc::new(TaskState {
                tasks: Arc::clone(&state.tasks),
                loading: *loading,
            })
        }
        Action::Unknown => Arc::clone(state),
    }
}

fn with_tasks(state: &TaskState, tasks: Vec<Task>) -> Arc<TaskState> {
    Arc::new(TaskState {
        tasks: Arc::from(tasks),
        loading: state.loading,
    })
}
