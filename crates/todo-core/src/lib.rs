//! # todo-core
//!
//! Task model, reducer actions, and the in-memory state store.
//!
//! Nothing in this crate performs I/O. The persistence side lives in
//! `todo-store`, and `todo-gateway` keeps the two in sync.

pub mod action;
pub mod reducer;
pub mod state;
pub mod task;

pub use action::Action;
pub use reducer::reduce;
pub use state::{StateStore, TaskState};
pub use task::{NewTask, Task, TaskId, TaskUpdate};
