pub mod database;
pub mod error;
pub mod row_helpers;
pub mod schema;
pub mod store;
pub mod tasks;

pub use database::{Database, DatabaseOptions};
pub use error::StoreError;
pub use store::{SqliteTaskStore, TaskStore};
pub use tasks::TaskRepo;
