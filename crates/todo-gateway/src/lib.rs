//! # todo-gateway
//!
//! Bridges the in-memory [`todo_core::StateStore`] and the durable
//! [`todo_store::TaskStore`]. Each mutation writes to disk first and, only on
//! success, dispatches the matching action.

pub mod error;
pub mod gateway;
pub mod settings;

pub use error::GatewayError;
pub use gateway::TaskGateway;
pub use settings::{
    load_settings, load_settings_from_path, load_settings_from_path_with, SettingsError,
    TodoSettings,
};
