use thiserror::Error;

use todo_core::TaskId;
use todo_store::StoreError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("task not found: {0}")]
    NotFound(TaskId),
}
