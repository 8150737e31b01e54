use thiserror::Error;

use crate::actor_framework::StoreError;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order validation error: {0}")]
    Validation(String),
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
