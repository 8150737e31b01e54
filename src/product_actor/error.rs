use thiserror::Error;

use crate::actor_framework::StoreError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product validation error: {0}")]
    Validation(String),
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
