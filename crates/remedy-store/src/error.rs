// ABOUTME: Error taxonomy surfaced by the keyed stores.
// ABOUTME: Not-found, conflict, validation, and persistence failures, each local to one operation.

use remedy_core::ValidationError;
use thiserror::Error;

use crate::snapshot::SnapshotError;

/// Errors returned by store operations. None of them leave a partial write
/// behind: validation and lookups fail before the snapshot is touched, and a
/// persistence failure leaves both memory and disk at their previous state.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("category '{category}' not found, available: {available:?}")]
    CategoryNotFound {
        category: String,
        available: Vec<String>,
    },

    #[error("index {index} not found in '{category}' ({len} records)")]
    IndexNotFound {
        category: String,
        index: usize,
        len: usize,
    },

    #[error("'{name}' already exists under '{category}'")]
    Conflict { category: String, name: String },

    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("persistence failed: {0}")]
    Persistence(#[from] SnapshotError),
}

impl StoreError {
    /// Short machine-readable kind for structured responses.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::CategoryNotFound { .. } | StoreError::IndexNotFound { .. } => "not_found",
            StoreError::Conflict { .. } => "conflict",
            StoreError::Validation(_) => "validation_error",
            StoreError::Persistence(_) => "persistence_error",
        }
    }

    /// Valid category keys, when the error is a missing category.
    pub fn available(&self) -> Option<&[String]> {
        match self {
            StoreError::CategoryNotFound { available, .. } => Some(available),
            _ => None,
        }
    }
}
