// ABOUTME: Error types for input validation and ledger index addressing.
// ABOUTME: Validation errors are raised before any store mutation is attempted.

use thiserror::Error;

/// Reasons an incoming record, disease entry, or category key is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("priority must be >= 0, got {0}")]
    NegativePriority(i64),

    #[error("priority {0} is out of range")]
    PriorityOutOfRange(i64),

    #[error("category key must not be empty")]
    EmptyCategory,

    #[error("disease_name must not be empty")]
    EmptyDiseaseName,
}

/// An index addressed a position at or beyond the end of a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("index {index} is out of range for a ledger of {len} records")]
pub struct IndexOutOfRange {
    pub index: usize,
    pub len: usize,
}
