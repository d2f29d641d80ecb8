// ABOUTME: Core library for remedy, containing treatment records, ledgers, and disease metadata.
// ABOUTME: Pure domain logic with no I/O; persistence and HTTP live in sibling crates.

pub mod category;
pub mod disease;
pub mod error;
pub mod ledger;
pub mod record;

pub use category::normalize_category;
pub use disease::DiseaseInfo;
pub use error::{IndexOutOfRange, ValidationError};
pub use ledger::{Ledger, Reconciled, reconcile};
pub use record::{DEFAULT_PRIORITY, Record, RecordDraft};
