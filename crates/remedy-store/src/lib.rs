// ABOUTME: Persistence layer for remedy, handling atomic JSON snapshots and guarded access.
// ABOUTME: Provides the snapshot file gateway, the per-file lock, and the two keyed stores.

pub mod check;
pub mod disease_info;
pub mod error;
pub mod guarded;
pub mod snapshot;
pub mod treatments;

pub use check::{CheckReport, LedgerSummary, check_files};
pub use disease_info::{DiseaseCatalog, DiseaseInfoStore};
pub use error::StoreError;
pub use guarded::GuardedStore;
pub use snapshot::{SnapshotError, SnapshotFile};
pub use treatments::{Placement, TreatmentStore, Treatments};
