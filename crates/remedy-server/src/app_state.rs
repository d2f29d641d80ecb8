// ABOUTME: Shared application state for the remedy HTTP server.
// ABOUTME: Holds the two independently locked stores and provides constructors for prod and test use.

use std::path::Path;
use std::sync::Arc;

use remedy_store::{DiseaseInfoStore, StoreError, TreatmentStore};

use crate::config::RemedyConfig;

/// Shared application state accessible by all Axum handlers. Each store owns
/// its own lock, so treatment writes never block disease-info reads.
#[derive(Debug)]
pub struct AppState {
    pub treatments: TreatmentStore,
    pub disease_info: DiseaseInfoStore,
}

/// Type alias for the Arc-wrapped state used with Axum's State extractor.
pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(treatments: TreatmentStore, disease_info: DiseaseInfoStore) -> Self {
        Self {
            treatments,
            disease_info,
        }
    }

    /// Load both stores from the paths in `config`.
    pub fn from_config(config: &RemedyConfig) -> Result<Self, StoreError> {
        Self::open(&config.medicines_path(), &config.disease_info_path())
    }

    pub fn open(medicines: &Path, disease_info: &Path) -> Result<Self, StoreError> {
        Ok(Self::new(
            TreatmentStore::open(medicines)?,
            DiseaseInfoStore::open(disease_info)?,
        ))
    }
}
