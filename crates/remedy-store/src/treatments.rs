// ABOUTME: Category-scoped CRUD over priority-ordered treatment ledgers.
// ABOUTME: Each mutation is one guarded transaction: copy snapshot, reconcile ledger, save whole map.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use remedy_core::{IndexOutOfRange, Ledger, Record, RecordDraft, normalize_category};

use crate::error::StoreError;
use crate::guarded::GuardedStore;

/// The full treatment snapshot: category key → ledger.
pub type Treatments = BTreeMap<String, Ledger>;

/// Where a written record ended up after renumbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub category: String,
    pub index: usize,
    pub record: Record,
}

/// Treatment records keyed by normalized category, backed by one JSON file.
#[derive(Debug)]
pub struct TreatmentStore {
    inner: GuardedStore<Treatments>,
}

impl TreatmentStore {
    /// Load the store from `path`. A missing file starts empty; a corrupt one
    /// is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let inner = GuardedStore::open(path)?;
        let store = Self { inner };
        tracing::info!(
            path = %store.path().display(),
            categories = store.inner.read(|t| t.len()),
            "treatment store loaded"
        );
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Sorted category keys present in the store.
    pub fn list_categories(&self) -> Vec<String> {
        self.inner.read(|t| t.keys().cloned().collect())
    }

    /// Records of one category in priority order.
    pub fn list_records(&self, category: &str) -> Result<(String, Vec<Record>), StoreError> {
        let key = normalize_category(category)?;
        self.inner.read(|t| -> Result<_, StoreError> {
            let ledger = find(t, &key)?;
            Ok((key.clone(), ledger.records().to_vec()))
        })
    }

    /// One record by its position in priority order.
    pub fn get_record(&self, category: &str, index: usize) -> Result<(String, Record), StoreError> {
        let key = normalize_category(category)?;
        self.inner.read(|t| -> Result<_, StoreError> {
            let ledger = find(t, &key)?;
            let record = ledger
                .get(index)
                .ok_or_else(|| index_not_found(&key, index, ledger.len()))?;
            Ok((key.clone(), record.clone()))
        })
    }

    /// Add a record, creating the category if needed. Names are unique per
    /// category, compared case-insensitively.
    pub fn create_record(&self, category: &str, draft: RecordDraft) -> Result<Placement, StoreError> {
        let key = normalize_category(category)?;
        let record = draft.validate()?;

        let placement = self.inner.mutate(|t| -> Result<_, StoreError> {
            if t.get(&key).is_some_and(|l| l.contains_name(&record.name)) {
                tracing::warn!(category = %key, name = %record.name, "duplicate record rejected");
                return Err(StoreError::Conflict {
                    category: key.clone(),
                    name: record.name.clone(),
                });
            }
            let ledger = t.entry(key.clone()).or_default();
            let index = ledger.insert(record);
            Ok(placed(&key, ledger, index))
        })?;

        tracing::info!(category = %key, index = placement.index, name = %placement.record.name, "record created");
        Ok(placement)
    }

    /// Replace the record at `index` wholesale.
    pub fn update_record(
        &self,
        category: &str,
        index: usize,
        draft: RecordDraft,
    ) -> Result<Placement, StoreError> {
        let key = normalize_category(category)?;
        let record = draft.validate()?;

        let placement = self.inner.mutate(|t| -> Result<_, StoreError> {
            let ledger = find_mut(t, &key)?;
            let (_, new_index) = ledger
                .update(index, record)
                .map_err(|e| out_of_range(&key, e))?;
            Ok(placed(&key, ledger, new_index))
        })?;

        tracing::info!(category = %key, from = index, to = placement.index, "record updated");
        Ok(placement)
    }

    /// Remove and return the record at `index`. The category key stays even
    /// when its ledger becomes empty.
    pub fn delete_record(&self, category: &str, index: usize) -> Result<(String, Record), StoreError> {
        let key = normalize_category(category)?;

        let removed = self.inner.mutate(|t| -> Result<_, StoreError> {
            let ledger = find_mut(t, &key)?;
            ledger.delete(index).map_err(|e| out_of_range(&key, e))
        })?;

        tracing::info!(category = %key, index, name = %removed.name, "record deleted");
        Ok((key, removed))
    }

    /// A copy of the whole store.
    pub fn snapshot(&self) -> Treatments {
        self.inner.snapshot()
    }
}

fn find<'a>(t: &'a Treatments, key: &str) -> Result<&'a Ledger, StoreError> {
    t.get(key).ok_or_else(|| category_not_found(t, key))
}

fn find_mut<'a>(t: &'a mut Treatments, key: &str) -> Result<&'a mut Ledger, StoreError> {
    let available: Vec<String> = t.keys().cloned().collect();
    t.get_mut(key).ok_or_else(|| {
        tracing::warn!(category = %key, "category not found");
        StoreError::CategoryNotFound {
            category: key.to_string(),
            available,
        }
    })
}

fn category_not_found(t: &Treatments, key: &str) -> StoreError {
    tracing::warn!(category = %key, "category not found");
    StoreError::CategoryNotFound {
        category: key.to_string(),
        available: t.keys().cloned().collect(),
    }
}

fn index_not_found(key: &str, index: usize, len: usize) -> StoreError {
    tracing::warn!(category = %key, index, len, "record index not found");
    StoreError::IndexNotFound {
        category: key.to_string(),
        index,
        len,
    }
}

fn out_of_range(key: &str, e: IndexOutOfRange) -> StoreError {
    index_not_found(key, e.index, e.len)
}

fn placed(key: &str, ledger: &Ledger, index: usize) -> Placement {
    Placement {
        category: key.to_string(),
        index,
        record: ledger.records()[index].clone(),
    }
}
