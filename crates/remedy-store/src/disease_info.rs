// ABOUTME: Keyed store of descriptive disease metadata backed by its own JSON file.
// ABOUTME: Shares the guarded snapshot mechanism with the treatment store but has its own lock.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use remedy_core::{DiseaseInfo, normalize_category};

use crate::error::StoreError;
use crate::guarded::GuardedStore;

/// The full disease-info snapshot: category key → metadata.
pub type DiseaseCatalog = BTreeMap<String, DiseaseInfo>;

#[derive(Debug)]
pub struct DiseaseInfoStore {
    inner: GuardedStore<DiseaseCatalog>,
}

impl DiseaseInfoStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let inner = GuardedStore::open(path)?;
        let store = Self { inner };
        tracing::info!(
            path = %store.path().display(),
            entries = store.inner.read(|c| c.len()),
            "disease info store loaded"
        );
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    pub fn list_categories(&self) -> Vec<String> {
        self.inner.read(|c| c.keys().cloned().collect())
    }

    pub fn get(&self, category: &str) -> Result<(String, DiseaseInfo), StoreError> {
        let key = normalize_category(category)?;
        self.inner.read(|c| -> Result<_, StoreError> {
            let info = c.get(&key).ok_or_else(|| not_found(c, &key))?;
            Ok((key.clone(), info.clone()))
        })
    }

    /// Replace the entry for an existing key. Unknown keys are not created.
    pub fn update(&self, category: &str, info: DiseaseInfo) -> Result<(String, DiseaseInfo), StoreError> {
        let key = normalize_category(category)?;
        let info = info.validate()?;

        self.inner.mutate(|c| -> Result<_, StoreError> {
            if !c.contains_key(&key) {
                return Err(not_found(c, &key));
            }
            c.insert(key.clone(), info.clone());
            Ok(())
        })?;

        tracing::info!(category = %key, "disease info updated");
        Ok((key, info))
    }

    pub fn snapshot(&self) -> DiseaseCatalog {
        self.inner.snapshot()
    }
}

fn not_found(c: &DiseaseCatalog, key: &str) -> StoreError {
    tracing::warn!(category = %key, "disease info not found");
    StoreError::CategoryNotFound {
        category: key.to_string(),
        available: c.keys().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn seeded(dir: &TempDir) -> DiseaseInfoStore {
        let path = dir.path().join("disease_info.json");
        let seed = serde_json::json!({
            "blast": {
                "disease_name": "Rice Blast",
                "caused_by": "Magnaporthe oryzae",
                "description": "Diamond-shaped lesions on leaves",
                "symptoms": ["grey centres", "brown margins"]
            },
            "normal": {
                "disease_name": "Healthy",
                "description": "No disease detected",
                "care": ["balanced fertilizer"]
            }
        });
        fs::write(&path, serde_json::to_vec_pretty(&seed).unwrap()).unwrap();
        DiseaseInfoStore::open(path).unwrap()
    }

    #[test]
    fn lists_sorted_keys() {
        let dir = TempDir::new().unwrap();
        let store = seeded(&dir);
        assert_eq!(store.list_categories(), vec!["blast", "normal"]);
    }

    #[test]
    fn get_normalizes_key() {
        let dir = TempDir::new().unwrap();
        let store = seeded(&dir);

        let (key, info) = store.get(" BLAST ").unwrap();
        assert_eq!(key, "blast");
        assert_eq!(info.disease_name, "Rice Blast");
        assert_eq!(info.symptoms.len(), 2);
    }

    #[test]
    fn update_replaces_existing_entry_and_persists() {
        let dir = TempDir::new().unwrap();
        let store = seeded(&dir);

        let mut info = DiseaseInfo::new("Rice Blast", "Updated description");
        info.prevention = vec!["resistant varieties".to_string()];
        store.update("blast", info).unwrap();

        let reopened = DiseaseInfoStore::open(store.path()).unwrap();
        let (_, stored) = reopened.get("blast").unwrap();
        assert_eq!(stored.description, "Updated description");
        assert_eq!(stored.prevention, vec!["resistant varieties"]);
        assert!(stored.symptoms.is_empty());
        assert_eq!(reopened.snapshot(), store.snapshot());
    }

    #[test]
    fn update_does_not_create_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let store = seeded(&dir);
        let before = fs::read(store.path()).unwrap();

        let err = store
            .update("tungro", DiseaseInfo::new("Tungro", "Viral"))
            .unwrap_err();

        match err {
            StoreError::CategoryNotFound { category, available } => {
                assert_eq!(category, "tungro");
                assert_eq!(available, vec!["blast", "normal"]);
            }
            other => panic!("expected CategoryNotFound, got {other:?}"),
        }
        assert_eq!(fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn update_validates_before_writing() {
        let dir = TempDir::new().unwrap();
        let store = seeded(&dir);

        let err = store.update("blast", DiseaseInfo::new(" ", "x")).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(store.get("blast").unwrap().1.disease_name, "Rice Blast");
    }

    #[test]
    fn file_with_null_lists_opens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("disease_info.json");
        let seed = serde_json::json!({
            "tungro": {
                "disease_name": "Tungro",
                "description": "Viral disease spread by leafhoppers",
                "symptoms": null,
                "prevention": null
            }
        });
        fs::write(&path, serde_json::to_vec_pretty(&seed).unwrap()).unwrap();

        let store = DiseaseInfoStore::open(&path).unwrap();
        let (_, info) = store.get("tungro").unwrap();
        assert!(info.symptoms.is_empty());
        assert!(info.prevention.is_empty());
    }
}
