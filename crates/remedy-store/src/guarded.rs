// ABOUTME: Lock-guarded in-memory snapshot mirroring one backing file.
// ABOUTME: Every read and every read-mutate-save cycle holds the file's mutex for its full duration.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::snapshot::{SnapshotError, SnapshotFile};

/// Owns the loaded snapshot of one file together with the mutex that
/// serializes access to it. One instance per backing file; unrelated files
/// never share a lock.
#[derive(Debug)]
pub struct GuardedStore<T> {
    file: SnapshotFile,
    state: Mutex<T>,
}

impl<T> GuardedStore<T>
where
    T: Serialize + DeserializeOwned + Default + Clone,
{
    /// Load the file at `path` (missing → empty) and wrap it in a guard.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SnapshotError> {
        let file = SnapshotFile::new(path);
        let state = file.load()?;
        Ok(Self {
            file,
            state: Mutex::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Run `f` against the current snapshot while holding the guard.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let state = self.lock();
        f(&state)
    }

    /// Run `f` against a copy of the snapshot, persist the copy, and only
    /// then make it the in-memory state. If `f` fails nothing is written; if
    /// the save fails memory keeps its previous value, so memory and disk
    /// never diverge after a reported success.
    pub fn mutate<R, E>(&self, f: impl FnOnce(&mut T) -> Result<R, E>) -> Result<R, E>
    where
        E: From<SnapshotError>,
    {
        let mut state = self.lock();
        let mut draft = state.clone();
        let out = f(&mut draft)?;
        self.file.save(&draft).inspect_err(|e| {
            tracing::error!(path = %self.file.path().display(), error = %e, "snapshot save failed");
        })?;
        *state = draft;
        Ok(out)
    }

    /// A copy of the whole snapshot.
    pub fn snapshot(&self) -> T {
        self.read(T::clone)
    }

    // The guarded value is only ever replaced wholesale after a successful
    // save, so a panic while holding the lock cannot leave it half-mutated.
    fn lock(&self) -> MutexGuard<'_, T> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
