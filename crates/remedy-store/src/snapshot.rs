// ABOUTME: Atomic snapshot save and load for a single JSON backing file.
// ABOUTME: Writes go to a temp file in the same directory, are fsynced, then renamed over the target.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors that can occur during snapshot operations.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed json in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Gateway to one backing file. Holds no lock of its own; callers serialize
/// access through [`crate::GuardedStore`].
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read and decode the file. A missing file yields `T::default()`;
    /// malformed content is an error, never silently replaced.
    pub fn load<T>(&self) -> Result<T, SnapshotError>
    where
        T: DeserializeOwned + Default,
    {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no snapshot on disk, starting empty");
                return Ok(T::default());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        serde_json::from_str(&contents).map_err(|source| SnapshotError::Json {
            path: self.path.clone(),
            source,
        })
    }

    /// Save the full snapshot using atomic write (temp file, fsync, rename).
    /// Creates the parent directory if it does not exist. On failure the temp
    /// file is removed and the previous file is left untouched.
    pub fn save<T>(&self, value: &T) -> Result<(), SnapshotError>
    where
        T: Serialize + ?Sized,
    {
        let dir = self.parent_dir();
        fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;

        // Dropping the temp file on any early return deletes it.
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        self.write_json(tmp.as_file_mut(), value)?;
        tmp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        // Fsync the directory so the rename itself is durable. Best-effort:
        // the rename already succeeded and the data is consistent.
        if let Ok(dir) = File::open(dir) {
            let _ = dir.sync_all();
        }

        tracing::debug!(path = %self.path.display(), "snapshot saved");
        Ok(())
    }

    fn write_json<T>(&self, file: &mut File, value: &T) -> Result<(), SnapshotError>
    where
        T: Serialize + ?Sized,
    {
        let mut writer = BufWriter::new(file);
        let mut ser =
            serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
        value.serialize(&mut ser).map_err(|source| {
            if source.is_io() {
                self.io_error(source.into())
            } else {
                SnapshotError::Json {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;
        writer.write_all(b"\n").map_err(|e| self.io_error(e))?;
        writer.flush().map_err(|e| self.io_error(e))?;
        Ok(())
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn io_error(&self, source: io::Error) -> SnapshotError {
        SnapshotError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
