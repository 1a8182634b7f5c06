//! Filesystem storage over one directory of documents and backups.
//!
//! Listings are queried fresh on every call; nothing is cached across
//! operations, so a backup created moments ago is visible to the next
//! restore in the same process.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Filesystem-backed store for one directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store over the given directory.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory this store operates on.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// List all file names in the directory, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::List`] if the directory cannot be read.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| StoreError::List {
            dir: self.dir.clone(),
            source,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::List {
                dir: self.dir.clone(),
                source,
            })?;
            if entry.path().is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// List file names with the given extension (without the dot).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::List`] if the directory cannot be read.
    pub fn list_ext(&self, ext: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|name| {
                Path::new(name)
                    .extension()
                    .is_some_and(|e| e.eq_ignore_ascii_case(ext))
            })
            .collect())
    }

    /// Read a file's content.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] if the file is missing or unreadable.
    pub fn read(&self, name: &str) -> Result<String, StoreError> {
        fs::read_to_string(self.dir.join(name)).map_err(|source| StoreError::Read {
            name: name.to_string(),
            source,
        })
    }

    /// Create or overwrite a file with the given content.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Create`] if the file cannot be written.
    pub fn create(&self, name: &str, content: &str) -> Result<(), StoreError> {
        fs::write(self.dir.join(name), content).map_err(|source| StoreError::Create {
            name: name.to_string(),
            source,
        })
    }

    /// Delete a file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Delete`] if the file is missing or undeletable.
    pub fn delete(&self, name: &str) -> Result<(), StoreError> {
        fs::remove_file(self.dir.join(name)).map_err(|source| StoreError::Delete {
            name: name.to_string(),
            source,
        })
    }
}

/// Errors from the filesystem store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Directory listing failed
    #[error("failed to list {dir}: {source}")]
    List {
        /// Directory being listed
        dir: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
    /// File read failed
    #[error("failed to read {name}: {source}")]
    Read {
        /// File name
        name: String,
        /// Underlying I/O error
        source: io::Error,
    },
    /// File creation failed
    #[error("failed to create {name}: {source}")]
    Create {
        /// File name
        name: String,
        /// Underlying I/O error
        source: io::Error,
    },
    /// File deletion failed
    #[error("failed to delete {name}: {source}")]
    Delete {
        /// File name
        name: String,
        /// Underlying I/O error
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_basic_operations() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.create("a.tcx", "<model-data/>").unwrap();
        store.create("a_backup.json", "{}").unwrap();

        assert_eq!(store.list().unwrap(), vec!["a.tcx", "a_backup.json"]);
        assert_eq!(store.list_ext("json").unwrap(), vec!["a_backup.json"]);
        assert_eq!(store.read("a.tcx").unwrap(), "<model-data/>");

        store.delete("a_backup.json").unwrap();
        assert_eq!(store.list_ext("json").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn create_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.create("a.tcx", "old").unwrap();
        store.create("a.tcx", "new").unwrap();
        assert_eq!(store.read("a.tcx").unwrap(), "new");
    }

    #[test]
    fn read_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(store.read("nope.tcx"), Err(StoreError::Read { .. })));
    }

    #[test]
    fn listing_is_fresh_per_call() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert!(store.list().unwrap().is_empty());
        store.create("late.json", "{}").unwrap();
        assert_eq!(store.list_ext("json").unwrap(), vec!["late.json"]);
    }
}
