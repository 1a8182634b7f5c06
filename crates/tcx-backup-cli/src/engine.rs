//! The snapshot extractor and restorer.

use crate::store::{FileStore, StoreError};
use tcx_backup_codec::{CodecError, TcxDocument};
use tcx_backup_core::{merge_domains, Backup, DomainSet};

/// Derive the backup file name for a document.
///
/// `project.tcx` maps to `project_backup.json`. Names without the `.tcx`
/// extension are rejected up front; a blind suffix replacement would alias
/// the backup onto the document itself.
///
/// # Errors
///
/// Returns [`EngineError::NotATcxDocument`] for non-`.tcx` names.
pub fn backup_file_name(name: &str) -> Result<String, EngineError> {
    name.strip_suffix(".tcx")
        .filter(|stem| !stem.is_empty())
        .map(|stem| format!("{stem}_backup.json"))
        .ok_or_else(|| EngineError::NotATcxDocument {
            name: name.to_string(),
        })
}

/// Runs backup and restore operations over one document directory.
#[derive(Debug, Clone)]
pub struct Engine {
    store: FileStore,
}

impl Engine {
    /// Create an engine over the given store.
    #[must_use]
    pub fn new(store: FileStore) -> Self {
        Self { store }
    }

    /// Snapshot a document's mutable sections into its backup file.
    ///
    /// Extracts version, named domains, root parts, collections,
    /// applications, and includes verbatim and writes them as JSON. Any
    /// existing backup for the document is deleted first; exactly one backup
    /// exists per document. `action` labels the status line (the restorer
    /// does not reuse this path, but callers refreshing a backup can log
    /// "updated" instead of "created").
    ///
    /// # Errors
    ///
    /// Propagates storage failures, parse errors, and missing sections.
    pub fn create(&self, file_name: &str, action: &str) -> Result<(), EngineError> {
        let backup_name = backup_file_name(file_name)?;

        let content = self.store.read(file_name)?;
        let document = TcxDocument::parse(&content)?;

        let backup = Backup {
            version: document.version()?.to_string(),
            named_domains: document.domains()?,
            root_parts: document.section_value("root-parts")?,
            collections: document.section_items("collections", "collection")?,
            applications: document.section_items("applications", "application")?,
            includes: document.section_items("includes", "module")?,
        };
        let json = serde_json::to_string_pretty(&backup)?;

        if self.store.list_ext("json")?.contains(&backup_name) {
            self.store.delete(&backup_name)?;
        }
        self.store.create(&backup_name, &json)?;

        tracing::info!(file = %backup_name, "Backup {action}");
        Ok(())
    }

    /// Restore a document from its backup.
    ///
    /// Merges the live document's domains (original side) with the backup's
    /// domains (backup side), substitutes the live component classes, passes
    /// every other backup section through unchanged, and rewrites the
    /// document under its original name.
    ///
    /// With `check` set and no backup present, the miss is reported and the
    /// call returns without touching anything; `check = false` forces the
    /// restore to proceed and fail on the missing read instead.
    ///
    /// The full replacement is serialized before the original is deleted, so
    /// no partial merge is ever committed. The delete-then-create window
    /// itself is not atomic; a crash between the two steps leaves the
    /// document missing.
    ///
    /// # Errors
    ///
    /// Propagates storage failures, document parse errors, malformed backup
    /// JSON, and structural errors in either domain collection.
    pub fn restore(&self, file_name: &str, check: bool) -> Result<(), EngineError> {
        let backup_name = backup_file_name(file_name)?;

        if check && !self.store.list_ext("json")?.contains(&backup_name) {
            tracing::error!(file = %backup_name, "Backup does not exist");
            return Ok(());
        }

        let content = self.store.read(file_name)?;
        let document = TcxDocument::parse(&content)?;

        let component_classes = document.component_classes();
        let live_domains = document.domains()?;

        let backup: Backup = serde_json::from_str(&self.store.read(&backup_name)?)?;

        let merged = merge_domains(live_domains, backup.named_domains.clone());
        let restored = Backup {
            named_domains: DomainSet::Many(merged),
            ..backup
        };

        let replacement =
            TcxDocument::assemble(&restored, component_classes.as_ref()).serialize()?;

        self.store.delete(file_name)?;
        self.store.create(file_name, &replacement)?;

        tracing::info!(file = %file_name, "Document restored");
        Ok(())
    }
}

/// Errors from backup and restore operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The file name does not carry the `.tcx` extension
    #[error("not a TCX document: {name}")]
    NotATcxDocument {
        /// Offending file name
        name: String,
    },
    /// Underlying storage failed
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Document parsing or assembly failed
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// The backup JSON is malformed or structurally invalid
    #[error("malformed backup: {0}")]
    BackupParse(#[from] serde_json::Error),
}
