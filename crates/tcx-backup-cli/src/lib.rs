//! # tcx-backup
//!
//! Snapshot and restore the mutable domain sections of TCX model documents.
//!
//! Two operations compose against the shared reconciliation routine in
//! `tcx-backup-core`:
//! - the **snapshot extractor** projects a document's mutable sections into
//!   a JSON backup, replacing any prior backup for that document
//! - the **restorer** reconciles the backup's domains with the live
//!   document's domains and rewrites the document, keeping the live
//!   component classes

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine;
pub mod store;

pub use engine::{backup_file_name, Engine, EngineError};
pub use store::{FileStore, StoreError};
