//! # tcx-backup Core
//!
//! Domain model and reconciliation algorithm for TCX document backups.
//!
//! This crate provides:
//! - The typed domain model (`NamedDomain`, `DomainElement`, `DomainSet`)
//! - An explicit insertion-ordered map primitive with
//!   first-insert-wins-position / last-insert-wins-value semantics
//! - The domain merge algorithm used by the restorer
//! - The `Backup` snapshot projection persisted as JSON

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backup;
pub mod domain;
pub mod merge;
pub mod ordered;

pub use backup::Backup;
pub use domain::{DomainElement, DomainSet, NamedDomain};
pub use merge::merge_domains;
pub use ordered::OrderedMap;
