//! The JSON snapshot projection of a document's mutable sections.

use crate::domain::DomainSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A point-in-time projection of the document's mutable sections.
///
/// Created by the snapshot extractor, consumed by the restorer. Exactly one
/// backup exists per source document; creating a new one replaces the old.
///
/// Sections other than `named_domains` are carried as opaque JSON values:
/// the restorer passes them through unchanged, and only the domain
/// collection is reconciled against the live document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    /// Version string copied from the document's identification section
    pub version: String,
    /// Domain collection at snapshot time
    pub named_domains: DomainSet,
    /// The root-parts section, verbatim
    pub root_parts: Value,
    /// Collection entries, verbatim
    pub collections: Value,
    /// Application entries, verbatim
    pub applications: Value,
    /// Included module entries, verbatim
    pub includes: Value,
}
