//! Typed domain model for the mutable portion of a TCX document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single named entry inside a domain.
///
/// Fields beyond `name` are opaque to the merge algorithm and preserved
/// verbatim, including their order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainElement {
    /// Element name, unique within its domain after a merge
    pub name: String,
    /// Opaque attribute fields, carried through untouched
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl DomainElement {
    /// Create an element with no opaque fields.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Map::new(),
        }
    }

    /// Create an element carrying opaque fields.
    #[must_use]
    pub fn with_fields(name: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}

/// A named grouping of elements within the model document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedDomain {
    /// Domain name, unique within a domain collection
    pub name: String,
    /// Element sequence; order is data and must round-trip
    pub elements: Vec<DomainElement>,
}

impl NamedDomain {
    /// Create a domain from a name and element sequence.
    #[must_use]
    pub fn new(name: impl Into<String>, elements: Vec<DomainElement>) -> Self {
        Self {
            name: name.into(),
            elements,
        }
    }
}

/// One domain or a sequence of domains.
///
/// The document format yields a bare object instead of a list when a
/// collection has exactly one entry, so both the codec and the backup JSON
/// can produce either shape. All consumers normalize through
/// [`DomainSet::into_vec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DomainSet {
    /// A single bare domain
    One(NamedDomain),
    /// A sequence of domains
    Many(Vec<NamedDomain>),
}

impl DomainSet {
    /// Normalize into a sequence.
    #[must_use]
    pub fn into_vec(self) -> Vec<NamedDomain> {
        match self {
            DomainSet::One(domain) => vec![domain],
            DomainSet::Many(domains) => domains,
        }
    }

    /// Number of domains.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            DomainSet::One(_) => 1,
            DomainSet::Many(domains) => domains.len(),
        }
    }

    /// Check if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            DomainSet::One(_) => false,
            DomainSet::Many(domains) => domains.is_empty(),
        }
    }
}

impl From<NamedDomain> for DomainSet {
    fn from(domain: NamedDomain) -> Self {
        DomainSet::One(domain)
    }
}

impl From<Vec<NamedDomain>> for DomainSet {
    fn from(domains: Vec<NamedDomain>) -> Self {
        DomainSet::Many(domains)
    }
}
