//! # tcx-backup Codec
//!
//! TCX document codec: parses the XML project file into a generic element
//! tree, extracts the sections the backup system cares about (version,
//! named domains, component classes, opaque model sections), and assembles
//! a replacement document from a restored projection.
//!
//! The codec is the boundary where unstructured data enters the system;
//! structural errors (a domain or element missing its `name`) surface here
//! rather than in the merge algorithm, which operates on typed inputs.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod error;
pub mod tree;
pub mod value;

pub use document::TcxDocument;
pub use error::CodecError;
pub use tree::XmlNode;
pub use value::{node_from_value, node_to_value};
