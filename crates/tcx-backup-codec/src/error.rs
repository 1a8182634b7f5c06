//! Codec error taxonomy.

/// Errors produced while parsing, navigating, or serializing a document.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CodecError {
    /// The underlying XML reader or writer failed
    #[error("xml error: {0}")]
    Xml(String),
    /// The document contains no root element
    #[error("document has no root element")]
    EmptyDocument,
    /// A required section is absent from the document
    #[error("missing section: {name}")]
    MissingSection {
        /// Element name of the absent section
        name: String,
    },
    /// A required field is absent from a structural element
    #[error("{element} is missing its {field}")]
    MissingField {
        /// Element name carrying the absent field
        element: String,
        /// Name of the absent field
        field: String,
    },
}

impl CodecError {
    pub(crate) fn missing_section(name: &str) -> Self {
        CodecError::MissingSection {
            name: name.to_string(),
        }
    }

    pub(crate) fn missing_field(element: &str, field: &str) -> Self {
        CodecError::MissingField {
            element: element.to_string(),
            field: field.to_string(),
        }
    }
}
