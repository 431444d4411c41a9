// WHY: Single error type for the library so callers can match on load failures
// versus the intentionally unimplemented export path

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by [`crate::RmhFile`] and the XML tree it owns
#[derive(Debug, Error)]
pub enum RmhError {
    /// The document file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The XML reader rejected the input
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Input parsed as events but does not form a single well-formed element tree
    #[error("malformed document: {0}")]
    Malformed(String),

    /// The document carries no `idno` element, so no file names can be derived from it
    #[error("document has no identifier (idno) element")]
    MissingIdentifier,

    /// Operation reserved for a later format that has not been settled
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
}

impl From<quick_xml::events::attributes::AttrError> for RmhError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        RmhError::Xml(e.into())
    }
}
