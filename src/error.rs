//! Error types for GIR compilation.

use thiserror::Error;

/// Result type for document compilation.
pub type Result<T> = std::result::Result<T, GirError>;

/// Structural failures that abort compilation of a single GIR document.
///
/// Everything below this level (a malformed parameter, an unknown type, an
/// ordering stall) degrades the output instead of failing.
#[derive(Error, Debug)]
pub enum GirError {
    /// The input is not well-formed XML.
    #[error("failed to parse XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The root element is not `<repository>` in the core namespace.
    #[error("expected <repository> root element, found <{found}>")]
    MissingRepository { found: String },

    /// The repository has no `<namespace>` child.
    #[error("repository contains no <namespace> element")]
    MissingNamespace,

    /// The `<namespace>` element has no `name` attribute.
    #[error("<namespace> element has no name")]
    UnnamedNamespace,

    /// The repository has more than one `<namespace>` child.
    #[error("repository contains {0} <namespace> elements, expected exactly one")]
    MultipleNamespaces(usize),
}
