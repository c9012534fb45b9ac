//! Error types for ladle operations.
//!
//! This module defines the main error type [`LadleError`] together with the
//! [`ErrorKind`] discriminant callers compare against when they want to branch
//! on a specific failure instead of just printing it.
//!
//! # Example
//!
//! ```rust
//! use ladle_core::{Document, ErrorKind};
//!
//! let doc = Document::parse("<div id=\"links\"></div>").unwrap();
//! let missing = doc.root().find(("div", "id", "linkz"));
//!
//! if let Some(err) = missing.error() {
//!     assert_eq!(err.kind(), ErrorKind::ElementNotFound);
//! }
//! ```

use thiserror::Error;

/// The kind of a [`LadleError`], cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnableToParse,
    ElementNotFound,
    NoNextSibling,
    NoPreviousSibling,
    NoNextElementSibling,
    NoPreviousElementSibling,
    NotAnElement,
    NoTextNode,
    InvalidQuery,
    UnknownNode,
    InvalidUrl,
    RequestCreationFailed,
    RequestFailed,
    Timeout,
    ResponseReadFailed,
    FileNotFound,
    Io,
}

/// Main error type for parsing, querying and fetching.
///
/// Errors are `Clone` so that an errored [`Root`](crate::Root) handle can hand
/// the same error to every handle chained after it.
///
/// # Example
///
/// ```rust
/// use ladle_core::{LadleError, Query};
///
/// match Query::from_args(&["div", "id"]) {
///     Ok(_) => unreachable!(),
///     Err(LadleError::InvalidQuery(msg)) => println!("bad query: {}", msg),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LadleError {
    /// The parsed tree contains no element to start querying from.
    #[error("unable to parse the HTML: {0}")]
    UnableToParse(String),

    /// A `find` or `find_strict` query matched nothing.
    ///
    /// `attributes` holds the attribute key and value joined by a space, or is
    /// empty for tag-only queries.
    #[error("element `{tag}` with attributes `{attributes}` not found")]
    ElementNotFound { tag: String, attributes: String },

    #[error("no next sibling found")]
    NoNextSibling,

    #[error("no previous sibling found")]
    NoPreviousSibling,

    #[error("no next element sibling found")]
    NoNextElementSibling,

    #[error("no previous element sibling found")]
    NoPreviousElementSibling,

    /// Attribute access on a text, comment, doctype or document node.
    #[error("not an element node: {0}")]
    NotAnElement(String),

    /// No non-whitespace text node among the direct children.
    #[error("no text node found")]
    NoTextNode,

    /// A query was built from the wrong number of arguments.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A node id that does not belong to the document.
    #[error("node is not part of this document")]
    UnknownNode,

    /// A URL cannot be parsed or has no scheme.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client or request could not be built.
    #[error("error creating request to {0}")]
    RequestCreationFailed(String),

    /// Network, DNS, TLS or HTTP protocol failure.
    #[error("couldn't perform request to {url}: {reason}")]
    RequestFailed { url: String, reason: String },

    #[error("request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    #[error("unable to read the response body: {0}")]
    ResponseReadFailed(String),

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl LadleError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LadleError::UnableToParse(_) => ErrorKind::UnableToParse,
            LadleError::ElementNotFound { .. } => ErrorKind::ElementNotFound,
            LadleError::NoNextSibling => ErrorKind::NoNextSibling,
            LadleError::NoPreviousSibling => ErrorKind::NoPreviousSibling,
            LadleError::NoNextElementSibling => ErrorKind::NoNextElementSibling,
            LadleError::NoPreviousElementSibling => ErrorKind::NoPreviousElementSibling,
            LadleError::NotAnElement(_) => ErrorKind::NotAnElement,
            LadleError::NoTextNode => ErrorKind::NoTextNode,
            LadleError::InvalidQuery(_) => ErrorKind::InvalidQuery,
            LadleError::UnknownNode => ErrorKind::UnknownNode,
            LadleError::InvalidUrl(_) => ErrorKind::InvalidUrl,
            LadleError::RequestCreationFailed(_) => ErrorKind::RequestCreationFailed,
            LadleError::RequestFailed { .. } => ErrorKind::RequestFailed,
            LadleError::Timeout { .. } => ErrorKind::Timeout,
            LadleError::ResponseReadFailed(_) => ErrorKind::ResponseReadFailed,
            LadleError::FileNotFound(_) => ErrorKind::FileNotFound,
            LadleError::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<std::io::Error> for LadleError {
    fn from(err: std::io::Error) -> Self {
        LadleError::Io(err.to_string())
    }
}

/// Result type alias for LadleError.
///
/// This is a convenience alias for `std::result::Result<T, LadleError>`.
pub type Result<T> = std::result::Result<T, LadleError>;
