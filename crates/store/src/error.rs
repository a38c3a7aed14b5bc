//! Error types for the document store
//!
//! Codec and backend errors convert via `#[from]` and surface to the
//! caller unchanged; the store never logs-and-swallows an error except
//! the two documented best-effort skips in query and batch retrieval.

use folio_backend::BackendError;
use folio_codec::{EncodeError, SyntaxError};
use folio_core::FieldError;
use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by document store operations
#[derive(Debug, Error)]
pub enum Error {
    /// Stored or queried bytes failed to parse as JSON
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// A value could not be rendered to JSON
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Top-level document value is not an Object
    #[error("document must be an object, got {type_name}")]
    InvalidDocument {
        /// Shape of the rejected value
        type_name: &'static str,
    },

    /// No document under the requested key
    #[error("document not found: {key:?}")]
    NotFound {
        /// The requested document key
        key: String,
    },

    /// Query on a field that was not declared indexed
    #[error("field is not indexed: {field:?}")]
    NotIndexed {
        /// The undeclared field name
        field: String,
    },

    /// Invalid indexed field name at store construction
    #[error(transparent)]
    InvalidField(#[from] FieldError),

    /// BatchStore inputs of unequal length
    #[error("batch length mismatch: {keys} keys, {documents} documents")]
    BatchLengthMismatch {
        /// Number of keys supplied
        keys: usize,
        /// Number of documents supplied
        documents: usize,
    },

    /// Posting-list bytes that are not a JSON array of strings
    #[error("corrupt posting list under {key:?}")]
    CorruptIndex {
        /// Backend key of the damaged posting list
        key: String,
    },

    /// Error originating in the backend engine, propagated unchanged
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}

impl Error {
    /// True for the not-found case, the one error callers routinely
    /// branch on.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
