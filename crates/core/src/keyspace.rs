//! Backend key namespacing
//!
//! Documents and posting lists share one flat byte-keyed namespace in the
//! backend, separated by fixed prefixes. The layout is part of the on-disk
//! compatibility surface and must not change:
//!
//! ```text
//! doc:<document key>                  document payload (encoded JSON object)
//! index:<field>:<bucket identifier>   posting list (encoded JSON string array)
//! ```
//!
//! Document keys are opaque: nothing after `doc:` is ever parsed back, so
//! they may contain the delimiter. Index keys are unambiguous as long as
//! the *field name* is delimiter-free, because the bucket identifier is
//! the trailing segment. Indexed field names are therefore validated at
//! store construction.

use thiserror::Error;

/// Prefix for document payload keys
pub const DOC_PREFIX: &str = "doc:";

/// Prefix for posting-list keys
pub const INDEX_PREFIX: &str = "index:";

/// Separator between the field name and bucket identifier segments
pub const SEGMENT_DELIMITER: char = ':';

/// Build the backend key for a document payload.
pub fn document_key(key: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(DOC_PREFIX.len() + key.len());
    out.extend_from_slice(DOC_PREFIX.as_bytes());
    out.extend_from_slice(key.as_bytes());
    out
}

/// Build the backend key for the posting list of (field, bucket).
pub fn index_key(field: &str, bucket: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(INDEX_PREFIX.len() + field.len() + 1 + bucket.len());
    out.extend_from_slice(INDEX_PREFIX.as_bytes());
    out.extend_from_slice(field.as_bytes());
    out.push(SEGMENT_DELIMITER as u8);
    out.extend_from_slice(bucket.as_bytes());
    out
}

/// Validate an indexed field name.
///
/// Field names become a middle segment of index keys, so they must be
/// non-empty and free of the segment delimiter.
pub fn validate_field(field: &str) -> Result<(), FieldError> {
    if field.is_empty() {
        return Err(FieldError::Empty);
    }
    if field.contains(SEGMENT_DELIMITER) {
        return Err(FieldError::ContainsDelimiter {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Indexed field name validation errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    /// Field name is empty (length 0)
    #[error("indexed field name cannot be empty")]
    Empty,

    /// Field name contains the key segment delimiter
    #[error("indexed field name {field:?} cannot contain '{}'", SEGMENT_DELIMITER)]
    ContainsDelimiter {
        /// The offending field name
        field: String,
    },
}
