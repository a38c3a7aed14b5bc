//! Posting-list codec
//!
//! A posting list is the ordered set of document keys sharing one
//! (field, bucket) pairing. It is persisted as a JSON array of strings
//! through the same codec as documents, preserving first-insertion
//! order.

use crate::error::{Error, Result};
use folio_core::{Value, INDEX_PREFIX, SEGMENT_DELIMITER};

/// Decode a posting list. Anything other than a JSON array of strings
/// is corruption: these bytes are written by the store alone.
pub(crate) fn decode_postings(bytes: &[u8], field: &str, bucket: &str) -> Result<Vec<String>> {
    let corrupt = || Error::CorruptIndex {
        key: format!("{INDEX_PREFIX}{field}{SEGMENT_DELIMITER}{bucket}"),
    };
    let value = folio_codec::decode(bytes).map_err(|_| corrupt())?;
    let Value::Array(items) = value else {
        return Err(corrupt());
    };
    let mut keys = Vec::with_capacity(items.len());
    for item in items {
        let Value::String(key) = item else {
            return Err(corrupt());
        };
        keys.push(key);
    }
    Ok(keys)
}

/// Encode a posting list to its stored form.
pub(crate) fn encode_postings(keys: &[String]) -> Result<String> {
    let value = Value::Array(keys.iter().map(|k| Value::String(k.clone())).collect());
    Ok(folio_codec::encode(&value)?)
}
