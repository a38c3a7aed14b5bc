//! Core types for Folio
//!
//! This crate defines the foundational types shared by the codec and the
//! document store:
//! - `Value`: the tagged-union JSON value model
//! - Key namespacing: document/index prefixes and field validation
//!
//! It performs no I/O and has no knowledge of the backend.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod keyspace;
pub mod value;

pub use keyspace::{
    document_key, index_key, validate_field, FieldError, DOC_PREFIX, INDEX_PREFIX,
    SEGMENT_DELIMITER,
};
pub use value::Value;
