//! Integration tests
//!
//! Cross-crate tests through the `folio` facade, organized by dimension:
//! - documents: store/retrieve/delete round trips through the codec
//! - indexing: posting-list maintenance and query semantics
//! - batches: multi-document transactions and their atomicity
//! - concurrency: single-writer/multi-reader discipline under threads

#[path = "../common/mod.rs"]
mod common;

mod concurrency;
mod documents;
mod indexing;
