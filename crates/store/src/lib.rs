//! Document store for Folio
//!
//! This crate ties the codec and the backend together into the public
//! storage API:
//! - [`DocumentStore`]: store/retrieve/delete/query plus batch variants,
//!   each one backend transaction, under a single-writer/multi-reader
//!   lock
//! - [`bucket`]: field value → posting-list bucket identifier
//! - [`Error`]/[`Result`]: the error surface of every operation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bucket;
pub mod error;
mod posting;
pub mod store;

pub use bucket::bucket;
pub use error::{Error, Result};
pub use store::DocumentStore;
