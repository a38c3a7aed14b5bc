//! Backend adapter layer for Folio
//!
//! This crate defines the contract the document store requires from an
//! ordered key/value engine ([`Backend`], [`Transaction`]) and ships an
//! in-memory reference implementation ([`MemoryEngine`]). Durable
//! engines live outside this workspace and plug in through the same
//! traits.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;
pub mod traits;

pub use memory::{MemoryEngine, MemoryTransaction};
pub use traits::{Backend, BackendError, Transaction};
