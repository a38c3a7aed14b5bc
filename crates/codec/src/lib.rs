//! JSON codec for Folio
//!
//! A self-contained codec between raw bytes and [`folio_core::Value`]:
//!
//! - [`decode`]: single-pass recursive-descent parser. Every failure is a
//!   [`SyntaxError`] carrying the byte offset where parsing stopped.
//! - [`encode`]: canonical serializer. Object keys are emitted in sorted
//!   order, so encoding the same logical value always produces the same
//!   bytes.
//!
//! The codec is the storage format: the document store persists exactly
//! these bytes and decodes exactly this grammar. No serde machinery is
//! involved on this path.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod decode;
pub mod encode;

pub use decode::{decode, SyntaxError};
pub use encode::{encode, encode_into, EncodeError};
