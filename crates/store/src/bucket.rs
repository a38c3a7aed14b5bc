//! Index bucket derivation
//!
//! A field value maps to the textual bucket identifier that namespaces
//! its posting list. The rendering is pinned to the codec's own
//! formatting so that decode→index and decode→encode always agree:
//! equal decoded values land in the same bucket, and `Int(5)` and
//! `Float(5.0)` land in *different* buckets (`"5"` vs `"5.0"`), matching
//! value equality.

use crate::error::Result;
use folio_core::Value;

/// Derive the bucket identifier for a field value.
///
/// - `Null` → `null`, `Bool` → `true`/`false`, `Int` → decimal digits
/// - `Float` → the encoder's float rendering
/// - `String` → the raw string contents, unquoted and unescaped
/// - `Array`/`Object` → the full canonical encoding (deterministic:
///   object keys iterate sorted)
///
/// Fails only for values the encoder rejects (non-finite floats).
pub fn bucket(value: &Value) -> Result<String> {
    Ok(match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::String(s) => s.clone(),
        Value::Float(_) | Value::Array(_) | Value::Object(_) => folio_codec::encode(value)?,
    })
}
