//! Canonical JSON serializer
//!
//! Every `Value` shape encodes, including `Int` (decimal digits) — so a
//! freshly decoded value can always be written back. Floats are printed
//! as the shortest fixed-point decimal that reparses to the same 64-bit
//! value, never in scientific notation, and always with a fractional
//! part (`1.0`, not `1`) so the Int/Float distinction survives a round
//! trip. The only values with no rendering are non-finite floats.
//!
//! Object keys are written in sorted order (the `BTreeMap` backing), so
//! two encodes of the same logical object are byte-identical. Earlier
//! writers of this format did not guarantee member order, and readers
//! never depended on it, so sorted output stays compatible.

use folio_core::Value;
use std::fmt::Write;
use thiserror::Error;

/// A value the encoder cannot render.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    /// NaN and infinities have no JSON representation
    #[error("unsupported value: non-finite float {0}")]
    NonFiniteFloat(f64),
}

/// Encode a value to its canonical textual form.
pub fn encode(value: &Value) -> Result<String, EncodeError> {
    let mut out = String::new();
    encode_into(&mut out, value)?;
    Ok(out)
}

/// Append a value's canonical textual form to `out`.
///
/// On error, `out` may hold a partial prefix; callers that reuse buffers
/// should truncate before retrying.
pub fn encode_into(out: &mut String, value: &Value) -> Result<(), EncodeError> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Int(i) => {
            let _ = write!(out, "{i}");
        }
        Value::Float(f) => write_float(out, *f)?,
        Value::String(s) => write_escaped(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                encode_into(out, item)?;
            }
            out.push(']');
        }
        Value::Object(fields) => {
            out.push('{');
            let mut first = true;
            for (key, val) in fields {
                if !first {
                    out.push(',');
                }
                first = false;
                write_escaped(out, key);
                out.push(':');
                encode_into(out, val)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

fn write_float(out: &mut String, f: f64) -> Result<(), EncodeError> {
    if !f.is_finite() {
        return Err(EncodeError::NonFiniteFloat(f));
    }
    // {:?} is the shortest decimal that reparses to the same bits, in
    // plain notation, keeping ".0" on integral values
    let _ = write!(out, "{f:?}");
    Ok(())
}

/// Escape per scalar value: the seven named escapes, `\uXXXX` for
/// controls and the U+2028/U+2029 line separators (they terminate
/// embedding contexts such as script tags), everything else verbatim.
fn write_escaped(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{2028}' || c == '\u{2029}' => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
