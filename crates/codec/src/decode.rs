//! Recursive-descent JSON parser
//!
//! Single pass over the input bytes with local lookahead only. Strings
//! are accumulated as raw bytes and validated as UTF-8 once, when the
//! closing quote is seen; `\u` escapes are decoded to scalar values, with
//! valid UTF-16 surrogate pairs recombined into one code point.
//!
//! Numeric classification: a literal containing `.`, `e` or `E` becomes a
//! `Float`; everything else must fit an `i64` or the literal is rejected.
//!
//! `decode` parses one value and ignores any trailing bytes after it.

use folio_core::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Malformed input detected during decode.
///
/// Every variant except [`SyntaxError::EmptyInput`] carries the byte
/// offset at which parsing stopped. EOF-class variants (`Unclosed*`,
/// `UnexpectedEof`, `IncompleteEscape`) are distinct from
/// content-mismatch variants so truncated input can be told apart from
/// garbage input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    /// Input is empty or contains only whitespace
    #[error("empty input")]
    EmptyInput,

    /// A value was expected but the input ended
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof {
        /// Byte offset of the failure
        offset: usize,
    },

    /// Byte cannot start any JSON value
    #[error("invalid JSON at offset {offset}")]
    UnexpectedToken {
        /// Byte offset of the failure
        offset: usize,
    },

    /// `true`, `false` or `null` expected but not matched exactly
    #[error("invalid literal at offset {offset}")]
    InvalidLiteral {
        /// Byte offset of the failure
        offset: usize,
    },

    /// Object member must start with a quoted key
    #[error("expected string key at offset {offset}")]
    ExpectedKey {
        /// Byte offset of the failure
        offset: usize,
    },

    /// Missing `:` between an object key and its value
    #[error("expected ':' at offset {offset}")]
    ExpectedColon {
        /// Byte offset of the failure
        offset: usize,
    },

    /// Object member must be followed by `,` or `}`
    #[error("expected ',' or '}}' at offset {offset}")]
    ExpectedCommaOrBrace {
        /// Byte offset of the failure
        offset: usize,
    },

    /// Array element must be followed by `,` or `]`
    #[error("expected ',' or ']' at offset {offset}")]
    ExpectedCommaOrBracket {
        /// Byte offset of the failure
        offset: usize,
    },

    /// Input ended inside an object
    #[error("unclosed object at offset {offset}")]
    UnclosedObject {
        /// Byte offset of the failure
        offset: usize,
    },

    /// Input ended inside an array
    #[error("unclosed array at offset {offset}")]
    UnclosedArray {
        /// Byte offset of the failure
        offset: usize,
    },

    /// Input ended inside a string
    #[error("unclosed string at offset {offset}")]
    UnclosedString {
        /// Byte offset of the failure
        offset: usize,
    },

    /// Input ended inside an escape sequence
    #[error("incomplete escape sequence at offset {offset}")]
    IncompleteEscape {
        /// Byte offset of the failure
        offset: usize,
    },

    /// Backslash followed by a character that is not an escape
    #[error("invalid escape sequence at offset {offset}")]
    InvalidEscape {
        /// Byte offset of the failure
        offset: usize,
    },

    /// `\u` not followed by exactly 4 hex digits
    #[error("invalid unicode escape at offset {offset}")]
    InvalidUnicodeEscape {
        /// Byte offset of the failure
        offset: usize,
    },

    /// `\u` surrogate without its matching pair half
    #[error("unpaired surrogate escape at offset {offset}")]
    UnpairedSurrogate {
        /// Byte offset of the failure
        offset: usize,
    },

    /// Number literal that cannot be converted (including i64 overflow)
    #[error("invalid number {literal:?} at offset {offset}")]
    InvalidNumber {
        /// The offending literal text
        literal: String,
        /// Byte offset of the failure
        offset: usize,
    },

    /// String content is not valid UTF-8
    #[error("invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 {
        /// Byte offset of the string's opening quote
        offset: usize,
    },
}

impl SyntaxError {
    /// Byte offset of the failure, if the variant carries one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            SyntaxError::EmptyInput => None,
            SyntaxError::UnexpectedEof { offset }
            | SyntaxError::UnexpectedToken { offset }
            | SyntaxError::InvalidLiteral { offset }
            | SyntaxError::ExpectedKey { offset }
            | SyntaxError::ExpectedColon { offset }
            | SyntaxError::ExpectedCommaOrBrace { offset }
            | SyntaxError::ExpectedCommaOrBracket { offset }
            | SyntaxError::UnclosedObject { offset }
            | SyntaxError::UnclosedArray { offset }
            | SyntaxError::UnclosedString { offset }
            | SyntaxError::IncompleteEscape { offset }
            | SyntaxError::InvalidEscape { offset }
            | SyntaxError::InvalidUnicodeEscape { offset }
            | SyntaxError::UnpairedSurrogate { offset }
            | SyntaxError::InvalidNumber { offset, .. }
            | SyntaxError::InvalidUtf8 { offset } => Some(*offset),
        }
    }
}

/// Decode one JSON value from `input`.
///
/// Leading whitespace is skipped; trailing bytes after the first complete
/// value are ignored. Empty (or whitespace-only) input is
/// [`SyntaxError::EmptyInput`], not null.
pub fn decode(input: &[u8]) -> Result<Value, SyntaxError> {
    let mut parser = Parser::new(input);
    parser.skip_whitespace();
    if parser.peek().is_none() {
        return Err(SyntaxError::EmptyInput);
    }
    parser.parse_value()
}

struct Parser<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(data: &'a [u8]) -> Self {
        Parser { data, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\r' | b'\n') = self.peek() {
            self.pos += 1;
        }
    }

    fn parse_value(&mut self) -> Result<Value, SyntaxError> {
        self.skip_whitespace();
        let Some(byte) = self.peek() else {
            return Err(SyntaxError::UnexpectedEof { offset: self.pos });
        };
        match byte {
            b'{' => self.parse_object(),
            b'[' => self.parse_array(),
            b'"' => self.parse_string().map(Value::String),
            b't' => self.parse_literal(b"true", Value::Bool(true)),
            b'f' => self.parse_literal(b"false", Value::Bool(false)),
            b'n' => self.parse_literal(b"null", Value::Null),
            b'-' | b'0'..=b'9' => self.parse_number(),
            _ => Err(SyntaxError::UnexpectedToken { offset: self.pos }),
        }
    }

    /// Exact lookahead of the literal's length; no partial matches.
    fn parse_literal(&mut self, literal: &'static [u8], value: Value) -> Result<Value, SyntaxError> {
        let end = self.pos + literal.len();
        if self.data.get(self.pos..end) == Some(literal) {
            self.pos = end;
            Ok(value)
        } else {
            Err(SyntaxError::InvalidLiteral { offset: self.pos })
        }
    }

    fn parse_object(&mut self) -> Result<Value, SyntaxError> {
        self.pos += 1; // consume '{'
        let mut object = BTreeMap::new();
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            return Ok(Value::Object(object));
        }
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b'"') => {}
                Some(_) => return Err(SyntaxError::ExpectedKey { offset: self.pos }),
                None => return Err(SyntaxError::UnclosedObject { offset: self.pos }),
            }
            let key = self.parse_string()?;
            self.skip_whitespace();
            match self.peek() {
                Some(b':') => self.pos += 1,
                Some(_) => return Err(SyntaxError::ExpectedColon { offset: self.pos }),
                None => return Err(SyntaxError::UnclosedObject { offset: self.pos }),
            }
            let value = self.parse_value()?;
            // duplicate key: last writer wins, earlier value dropped
            object.insert(key, value);
            self.skip_whitespace();
            match self.peek() {
                Some(b'}') => {
                    self.pos += 1;
                    return Ok(Value::Object(object));
                }
                Some(b',') => self.pos += 1,
                Some(_) => return Err(SyntaxError::ExpectedCommaOrBrace { offset: self.pos }),
                None => return Err(SyntaxError::UnclosedObject { offset: self.pos }),
            }
        }
    }

    fn parse_array(&mut self) -> Result<Value, SyntaxError> {
        self.pos += 1; // consume '['
        let mut array = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.pos += 1;
            return Ok(Value::Array(array));
        }
        loop {
            array.push(self.parse_value()?);
            self.skip_whitespace();
            match self.peek() {
                Some(b']') => {
                    self.pos += 1;
                    return Ok(Value::Array(array));
                }
                Some(b',') => self.pos += 1,
                Some(_) => return Err(SyntaxError::ExpectedCommaOrBracket { offset: self.pos }),
                None => return Err(SyntaxError::UnclosedArray { offset: self.pos }),
            }
        }
    }

    /// Parse a quoted string. Raw bytes are copied through and validated
    /// as UTF-8 once at the closing quote.
    fn parse_string(&mut self) -> Result<String, SyntaxError> {
        let start = self.pos;
        self.pos += 1; // consume opening quote
        let mut buf: Vec<u8> = Vec::new();
        loop {
            let Some(byte) = self.peek() else {
                return Err(SyntaxError::UnclosedString { offset: self.pos });
            };
            match byte {
                b'"' => {
                    self.pos += 1;
                    break;
                }
                b'\\' => {
                    self.pos += 1;
                    self.parse_escape(&mut buf)?;
                }
                _ => {
                    buf.push(byte);
                    self.pos += 1;
                }
            }
        }
        String::from_utf8(buf).map_err(|_| SyntaxError::InvalidUtf8 { offset: start })
    }

    fn parse_escape(&mut self, buf: &mut Vec<u8>) -> Result<(), SyntaxError> {
        let Some(byte) = self.peek() else {
            return Err(SyntaxError::IncompleteEscape { offset: self.pos });
        };
        match byte {
            b'"' | b'\\' | b'/' => {
                buf.push(byte);
                self.pos += 1;
            }
            b'b' => {
                buf.push(0x08);
                self.pos += 1;
            }
            b'f' => {
                buf.push(0x0c);
                self.pos += 1;
            }
            b'n' => {
                buf.push(b'\n');
                self.pos += 1;
            }
            b'r' => {
                buf.push(b'\r');
                self.pos += 1;
            }
            b't' => {
                buf.push(b'\t');
                self.pos += 1;
            }
            b'u' => {
                self.pos += 1;
                self.parse_unicode_escape(buf)?;
            }
            _ => return Err(SyntaxError::InvalidEscape { offset: self.pos }),
        }
        Ok(())
    }

    /// Decode `\uXXXX`, recombining a valid high/low surrogate pair into
    /// one code point. A lone or mis-ordered surrogate is rejected: Rust
    /// strings cannot represent it.
    fn parse_unicode_escape(&mut self, buf: &mut Vec<u8>) -> Result<(), SyntaxError> {
        let offset = self.pos - 2; // the backslash
        let code = self.read_hex4()?;
        let scalar = match code {
            0xD800..=0xDBFF => {
                if self.data.get(self.pos..self.pos + 2) != Some(b"\\u".as_slice()) {
                    return Err(SyntaxError::UnpairedSurrogate { offset });
                }
                self.pos += 2;
                let low = self.read_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(SyntaxError::UnpairedSurrogate { offset });
                }
                0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00)
            }
            0xDC00..=0xDFFF => return Err(SyntaxError::UnpairedSurrogate { offset }),
            code => code,
        };
        let ch = char::from_u32(scalar)
            .ok_or(SyntaxError::InvalidUnicodeEscape { offset })?;
        let mut utf8 = [0u8; 4];
        buf.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
        Ok(())
    }

    /// Exactly 4 hex digits, no sign or prefix.
    fn read_hex4(&mut self) -> Result<u32, SyntaxError> {
        let offset = self.pos;
        let Some(digits) = self.data.get(self.pos..self.pos + 4) else {
            return Err(SyntaxError::IncompleteEscape { offset });
        };
        if !digits.iter().all(|b| b.is_ascii_hexdigit()) {
            return Err(SyntaxError::InvalidUnicodeEscape { offset });
        }
        // all ASCII hex digits, so the str conversion cannot fail
        let text = std::str::from_utf8(digits)
            .map_err(|_| SyntaxError::InvalidUnicodeEscape { offset })?;
        let code = u32::from_str_radix(text, 16)
            .map_err(|_| SyntaxError::InvalidUnicodeEscape { offset })?;
        self.pos += 4;
        Ok(code)
    }

    /// Scan the maximal run of number bytes, then classify: a `.`, `e`
    /// or `E` makes it a Float, otherwise it must fit an i64.
    fn parse_number(&mut self) -> Result<Value, SyntaxError> {
        let start = self.pos;
        while let Some(b'0'..=b'9' | b'e' | b'E' | b'+' | b'-' | b'.') = self.peek() {
            self.pos += 1;
        }
        // the scan admits only ASCII bytes
        let literal = std::str::from_utf8(&self.data[start..self.pos]).map_err(|_| {
            SyntaxError::InvalidNumber {
                literal: String::new(),
                offset: start,
            }
        })?;
        let invalid = || SyntaxError::InvalidNumber {
            literal: literal.to_string(),
            offset: start,
        };
        if literal.contains(['.', 'e', 'E']) {
            literal.parse::<f64>().map(Value::Float).map_err(|_| invalid())
        } else {
            literal.parse::<i64>().map(Value::Int).map_err(|_| invalid())
        }
    }
}
