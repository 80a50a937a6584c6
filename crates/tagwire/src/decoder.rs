//! `TagTextDecoder` — descriptor-driven tagwire text decoder.
//!
//! Decoding walks the target [`Descriptor`] recursively, calling the
//! tokenizer whenever a compound body (record interior, list interior) must
//! be split into sibling tokens. Every recursive step consumes a strictly
//! smaller substring than its caller, so descent always terminates.

use std::collections::HashMap;

use crate::descriptor::Field;
use crate::tokenizer::tokenize;
use crate::{Descriptor, TagValue};

/// Decode error for tagwire text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("empty input")]
    EmptyInput,
    #[error("input is not valid UTF-8")]
    InvalidUtf8,
    #[error("cannot assign nil to non-nullable {0} target")]
    NilIntoNonNullable(&'static str),
    #[error("missing `L` list prefix")]
    MissingListPrefix,
    #[error("list header is missing its `[`")]
    UnterminatedListHeader,
    #[error("invalid list length `{0}`")]
    InvalidListLength(String),
    #[error("list length mismatch: declared {declared}, found {found}")]
    LengthMismatch { declared: usize, found: usize },
    #[error("odd token count in record body")]
    OddFieldTokens,
    #[error("invalid integer literal `{0}`")]
    InvalidInteger(String),
    #[error("invalid real literal `{0}`")]
    InvalidReal(String),
    #[error("invalid boolean literal `{0}`")]
    InvalidBoolean(String),
    #[error("unsupported target kind `{0}`")]
    UnsupportedTarget(&'static str),
    #[error("decoded value does not match target shape, expected {0}")]
    ShapeMismatch(&'static str),
}

/// Stateless tagwire decoder.
#[derive(Default)]
pub struct TagTextDecoder;

impl TagTextDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decodes `input` against the target `shape`.
    pub fn decode(&self, input: &[u8], shape: &Descriptor) -> Result<TagValue, DecodeError> {
        let text = std::str::from_utf8(input).map_err(|_| DecodeError::InvalidUtf8)?;
        self.read_value(text, shape)
    }

    /// Decodes one value text. Dispatch precedence: `nil`, nullable target,
    /// list target, record body, primitive.
    pub fn read_value(&self, text: &str, shape: &Descriptor) -> Result<TagValue, DecodeError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DecodeError::EmptyInput);
        }

        if text == "nil" {
            return match shape {
                Descriptor::Nullable(_) => Ok(TagValue::Nullable(None)),
                other => Err(DecodeError::NilIntoNonNullable(other.kind_name())),
            };
        }

        if let Descriptor::Nullable(inner) = shape {
            let value = self.read_value(text, inner)?;
            return Ok(TagValue::present(value));
        }

        if let Descriptor::List(element) = shape {
            return self.read_list(text, element);
        }

        if text.starts_with('{') {
            if let Descriptor::Record(fields) = shape {
                return self.read_record(text, fields);
            }
        }

        self.read_primitive(text, shape)
    }

    /// Reads `L<count>[...]` against the element shape.
    fn read_list(&self, text: &str, element: &Descriptor) -> Result<TagValue, DecodeError> {
        let rest = text
            .strip_prefix('L')
            .ok_or(DecodeError::MissingListPrefix)?;
        let (header, body) = rest
            .split_once('[')
            .ok_or(DecodeError::UnterminatedListHeader)?;
        let header = header.trim();
        let declared: usize = header
            .parse()
            .map_err(|_| DecodeError::InvalidListLength(header.to_string()))?;

        // Tolerate a missing closing bracket; the length check below still
        // guards the element count.
        let body = body.strip_suffix(']').unwrap_or(body);
        let tokens = tokenize(body);
        if tokens.len() != declared {
            return Err(DecodeError::LengthMismatch {
                declared,
                found: tokens.len(),
            });
        }

        let mut items = Vec::with_capacity(declared);
        for token in &tokens {
            items.push(self.read_value(token, element)?);
        }
        Ok(TagValue::List(items))
    }

    /// Reads a `{...}` record body against the declared fields.
    ///
    /// Serialized fields may appear in any order; fields absent from the
    /// body take their zero value; serialized names not declared on the
    /// target are ignored.
    fn read_record(&self, text: &str, fields: &[Field]) -> Result<TagValue, DecodeError> {
        let interior = &text[1..];
        let interior = interior.strip_suffix('}').unwrap_or(interior).trim();
        let tokens = tokenize(interior);
        if tokens.len() % 2 != 0 {
            return Err(DecodeError::OddFieldTokens);
        }

        // Name -> still-serialized value text. Last write wins on duplicates.
        let mut field_map: HashMap<&str, &str> = HashMap::with_capacity(tokens.len() / 2);
        for pair in tokens.chunks_exact(2) {
            field_map.insert(pair[0].as_str(), pair[1].as_str());
        }

        let mut out = Vec::with_capacity(fields.len());
        for field in fields {
            let value = match field_map.get(field.name.as_str()) {
                Some(token) => self.read_value(token, &field.shape)?,
                None => field.shape.zero_value(),
            };
            out.push((field.name.clone(), value));
        }
        Ok(TagValue::Record(out))
    }

    /// Reads a tagged primitive literal against the target kind.
    fn read_primitive(&self, text: &str, shape: &Descriptor) -> Result<TagValue, DecodeError> {
        match shape {
            Descriptor::Text => Ok(TagValue::Str(read_text_literal(text))),
            Descriptor::Integer => {
                let digits = text
                    .strip_prefix('N')
                    .ok_or_else(|| DecodeError::InvalidInteger(text.to_string()))?;
                let n: i64 = digits
                    .parse()
                    .map_err(|_| DecodeError::InvalidInteger(text.to_string()))?;
                Ok(TagValue::Integer(n))
            }
            Descriptor::Real => {
                let digits = text
                    .strip_prefix('F')
                    .ok_or_else(|| DecodeError::InvalidReal(text.to_string()))?;
                let f: f64 = digits
                    .parse()
                    .map_err(|_| DecodeError::InvalidReal(text.to_string()))?;
                Ok(TagValue::Real(f))
            }
            Descriptor::Boolean => match text {
                "B1" => Ok(TagValue::Bool(true)),
                "B0" => Ok(TagValue::Bool(false)),
                other => Err(DecodeError::InvalidBoolean(other.to_string())),
            },
            other => Err(DecodeError::UnsupportedTarget(other.kind_name())),
        }
    }
}

/// Strips the `S"..."` tag from a text literal. An untagged token decodes
/// verbatim; raw text is the one lenient fallback the format keeps.
fn read_text_literal(text: &str) -> String {
    match text.strip_prefix("S\"") {
        Some(rest) => rest.strip_suffix('"').unwrap_or(rest).to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(text: &str, shape: &Descriptor) -> Result<TagValue, DecodeError> {
        TagTextDecoder::new().decode(text.as_bytes(), shape)
    }

    fn point_shape() -> Descriptor {
        Descriptor::record([
            ("X", Descriptor::Integer),
            ("Y", Descriptor::Real),
            ("Z", Descriptor::Integer),
        ])
    }

    #[test]
    fn decodes_primitives() {
        assert_eq!(
            decode("N-3", &Descriptor::Integer),
            Ok(TagValue::Integer(-3))
        );
        assert_eq!(decode("F2.5", &Descriptor::Real), Ok(TagValue::Real(2.5)));
        assert_eq!(decode("B1", &Descriptor::Boolean), Ok(TagValue::Bool(true)));
        assert_eq!(
            decode("B0", &Descriptor::Boolean),
            Ok(TagValue::Bool(false))
        );
        assert_eq!(
            decode("S\"hi\"", &Descriptor::Text),
            Ok(TagValue::Str("hi".into()))
        );
    }

    #[test]
    fn untagged_text_decodes_verbatim() {
        assert_eq!(
            decode("plain", &Descriptor::Text),
            Ok(TagValue::Str("plain".into()))
        );
    }

    #[test]
    fn malformed_primitives_are_errors() {
        assert_eq!(
            decode("3", &Descriptor::Integer),
            Err(DecodeError::InvalidInteger("3".into()))
        );
        assert_eq!(
            decode("Nx", &Descriptor::Integer),
            Err(DecodeError::InvalidInteger("Nx".into()))
        );
        assert_eq!(
            decode("2.5", &Descriptor::Real),
            Err(DecodeError::InvalidReal("2.5".into()))
        );
        assert_eq!(
            decode("B2", &Descriptor::Boolean),
            Err(DecodeError::InvalidBoolean("B2".into()))
        );
        assert_eq!(
            decode("true", &Descriptor::Boolean),
            Err(DecodeError::InvalidBoolean("true".into()))
        );
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(decode("", &Descriptor::Integer), Err(DecodeError::EmptyInput));
        assert_eq!(
            decode("   ", &Descriptor::Integer),
            Err(DecodeError::EmptyInput)
        );
    }

    #[test]
    fn nil_requires_a_nullable_target() {
        assert_eq!(
            decode("nil", &Descriptor::nullable(Descriptor::Integer)),
            Ok(TagValue::Nullable(None))
        );
        assert_eq!(
            decode("nil", &Descriptor::Integer),
            Err(DecodeError::NilIntoNonNullable("integer"))
        );
    }

    #[test]
    fn present_nullable_unwraps_one_level() {
        assert_eq!(
            decode("N7", &Descriptor::nullable(Descriptor::Integer)),
            Ok(TagValue::present(TagValue::Integer(7)))
        );
    }

    #[test]
    fn record_fields_decode_in_declared_order() {
        assert_eq!(
            decode("{X N-3 Y F2.5 Z N0 }", &point_shape()),
            Ok(TagValue::record([
                ("X", TagValue::Integer(-3)),
                ("Y", TagValue::Real(2.5)),
                ("Z", TagValue::Integer(0)),
            ]))
        );
    }

    #[test]
    fn record_decode_tolerates_field_reordering() {
        assert_eq!(
            decode("{Z N0 X N-3 Y F2.5 }", &point_shape()),
            decode("{X N-3 Y F2.5 Z N0 }", &point_shape()),
        );
    }

    #[test]
    fn missing_fields_take_zero_values() {
        assert_eq!(
            decode("{Y F2.5 }", &point_shape()),
            Ok(TagValue::record([
                ("X", TagValue::Integer(0)),
                ("Y", TagValue::Real(2.5)),
                ("Z", TagValue::Integer(0)),
            ]))
        );
    }

    #[test]
    fn unknown_serialized_fields_are_ignored() {
        assert_eq!(
            decode("{X N1 W B1 }", &point_shape()),
            Ok(TagValue::record([
                ("X", TagValue::Integer(1)),
                ("Y", TagValue::Real(0.0)),
                ("Z", TagValue::Integer(0)),
            ]))
        );
    }

    #[test]
    fn duplicate_field_last_write_wins() {
        assert_eq!(
            decode("{X N1 X N2 }", &point_shape()),
            Ok(TagValue::record([
                ("X", TagValue::Integer(2)),
                ("Y", TagValue::Real(0.0)),
                ("Z", TagValue::Integer(0)),
            ]))
        );
    }

    #[test]
    fn odd_field_token_count_is_an_error() {
        assert_eq!(
            decode("{X N1 Y }", &point_shape()),
            Err(DecodeError::OddFieldTokens)
        );
    }

    #[test]
    fn list_length_mismatch_is_detected() {
        let shape = Descriptor::list(Descriptor::Text);
        assert_eq!(
            decode("L3[S\"a\" S\"b\"]", &shape),
            Err(DecodeError::LengthMismatch {
                declared: 3,
                found: 2
            })
        );
    }

    #[test]
    fn list_header_errors() {
        let shape = Descriptor::list(Descriptor::Integer);
        assert_eq!(
            decode("[N1]", &shape),
            Err(DecodeError::MissingListPrefix)
        );
        assert_eq!(
            decode("L2 N1 N2", &shape),
            Err(DecodeError::UnterminatedListHeader)
        );
        assert_eq!(
            decode("Lx[N1]", &shape),
            Err(DecodeError::InvalidListLength("x".into()))
        );
    }

    #[test]
    fn nested_list_of_records() {
        let shape = Descriptor::list(point_shape());
        assert_eq!(
            decode("L2[{X N1 Y F0 Z N0 } {X N2 Y F0 Z N0 }]", &shape),
            Ok(TagValue::List(vec![
                TagValue::record([
                    ("X", TagValue::Integer(1)),
                    ("Y", TagValue::Real(0.0)),
                    ("Z", TagValue::Integer(0)),
                ]),
                TagValue::record([
                    ("X", TagValue::Integer(2)),
                    ("Y", TagValue::Real(0.0)),
                    ("Z", TagValue::Integer(0)),
                ]),
            ]))
        );
    }

    #[test]
    fn primitive_token_into_record_target_is_unsupported() {
        assert_eq!(
            decode("N5", &point_shape()),
            Err(DecodeError::UnsupportedTarget("record"))
        );
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(
            decode("  N5\n", &Descriptor::Integer),
            Ok(TagValue::Integer(5))
        );
    }

    #[test]
    fn non_utf8_input_is_rejected() {
        let decoder = TagTextDecoder::new();
        assert_eq!(
            decoder.decode(&[0xff, 0xfe], &Descriptor::Integer),
            Err(DecodeError::InvalidUtf8)
        );
    }
}
