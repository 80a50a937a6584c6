//! Bridge between [`TagValue`] and `serde_json::Value`.
//!
//! The JSON side is untagged, so the tagwire → JSON direction is lossy on
//! nullable nesting (an absent slot flattens to `null`) and the JSON →
//! tagwire direction needs a [`Descriptor`] to pick the target kinds, the
//! same way the decoder does.

use crate::{DecodeError, Descriptor, TagValue};

/// Converts a tagwire value to plain JSON.
pub fn value_to_json(value: &TagValue) -> serde_json::Value {
    match value {
        TagValue::Record(fields) => serde_json::Value::Object(
            fields
                .iter()
                .map(|(name, v)| (name.clone(), value_to_json(v)))
                .collect(),
        ),
        TagValue::Str(s) => serde_json::Value::String(s.clone()),
        TagValue::Integer(i) => serde_json::Value::Number((*i).into()),
        TagValue::Real(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        TagValue::Bool(b) => serde_json::Value::Bool(*b),
        TagValue::List(items) => {
            serde_json::Value::Array(items.iter().map(value_to_json).collect())
        }
        TagValue::Nullable(None) => serde_json::Value::Null,
        TagValue::Nullable(Some(inner)) => value_to_json(inner),
    }
}

/// Converts plain JSON into a tagwire value of the given shape.
///
/// Record conversion mirrors the decoder: object keys may appear in any
/// order, missing declared fields take their zero value, unknown keys are
/// ignored.
pub fn json_to_value(
    json: &serde_json::Value,
    shape: &Descriptor,
) -> Result<TagValue, DecodeError> {
    if json.is_null() {
        return match shape {
            Descriptor::Nullable(_) => Ok(TagValue::Nullable(None)),
            other => Err(DecodeError::NilIntoNonNullable(other.kind_name())),
        };
    }

    match shape {
        Descriptor::Nullable(inner) => {
            Ok(TagValue::present(json_to_value(json, inner)?))
        }
        Descriptor::Record(fields) => {
            let obj = json
                .as_object()
                .ok_or(DecodeError::ShapeMismatch("record"))?;
            let mut out = Vec::with_capacity(fields.len());
            for field in fields {
                let value = match obj.get(&field.name) {
                    Some(v) => json_to_value(v, &field.shape)?,
                    None => field.shape.zero_value(),
                };
                out.push((field.name.clone(), value));
            }
            Ok(TagValue::Record(out))
        }
        Descriptor::List(element) => {
            let arr = json.as_array().ok_or(DecodeError::ShapeMismatch("list"))?;
            let items = arr
                .iter()
                .map(|v| json_to_value(v, element))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(TagValue::List(items))
        }
        Descriptor::Text => json
            .as_str()
            .map(|s| TagValue::Str(s.to_string()))
            .ok_or(DecodeError::ShapeMismatch("text")),
        Descriptor::Integer => json
            .as_i64()
            .map(TagValue::Integer)
            .ok_or(DecodeError::ShapeMismatch("integer")),
        Descriptor::Real => json
            .as_f64()
            .map(TagValue::Real)
            .ok_or(DecodeError::ShapeMismatch("real")),
        Descriptor::Boolean => json
            .as_bool()
            .map(TagValue::Bool)
            .ok_or(DecodeError::ShapeMismatch("boolean")),
    }
}
