//! [`TagShape`] — per-type descriptors and value conversions, plus the
//! `marshal` / `unmarshal` façade.
//!
//! Rust has no runtime reflection, so each serializable type declares its
//! own shape once: a [`Descriptor`] and the two conversions to and from
//! [`TagValue`]. The generic recursive encode/decode algorithm then works
//! for any implementor.

use crate::{DecodeError, Descriptor, TagTextDecoder, TagTextEncoder, TagValue};

/// A type with a declared tagwire shape.
pub trait TagShape: Sized {
    /// The static descriptor for this type. Must be deterministic: field
    /// order here is the wire order.
    fn descriptor() -> Descriptor;

    /// Converts `self` into the universal value form.
    fn to_value(&self) -> TagValue;

    /// Rebuilds `Self` from a decoded value.
    ///
    /// The decoder only ever produces values matching [`descriptor`]
    /// (`Self::descriptor`), so a well-written implementation fails only
    /// when the two disagree.
    fn from_value(value: &TagValue) -> Result<Self, DecodeError>;
}

/// Encodes a value to its complete tagwire text.
pub fn marshal<T: TagShape>(value: &T) -> Vec<u8> {
    TagTextEncoder::new().encode(&value.to_value())
}

/// Decodes tagwire text into the caller-supplied target.
///
/// Surrounding whitespace is trimmed before decoding. On error the target
/// is left untouched.
pub fn unmarshal<T: TagShape>(data: &[u8], target: &mut T) -> Result<(), DecodeError> {
    let decoded = TagTextDecoder::new().decode(data, &T::descriptor())?;
    *target = T::from_value(&decoded)?;
    Ok(())
}

impl TagShape for String {
    fn descriptor() -> Descriptor {
        Descriptor::Text
    }

    fn to_value(&self) -> TagValue {
        TagValue::Str(self.clone())
    }

    fn from_value(value: &TagValue) -> Result<Self, DecodeError> {
        match value {
            TagValue::Str(s) => Ok(s.clone()),
            _ => Err(DecodeError::ShapeMismatch("text")),
        }
    }
}

impl TagShape for i64 {
    fn descriptor() -> Descriptor {
        Descriptor::Integer
    }

    fn to_value(&self) -> TagValue {
        TagValue::Integer(*self)
    }

    fn from_value(value: &TagValue) -> Result<Self, DecodeError> {
        match value {
            TagValue::Integer(i) => Ok(*i),
            _ => Err(DecodeError::ShapeMismatch("integer")),
        }
    }
}

impl TagShape for f64 {
    fn descriptor() -> Descriptor {
        Descriptor::Real
    }

    fn to_value(&self) -> TagValue {
        TagValue::Real(*self)
    }

    fn from_value(value: &TagValue) -> Result<Self, DecodeError> {
        match value {
            TagValue::Real(f) => Ok(*f),
            _ => Err(DecodeError::ShapeMismatch("real")),
        }
    }
}

impl TagShape for bool {
    fn descriptor() -> Descriptor {
        Descriptor::Boolean
    }

    fn to_value(&self) -> TagValue {
        TagValue::Bool(*self)
    }

    fn from_value(value: &TagValue) -> Result<Self, DecodeError> {
        match value {
            TagValue::Bool(b) => Ok(*b),
            _ => Err(DecodeError::ShapeMismatch("boolean")),
        }
    }
}

impl<T: TagShape> TagShape for Vec<T> {
    fn descriptor() -> Descriptor {
        Descriptor::list(T::descriptor())
    }

    fn to_value(&self) -> TagValue {
        TagValue::List(self.iter().map(TagShape::to_value).collect())
    }

    fn from_value(value: &TagValue) -> Result<Self, DecodeError> {
        match value {
            TagValue::List(items) => items.iter().map(T::from_value).collect(),
            _ => Err(DecodeError::ShapeMismatch("list")),
        }
    }
}

impl<T: TagShape> TagShape for Option<T> {
    fn descriptor() -> Descriptor {
        Descriptor::nullable(T::descriptor())
    }

    fn to_value(&self) -> TagValue {
        TagValue::Nullable(self.as_ref().map(|v| Box::new(v.to_value())))
    }

    fn from_value(value: &TagValue) -> Result<Self, DecodeError> {
        match value {
            TagValue::Nullable(None) => Ok(None),
            TagValue::Nullable(Some(inner)) => Ok(Some(T::from_value(inner)?)),
            _ => Err(DecodeError::ShapeMismatch("nullable")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_facade_roundtrip() {
        let bytes = marshal(&42i64);
        assert_eq!(bytes, b"N42");
        let mut back = 0i64;
        unmarshal(&bytes, &mut back).unwrap();
        assert_eq!(back, 42);
    }

    #[test]
    fn list_facade_roundtrip() {
        let words = vec!["hi".to_string(), "there".to_string()];
        let bytes = marshal(&words);
        assert_eq!(bytes, b"L2[S\"hi\" S\"there\"]");
        let mut back: Vec<String> = Vec::new();
        unmarshal(&bytes, &mut back).unwrap();
        assert_eq!(back, words);
    }

    #[test]
    fn absent_top_level_reference_is_nil() {
        let none: Option<i64> = None;
        assert_eq!(marshal(&none), b"nil");
        let mut back = Some(9i64);
        unmarshal(b"nil", &mut back).unwrap();
        assert_eq!(back, None);
    }

    #[test]
    fn failed_unmarshal_leaves_target_untouched() {
        let mut target = 5i64;
        assert!(unmarshal(b"garbage", &mut target).is_err());
        assert_eq!(target, 5);
    }
}
