//! [`Descriptor`] — static description of a value's shape.
//!
//! Decoding is descriptor-driven: the decoder walks a `Descriptor` the way a
//! schema-aware decoder walks a schema, so no runtime reflection is needed.

use crate::TagValue;

/// Shape of a serializable value.
///
/// Exactly one kind per concrete value. Kinds outside this closed set
/// (maps, unions, functions) are not representable.
#[derive(Debug, Clone, PartialEq)]
pub enum Descriptor {
    /// Named, ordered, fixed set of fields.
    Record(Vec<Field>),
    /// UTF-8 text.
    Text,
    /// Signed 64-bit integer.
    Integer,
    /// 64-bit floating point.
    Real,
    /// Boolean.
    Boolean,
    /// Homogeneous ordered sequence.
    List(Box<Descriptor>),
    /// A slot that may be absent.
    Nullable(Box<Descriptor>),
}

/// A field in a record descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub shape: Descriptor,
}

impl Field {
    pub fn new(name: &str, shape: Descriptor) -> Self {
        Self {
            name: name.to_string(),
            shape,
        }
    }
}

impl Descriptor {
    /// Builds a record descriptor from `(name, shape)` pairs.
    ///
    /// Field order here is the wire order on encode and the walk order on
    /// decode; it must be stable for a given type.
    pub fn record<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, Descriptor)>,
    {
        Descriptor::Record(
            fields
                .into_iter()
                .map(|(name, shape)| Field::new(name, shape))
                .collect(),
        )
    }

    /// Builds a list descriptor.
    pub fn list(element: Descriptor) -> Self {
        Descriptor::List(Box::new(element))
    }

    /// Builds a nullable descriptor.
    pub fn nullable(inner: Descriptor) -> Self {
        Descriptor::Nullable(Box::new(inner))
    }

    /// Short kind name, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Descriptor::Record(_) => "record",
            Descriptor::Text => "text",
            Descriptor::Integer => "integer",
            Descriptor::Real => "real",
            Descriptor::Boolean => "boolean",
            Descriptor::List(_) => "list",
            Descriptor::Nullable(_) => "nullable",
        }
    }

    /// Default value for this shape.
    ///
    /// Record decoding tolerates missing fields; an omitted field takes
    /// this value.
    pub fn zero_value(&self) -> TagValue {
        match self {
            Descriptor::Record(fields) => TagValue::Record(
                fields
                    .iter()
                    .map(|f| (f.name.clone(), f.shape.zero_value()))
                    .collect(),
            ),
            Descriptor::Text => TagValue::Str(String::new()),
            Descriptor::Integer => TagValue::Integer(0),
            Descriptor::Real => TagValue::Real(0.0),
            Descriptor::Boolean => TagValue::Bool(false),
            Descriptor::List(_) => TagValue::List(Vec::new()),
            Descriptor::Nullable(_) => TagValue::Nullable(None),
        }
    }
}
