//! [`TagValue`] — the universal in-memory value for the tagwire format.

/// In-memory value spanning every kind the wire format can carry.
///
/// One variant per [`Descriptor`](crate::Descriptor) kind. `Nullable` keeps
/// the presence bit explicit so a round trip preserves absent slots exactly.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    /// Record: ordered `(field name, value)` pairs.
    Record(Vec<(String, TagValue)>),
    /// Text.
    Str(String),
    /// Signed integer.
    Integer(i64),
    /// Floating point.
    Real(f64),
    /// Boolean.
    Bool(bool),
    /// Homogeneous list.
    List(Vec<TagValue>),
    /// Present or absent slot.
    Nullable(Option<Box<TagValue>>),
}

impl TagValue {
    /// Convenience constructor for a record value.
    pub fn record<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, TagValue)>,
    {
        TagValue::Record(
            fields
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        )
    }

    /// A present nullable slot.
    pub fn present(value: TagValue) -> Self {
        TagValue::Nullable(Some(Box::new(value)))
    }

    /// An absent nullable slot.
    pub fn absent() -> Self {
        TagValue::Nullable(None)
    }
}

impl From<String> for TagValue {
    fn from(s: String) -> Self {
        TagValue::Str(s)
    }
}

impl From<&str> for TagValue {
    fn from(s: &str) -> Self {
        TagValue::Str(s.to_string())
    }
}

impl From<i64> for TagValue {
    fn from(i: i64) -> Self {
        TagValue::Integer(i)
    }
}

impl From<f64> for TagValue {
    fn from(f: f64) -> Self {
        TagValue::Real(f)
    }
}

impl From<bool> for TagValue {
    fn from(b: bool) -> Self {
        TagValue::Bool(b)
    }
}
