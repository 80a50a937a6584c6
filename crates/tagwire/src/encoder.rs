//! `TagTextEncoder` — tagwire text encoder.
//!
//! Wire format:
//! - Record:  `{` then `name SP value SP` per field, then `}`
//! - Text:    `S"raw text"` (no escaping, see below)
//! - Integer: `N<decimal>`      e.g. `N-3`
//! - Real:    `F<decimal>`      e.g. `F2.5`
//! - Boolean: `B1` (true) or `B0` (false)
//! - List:    `L<count>[` values separated by SP `]`
//! - Absent:  `nil`
//!
//! Known format limitation: text is written verbatim between the quote
//! marks. A value containing `"` does not round-trip; the grammar defines
//! no escape sequence for it.

use crate::TagValue;

/// Encodes [`TagValue`]s into tagwire text.
pub struct TagTextEncoder {
    out: Vec<u8>,
}

impl Default for TagTextEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TagTextEncoder {
    pub fn new() -> Self {
        Self { out: Vec::new() }
    }

    /// Encodes one value to its complete wire text.
    ///
    /// Infallible: every [`TagValue`] variant has a wire form.
    pub fn encode(&mut self, value: &TagValue) -> Vec<u8> {
        self.out.clear();
        self.write_any(value);
        std::mem::take(&mut self.out)
    }

    pub fn write_any(&mut self, value: &TagValue) {
        match value {
            TagValue::Record(fields) => self.write_record(fields),
            TagValue::Str(s) => self.write_text(s),
            TagValue::Integer(i) => self.write_integer(*i),
            TagValue::Real(f) => self.write_real(*f),
            TagValue::Bool(b) => self.write_boolean(*b),
            TagValue::List(items) => self.write_list(items),
            TagValue::Nullable(slot) => self.write_nullable(slot.as_deref()),
        }
    }

    pub fn write_record(&mut self, fields: &[(String, TagValue)]) {
        self.out.push(b'{');
        for (name, value) in fields {
            self.out.extend_from_slice(name.as_bytes());
            self.out.push(b' ');
            self.write_any(value);
            self.out.push(b' ');
        }
        self.out.push(b'}');
    }

    pub fn write_text(&mut self, s: &str) {
        self.out.extend_from_slice(b"S\"");
        self.out.extend_from_slice(s.as_bytes());
        self.out.push(b'"');
    }

    pub fn write_integer(&mut self, int: i64) {
        self.out.push(b'N');
        self.out.extend_from_slice(int.to_string().as_bytes());
    }

    pub fn write_real(&mut self, float: f64) {
        self.out.push(b'F');
        self.out.extend_from_slice(float.to_string().as_bytes());
    }

    pub fn write_boolean(&mut self, b: bool) {
        self.out
            .extend_from_slice(if b { b"B1" } else { b"B0" });
    }

    pub fn write_list(&mut self, items: &[TagValue]) {
        self.out.push(b'L');
        self.out.extend_from_slice(items.len().to_string().as_bytes());
        self.out.push(b'[');
        let last = items.len().saturating_sub(1);
        for (i, item) in items.iter().enumerate() {
            self.write_any(item);
            if i < last {
                self.out.push(b' ');
            }
        }
        self.out.push(b']');
    }

    pub fn write_nullable(&mut self, slot: Option<&TagValue>) {
        match slot {
            Some(inner) => self.write_any(inner),
            None => self.out.extend_from_slice(b"nil"),
        }
    }
}
