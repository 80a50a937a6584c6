//! tagwire — tagged human-readable text serialization.
//!
//! A compact textual format for structured values: records, lists,
//! primitives, and nullable slots. Every primitive carries a one-letter
//! tag (`S"..."`, `N42`, `F2.5`, `B1`), records are `{name value ...}`
//! bodies, lists are `L<count>[...]` bodies, and an absent slot is the
//! literal `nil`.
//!
//! Encoding walks a [`TagValue`]; decoding walks a target [`Descriptor`]
//! and uses [`tokenize`] to split compound bodies into sibling tokens.
//! The [`TagShape`] trait plus [`marshal`] / [`unmarshal`] give concrete
//! types a typed façade over the generic algorithm.

mod decoder;
mod descriptor;
mod encoder;
mod shape;
mod value;

pub mod json;
pub mod tokenizer;

pub use decoder::{DecodeError, TagTextDecoder};
pub use descriptor::{Descriptor, Field};
pub use encoder::TagTextEncoder;
pub use shape::{marshal, unmarshal, TagShape};
pub use tokenizer::tokenize;
pub use value::TagValue;
