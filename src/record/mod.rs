//! Record values and the schema-driven encoder/decoder.
//!
//! A [`Value`] is a concrete, typed value conforming to a [`Schema`]. The
//! encoder and decoder walk the schema generically; there is no per-type
//! generated code. A value does not own its schema, and schemas outlive the
//! values built from them.
//!
//! [`Schema`]: crate::schema::Schema

mod decode;
mod encode;

pub use decode::{decode_datum, decode_value};
pub use encode::{encode_datum, encode_value};

use chrono::NaiveDate;

use crate::logical::Money;

/// A decoded or to-be-encoded record value.
///
/// Union values carry the zero-based positional discriminant of the variant
/// they hold; the discriminant is an index into the union schema's declared
/// variant order and is never derived from the value's content.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null value, no bytes on the wire.
    Null,
    /// Boolean value.
    Boolean(bool),
    /// 32-bit signed integer.
    Int(i32),
    /// 64-bit signed integer.
    Long(i64),
    /// Byte array.
    Bytes(Vec<u8>),
    /// UTF-8 string.
    String(String),
    /// Record with named fields in schema order.
    Record(Vec<(String, Value)>),
    /// Union variant: positional discriminant and the held value.
    Union(u32, Box<Value>),
    /// Date logical value.
    Date(NaiveDate),
    /// Fixed-scale decimal logical value.
    Decimal(Money),
}

impl Value {
    /// Wrap a value in a union at the given variant index.
    pub fn union(index: u32, value: Value) -> Self {
        Value::Union(index, Box::new(value))
    }

    /// Build a record value from name/value pairs.
    pub fn record(fields: Vec<(impl Into<String>, Value)>) -> Self {
        Value::Record(
            fields
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }

    /// Look up a record field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Record(fields) => fields
                .iter()
                .find(|(field_name, _)| field_name == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// A short name for the value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Bytes(_) => "bytes",
            Value::String(_) => "string",
            Value::Record(_) => "record",
            Value::Union(..) => "union",
            Value::Date(_) => "date",
            Value::Decimal(_) => "decimal",
        }
    }
}
