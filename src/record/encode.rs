//! Schema-driven record encoder.
//!
//! Fields are emitted in schema-declared order with no field markers or
//! delimiters; the declared order is the wire contract. A union field emits
//! its positional discriminant as a zig-zag int, then the chosen variant's
//! bytes. Nested records recurse.

use crate::codec::{encode_boolean, encode_bytes, encode_int, encode_long, encode_string};
use crate::error::EncodeError;
use crate::logical::{DateCodec, LogicalCodec as _, MoneyCodec};
use crate::record::Value;
use crate::schema::Schema;

/// Encode a single value as a datum (no header, schema supplied out of
/// band).
///
/// # Errors
/// `EncodeError::TypeMismatch` if the value's shape disagrees with the
/// schema; logical-type errors propagate from the respective codec.
pub fn encode_datum(value: &Value, schema: &Schema) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::new();
    encode_value(value, schema, &mut buf)?;
    Ok(buf)
}

/// Encode a value against its schema, appending to `buf`.
///
/// # Errors
/// `EncodeError::TypeMismatch` if the value's shape disagrees with the
/// schema.
pub fn encode_value(value: &Value, schema: &Schema, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
    match (value, schema) {
        (Value::Null, Schema::Null) => Ok(()),
        (Value::Boolean(v), Schema::Boolean) => {
            encode_boolean(*v, buf);
            Ok(())
        }
        (Value::Int(v), Schema::Int) => {
            encode_int(*v, buf);
            Ok(())
        }
        (Value::Long(v), Schema::Long) => {
            encode_long(*v, buf);
            Ok(())
        }
        (Value::Bytes(v), Schema::Bytes) => {
            encode_bytes(v, buf);
            Ok(())
        }
        (Value::String(v), Schema::String) => {
            encode_string(v, buf);
            Ok(())
        }

        (Value::Date(date), Schema::Date) => DateCodec.encode(date, buf),
        (Value::Decimal(money), Schema::Decimal(decimal)) => {
            MoneyCodec { scale: decimal.scale }.encode(money, buf)
        }

        (Value::Record(fields), Schema::Record(record)) => {
            if fields.len() != record.fields.len() {
                return Err(EncodeError::TypeMismatch(format!(
                    "Record '{}' has {} fields, value has {}",
                    record.name,
                    record.fields.len(),
                    fields.len()
                )));
            }
            for (field_schema, (field_name, field_value)) in record.fields.iter().zip(fields) {
                if field_name != &field_schema.name {
                    return Err(EncodeError::TypeMismatch(format!(
                        "Record '{}' expects field '{}' here, value has '{}'",
                        record.name, field_schema.name, field_name
                    )));
                }
                encode_value(field_value, &field_schema.schema, buf)?;
            }
            Ok(())
        }

        (Value::Union(index, inner), Schema::Union(variants)) => {
            let variant = variants.get(*index as usize).ok_or_else(|| {
                EncodeError::TypeMismatch(format!(
                    "Union discriminant {} out of range (0..{})",
                    index,
                    variants.len()
                ))
            })?;
            encode_int(*index as i32, buf);
            encode_value(inner, variant, buf)
        }

        (value, schema) => Err(EncodeError::TypeMismatch(format!(
            "Cannot encode {} value as {} schema",
            value.type_name(),
            schema.type_name()
        ))),
    }
}
