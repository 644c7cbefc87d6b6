//! Schema-driven record decoder.
//!
//! Mirrors the encoder: walks the schema tree and consumes bytes from a
//! `&mut &[u8]` cursor. For a union field the positional discriminant is
//! read first and selects the variant schema to decode; an out-of-range
//! discriminant is a schema mismatch between writer and reader and fails
//! immediately, never silently defaulting to a variant.

use crate::codec::{decode_boolean, decode_bytes, decode_int, decode_long, decode_string};
use crate::error::DecodeError;
use crate::logical::{DateCodec, LogicalCodec as _, MoneyCodec};
use crate::record::Value;
use crate::schema::Schema;

/// Decode a single datum, requiring that the schema consumes every byte.
///
/// The schema serves as both writer and reader schema; schema resolution is
/// out of scope.
///
/// # Errors
/// - `DecodeError::UnexpectedEof` if the input is truncated
/// - `DecodeError::UnknownVariant` for an out-of-range union discriminant
/// - `DecodeError::InvalidData` for malformed values or trailing bytes
pub fn decode_datum(bytes: &[u8], schema: &Schema) -> Result<Value, DecodeError> {
    let mut cursor = bytes;
    let value = decode_value(&mut cursor, schema)?;
    if !cursor.is_empty() {
        return Err(DecodeError::InvalidData(format!(
            "{} trailing bytes after datum",
            cursor.len()
        )));
    }
    Ok(value)
}

/// Decode a value against its schema, advancing the cursor.
///
/// # Errors
/// Same as [`decode_datum`], minus the trailing-bytes check.
pub fn decode_value(data: &mut &[u8], schema: &Schema) -> Result<Value, DecodeError> {
    match schema {
        Schema::Null => Ok(Value::Null),
        Schema::Boolean => Ok(Value::Boolean(decode_boolean(data)?)),
        Schema::Int => Ok(Value::Int(decode_int(data)?)),
        Schema::Long => Ok(Value::Long(decode_long(data)?)),
        Schema::Bytes => Ok(Value::Bytes(decode_bytes(data)?)),
        Schema::String => Ok(Value::String(decode_string(data)?)),

        Schema::Date => Ok(Value::Date(DateCodec.decode(data)?)),
        Schema::Decimal(decimal) => {
            Ok(Value::Decimal(MoneyCodec { scale: decimal.scale }.decode(data)?))
        }

        Schema::Record(record) => {
            let mut fields = Vec::with_capacity(record.fields.len());
            for field in &record.fields {
                let value = decode_value(data, &field.schema)?;
                fields.push((field.name.clone(), value));
            }
            Ok(Value::Record(fields))
        }

        Schema::Union(variants) => {
            let index = decode_int(data)?;
            let variant = usize::try_from(index)
                .ok()
                .and_then(|i| variants.get(i))
                .ok_or(DecodeError::UnknownVariant {
                    index: index as i64,
                    count: variants.len(),
                })?;
            let value = decode_value(data, variant)?;
            Ok(Value::union(index as u32, value))
        }
    }
}
