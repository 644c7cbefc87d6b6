//! JSON parser for schemas.
//!
//! Parses the schema self-description embedded in container headers back
//! into the [`Schema`] tree. The parser is strict: anything outside the
//! supported type set is an error rather than a warning, since a schema the
//! reader cannot fully reconstruct would silently misread the datum that
//! follows it.

use serde_json::Value;

use crate::error::SchemaError;
use crate::schema::{DecimalSchema, FieldSchema, RecordSchema, Schema};

/// Parse a schema from a JSON string.
///
/// # Errors
/// - `SchemaError::ParseError` if the string is not valid JSON
/// - `SchemaError::InvalidSchema` for structurally invalid schemas
/// - `SchemaError::UnsupportedType` for types outside the supported set
///
/// # Example
/// ```
/// use freighter::schema::parse_schema;
///
/// let schema = parse_schema(r#""string""#).unwrap();
/// ```
pub fn parse_schema(json: &str) -> Result<Schema, SchemaError> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| SchemaError::ParseError(format!("Invalid JSON: {}", e)))?;
    parse_value(&value)
}

/// Parse a JSON value into a schema.
fn parse_value(value: &Value) -> Result<Schema, SchemaError> {
    match value {
        Value::String(s) => parse_primitive(s),
        Value::Object(obj) => parse_object(obj),
        Value::Array(arr) => parse_union(arr),
        _ => Err(SchemaError::InvalidSchema(format!(
            "Expected string, object, or array, found: {:?}",
            value
        ))),
    }
}

/// Parse a primitive type name.
fn parse_primitive(s: &str) -> Result<Schema, SchemaError> {
    match s {
        "null" => Ok(Schema::Null),
        "boolean" => Ok(Schema::Boolean),
        "int" => Ok(Schema::Int),
        "long" => Ok(Schema::Long),
        "bytes" => Ok(Schema::Bytes),
        "string" => Ok(Schema::String),
        other => Err(SchemaError::UnsupportedType(format!(
            "Unknown type: {}",
            other
        ))),
    }
}

/// Parse a complex type from a JSON object.
fn parse_object(obj: &serde_json::Map<String, Value>) -> Result<Schema, SchemaError> {
    let type_str = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or_else(|| SchemaError::InvalidSchema("Missing 'type' field".to_string()))?;

    // A logicalType annotation takes precedence over the base type
    if let Some(logical) = obj.get("logicalType") {
        return parse_logical(obj, type_str, logical);
    }

    match type_str {
        "record" => parse_record(obj),
        // Primitives may also appear in object form
        other => parse_primitive(other),
    }
}

/// Parse a logical type annotation over its base type.
fn parse_logical(
    obj: &serde_json::Map<String, Value>,
    base: &str,
    logical: &Value,
) -> Result<Schema, SchemaError> {
    let name = logical.as_str().ok_or_else(|| {
        SchemaError::InvalidSchema("'logicalType' must be a string".to_string())
    })?;

    match (name, base) {
        ("date", "int") => Ok(Schema::Date),
        ("decimal", "bytes") => {
            let precision = require_u32(obj, "precision")?;
            let scale = match obj.get("scale") {
                Some(_) => require_u32(obj, "scale")?,
                None => 0,
            };
            if scale > precision {
                return Err(SchemaError::InvalidSchema(format!(
                    "Decimal scale {} exceeds precision {}",
                    scale, precision
                )));
            }
            // The unscaled value is decoded into a 128-bit integer, which
            // holds at most 38 decimal digits
            if precision > 38 {
                return Err(SchemaError::InvalidSchema(format!(
                    "Decimal precision {} exceeds the supported maximum of 38",
                    precision
                )));
            }
            Ok(Schema::Decimal(DecimalSchema::new(precision, scale)))
        }
        (name, base) => Err(SchemaError::UnsupportedType(format!(
            "Logical type '{}' over base type '{}'",
            name, base
        ))),
    }
}

/// Read a required non-negative integer attribute.
fn require_u32(obj: &serde_json::Map<String, Value>, key: &str) -> Result<u32, SchemaError> {
    obj.get(key)
        .and_then(|v| v.as_u64())
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| {
            SchemaError::InvalidSchema(format!("Missing or invalid '{}' attribute", key))
        })
}

/// Parse a record schema.
fn parse_record(obj: &serde_json::Map<String, Value>) -> Result<Schema, SchemaError> {
    let name = obj
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| SchemaError::InvalidSchema("Record missing 'name' field".to_string()))?
        .to_string();

    let namespace = obj
        .get("namespace")
        .and_then(|v| v.as_str())
        .map(String::from);

    let doc = obj.get("doc").and_then(|v| v.as_str()).map(String::from);

    let fields_json = obj
        .get("fields")
        .and_then(|v| v.as_array())
        .ok_or_else(|| {
            SchemaError::InvalidSchema(format!("Record '{}' missing 'fields' array", name))
        })?;

    let mut fields = Vec::with_capacity(fields_json.len());
    for field in fields_json {
        fields.push(parse_field(field)?);
    }

    let mut record = RecordSchema::new(name, fields);
    if let Some(ns) = namespace {
        record = record.with_namespace(ns);
    }
    if let Some(doc) = doc {
        record = record.with_doc(doc);
    }
    Ok(Schema::Record(record))
}

/// Parse a single record field.
fn parse_field(value: &Value) -> Result<FieldSchema, SchemaError> {
    let obj = value
        .as_object()
        .ok_or_else(|| SchemaError::InvalidSchema("Field must be an object".to_string()))?;

    let name = obj
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| SchemaError::InvalidSchema("Field missing 'name'".to_string()))?
        .to_string();

    let schema = obj.get("type").ok_or_else(|| {
        SchemaError::InvalidSchema(format!("Field '{}' missing 'type'", name))
    })?;

    let mut field = FieldSchema::new(name, parse_value(schema)?);
    if let Some(doc) = obj.get("doc").and_then(|v| v.as_str()) {
        field = field.with_doc(doc);
    }
    Ok(field)
}

/// Parse a union schema from a JSON array.
fn parse_union(arr: &[Value]) -> Result<Schema, SchemaError> {
    if arr.is_empty() {
        return Err(SchemaError::InvalidSchema(
            "Union schema cannot be empty".to_string(),
        ));
    }

    let variants: Result<Vec<Schema>, SchemaError> = arr.iter().map(parse_value).collect();
    let variants = variants?;

    // Nested unions make the positional discriminant ambiguous
    if variants.iter().any(|v| matches!(v, Schema::Union(_))) {
        return Err(SchemaError::InvalidSchema(
            "Union cannot directly contain another union".to_string(),
        ));
    }

    Ok(Schema::Union(variants))
}
