//! Schema types describing a record's shape.
//!
//! A schema is a tree: primitive leaves, logical-type leaves (date,
//! decimal), nested records, and unions over an ordered list of candidate
//! variants. Schemas are immutable once constructed and shared by reference
//! between encoder and decoder; union variant order is part of the wire
//! contract.

use serde_json::{json, Map, Value};

/// Represents a field schema tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// Null type, occupies no bytes on the wire.
    Null,
    /// Boolean type.
    Boolean,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// Sequence of bytes.
    Bytes,
    /// Unicode string.
    String,
    /// Record type with named fields in declared order.
    Record(RecordSchema),
    /// Union over an ordered list of candidate schemas.
    Union(Vec<Schema>),
    /// Date logical type over an int day-count.
    Date,
    /// Decimal logical type over a bytes unscaled integer.
    Decimal(DecimalSchema),
}

/// Schema for a record type.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    /// The name of the record.
    pub name: String,
    /// Optional namespace for the record.
    pub namespace: Option<String>,
    /// The fields of the record, in wire order.
    pub fields: Vec<FieldSchema>,
    /// Optional documentation.
    pub doc: Option<String>,
}

impl RecordSchema {
    /// Create a new record schema with the given name and fields.
    pub fn new(name: impl Into<String>, fields: Vec<FieldSchema>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            fields,
            doc: None,
        }
    }

    /// Set the namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the documentation.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Get the fully qualified name.
    pub fn fullname(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}.{}", ns, self.name),
            None => self.name.clone(),
        }
    }

    /// Serialize the record schema to a JSON value.
    pub fn to_json_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("type".to_string(), json!("record"));
        obj.insert("name".to_string(), json!(&self.name));

        if let Some(ns) = &self.namespace {
            obj.insert("namespace".to_string(), json!(ns));
        }

        if let Some(doc) = &self.doc {
            obj.insert("doc".to_string(), json!(doc));
        }

        let fields: Vec<Value> = self.fields.iter().map(|f| f.to_json_value()).collect();
        obj.insert("fields".to_string(), Value::Array(fields));

        Value::Object(obj)
    }
}

/// Schema for a field within a record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    /// The name of the field.
    pub name: String,
    /// The schema of the field's value.
    pub schema: Schema,
    /// Optional documentation.
    pub doc: Option<String>,
}

impl FieldSchema {
    /// Create a new field schema with the given name and schema.
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            doc: None,
        }
    }

    /// Set the documentation.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Serialize the field schema to a JSON value.
    pub fn to_json_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("name".to_string(), json!(&self.name));
        obj.insert("type".to_string(), self.schema.to_json_value());

        if let Some(doc) = &self.doc {
            obj.insert("doc".to_string(), json!(doc));
        }

        Value::Object(obj)
    }
}

/// Parameters of the decimal logical type.
///
/// The scale is a schema-level constant shared by encoder and decoder; it is
/// never carried in the encoded bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalSchema {
    /// Total number of significant digits.
    pub precision: u32,
    /// Number of fractional digits.
    pub scale: u32,
}

impl DecimalSchema {
    /// Create a decimal schema with the given precision and scale.
    pub fn new(precision: u32, scale: u32) -> Self {
        Self { precision, scale }
    }
}

impl Schema {
    /// Check if this schema is a primitive type.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Schema::Null | Schema::Boolean | Schema::Int | Schema::Long | Schema::Bytes | Schema::String
        )
    }

    /// Check if this schema is a logical type.
    pub fn is_logical(&self) -> bool {
        matches!(self, Schema::Date | Schema::Decimal(_))
    }

    /// A short name for the schema's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Schema::Null => "null",
            Schema::Boolean => "boolean",
            Schema::Int => "int",
            Schema::Long => "long",
            Schema::Bytes => "bytes",
            Schema::String => "string",
            Schema::Record(_) => "record",
            Schema::Union(_) => "union",
            Schema::Date => "date",
            Schema::Decimal(_) => "decimal",
        }
    }

    /// Serialize the schema to a JSON string.
    ///
    /// Produces canonical schema JSON that [`parse_schema`] reads back to an
    /// equivalent schema.
    ///
    /// [`parse_schema`]: crate::schema::parse_schema
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.to_json_value()).unwrap_or_else(|_| "null".to_string())
    }

    /// Serialize the schema to a JSON value.
    pub fn to_json_value(&self) -> Value {
        match self {
            // Primitive types serialize as bare strings
            Schema::Null => json!("null"),
            Schema::Boolean => json!("boolean"),
            Schema::Int => json!("int"),
            Schema::Long => json!("long"),
            Schema::Bytes => json!("bytes"),
            Schema::String => json!("string"),

            Schema::Record(r) => r.to_json_value(),
            Schema::Union(variants) => {
                Value::Array(variants.iter().map(|v| v.to_json_value()).collect())
            }

            // Logical types serialize as their base type plus a logicalType
            // annotation
            Schema::Date => json!({
                "type": "int",
                "logicalType": "date"
            }),
            Schema::Decimal(d) => json!({
                "type": "bytes",
                "logicalType": "decimal",
                "precision": d.precision,
                "scale": d.scale
            }),
        }
    }
}
