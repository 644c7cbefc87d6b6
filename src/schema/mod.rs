//! Schema types and JSON parsing.
//!
//! Defines the schema tree (primitives, logical types, records, unions) and
//! the parser that reconstructs a schema from the JSON self-description
//! embedded in container headers.

mod parser;
mod types;

pub use parser::parse_schema;
pub use types::{DecimalSchema, FieldSchema, RecordSchema, Schema};
