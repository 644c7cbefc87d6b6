//! Schema-driven binary record serializer with logical date and decimal
//! types.
//!
//! `freighter` encodes typed records (nested records, tagged unions of
//! record variants, primitive fields) into a compact binary form and decodes
//! them back. Two logical types are layered on the primitive encoding: a
//! calendar date stored as a day-count integer, and a fixed-scale decimal
//! amount stored as an unscaled two's-complement integer.
//!
//! Records can be persisted two ways:
//! - **datum**: the raw field encoding, with the schema supplied out of band
//!   ([`encode_datum`] / [`decode_datum`])
//! - **container**: a self-describing file that embeds the schema in a
//!   header ahead of a single datum ([`write_container`] /
//!   [`read_container`])
//!
//! ```
//! use freighter::{decode_datum, encode_datum, Money, Schema, Value};
//! use freighter::schema::{DecimalSchema, FieldSchema, RecordSchema};
//!
//! let schema = Schema::Record(RecordSchema::new(
//!     "Payment",
//!     vec![
//!         FieldSchema::new("amount", Schema::Decimal(DecimalSchema::new(10, 2))),
//!         FieldSchema::new("currencyCode", Schema::String),
//!     ],
//! ));
//!
//! let payment = Value::record(vec![
//!     ("amount", Value::Decimal(Money::new(10000, 2))),
//!     ("currencyCode", Value::String("DKK".into())),
//! ]);
//!
//! let bytes = encode_datum(&payment, &schema).unwrap();
//! assert_eq!(decode_datum(&bytes, &schema).unwrap(), payment);
//! ```

pub mod codec;
pub mod container;
pub mod error;
pub mod logical;
pub mod record;
pub mod schema;

// Re-export main types
pub use container::{
    read_container, read_container_file, write_container, write_container_file, ContainerHeader,
};
pub use error::{ContainerError, DecodeError, EncodeError, SchemaError};
pub use logical::{date_from_days, days_since_epoch, DateCodec, LogicalCodec, Money, MoneyCodec};
pub use record::{decode_datum, decode_value, encode_datum, encode_value, Value};
pub use schema::{parse_schema, DecimalSchema, FieldSchema, RecordSchema, Schema};
