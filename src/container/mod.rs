//! Self-describing container format: `[header][single datum]`.
//!
//! The header embeds the schema JSON, so a container file is portable
//! without an external schema registry. Exactly one datum follows the
//! header; the reader decodes it with the embedded schema serving as both
//! writer and reader schema. Sync markers, compression codecs, and
//! multi-record blocks are out of scope.

mod header;

pub use header::{ContainerHeader, CONTAINER_MAGIC, SCHEMA_KEY};

use std::fs;
use std::path::Path;

use crate::error::{ContainerError, EncodeError};
use crate::record::{decode_value, encode_value, Value};
use crate::schema::Schema;

/// Serialize a value into a self-describing container.
///
/// # Errors
/// `EncodeError::TypeMismatch` if the value does not conform to the schema.
pub fn write_container(value: &Value, schema: &Schema) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::new();
    ContainerHeader::write(schema, &mut buf);
    encode_value(value, schema, &mut buf)?;
    Ok(buf)
}

/// Read a container, returning the embedded schema and the decoded value.
///
/// # Errors
/// `ContainerError` if the header is unparsable, the schema cannot be
/// reconstructed, or the datum is truncated or followed by trailing bytes.
pub fn read_container(bytes: &[u8]) -> Result<(Schema, Value), ContainerError> {
    let header = ContainerHeader::parse(bytes)?;

    let mut cursor = &bytes[header.header_size as usize..];
    let value = decode_value(&mut cursor, &header.schema)?;
    if !cursor.is_empty() {
        return Err(ContainerError::Parse {
            offset: (bytes.len() - cursor.len()) as u64,
            message: format!("{} trailing bytes after datum", cursor.len()),
        });
    }

    Ok((header.schema, value))
}

/// Write a container to a file.
///
/// The file handle is held for exactly this one write and released on all
/// paths.
///
/// # Errors
/// Encoding errors from [`write_container`]; IO errors from the filesystem.
pub fn write_container_file(
    path: impl AsRef<Path>,
    value: &Value,
    schema: &Schema,
) -> Result<(), EncodeError> {
    let bytes = write_container(value, schema)?;
    fs::write(path, bytes)?;
    Ok(())
}

/// Read a container from a file.
///
/// # Errors
/// IO errors from the filesystem; container errors from [`read_container`].
pub fn read_container_file(path: impl AsRef<Path>) -> Result<(Schema, Value), ContainerError> {
    let bytes = fs::read(path)?;
    read_container(&bytes)
}
