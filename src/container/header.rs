//! Container header parsing and writing.
//!
//! A container starts with a header that makes the file self-describing:
//! - Magic bytes ("Frt\x01")
//! - Metadata map (string keys, bytes values) holding the schema JSON
//!
//! The metadata map uses zig-zag block framing: a signed count, that many
//! key/value pairs, repeated until a zero count. A negative count is
//! followed by a byte-size hint which readers may use for skipping; this
//! writer never produces one but the parser accepts it.

use std::collections::HashMap;

use crate::codec::{decode_zigzag, encode_bytes, encode_long, encode_string};
use crate::error::{ContainerError, DecodeError};
use crate::schema::{parse_schema, Schema};

/// The magic bytes identifying a container.
pub const CONTAINER_MAGIC: [u8; 4] = [b'F', b'r', b't', 0x01];

/// Metadata key under which the schema JSON is stored.
pub const SCHEMA_KEY: &str = "freighter.schema";

/// Minimum header size: magic (4) + empty map terminator (1)
const MIN_HEADER_SIZE: usize = 4 + 1;

/// Parsed container header.
#[derive(Debug, Clone)]
pub struct ContainerHeader {
    /// Metadata key-value pairs from the header.
    pub metadata: HashMap<String, Vec<u8>>,
    /// Schema reconstructed from the metadata.
    pub schema: Schema,
    /// Total size of the header in bytes (offset where the datum begins).
    pub header_size: u64,
}

impl ContainerHeader {
    /// Parse a container header from raw bytes.
    ///
    /// # Errors
    /// - `ContainerError::InvalidMagic` if the magic bytes don't match
    /// - `ContainerError::Parse` if the metadata map is malformed
    /// - `ContainerError::Schema` if the embedded schema cannot be
    ///   reconstructed
    pub fn parse(bytes: &[u8]) -> Result<Self, ContainerError> {
        if bytes.len() < MIN_HEADER_SIZE {
            return Err(ContainerError::Parse {
                offset: 0,
                message: format!(
                    "Header too short: expected at least {} bytes, got {}",
                    MIN_HEADER_SIZE,
                    bytes.len()
                ),
            });
        }

        let mut cursor = bytes;
        let mut offset: u64 = 0;

        Self::parse_magic(&mut cursor, &mut offset)?;
        let (metadata, schema_offset) = Self::parse_metadata(&mut cursor, &mut offset)?;
        let schema = Self::extract_schema(&metadata, schema_offset.unwrap_or(offset))?;

        Ok(Self {
            metadata,
            schema,
            header_size: offset,
        })
    }

    /// Serialize a header for the given schema.
    pub fn write(schema: &Schema, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&CONTAINER_MAGIC);

        // Single-block metadata map with one entry
        encode_long(1, buf);
        encode_string(SCHEMA_KEY, buf);
        encode_bytes(schema.to_json().as_bytes(), buf);
        buf.push(0x00); // end of map
    }

    /// Parse and validate the magic bytes.
    fn parse_magic(cursor: &mut &[u8], offset: &mut u64) -> Result<(), ContainerError> {
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&cursor[..4]);
        *cursor = &cursor[4..];
        *offset += 4;

        if magic != CONTAINER_MAGIC {
            return Err(ContainerError::InvalidMagic(magic));
        }
        Ok(())
    }

    /// Parse the metadata map.
    ///
    /// Returns the entries and, when present, the byte offset of the
    /// schema value for error reporting.
    fn parse_metadata(
        cursor: &mut &[u8],
        offset: &mut u64,
    ) -> Result<(HashMap<String, Vec<u8>>, Option<u64>), ContainerError> {
        let mut metadata = HashMap::new();
        let mut schema_offset = None;

        loop {
            let count =
                decode_zigzag_at(cursor, offset).map_err(|e| ContainerError::Parse {
                    offset: *offset,
                    message: format!("Failed to decode metadata block count: {}", e),
                })?;

            if count == 0 {
                break;
            }

            // A negative count is followed by a byte-size hint we don't need
            if count < 0 {
                decode_zigzag_at(cursor, offset).map_err(|e| ContainerError::Parse {
                    offset: *offset,
                    message: format!("Failed to decode metadata block size: {}", e),
                })?;
            }

            // Each entry takes at least two bytes, so a count beyond the
            // remaining input cannot be satisfied
            let actual_count = count.unsigned_abs();
            if actual_count > cursor.len() as u64 {
                return Err(ContainerError::Parse {
                    offset: *offset,
                    message: format!(
                        "Metadata block count {} exceeds remaining {} bytes",
                        actual_count,
                        cursor.len()
                    ),
                });
            }

            for _ in 0..actual_count {
                let key = decode_string_at(cursor, offset).map_err(|e| ContainerError::Parse {
                    offset: *offset,
                    message: format!("Failed to decode metadata key: {}", e),
                })?;

                let value_offset = *offset;
                let value = decode_bytes_at(cursor, offset).map_err(|e| ContainerError::Parse {
                    offset: *offset,
                    message: format!("Failed to decode metadata value for key '{}': {}", key, e),
                })?;

                if key == SCHEMA_KEY {
                    schema_offset = Some(value_offset);
                }
                metadata.insert(key, value);
            }
        }

        Ok((metadata, schema_offset))
    }

    /// Extract and parse the schema from metadata.
    ///
    /// `schema_offset` is the byte offset of the schema value, or the end
    /// of the metadata map when the key is absent.
    fn extract_schema(
        metadata: &HashMap<String, Vec<u8>>,
        schema_offset: u64,
    ) -> Result<Schema, ContainerError> {
        let schema_bytes = metadata.get(SCHEMA_KEY).ok_or_else(|| ContainerError::Parse {
            offset: schema_offset,
            message: format!("Missing '{}' in metadata", SCHEMA_KEY),
        })?;

        let schema_json = std::str::from_utf8(schema_bytes).map_err(|e| ContainerError::Parse {
            offset: schema_offset,
            message: format!("Schema is not valid UTF-8: {}", e),
        })?;

        parse_schema(schema_json).map_err(ContainerError::Schema)
    }

    /// Get a metadata value by key.
    pub fn get_metadata(&self, key: &str) -> Option<&[u8]> {
        self.metadata.get(key).map(|v| v.as_slice())
    }
}

/// Decode a zig-zag varint, tracking the byte offset for error reporting.
fn decode_zigzag_at(cursor: &mut &[u8], offset: &mut u64) -> Result<i64, DecodeError> {
    let before = cursor.len();
    let value = decode_zigzag(cursor)?;
    *offset += (before - cursor.len()) as u64;
    Ok(value)
}

/// Decode length-prefixed bytes, tracking the byte offset.
fn decode_bytes_at(cursor: &mut &[u8], offset: &mut u64) -> Result<Vec<u8>, DecodeError> {
    let before = cursor.len();
    let bytes = crate::codec::decode_bytes(cursor)?;
    *offset += (before - cursor.len()) as u64;
    Ok(bytes)
}

/// Decode a length-prefixed string, tracking the byte offset.
fn decode_string_at(cursor: &mut &[u8], offset: &mut u64) -> Result<String, DecodeError> {
    let bytes = decode_bytes_at(cursor, offset)?;
    String::from_utf8(bytes).map_err(DecodeError::InvalidUtf8)
}
