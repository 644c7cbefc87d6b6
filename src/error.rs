//! Error types for encoding, decoding, schema parsing, and container I/O.

use std::io;
use thiserror::Error;

/// Errors that can occur during schema operations
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Invalid schema structure
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),
    /// Unsupported schema type
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),
    /// Schema JSON parsing error
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Errors that can occur during decoding
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Invalid binary data
    #[error("Invalid data: {0}")]
    InvalidData(String),
    /// Unexpected end of data
    #[error("Unexpected end of input")]
    UnexpectedEof,
    /// Invalid varint encoding (unterminated or overlong continuation chain)
    #[error("Invalid varint encoding")]
    InvalidVarint,
    /// Union discriminant out of range for the declared variant list
    #[error("Union discriminant {index} out of range (0..{count})")]
    UnknownVariant { index: i64, count: usize },
    /// String is not valid UTF-8
    #[error("Invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Errors that can occur during encoding
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Value shape does not match the schema
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),
    /// Unscaled decimal does not fit the requested fixed width
    #[error("Unscaled value {unscaled} does not fit in {width} bytes")]
    ScaleOverflow { unscaled: i128, width: usize },
    /// Date offset from the epoch does not fit a 32-bit day count
    #[error("Date out of range: {0}")]
    DateOutOfRange(String),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Errors that can occur reading a container
#[derive(Debug, Error)]
pub enum ContainerError {
    /// Invalid magic bytes
    #[error("Invalid magic bytes: expected 'Frt\\x01', found {0:?}")]
    InvalidMagic([u8; 4]),

    /// Header parse error at a specific offset
    #[error("Corrupt container at offset {offset}: {message}")]
    Parse { offset: u64, message: String },

    /// Embedded schema could not be reconstructed
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Datum decode error
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
