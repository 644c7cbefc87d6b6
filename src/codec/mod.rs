//! Primitive binary codec: variable-length zig-zag integers, booleans,
//! byte sequences, and strings.
//!
//! The wire format follows the Avro binary encoding:
//! - Each varint byte carries 7 bits of data and 1 continuation bit (MSB)
//! - Bytes are in little-endian order
//! - Signed integers are zig-zag mapped before varint encoding:
//!   0 -> 0, -1 -> 1, 1 -> 2, -2 -> 3, 2 -> 4, ...
//! - Byte sequences and strings are length-prefixed with a signed varint
//!
//! Decoders take a `&mut &[u8]` cursor that is advanced past the consumed
//! bytes; encoders append to a caller-supplied buffer.

use crate::error::DecodeError;

// ============================================================================
// Decoding
// ============================================================================

/// Decode an unsigned variable-length integer.
///
/// # Errors
/// - `DecodeError::UnexpectedEof` if the input is truncated
/// - `DecodeError::InvalidVarint` if the continuation chain exceeds 64 bits
#[inline]
pub fn decode_varint(data: &mut &[u8]) -> Result<u64, DecodeError> {
    let mut result: u64 = 0;
    let mut shift: u32 = 0;

    loop {
        if data.is_empty() {
            return Err(DecodeError::UnexpectedEof);
        }

        let byte = data[0];
        *data = &data[1..];

        result |= ((byte & 0x7F) as u64) << shift;

        // MSB clear means this was the last byte
        if byte & 0x80 == 0 {
            return Ok(result);
        }

        shift += 7;

        // A 64-bit varint never needs more than 10 bytes
        if shift >= 64 {
            return Err(DecodeError::InvalidVarint);
        }
    }
}

/// Decode a signed variable-length integer (zig-zag encoded).
///
/// # Errors
/// Same as [`decode_varint`].
#[inline]
pub fn decode_zigzag(data: &mut &[u8]) -> Result<i64, DecodeError> {
    let unsigned = decode_varint(data)?;
    // Zig-zag decode: (n >> 1) ^ -(n & 1)
    Ok(((unsigned >> 1) as i64) ^ (-((unsigned & 1) as i64)))
}

/// Decode a 64-bit signed integer.
#[inline]
pub fn decode_long(data: &mut &[u8]) -> Result<i64, DecodeError> {
    decode_zigzag(data)
}

/// Decode a 32-bit signed integer.
///
/// # Errors
/// `DecodeError::InvalidData` if the decoded value does not fit in `i32`.
#[inline]
pub fn decode_int(data: &mut &[u8]) -> Result<i32, DecodeError> {
    let long = decode_long(data)?;
    i32::try_from(long).map_err(|_| {
        DecodeError::InvalidData(format!("Integer overflow: {} does not fit in i32", long))
    })
}

/// Decode a boolean (single byte, 0x00 or 0x01).
#[inline]
pub fn decode_boolean(data: &mut &[u8]) -> Result<bool, DecodeError> {
    if data.is_empty() {
        return Err(DecodeError::UnexpectedEof);
    }
    let byte = data[0];
    *data = &data[1..];
    match byte {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(DecodeError::InvalidData(format!(
            "Invalid boolean value: {}, expected 0 or 1",
            byte
        ))),
    }
}

/// Decode a length-prefixed byte sequence.
///
/// # Errors
/// - `DecodeError::InvalidData` if the length prefix is negative
/// - `DecodeError::UnexpectedEof` if fewer bytes remain than the prefix claims
#[inline]
pub fn decode_bytes(data: &mut &[u8]) -> Result<Vec<u8>, DecodeError> {
    Ok(decode_bytes_ref(data)?.to_vec())
}

/// Decode a length-prefixed byte sequence without copying.
#[inline]
pub fn decode_bytes_ref<'a>(data: &mut &'a [u8]) -> Result<&'a [u8], DecodeError> {
    let len = decode_long(data)?;
    if len < 0 {
        return Err(DecodeError::InvalidData(format!(
            "Negative bytes length: {}",
            len
        )));
    }
    let len = len as usize;

    if data.len() < len {
        return Err(DecodeError::UnexpectedEof);
    }

    let bytes = &data[..len];
    *data = &data[len..];
    Ok(bytes)
}

/// Decode a length-prefixed UTF-8 string.
#[inline]
pub fn decode_string(data: &mut &[u8]) -> Result<String, DecodeError> {
    let bytes = decode_bytes(data)?;
    String::from_utf8(bytes).map_err(DecodeError::from)
}

// ============================================================================
// Encoding
// ============================================================================

/// Encode an unsigned integer as a variable-length integer.
#[inline]
pub fn encode_varint(mut value: u64, buf: &mut Vec<u8>) {
    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80; // continuation bit
        }
        buf.push(byte);
        if value == 0 {
            break;
        }
    }
}

/// Encode a signed integer as a zig-zag varint.
#[inline]
pub fn encode_zigzag(value: i64, buf: &mut Vec<u8>) {
    // Zig-zag encode: (n << 1) ^ (n >> 63)
    encode_varint(((value << 1) ^ (value >> 63)) as u64, buf);
}

/// Encode a 64-bit signed integer.
#[inline]
pub fn encode_long(value: i64, buf: &mut Vec<u8>) {
    encode_zigzag(value, buf);
}

/// Encode a 32-bit signed integer.
#[inline]
pub fn encode_int(value: i32, buf: &mut Vec<u8>) {
    encode_zigzag(value as i64, buf);
}

/// Encode a boolean as a single byte.
#[inline]
pub fn encode_boolean(value: bool, buf: &mut Vec<u8>) {
    buf.push(value as u8);
}

/// Encode a byte sequence with a signed varint length prefix.
#[inline]
pub fn encode_bytes(value: &[u8], buf: &mut Vec<u8>) {
    encode_long(value.len() as i64, buf);
    buf.extend_from_slice(value);
}

/// Encode a UTF-8 string with a signed varint length prefix.
#[inline]
pub fn encode_string(value: &str, buf: &mut Vec<u8>) {
    encode_bytes(value.as_bytes(), buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded_varint(value: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_varint(value, &mut buf);
        buf
    }

    fn encoded_zigzag(value: i64) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_zigzag(value, &mut buf);
        buf
    }

    #[test]
    fn test_decode_varint_single_byte() {
        let data: &[u8] = &[0x00];
        let mut cursor = data;
        assert_eq!(decode_varint(&mut cursor).unwrap(), 0);
        assert!(cursor.is_empty());

        let data: &[u8] = &[0x7F];
        let mut cursor = data;
        assert_eq!(decode_varint(&mut cursor).unwrap(), 127);
    }

    #[test]
    fn test_decode_varint_multi_byte() {
        // 128 -> 0x80 0x01
        let data: &[u8] = &[0x80, 0x01];
        let mut cursor = data;
        assert_eq!(decode_varint(&mut cursor).unwrap(), 128);

        // 300 -> 0xAC 0x02
        let data: &[u8] = &[0xAC, 0x02];
        let mut cursor = data;
        assert_eq!(decode_varint(&mut cursor).unwrap(), 300);
    }

    #[test]
    fn test_decode_varint_truncated() {
        let data: &[u8] = &[];
        let mut cursor = data;
        assert!(matches!(
            decode_varint(&mut cursor),
            Err(DecodeError::UnexpectedEof)
        ));

        // Continuation bit set but no more bytes
        let data: &[u8] = &[0x80];
        let mut cursor = data;
        assert!(matches!(
            decode_varint(&mut cursor),
            Err(DecodeError::UnexpectedEof)
        ));
    }

    #[test]
    fn test_decode_varint_unterminated_chain() {
        // 11 continuation bytes never terminate a 64-bit varint
        let data: &[u8] = &[0xFF; 11];
        let mut cursor = data;
        assert!(matches!(
            decode_varint(&mut cursor),
            Err(DecodeError::InvalidVarint)
        ));
    }

    #[test]
    fn test_zigzag_small_values() {
        assert_eq!(encoded_zigzag(0), vec![0x00]);
        assert_eq!(encoded_zigzag(-1), vec![0x01]);
        assert_eq!(encoded_zigzag(1), vec![0x02]);
        assert_eq!(encoded_zigzag(-2), vec![0x03]);
        assert_eq!(encoded_zigzag(2), vec![0x04]);
    }

    #[test]
    fn test_varint_roundtrip() {
        for value in [0u64, 1, 127, 128, 255, 256, 16383, 16384, u64::MAX / 2] {
            let encoded = encoded_varint(value);
            let mut cursor = &encoded[..];
            assert_eq!(decode_varint(&mut cursor).unwrap(), value);
            assert!(cursor.is_empty());
        }
    }

    #[test]
    fn test_zigzag_roundtrip() {
        for value in [0i64, 1, -1, 2, -2, 127, -128, i64::MAX, i64::MIN] {
            let encoded = encoded_zigzag(value);
            let mut cursor = &encoded[..];
            assert_eq!(decode_zigzag(&mut cursor).unwrap(), value);
            assert!(cursor.is_empty());
        }
    }

    #[test]
    fn test_int_roundtrip_and_overflow() {
        for value in [0i32, 1, -1, i32::MAX, i32::MIN] {
            let mut buf = Vec::new();
            encode_int(value, &mut buf);
            let mut cursor = &buf[..];
            assert_eq!(decode_int(&mut cursor).unwrap(), value);
        }

        // A long outside i32 range must not decode as an int
        let mut buf = Vec::new();
        encode_long(i32::MAX as i64 + 1, &mut buf);
        let mut cursor = &buf[..];
        assert!(matches!(
            decode_int(&mut cursor),
            Err(DecodeError::InvalidData(_))
        ));
    }

    #[test]
    fn test_boolean_roundtrip() {
        for value in [true, false] {
            let mut buf = Vec::new();
            encode_boolean(value, &mut buf);
            let mut cursor = &buf[..];
            assert_eq!(decode_boolean(&mut cursor).unwrap(), value);
        }

        let data: &[u8] = &[0x02];
        let mut cursor = data;
        assert!(matches!(
            decode_boolean(&mut cursor),
            Err(DecodeError::InvalidData(_))
        ));
    }

    #[test]
    fn test_bytes_roundtrip() {
        let mut buf = Vec::new();
        encode_bytes(&[0x01, 0x02, 0x03], &mut buf);
        assert_eq!(buf, vec![0x06, 0x01, 0x02, 0x03]); // zigzag(3) = 6

        let mut cursor = &buf[..];
        assert_eq!(decode_bytes(&mut cursor).unwrap(), vec![0x01, 0x02, 0x03]);
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_bytes_negative_length() {
        let data: &[u8] = &[0x01]; // zigzag -1
        let mut cursor = data;
        assert!(matches!(
            decode_bytes(&mut cursor),
            Err(DecodeError::InvalidData(_))
        ));
    }

    #[test]
    fn test_bytes_truncated_payload() {
        let data: &[u8] = &[0x06, 0x01]; // claims 3 bytes, has 1
        let mut cursor = data;
        assert!(matches!(
            decode_bytes(&mut cursor),
            Err(DecodeError::UnexpectedEof)
        ));
    }

    #[test]
    fn test_string_roundtrip() {
        let mut buf = Vec::new();
        encode_string("hello", &mut buf);
        assert_eq!(buf, vec![0x0A, b'h', b'e', b'l', b'l', b'o']);

        let mut cursor = &buf[..];
        assert_eq!(decode_string(&mut cursor).unwrap(), "hello");
    }

    #[test]
    fn test_string_invalid_utf8() {
        let data: &[u8] = &[0x04, 0xFF, 0xFE];
        let mut cursor = data;
        assert!(matches!(
            decode_string(&mut cursor),
            Err(DecodeError::InvalidUtf8(_))
        ));
    }
}
