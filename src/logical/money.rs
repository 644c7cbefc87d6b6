//! Decimal logical type: fixed-scale monetary amounts.
//!
//! An amount is held as an unscaled integer plus a scale (number of
//! fractional digits): `123.45` at scale 2 is unscaled `12345`. On the wire
//! the unscaled integer is serialized as a minimal-length big-endian two's
//! complement byte sequence inside a length-prefixed bytes value. The scale
//! is part of the schema, never the wire bytes, so writer and reader must
//! agree on it out of band.
//!
//! All arithmetic is integer arithmetic; no floating point is involved at
//! any stage, so values representable at the scale round-trip bit-for-bit.

use std::fmt;

use thiserror::Error;

use crate::codec::{decode_bytes_ref, encode_bytes};
use crate::error::{DecodeError, EncodeError};
use crate::logical::LogicalCodec;

/// Error parsing a decimal string into a [`Money`] value.
#[derive(Debug, Error)]
pub enum MoneyParseError {
    /// The string is not a valid decimal number
    #[error("Invalid decimal literal: {0:?}")]
    InvalidLiteral(String),
    /// The value does not fit the unscaled integer range
    #[error("Decimal value out of range: {0:?}")]
    OutOfRange(String),
}

/// A fixed-scale decimal amount.
///
/// Equality compares both the unscaled value and the scale, so `1.5` at
/// scale 1 and `1.50` at scale 2 are distinct values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Money {
    unscaled: i128,
    scale: u32,
}

impl Money {
    /// Create an amount from its unscaled integer and scale.
    ///
    /// `Money::new(12345, 2)` is `123.45`.
    pub fn new(unscaled: i128, scale: u32) -> Self {
        Self { unscaled, scale }
    }

    /// The unscaled integer value.
    pub fn unscaled(&self) -> i128 {
        self.unscaled
    }

    /// The number of fractional digits.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Parse a decimal literal at the given scale.
    ///
    /// Parsing is exact digit arithmetic. Excess fractional digits are
    /// rounded half-away-from-zero, the standard currency rounding:
    /// `"100.005"` at scale 2 becomes unscaled `10001`.
    ///
    /// # Errors
    /// - `MoneyParseError::InvalidLiteral` for malformed input
    /// - `MoneyParseError::OutOfRange` if the unscaled value overflows
    pub fn from_str_scaled(s: &str, scale: u32) -> Result<Self, MoneyParseError> {
        let invalid = || MoneyParseError::InvalidLiteral(s.to_string());
        let overflow = || MoneyParseError::OutOfRange(s.to_string());

        let rest = s.trim();
        let (negative, rest) = match rest.strip_prefix('-') {
            Some(r) => (true, r),
            None => (false, rest.strip_prefix('+').unwrap_or(rest)),
        };

        let (int_digits, frac_digits) = match rest.split_once('.') {
            Some((i, f)) => (i, f),
            None => (rest, ""),
        };

        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(invalid());
        }
        if !int_digits.bytes().all(|b| b.is_ascii_digit())
            || !frac_digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        // Accumulate the magnitude over integer digits plus exactly `scale`
        // fractional digits, padding with zeros when the literal is shorter.
        let mut magnitude: i128 = 0;
        let scale = scale as usize;
        let kept_frac = frac_digits.as_bytes().iter().take(scale);
        for &b in int_digits.as_bytes().iter().chain(kept_frac) {
            magnitude = magnitude
                .checked_mul(10)
                .and_then(|m| m.checked_add((b - b'0') as i128))
                .ok_or_else(overflow)?;
        }
        for _ in frac_digits.len()..scale {
            magnitude = magnitude.checked_mul(10).ok_or_else(overflow)?;
        }

        // Round half-away-from-zero on the first dropped digit
        if let Some(&first_dropped) = frac_digits.as_bytes().get(scale) {
            if first_dropped >= b'5' {
                magnitude = magnitude.checked_add(1).ok_or_else(overflow)?;
            }
        }

        let unscaled = if negative { -magnitude } else { magnitude };
        Ok(Self::new(unscaled, scale as u32))
    }

    /// The minimal-length big-endian two's complement bytes of the unscaled
    /// value.
    ///
    /// Redundant sign bytes are stripped: leading `0x00` while the next byte
    /// has a clear high bit, leading `0xFF` while it is set. At least one
    /// byte is always produced.
    pub fn to_be_bytes_minimal(&self) -> Vec<u8> {
        let bytes = self.unscaled.to_be_bytes();
        let mut start = 0;
        while start < bytes.len() - 1 {
            let next_high_bit = bytes[start + 1] & 0x80;
            let redundant = (bytes[start] == 0x00 && next_high_bit == 0)
                || (bytes[start] == 0xFF && next_high_bit != 0);
            if !redundant {
                break;
            }
            start += 1;
        }
        bytes[start..].to_vec()
    }

    /// Sign-extend the unscaled value to exactly `width` bytes, big-endian.
    ///
    /// # Errors
    /// `EncodeError::ScaleOverflow` if the value needs more than `width`
    /// bytes.
    pub fn to_be_bytes_fixed(&self, width: usize) -> Result<Vec<u8>, EncodeError> {
        let minimal = self.to_be_bytes_minimal();
        if minimal.len() > width {
            return Err(EncodeError::ScaleOverflow {
                unscaled: self.unscaled,
                width,
            });
        }
        let fill = if self.unscaled < 0 { 0xFF } else { 0x00 };
        let mut bytes = vec![fill; width - minimal.len()];
        bytes.extend_from_slice(&minimal);
        Ok(bytes)
    }

    /// Reconstruct an amount from big-endian two's complement bytes.
    ///
    /// # Errors
    /// `DecodeError::InvalidData` if the sequence is empty or wider than the
    /// unscaled integer range.
    pub fn from_be_bytes(bytes: &[u8], scale: u32) -> Result<Self, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::InvalidData(
                "Empty decimal byte sequence".to_string(),
            ));
        }
        if bytes.len() > 16 {
            return Err(DecodeError::InvalidData(format!(
                "Decimal byte sequence of {} bytes exceeds 128-bit range",
                bytes.len()
            )));
        }

        // Seed with the sign so shorter sequences extend correctly
        let mut unscaled: i128 = if bytes[0] & 0x80 != 0 { -1 } else { 0 };
        for &byte in bytes {
            unscaled = (unscaled << 8) | (byte as i128);
        }
        Ok(Self::new(unscaled, scale))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.unscaled);
        }
        let divisor = 10i128.pow(self.scale);
        let sign = if self.unscaled < 0 { "-" } else { "" };
        let magnitude = self.unscaled.unsigned_abs();
        write!(
            f,
            "{}{}.{:0>width$}",
            sign,
            magnitude / divisor as u128,
            magnitude % divisor as u128,
            width = self.scale as usize
        )
    }
}

/// Codec for the decimal logical type at a given scale.
///
/// The scale is carried by the schema, not the wire bytes; the codec stamps
/// it onto decoded values.
#[derive(Debug, Clone, Copy)]
pub struct MoneyCodec {
    /// Number of fractional digits preserved by the encoding.
    pub scale: u32,
}

impl LogicalCodec for MoneyCodec {
    type Host = Money;

    fn encode(&self, value: &Money, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
        if value.scale() != self.scale {
            return Err(EncodeError::TypeMismatch(format!(
                "Decimal scale mismatch: value has scale {}, schema requires {}",
                value.scale(),
                self.scale
            )));
        }
        encode_bytes(&value.to_be_bytes_minimal(), buf);
        Ok(())
    }

    fn decode(&self, data: &mut &[u8]) -> Result<Money, DecodeError> {
        Money::from_be_bytes(decode_bytes_ref(data)?, self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_scaled_exact() {
        assert_eq!(
            Money::from_str_scaled("123.45", 2).unwrap(),
            Money::new(12345, 2)
        );
        assert_eq!(Money::from_str_scaled("0.00", 2).unwrap(), Money::new(0, 2));
        assert_eq!(
            Money::from_str_scaled("-7.01", 2).unwrap(),
            Money::new(-701, 2)
        );
        assert_eq!(
            Money::from_str_scaled("100", 2).unwrap(),
            Money::new(10000, 2)
        );
        assert_eq!(Money::from_str_scaled("1.5", 2).unwrap(), Money::new(150, 2));
    }

    #[test]
    fn test_from_str_scaled_rounding_half_away_from_zero() {
        // The documented reference case: 100.005 at scale 2 is 10001
        assert_eq!(
            Money::from_str_scaled("100.005", 2).unwrap(),
            Money::new(10001, 2)
        );
        assert_eq!(
            Money::from_str_scaled("-100.005", 2).unwrap(),
            Money::new(-10001, 2)
        );
        assert_eq!(
            Money::from_str_scaled("100.004", 2).unwrap(),
            Money::new(10000, 2)
        );
        assert_eq!(
            Money::from_str_scaled("100.0049", 2).unwrap(),
            Money::new(10000, 2)
        );
        assert_eq!(
            Money::from_str_scaled("0.999", 2).unwrap(),
            Money::new(100, 2)
        );
    }

    #[test]
    fn test_from_str_scaled_rejects_garbage() {
        for s in ["", "-", ".", "1.2.3", "12a", "1,5"] {
            assert!(
                matches!(
                    Money::from_str_scaled(s, 2),
                    Err(MoneyParseError::InvalidLiteral(_))
                ),
                "expected {:?} to be rejected",
                s
            );
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::new(10000, 2).to_string(), "100.00");
        assert_eq!(Money::new(-701, 2).to_string(), "-7.01");
        assert_eq!(Money::new(5, 2).to_string(), "0.05");
        assert_eq!(Money::new(42, 0).to_string(), "42");
    }

    #[test]
    fn test_minimal_bytes_strip_redundant_sign_bytes() {
        assert_eq!(Money::new(0, 2).to_be_bytes_minimal(), vec![0x00]);
        assert_eq!(Money::new(1, 2).to_be_bytes_minimal(), vec![0x01]);
        assert_eq!(Money::new(-1, 2).to_be_bytes_minimal(), vec![0xFF]);
        assert_eq!(Money::new(127, 2).to_be_bytes_minimal(), vec![0x7F]);
        // 128 needs a leading 0x00 so the high bit is not read as a sign
        assert_eq!(Money::new(128, 2).to_be_bytes_minimal(), vec![0x00, 0x80]);
        assert_eq!(Money::new(-128, 2).to_be_bytes_minimal(), vec![0x80]);
        assert_eq!(Money::new(-129, 2).to_be_bytes_minimal(), vec![0xFF, 0x7F]);
        // 10000 = 0x2710
        assert_eq!(Money::new(10000, 2).to_be_bytes_minimal(), vec![0x27, 0x10]);
    }

    #[test]
    fn test_be_bytes_roundtrip() {
        for unscaled in [
            0i128,
            1,
            -1,
            127,
            128,
            -128,
            -129,
            10000,
            -10001,
            i64::MAX as i128,
            i64::MIN as i128,
            i128::MAX,
            i128::MIN,
        ] {
            let money = Money::new(unscaled, 2);
            let bytes = money.to_be_bytes_minimal();
            assert_eq!(Money::from_be_bytes(&bytes, 2).unwrap(), money);
        }
    }

    #[test]
    fn test_fixed_width_overflow() {
        let money = Money::new(10000, 2);
        assert_eq!(money.to_be_bytes_fixed(4).unwrap(), vec![0x00, 0x00, 0x27, 0x10]);
        assert!(matches!(
            money.to_be_bytes_fixed(1),
            Err(EncodeError::ScaleOverflow { unscaled: 10000, width: 1 })
        ));

        let negative = Money::new(-129, 2);
        assert_eq!(negative.to_be_bytes_fixed(4).unwrap(), vec![0xFF, 0xFF, 0xFF, 0x7F]);
    }

    #[test]
    fn test_codec_roundtrip() {
        let codec = MoneyCodec { scale: 2 };
        let money = Money::new(10000, 2);

        let mut buf = Vec::new();
        codec.encode(&money, &mut buf).unwrap();
        // zigzag(2) length prefix, then 0x27 0x10
        assert_eq!(buf, vec![0x04, 0x27, 0x10]);

        let mut cursor = &buf[..];
        assert_eq!(codec.decode(&mut cursor).unwrap(), money);
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_codec_rejects_scale_mismatch() {
        let codec = MoneyCodec { scale: 2 };
        let mut buf = Vec::new();
        assert!(matches!(
            codec.encode(&Money::new(15, 1), &mut buf),
            Err(EncodeError::TypeMismatch(_))
        ));
    }

    #[test]
    fn test_decode_rejects_oversized_sequence() {
        assert!(matches!(
            Money::from_be_bytes(&[0x01; 17], 2),
            Err(DecodeError::InvalidData(_))
        ));
        assert!(matches!(
            Money::from_be_bytes(&[], 2),
            Err(DecodeError::InvalidData(_))
        ));
    }
}
