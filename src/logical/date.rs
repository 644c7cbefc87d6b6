//! Date logical type: calendar date as a day-count since the Unix epoch.
//!
//! Dates are encoded as a zig-zag varint `int` holding the number of whole
//! days since 1970-01-01. There is no time-of-day component; dates before
//! the epoch encode as negative day counts, which the zig-zag primitive
//! handles without special-casing.

use chrono::{NaiveDate, TimeDelta};

use crate::codec::{decode_int, encode_int};
use crate::error::{DecodeError, EncodeError};
use crate::logical::LogicalCodec;

/// The Unix epoch, 1970-01-01.
fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch is a valid date")
}

/// Convert a date to its day offset from the Unix epoch.
///
/// # Errors
/// `EncodeError::DateOutOfRange` if the offset does not fit in an `i32`.
pub fn days_since_epoch(date: NaiveDate) -> Result<i32, EncodeError> {
    let days = date.signed_duration_since(epoch()).num_days();
    i32::try_from(days).map_err(|_| EncodeError::DateOutOfRange(date.to_string()))
}

/// Convert a day offset from the Unix epoch back to a date.
///
/// # Errors
/// `DecodeError::InvalidData` if the resulting date is unrepresentable.
pub fn date_from_days(days: i32) -> Result<NaiveDate, DecodeError> {
    epoch()
        .checked_add_signed(TimeDelta::days(days as i64))
        .ok_or_else(|| DecodeError::InvalidData(format!("Day offset {} out of range", days)))
}

/// Codec for the date logical type.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateCodec;

impl LogicalCodec for DateCodec {
    type Host = NaiveDate;

    fn encode(&self, value: &NaiveDate, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
        encode_int(days_since_epoch(*value)?, buf);
        Ok(())
    }

    fn decode(&self, data: &mut &[u8]) -> Result<NaiveDate, DecodeError> {
        date_from_days(decode_int(data)?)
    }
}
