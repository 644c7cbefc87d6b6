//! Logical types: host-level values layered atop the primitive wire encoding.
//!
//! A logical type gives a primitive encoding a richer interpretation: a
//! calendar date is stored as a day-count int, a fixed-scale monetary amount
//! as an unscaled big-endian integer in a byte sequence. Each logical type is
//! a [`LogicalCodec`] composed with the primitive codec rather than inlined
//! at the call sites that need it.

pub mod date;
pub mod money;

pub use date::{date_from_days, days_since_epoch, DateCodec};
pub use money::{Money, MoneyCodec, MoneyParseError};

use crate::error::{DecodeError, EncodeError};

/// Conversion between a host value and its primitive wire representation.
///
/// Implementations must round-trip exactly: `decode(encode(v)) == v` for
/// every representable `v`.
pub trait LogicalCodec {
    /// The host-level value type.
    type Host;

    /// Encode a host value, appending its wire form to `buf`.
    fn encode(&self, value: &Self::Host, buf: &mut Vec<u8>) -> Result<(), EncodeError>;

    /// Decode a host value from the cursor, advancing it past the consumed
    /// bytes.
    fn decode(&self, data: &mut &[u8]) -> Result<Self::Host, DecodeError>;
}
