//! Bit/byte conversion primitives.
//!
//! All conversions are MSB first: bit 0 of a sequence is the most
//! significant bit of the first byte. Packing a bit count that is not a
//! multiple of 8 zero-pads the final byte on the right and logs a padding
//! notice; unpacking is always exact.
//!
//! Errors are explicit: an integer that does not fit the requested width is
//! rejected (`CodecError::Encoding`) instead of being replaced, and untyped
//! digits or text that are not 0/1 are rejected at the parsing boundary.

pub mod bit;
pub mod convert;
pub mod error;
pub mod layout;

pub use bit::{Bit, bits_from_digits, bits_to_string, parse_bits};
pub use convert::{
    BitTransform, PackedBytes, bits_to_bytes, bits_to_int, bytes_to_bits, int_to_bits, pack_bits,
};
pub use error::CodecError;
