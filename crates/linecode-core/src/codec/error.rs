use thiserror::Error;

/// Errors returned by bit/byte/integer conversions.
///
/// # Examples
/// ```
/// use linecode_core::codec::{CodecError, int_to_bits};
///
/// let err = int_to_bits(256, 8).unwrap_err();
/// assert!(matches!(err, CodecError::Encoding { value: 256, width: 8 }));
/// assert!(err.to_string().contains("does not fit"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("value {value} does not fit in {width} bits")]
    Encoding { value: u64, width: usize },
    #[error("invalid bit value '{value}' at index {index}: expected 0 or 1")]
    Conversion { index: usize, value: String },
    #[error("bit sequence too wide: {len} bits, max {max}")]
    TooWide { len: usize, max: usize },
}
