use std::fmt;

use super::error::CodecError;
use super::layout;

/// A single binary digit.
///
/// Bit sequences are plain `Vec<Bit>`, so every element is 0 or 1 by
/// construction; the only place an out-of-range value can appear is when
/// converting from untyped digits or text (see [`bits_from_digits`] and
/// [`parse_bits`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    pub fn from_bool(value: bool) -> Self {
        if value { Bit::One } else { Bit::Zero }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }

    pub fn inverted(self) -> Self {
        match self {
            Bit::Zero => Bit::One,
            Bit::One => Bit::Zero,
        }
    }
}

impl From<Bit> for u8 {
    fn from(bit: Bit) -> Self {
        bit.as_u8()
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        Bit::from_bool(value)
    }
}

impl TryFrom<u8> for Bit {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Bit::Zero),
            1 => Ok(Bit::One),
            other => Err(CodecError::Conversion {
                index: 0,
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bit::Zero => f.write_str("0"),
            Bit::One => f.write_str("1"),
        }
    }
}

/// Convert untyped 0/1 digits into bits.
///
/// # Errors
/// Returns `CodecError::Conversion` with the offending index when a digit
/// is neither 0 nor 1.
///
/// # Examples
/// ```
/// use linecode_core::codec::{Bit, bits_from_digits};
///
/// let bits = bits_from_digits(&[1, 0, 1]).unwrap();
/// assert_eq!(bits, vec![Bit::One, Bit::Zero, Bit::One]);
/// assert!(bits_from_digits(&[1, 2]).is_err());
/// ```
pub fn bits_from_digits(digits: &[u8]) -> Result<Vec<Bit>, CodecError> {
    digits
        .iter()
        .enumerate()
        .map(|(index, &digit)| {
            Bit::try_from(digit).map_err(|_| CodecError::Conversion {
                index,
                value: digit.to_string(),
            })
        })
        .collect()
}

/// Parse a textual bit string such as `"1011"`, `"1,0"` or `"1110_1000"`.
///
/// Whitespace, `_` and `,` are treated as separators. The reported index is
/// the character position in `text`.
///
/// # Examples
/// ```
/// use linecode_core::codec::{Bit, parse_bits};
///
/// assert_eq!(parse_bits("1_0").unwrap(), vec![Bit::One, Bit::Zero]);
/// assert!(parse_bits("10x").is_err());
/// ```
pub fn parse_bits(text: &str) -> Result<Vec<Bit>, CodecError> {
    let mut bits = Vec::with_capacity(text.len());
    for (index, ch) in text.chars().enumerate() {
        match ch {
            '0' => bits.push(Bit::Zero),
            '1' => bits.push(Bit::One),
            c if c.is_whitespace() || layout::BIT_SEPARATORS.contains(&c) => {}
            other => {
                return Err(CodecError::Conversion {
                    index,
                    value: other.to_string(),
                });
            }
        }
    }
    Ok(bits)
}

/// Render bits as a compact `0`/`1` string.
pub fn bits_to_string(bits: &[Bit]) -> String {
    bits.iter().map(|bit| bit.to_string()).collect()
}
