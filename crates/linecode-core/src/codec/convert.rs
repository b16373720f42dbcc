use super::bit::Bit;
use super::error::CodecError;
use super::layout;

/// Optional transforms applied before interpreting bits as an integer.
///
/// Inversion is applied first, then reversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitTransform {
    /// Flip every bit (0 <-> 1).
    pub invert: bool,
    /// Reverse bit order, turning the default MSB-first read into LSB-first.
    pub reverse: bool,
}

impl BitTransform {
    pub fn inverted() -> Self {
        Self {
            invert: true,
            reverse: false,
        }
    }

    pub fn reversed() -> Self {
        Self {
            invert: false,
            reverse: true,
        }
    }
}

/// Bytes produced by [`pack_bits`] plus the padding appended to the tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBytes {
    pub bytes: Vec<u8>,
    /// Zero bits appended to complete the final byte (0..=7).
    pub padding_bits: usize,
}

/// MSB-first representation of `value`, left-padded with zeros to `width`.
///
/// # Errors
/// Returns `CodecError::Encoding` when `value` needs more than `width` bits.
///
/// # Examples
/// ```
/// use linecode_core::codec::{bits_to_string, int_to_bits};
///
/// let bits = int_to_bits(5, 6).unwrap();
/// assert_eq!(bits_to_string(&bits), "000101");
/// ```
pub fn int_to_bits(value: u64, width: usize) -> Result<Vec<Bit>, CodecError> {
    let needed = (u64::BITS - value.leading_zeros()) as usize;
    if needed > width {
        return Err(CodecError::Encoding { value, width });
    }
    let mut bits = Vec::with_capacity(width);
    push_msb_first(&mut bits, value, width);
    Ok(bits)
}

/// Expand each byte into 8 bits, MSB first, in input order.
///
/// # Examples
/// ```
/// use linecode_core::codec::{bits_to_string, bytes_to_bits};
///
/// assert_eq!(bits_to_string(&bytes_to_bits(&[0x99])), "10011001");
/// ```
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<Bit> {
    let mut bits = Vec::with_capacity(bytes.len() * layout::BITS_PER_BYTE);
    for &byte in bytes {
        push_msb_first(&mut bits, u64::from(byte), layout::BITS_PER_BYTE);
    }
    bits
}

/// Interpret bits as an unsigned integer after the optional transforms.
///
/// # Errors
/// Returns `CodecError::TooWide` for sequences longer than 64 bits.
///
/// # Examples
/// ```
/// use linecode_core::codec::{BitTransform, bits_to_int, parse_bits};
///
/// let bits = parse_bits("0011").unwrap();
/// assert_eq!(bits_to_int(&bits, BitTransform::default()).unwrap(), 3);
/// assert_eq!(bits_to_int(&bits, BitTransform::reversed()).unwrap(), 12);
/// assert_eq!(bits_to_int(&bits, BitTransform::inverted()).unwrap(), 12);
/// ```
pub fn bits_to_int(bits: &[Bit], transform: BitTransform) -> Result<u64, CodecError> {
    if bits.len() > layout::MAX_INT_WIDTH {
        return Err(CodecError::TooWide {
            len: bits.len(),
            max: layout::MAX_INT_WIDTH,
        });
    }
    let apply = |bit: &Bit| {
        if transform.invert {
            bit.inverted()
        } else {
            *bit
        }
    };
    let value = if transform.reverse {
        fold_msb_first(bits.iter().rev().map(apply))
    } else {
        fold_msb_first(bits.iter().map(apply))
    };
    Ok(value)
}

/// Group bits into MSB-first bytes, zero-padding a short final chunk on the
/// right.
///
/// # Examples
/// ```
/// use linecode_core::codec::{pack_bits, parse_bits};
///
/// let packed = pack_bits(&parse_bits("1111").unwrap()).unwrap();
/// assert_eq!(packed.bytes, vec![0xF0]);
/// assert_eq!(packed.padding_bits, 4);
/// ```
pub fn pack_bits(bits: &[Bit]) -> Result<PackedBytes, CodecError> {
    let tail = bits.len() % layout::BITS_PER_BYTE;
    let padding_bits = if tail == 0 {
        0
    } else {
        layout::BITS_PER_BYTE - tail
    };

    let mut bytes = Vec::with_capacity(bits.len().div_ceil(layout::BITS_PER_BYTE));
    for chunk in bits.chunks(layout::BITS_PER_BYTE) {
        let value = if chunk.len() == layout::BITS_PER_BYTE {
            bits_to_int(chunk, BitTransform::default())?
        } else {
            let mut padded = chunk.to_vec();
            padded.resize(layout::BITS_PER_BYTE, Bit::Zero);
            bits_to_int(&padded, BitTransform::default())?
        };
        bytes.push(value as u8);
    }

    Ok(PackedBytes {
        bytes,
        padding_bits,
    })
}

/// Pack bits into bytes, logging a padding notice when the bit count is not
/// a multiple of 8.
///
/// Padding is lossy: the appended zero bits cannot be told apart from data
/// once packed.
pub fn bits_to_bytes(bits: &[Bit]) -> Result<Vec<u8>, CodecError> {
    let packed = pack_bits(bits)?;
    if packed.padding_bits > 0 {
        tracing::warn!(
            target: "linecode::codec",
            bits = bits.len(),
            padding_bits = packed.padding_bits,
            "non-multiple-of-8 bit count, zero-padding final byte"
        );
    }
    Ok(packed.bytes)
}

fn push_msb_first(out: &mut Vec<Bit>, value: u64, width: usize) {
    for shift in (0..width).rev() {
        let bit = shift < layout::MAX_INT_WIDTH && (value >> shift) & 1 == 1;
        out.push(Bit::from_bool(bit));
    }
}

fn fold_msb_first(bits: impl Iterator<Item = Bit>) -> u64 {
    bits.fold(0u64, |acc, bit| (acc << 1) | u64::from(bit.as_u8()))
}
