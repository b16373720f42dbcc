use super::decoder::LineDecoder;
use super::pattern::{LinePreset, SymbolPattern};
use crate::codec::Bit;

/// Maps logical bits onto line-code symbols; the inverse of [`LineDecoder`]
/// for pattern pairs where neither pattern is a prefix of the other.
///
/// # Examples
/// ```
/// use linecode_core::codec::{bits_to_string, parse_bits};
/// use linecode_core::line::{LineEncoder, LinePreset};
///
/// let encoder = LineEncoder::from_preset(LinePreset::Manchester);
/// let line = encoder.encode(&parse_bits("1010").unwrap());
/// assert_eq!(bits_to_string(&line), "10011001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEncoder {
    one: SymbolPattern,
    zero: SymbolPattern,
}

impl LineEncoder {
    pub fn new(one: SymbolPattern, zero: SymbolPattern) -> Self {
        Self { one, zero }
    }

    pub fn from_preset(preset: LinePreset) -> Self {
        let (one, zero) = preset.patterns();
        Self::new(one, zero)
    }

    pub fn encode(&self, logical: &[Bit]) -> Vec<Bit> {
        let ones = logical.iter().filter(|bit| **bit == Bit::One).count();
        let zeros = logical.len() - ones;
        let mut line = Vec::with_capacity(ones * self.one.len() + zeros * self.zero.len());
        for bit in logical {
            let symbol = match bit {
                Bit::One => &self.one,
                Bit::Zero => &self.zero,
            };
            line.extend_from_slice(symbol.as_bits());
        }
        line
    }
}

impl From<&LineDecoder> for LineEncoder {
    fn from(decoder: &LineDecoder) -> Self {
        LineEncoder::new(decoder.one().clone(), decoder.zero().clone())
    }
}
