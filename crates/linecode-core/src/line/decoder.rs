use super::error::ConfigError;
use super::pattern::{LinePreset, Symbol, SymbolPattern};
use crate::codec::Bit;

/// Greedy line-code decoder.
///
/// At each cursor position the `one` pattern is tried first, then the
/// `zero` pattern; the first full match emits its logical bit and advances
/// the cursor by the pattern length. Decoding stops at the first position
/// where neither pattern matches (including a tail shorter than both
/// patterns). There is no backtracking.
///
/// # Examples
/// ```
/// use linecode_core::codec::{bits_to_string, parse_bits};
/// use linecode_core::line::{LineDecoder, LinePreset};
///
/// let decoder = LineDecoder::from_preset(LinePreset::Manchester);
/// let decoded = decoder.decode(&parse_bits("1001 1001").unwrap());
/// assert_eq!(bits_to_string(&decoded), "1010");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDecoder {
    one: SymbolPattern,
    zero: SymbolPattern,
}

/// Decoded bits plus where matching stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDecode {
    pub bits: Vec<Bit>,
    /// Input bits covered by matched symbols.
    pub consumed: usize,
    /// Cursor position of the desync, `None` when the input was consumed
    /// completely.
    pub desync_at: Option<usize>,
}

impl LineDecoder {
    pub fn new(one: SymbolPattern, zero: SymbolPattern) -> Self {
        Self { one, zero }
    }

    /// # Errors
    /// Returns `ConfigError::EmptyPattern` when either pattern is empty.
    pub fn from_bits(one: Vec<Bit>, zero: Vec<Bit>) -> Result<Self, ConfigError> {
        let one = SymbolPattern::new(Symbol::One, one)?;
        let zero = SymbolPattern::new(Symbol::Zero, zero)?;
        Ok(Self::new(one, zero))
    }

    pub fn from_preset(preset: LinePreset) -> Self {
        let (one, zero) = preset.patterns();
        Self::new(one, zero)
    }

    pub fn one(&self) -> &SymbolPattern {
        &self.one
    }

    pub fn zero(&self) -> &SymbolPattern {
        &self.zero
    }

    pub fn decode(&self, bits: &[Bit]) -> Vec<Bit> {
        self.decode_traced(bits).bits
    }

    pub fn decode_traced(&self, bits: &[Bit]) -> LineDecode {
        let shortest = self.one.len().min(self.zero.len());
        let mut decoded = Vec::with_capacity(bits.len() / shortest);
        let mut cursor = 0;

        while let Some((bit, width)) = self.match_at(&bits[cursor..]) {
            decoded.push(bit);
            cursor += width;
        }

        let desync_at = (cursor < bits.len()).then_some(cursor);
        if let Some(position) = desync_at {
            tracing::debug!(
                target: "linecode::line",
                position,
                remaining = bits.len() - position,
                decoded = decoded.len(),
                "no symbol matches, stopping"
            );
        }

        LineDecode {
            bits: decoded,
            consumed: cursor,
            desync_at,
        }
    }

    fn match_at(&self, rest: &[Bit]) -> Option<(Bit, usize)> {
        // Order matters: `one` wins when both patterns match.
        [(Symbol::One, &self.one), (Symbol::Zero, &self.zero)]
            .into_iter()
            .find(|(_, pattern)| rest.starts_with(pattern.as_bits()))
            .map(|(symbol, pattern)| (symbol.bit(), pattern.len()))
    }
}

/// Decode `bits` with the given patterns; see [`LineDecoder`].
pub fn decode_bits(bits: &[Bit], one: &SymbolPattern, zero: &SymbolPattern) -> Vec<Bit> {
    LineDecoder::new(one.clone(), zero.clone()).decode(bits)
}
