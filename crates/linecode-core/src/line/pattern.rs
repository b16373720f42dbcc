use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::codec::{Bit, bits_to_string, parse_bits};

/// Which logical bit a symbol pattern stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    One,
    Zero,
}

impl Symbol {
    pub fn bit(self) -> Bit {
        match self {
            Symbol::One => Bit::One,
            Symbol::Zero => Bit::Zero,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::One => f.write_str("one"),
            Symbol::Zero => f.write_str("zero"),
        }
    }
}

/// Non-empty line-code symbol, e.g. `10` for a Manchester logical 1.
///
/// The two patterns of a line code may have different lengths. Patterns are
/// not checked against each other: if one is a prefix of the other, the
/// `one` pattern wins because it is always tried first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct SymbolPattern {
    bits: Vec<Bit>,
}

impl SymbolPattern {
    /// # Errors
    /// Returns `ConfigError::EmptyPattern` when `bits` is empty.
    pub fn new(symbol: Symbol, bits: Vec<Bit>) -> Result<Self, ConfigError> {
        if bits.is_empty() {
            return Err(ConfigError::EmptyPattern { symbol });
        }
        Ok(Self { bits })
    }

    /// Parse a pattern from text such as `"10"` or `"1110_1000"`.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidPattern` for non-binary characters and
    /// `ConfigError::EmptyPattern` when no digits remain.
    ///
    /// # Examples
    /// ```
    /// use linecode_core::line::{Symbol, SymbolPattern};
    ///
    /// let pattern = SymbolPattern::parse(Symbol::One, "1,0").unwrap();
    /// assert_eq!(pattern.len(), 2);
    /// assert_eq!(pattern.to_string(), "10");
    /// ```
    pub fn parse(symbol: Symbol, text: &str) -> Result<Self, ConfigError> {
        let bits = parse_bits(text).map_err(|source| ConfigError::InvalidPattern {
            symbol,
            input: text.to_string(),
            source,
        })?;
        Self::new(symbol, bits)
    }

    pub(crate) fn from_static(bits: &[Bit]) -> Self {
        debug_assert!(!bits.is_empty());
        Self {
            bits: bits.to_vec(),
        }
    }

    pub fn as_bits(&self) -> &[Bit] {
        &self.bits
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.bits.len()
    }
}

impl fmt::Display for SymbolPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bits_to_string(&self.bits))
    }
}

impl From<SymbolPattern> for String {
    fn from(pattern: SymbolPattern) -> Self {
        pattern.to_string()
    }
}

/// Named line codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinePreset {
    /// G.E. Thomas convention: 1 = `10`, 0 = `01`.
    Manchester,
    /// IEEE 802.3 convention: 1 = `01`, 0 = `10`.
    ManchesterIeee,
    /// Identity code: 1 = `1`, 0 = `0`.
    Nrz,
}

impl LinePreset {
    pub const ALL: [LinePreset; 3] = [
        LinePreset::Manchester,
        LinePreset::ManchesterIeee,
        LinePreset::Nrz,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LinePreset::Manchester => "manchester",
            LinePreset::ManchesterIeee => "manchester-ieee",
            LinePreset::Nrz => "nrz",
        }
    }

    /// `(one, zero)` patterns for this preset.
    pub fn patterns(self) -> (SymbolPattern, SymbolPattern) {
        use Bit::{One, Zero};
        let (one, zero): (&[Bit], &[Bit]) = match self {
            LinePreset::Manchester => (&[One, Zero], &[Zero, One]),
            LinePreset::ManchesterIeee => (&[Zero, One], &[One, Zero]),
            LinePreset::Nrz => (&[One], &[Zero]),
        };
        (SymbolPattern::from_static(one), SymbolPattern::from_static(zero))
    }
}

impl fmt::Display for LinePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LinePreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        LinePreset::ALL
            .into_iter()
            .find(|preset| preset.name() == wanted)
            .ok_or(ConfigError::UnknownPreset {
                name: s.to_string(),
            })
    }
}
