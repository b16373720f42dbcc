use thiserror::Error;

use super::pattern::Symbol;
use crate::codec::CodecError;

/// Errors raised while configuring a line code.
///
/// Decoding itself never fails: running out of matching symbols is a
/// desync, reported through `LineDecode::desync_at`.
///
/// # Examples
/// ```
/// use linecode_core::line::{ConfigError, Symbol, SymbolPattern};
///
/// let err = SymbolPattern::parse(Symbol::Zero, "").unwrap_err();
/// assert_eq!(err, ConfigError::EmptyPattern { symbol: Symbol::Zero });
/// assert_eq!(err.to_string(), "zero pattern must not be empty");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{symbol} pattern must not be empty")]
    EmptyPattern { symbol: Symbol },
    #[error("invalid {symbol} pattern '{input}': {source}")]
    InvalidPattern {
        symbol: Symbol,
        input: String,
        #[source]
        source: CodecError,
    },
    #[error("no {symbol} pattern given")]
    MissingPattern { symbol: Symbol },
    #[error("unknown line code preset '{name}'")]
    UnknownPreset { name: String },
}
