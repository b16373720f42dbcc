//! Line-code decoding.
//!
//! A line code maps each logical bit to a fixed symbol pattern (for example
//! Manchester: 1 = `10`, 0 = `01`). The decoder recovers logical bits by
//! greedy leftmost matching with a fixed tie-break (the `one` pattern is
//! always tried before the `zero` pattern) and stops quietly at the first
//! position where no pattern matches.
//!
//! Pattern pairs are validated only for emptiness. Choosing patterns that
//! cannot be confused with each other is the caller's job.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod pattern;

pub use decoder::{LineDecode, LineDecoder, decode_bits};
pub use encoder::LineEncoder;
pub use error::ConfigError;
pub use pattern::{LinePreset, Symbol, SymbolPattern};
