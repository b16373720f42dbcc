pub const COMMENT_PREFIX: char = '#';
pub const HEX_EXTENSIONS: &[&str] = &["hex", "txt"];

/// Metadata key holding the 1-based source line of a hex PDU.
pub const LINE_KEY: &str = "line";
