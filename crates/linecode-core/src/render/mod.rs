//! Diagnostic payload rendering.
//!
//! Renders payloads as 16-byte hex rows with 4-digit offsets, as an ASCII
//! line, or as interleaved ASCII/hex rows. Bytes outside the printable
//! ASCII range are shown as `~` so arbitrary payloads can be printed safely.
//! Rendering performs no decoding and has no state; the message sequence
//! number is supplied by the caller.

pub mod format;
pub mod layout;
pub mod printer;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use format::{render_message, render_payload};
pub use printer::MessagePrinter;

/// How payloads are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Hex,
    Ascii,
    Both,
}

impl DisplayMode {
    pub fn name(self) -> &'static str {
        match self {
            DisplayMode::Hex => "hex",
            DisplayMode::Ascii => "ascii",
            DisplayMode::Both => "both",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hex" => Ok(DisplayMode::Hex),
            "ascii" => Ok(DisplayMode::Ascii),
            "both" => Ok(DisplayMode::Both),
            _ => Err(format!(
                "unknown display mode '{s}' (expected hex, ascii or both)"
            )),
        }
    }
}
