use std::io::{self, Write};

use super::DisplayMode;
use super::format::render_message;

/// Writes rendered messages to a sink, one `write_all` per message so
/// output from different messages never interleaves.
pub struct MessagePrinter<W: Write> {
    writer: W,
    mode: DisplayMode,
}

impl<W: Write> MessagePrinter<W> {
    pub fn new(writer: W, mode: DisplayMode) -> Self {
        Self { writer, mode }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// # Errors
    /// Returns the underlying I/O error when the write or flush fails.
    pub fn print(&mut self, sequence: u64, bytes: &[u8]) -> io::Result<()> {
        let text = render_message(sequence, bytes, self.mode);
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
