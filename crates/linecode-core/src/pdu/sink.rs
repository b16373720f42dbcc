use std::io::Write;

use super::error::SinkError;
use super::message::Message;

/// Receives published PDUs.
pub trait MessageSink {
    fn publish(&mut self, message: Message) -> Result<(), SinkError>;
}

impl MessageSink for Vec<Message> {
    fn publish(&mut self, message: Message) -> Result<(), SinkError> {
        self.push(message);
        Ok(())
    }
}

/// Writes each byte payload as one line of lowercase hex.
///
/// An empty payload produces an empty line, which a `HexLineSource` skips
/// when reading the output back.
pub struct HexLineSink<W: Write> {
    writer: W,
}

impl<W: Write> HexLineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MessageSink for HexLineSink<W> {
    fn publish(&mut self, message: Message) -> Result<(), SinkError> {
        let bytes = message
            .payload
            .as_bytes()
            .ok_or(SinkError::UnsupportedPayloadType {
                found: message.payload.kind(),
            })?;
        writeln!(self.writer, "{}", hex::encode(bytes))?;
        Ok(())
    }
}
