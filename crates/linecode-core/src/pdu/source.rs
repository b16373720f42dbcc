use std::collections::VecDeque;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Read};
use std::path::Path;
use std::str::FromStr;

use super::error::SourceError;
use super::layout;
use super::message::{Message, Payload};

/// Anything that yields PDUs one at a time.
pub trait MessageSource {
    fn next_message(&mut self) -> Result<Option<Message>, SourceError>;
}

/// On-disk PDU encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PduFormat {
    /// One PDU per line as hex digits; blank lines and `#` comments skipped.
    Hex,
    /// The whole file is a single PDU.
    Raw,
}

impl PduFormat {
    /// Guess the format from the file extension (`.hex`/`.txt` are hex,
    /// everything else raw).
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        if layout::HEX_EXTENSIONS.contains(&ext.as_str()) {
            PduFormat::Hex
        } else {
            PduFormat::Raw
        }
    }
}

impl fmt::Display for PduFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PduFormat::Hex => f.write_str("hex"),
            PduFormat::Raw => f.write_str("raw"),
        }
    }
}

impl FromStr for PduFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hex" => Ok(PduFormat::Hex),
            "raw" | "bin" => Ok(PduFormat::Raw),
            _ => Err(format!("unknown PDU format '{s}' (expected hex or raw)")),
        }
    }
}

/// In-memory queue of messages, e.g. for tests or an upstream producer.
#[derive(Debug, Default)]
pub struct MemorySource {
    queue: VecDeque<Message>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.queue.push_back(message);
    }
}

impl From<Vec<Message>> for MemorySource {
    fn from(messages: Vec<Message>) -> Self {
        Self {
            queue: messages.into(),
        }
    }
}

impl MessageSource for MemorySource {
    fn next_message(&mut self) -> Result<Option<Message>, SourceError> {
        Ok(self.queue.pop_front())
    }
}

/// Reads one PDU per line of hex text.
///
/// Lines that are not valid hex are still yielded, as `Payload::Text`, so
/// the decode boundary can report and drop them. Each message carries its
/// 1-based line number under the `line` metadata key.
pub struct HexLineSource<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: BufRead> HexLineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl<R: BufRead> MessageSource for HexLineSource<R> {
    fn next_message(&mut self) -> Result<Option<Message>, SourceError> {
        for line in self.lines.by_ref() {
            let line = line?;
            self.line_no += 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with(layout::COMMENT_PREFIX) {
                continue;
            }
            let message = parse_hex_line(trimmed)
                .with_metadata(layout::LINE_KEY, self.line_no.to_string());
            return Ok(Some(message));
        }
        Ok(None)
    }
}

/// Parse a hex line (whitespace between digits allowed) into a message.
///
/// # Examples
/// ```
/// use linecode_core::pdu::{Payload, parse_hex_line};
///
/// assert_eq!(parse_hex_line("99 9f").payload, Payload::Bytes(vec![0x99, 0x9f]));
/// assert_eq!(parse_hex_line("hello").payload.kind(), "text");
/// ```
pub fn parse_hex_line(line: &str) -> Message {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    match hex::decode(&compact) {
        Ok(bytes) => Message::bytes(bytes),
        Err(_) => Message::new(Payload::Text(line.to_string())),
    }
}

/// Yields the entire reader content as a single PDU.
#[derive(Debug)]
pub struct RawSource {
    pending: Option<Vec<u8>>,
}

impl RawSource {
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, SourceError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(Self {
            pending: Some(data),
        })
    }
}

impl MessageSource for RawSource {
    fn next_message(&mut self) -> Result<Option<Message>, SourceError> {
        Ok(self.pending.take().map(Message::bytes))
    }
}

/// File-backed PDU source in either format.
pub struct PduFileSource {
    inner: FileReader,
}

enum FileReader {
    Hex(HexLineSource<BufReader<File>>),
    Raw(RawSource),
}

impl PduFileSource {
    pub fn open(path: &Path, format: PduFormat) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        let inner = match format {
            PduFormat::Hex => FileReader::Hex(HexLineSource::new(BufReader::new(file))),
            PduFormat::Raw => FileReader::Raw(RawSource::from_reader(file)?),
        };
        Ok(Self { inner })
    }
}

impl MessageSource for PduFileSource {
    fn next_message(&mut self) -> Result<Option<Message>, SourceError> {
        match &mut self.inner {
            FileReader::Hex(source) => source.next_message(),
            FileReader::Raw(source) => source.next_message(),
        }
    }
}
