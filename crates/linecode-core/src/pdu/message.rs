/// Opaque payload carried by a message.
///
/// Only `Bytes` payloads can be decoded; the other kinds exist so that a
/// boundary receiving arbitrary values can reject them explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Nil,
    Bytes(Vec<u8>),
    Text(String),
    Int(i64),
}

impl Payload {
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Nil => "nil",
            Payload::Bytes(_) => "bytes",
            Payload::Text(_) => "text",
            Payload::Int(_) => "int",
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Payload::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }
}

/// A PDU: key/value metadata plus a payload.
///
/// # Examples
/// ```
/// use linecode_core::pdu::{Message, Payload};
///
/// let msg = Message::bytes(vec![0x99]).with_metadata("line", "3");
/// assert_eq!(msg.metadata("line"), Some("3"));
/// assert_eq!(msg.payload, Payload::Bytes(vec![0x99]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub metadata: Vec<(String, String)>,
    pub payload: Payload,
}

impl Message {
    pub fn new(payload: Payload) -> Self {
        Self {
            metadata: Vec::new(),
            payload,
        }
    }

    pub fn bytes(data: Vec<u8>) -> Self {
        Self::new(Payload::Bytes(data))
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }

    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
