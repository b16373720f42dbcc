//! Message-passing boundary around the decode pipeline.
//!
//! A PDU is a metadata list plus an opaque payload. Sources yield PDUs,
//! the [`DecodeBlock`] turns each byte payload into a decoded byte payload,
//! and sinks publish the results. Payloads of any other kind are rejected
//! per message: the dispatch loop logs them at error level, records them in
//! the report and moves on.
//!
//! Sources and sinks are plain traits so that file, in-memory and test
//! adapters share one dispatch loop.

pub mod block;
pub mod dispatch;
pub mod error;
pub mod layout;
pub mod message;
pub mod sink;
pub mod source;

pub use block::{BlockOutput, DecodeBlock};
pub use dispatch::{decode_file, run_decode};
pub use error::{BoundaryError, RunError, SinkError, SourceError};
pub use message::{Message, Payload};
pub use sink::{HexLineSink, MessageSink};
pub use source::{
    HexLineSource, MemorySource, MessageSource, PduFileSource, PduFormat, RawSource,
    parse_hex_line,
};
