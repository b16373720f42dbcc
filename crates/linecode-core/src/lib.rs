//! Linecode core library: line-code payload decoding.
//!
//! A payload arrives as bytes, is unpacked into bits (MSB first), decoded
//! symbol by symbol against a configurable one/zero pattern pair, and
//! repacked into bytes. The layers are kept separate: `codec` holds the
//! pure bit/byte conversions, `line` the pattern matching, `pipeline` the
//! composition, `pdu` the message boundary with its sources and sinks, and
//! `render` the diagnostic hex/ASCII output. Only `pdu` performs I/O.
//!
//! Invariants:
//! - Decoding is deterministic and never mutates its input.
//! - On a tie the `one` pattern wins; a desync ends decoding quietly.
//! - Output bytes are zero-padded on the right when the bit count is short.
//!
//! Version française (résumé):
//! Cette crate décode des charges utiles codées en ligne : octets -> bits ->
//! décodage par motifs (un/zéro) -> octets. Les E/S restent dans `pdu`,
//! l'affichage de diagnostic dans `render`. Garanties : décodage
//! déterministe, priorité au motif « un », remplissage à droite par des zéros.
//!
//! # Examples
//! ```
//! use linecode_core::line::LinePreset;
//! use linecode_core::pdu::{DecodeBlock, MemorySource, Message, run_decode};
//! use linecode_core::PipelineConfig;
//!
//! let block = DecodeBlock::from_config(&PipelineConfig::from_preset(LinePreset::Manchester));
//! let source = MemorySource::from(vec![Message::bytes(vec![0x99])]);
//! let mut sink: Vec<Message> = Vec::new();
//! let report = run_decode(&block, source, &mut sink)?;
//! assert_eq!(report.totals.decoded, 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod codec;
pub mod config;
pub mod line;
pub mod pdu;
pub mod pipeline;
pub mod render;

pub use config::PipelineConfig;
pub use line::{LineDecoder, LinePreset};
pub use pipeline::{DecodeSummary, PayloadPipeline, PipelineError, decode_payload};
pub use render::DisplayMode;

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Result of a dispatch run, in message order.
///
/// # Examples
/// ```
/// use linecode_core::{LineDecoder, LinePreset, make_stub_report};
///
/// let report = make_stub_report(&LineDecoder::from_preset(LinePreset::Nrz));
/// assert_eq!(report.report_version, linecode_core::REPORT_VERSION);
/// assert!(report.messages.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// Patterns the run decoded with.
    pub line_code: LineCodeInfo,
    /// One entry per received message, in arrival order.
    pub messages: Vec<MessageSummary>,
    pub totals: Totals,
}

impl DecodeReport {
    pub fn has_dropped(&self) -> bool {
        self.totals.dropped > 0
    }
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Pattern pair as bit strings.
///
/// # Examples
/// ```
/// use linecode_core::LineCodeInfo;
///
/// let info = LineCodeInfo {
///     one_seq: "10".to_string(),
///     zero_seq: "01".to_string(),
/// };
/// assert_eq!(info.one_seq, "10");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineCodeInfo {
    pub one_seq: String,
    pub zero_seq: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Decoded,
    Dropped,
}

/// Outcome for a single message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageSummary {
    /// 1-based position in the run.
    pub sequence: u64,
    pub status: MessageStatus,
    /// Source line, for line-oriented inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decode: Option<DecodeSummary>,
    /// Decoded payload as lowercase hex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_hex: Option<String>,
    /// Why the message was dropped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Run-wide counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub received: u64,
    pub decoded: u64,
    pub dropped: u64,
    /// Decoded messages that stopped on a desync.
    pub desynced: u64,
    pub input_bytes: u64,
    pub output_bytes: u64,
}

impl Totals {
    /// Aggregate counters over message summaries.
    ///
    /// Byte counts cover decoded messages only.
    pub fn from_messages(messages: &[MessageSummary]) -> Self {
        let mut totals = Totals {
            received: messages.len() as u64,
            ..Totals::default()
        };
        for message in messages {
            match message.status {
                MessageStatus::Decoded => totals.decoded += 1,
                MessageStatus::Dropped => totals.dropped += 1,
            }
            if let Some(decode) = &message.decode {
                if decode.desync_at.is_some() {
                    totals.desynced += 1;
                }
                totals.input_bytes += decode.input_bytes as u64;
                totals.output_bytes += decode.output_bytes as u64;
            }
        }
        totals
    }
}

/// Build a report with base fields filled and no messages.
pub fn make_stub_report(decoder: &LineDecoder) -> DecodeReport {
    DecodeReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "linecode".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        line_code: LineCodeInfo {
            one_seq: decoder.one().to_string(),
            zero_seq: decoder.zero().to_string(),
        },
        messages: vec![],
        totals: Totals::default(),
    }
}
