//! End-to-end payload decode: bytes -> bits -> line decode -> bytes.
//!
//! The pipeline holds only immutable configuration, so one instance can be
//! shared across threads and called with distinct buffers concurrently.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::{CodecError, bits_to_bytes, bytes_to_bits, layout::BITS_PER_BYTE};
use crate::config::PipelineConfig;
use crate::line::{LineDecoder, LineEncoder, SymbolPattern};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Per-payload decode statistics.
///
/// # Examples
/// ```
/// use linecode_core::line::{LineDecoder, LinePreset};
/// use linecode_core::pipeline::PayloadPipeline;
///
/// let pipeline = PayloadPipeline::new(LineDecoder::from_preset(LinePreset::Manchester));
/// let output = pipeline.decode_detailed(&[0x9f]).unwrap();
/// assert_eq!(output.bytes, vec![0x80]);
/// assert_eq!(output.summary.desync_at, Some(4));
/// assert_eq!(output.summary.padding_bits, 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeSummary {
    pub input_bytes: usize,
    pub input_bits: usize,
    /// Input bits covered by matched symbols.
    pub consumed_bits: usize,
    /// Logical bits recovered.
    pub decoded_bits: usize,
    pub output_bytes: usize,
    /// Zero bits appended to complete the last output byte.
    pub padding_bits: usize,
    /// Bit offset where no symbol matched, when input was left over.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desync_at: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    pub bytes: Vec<u8>,
    pub summary: DecodeSummary,
}

#[derive(Debug, Clone)]
pub struct PayloadPipeline {
    decoder: LineDecoder,
    encoder: LineEncoder,
}

impl PayloadPipeline {
    pub fn new(decoder: LineDecoder) -> Self {
        let encoder = LineEncoder::from(&decoder);
        Self { decoder, encoder }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(LineDecoder::new(
            config.one_seq.clone(),
            config.zero_seq.clone(),
        ))
    }

    pub fn decoder(&self) -> &LineDecoder {
        &self.decoder
    }

    /// Decode one complete payload.
    ///
    /// A desync truncates the output; it is not an error.
    ///
    /// # Examples
    /// ```
    /// use linecode_core::line::{LineDecoder, LinePreset};
    /// use linecode_core::pipeline::PayloadPipeline;
    ///
    /// let pipeline = PayloadPipeline::new(LineDecoder::from_preset(LinePreset::Manchester));
    /// assert_eq!(pipeline.decode(&[0b1001_1001]).unwrap(), vec![0xA0]);
    /// ```
    pub fn decode(&self, input: &[u8]) -> Result<Vec<u8>, PipelineError> {
        Ok(self.decode_detailed(input)?.bytes)
    }

    pub fn decode_detailed(&self, input: &[u8]) -> Result<PipelineOutput, PipelineError> {
        let bits = bytes_to_bits(input);
        let line = self.decoder.decode_traced(&bits);
        let bytes = bits_to_bytes(&line.bits)?;

        let summary = DecodeSummary {
            input_bytes: input.len(),
            input_bits: bits.len(),
            consumed_bits: line.consumed,
            decoded_bits: line.bits.len(),
            output_bytes: bytes.len(),
            padding_bits: bytes.len() * BITS_PER_BYTE - line.bits.len(),
            desync_at: line.desync_at,
        };
        Ok(PipelineOutput { bytes, summary })
    }

    /// Line-encode a payload: every input bit becomes its symbol pattern,
    /// and the resulting line bits are packed (zero-padded) into bytes.
    pub fn encode(&self, input: &[u8]) -> Result<Vec<u8>, PipelineError> {
        let line = self.encoder.encode(&bytes_to_bits(input));
        Ok(bits_to_bytes(&line)?)
    }
}

/// Decode `input` with the given patterns; see [`PayloadPipeline::decode`].
pub fn decode_payload(
    input: &[u8],
    one: &SymbolPattern,
    zero: &SymbolPattern,
) -> Result<Vec<u8>, PipelineError> {
    PayloadPipeline::new(LineDecoder::new(one.clone(), zero.clone())).decode(input)
}
