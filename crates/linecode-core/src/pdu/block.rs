use super::error::BoundaryError;
use super::message::Message;
use crate::config::PipelineConfig;
use crate::pipeline::{DecodeSummary, PayloadPipeline};

/// Decoded message plus its statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockOutput {
    pub message: Message,
    pub summary: DecodeSummary,
}

/// Message handler wrapping a [`PayloadPipeline`]: one byte payload in, one
/// byte payload out, no metadata carried over.
///
/// # Examples
/// ```
/// use linecode_core::line::LinePreset;
/// use linecode_core::pdu::{DecodeBlock, Message, Payload};
/// use linecode_core::PipelineConfig;
///
/// let block = DecodeBlock::from_config(&PipelineConfig::from_preset(LinePreset::Manchester));
/// let out = block.handle(&Message::bytes(vec![0x99])).unwrap();
/// assert_eq!(out.message.payload, Payload::Bytes(vec![0xa0]));
/// assert!(block.handle(&Message::new(Payload::Nil)).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct DecodeBlock {
    pipeline: PayloadPipeline,
}

impl DecodeBlock {
    pub fn new(pipeline: PayloadPipeline) -> Self {
        Self { pipeline }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(PayloadPipeline::from_config(config))
    }

    pub fn pipeline(&self) -> &PayloadPipeline {
        &self.pipeline
    }

    /// # Errors
    /// `BoundaryError::UnsupportedPayloadType` when the payload is not a
    /// byte buffer; pipeline errors are passed through.
    pub fn handle(&self, message: &Message) -> Result<BlockOutput, BoundaryError> {
        let bytes = message
            .payload
            .as_bytes()
            .ok_or(BoundaryError::UnsupportedPayloadType {
                found: message.payload.kind(),
            })?;
        let output = self.pipeline.decode_detailed(bytes)?;
        Ok(BlockOutput {
            message: Message::bytes(output.bytes),
            summary: output.summary,
        })
    }
}
