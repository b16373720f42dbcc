use std::path::Path;

use super::block::{BlockOutput, DecodeBlock};
use super::error::RunError;
use super::layout;
use super::sink::MessageSink;
use super::source::{MessageSource, PduFileSource, PduFormat};
use crate::{DecodeReport, MessageStatus, MessageSummary, Totals, make_stub_report};

/// Decode every message from `source`, publishing results to `sink`.
///
/// A message that cannot be decoded is logged and dropped; it is recorded
/// in the report but does not affect the messages after it. Only source or
/// sink failures end the run early.
///
/// # Examples
/// ```
/// use linecode_core::line::LinePreset;
/// use linecode_core::pdu::{DecodeBlock, MemorySource, Message, Payload, run_decode};
/// use linecode_core::PipelineConfig;
///
/// let block = DecodeBlock::from_config(&PipelineConfig::from_preset(LinePreset::Manchester));
/// let source = MemorySource::from(vec![
///     Message::new(Payload::Text("oops".to_string())),
///     Message::bytes(vec![0x99]),
/// ]);
/// let mut sink = Vec::new();
/// let report = run_decode(&block, source, &mut sink).unwrap();
/// assert_eq!(report.totals.dropped, 1);
/// assert_eq!(sink, vec![Message::bytes(vec![0xa0])]);
/// ```
pub fn run_decode<S, K>(
    block: &DecodeBlock,
    mut source: S,
    sink: &mut K,
) -> Result<DecodeReport, RunError>
where
    S: MessageSource,
    K: MessageSink + ?Sized,
{
    let mut report = make_stub_report(block.pipeline().decoder());
    let mut sequence = 0u64;

    while let Some(message) = source.next_message()? {
        sequence += 1;
        let line = message
            .metadata(layout::LINE_KEY)
            .and_then(|value| value.parse::<usize>().ok());

        match block.handle(&message) {
            Ok(BlockOutput { message, summary }) => {
                tracing::debug!(
                    target: "linecode::pdu",
                    sequence,
                    input_bytes = summary.input_bytes,
                    output_bytes = summary.output_bytes,
                    desync_at = summary.desync_at,
                    "decoded message"
                );
                let output_hex = message.payload.as_bytes().map(hex::encode);
                sink.publish(message)?;
                report.messages.push(MessageSummary {
                    sequence,
                    status: MessageStatus::Decoded,
                    line,
                    decode: Some(summary),
                    output_hex,
                    error: None,
                });
            }
            Err(err) => {
                tracing::error!(
                    target: "linecode::pdu",
                    sequence,
                    line,
                    error = %err,
                    "dropping message"
                );
                report.messages.push(MessageSummary {
                    sequence,
                    status: MessageStatus::Dropped,
                    line,
                    decode: None,
                    output_hex: None,
                    error: Some(err.to_string()),
                });
            }
        }
    }

    report.totals = Totals::from_messages(&report.messages);
    Ok(report)
}

/// Open `path` in the given format and run [`run_decode`] over it.
///
/// # Examples
/// ```no_run
/// use std::path::Path;
///
/// use linecode_core::line::LinePreset;
/// use linecode_core::pdu::{DecodeBlock, Message, PduFormat, decode_file};
/// use linecode_core::PipelineConfig;
///
/// let block = DecodeBlock::from_config(&PipelineConfig::from_preset(LinePreset::Manchester));
/// let mut sink: Vec<Message> = Vec::new();
/// let report = decode_file(&block, Path::new("capture.hex"), PduFormat::Hex, &mut sink)?;
/// println!("decoded {} messages", report.totals.decoded);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn decode_file<K>(
    block: &DecodeBlock,
    path: &Path,
    format: PduFormat,
    sink: &mut K,
) -> Result<DecodeReport, RunError>
where
    K: MessageSink + ?Sized,
{
    let source = PduFileSource::open(path, format)?;
    run_decode(block, source, sink)
}

#[cfg(test)]
mod tests {
    use super::run_decode;
    use crate::PipelineConfig;
    use crate::line::LinePreset;
    use crate::pdu::{DecodeBlock, MemorySource, Message, Payload, RunError, SinkError};
    use crate::MessageStatus;

    fn block() -> DecodeBlock {
        DecodeBlock::from_config(&PipelineConfig::from_preset(LinePreset::Manchester))
    }

    #[test]
    fn bad_message_does_not_affect_following() {
        let source = MemorySource::from(vec![
            Message::bytes(vec![0x99]),
            Message::new(Payload::Int(1)).with_metadata("line", "2"),
            Message::bytes(vec![0x9f]),
        ]);
        let mut sink = Vec::new();
        let report = run_decode(&block(), source, &mut sink).unwrap();

        assert_eq!(
            sink,
            vec![Message::bytes(vec![0xa0]), Message::bytes(vec![0x80])]
        );
        assert_eq!(report.messages.len(), 3);
        assert_eq!(report.messages[1].status, MessageStatus::Dropped);
        assert_eq!(report.messages[1].line, Some(2));
        assert!(
            report.messages[1]
                .error
                .as_deref()
                .unwrap()
                .contains("got int")
        );
        assert_eq!(report.messages[2].sequence, 3);
        assert_eq!(report.messages[2].output_hex.as_deref(), Some("80"));
        assert_eq!(report.totals.received, 3);
        assert_eq!(report.totals.decoded, 2);
        assert_eq!(report.totals.dropped, 1);
        assert_eq!(report.totals.desynced, 1);
        assert!(report.has_dropped());
    }

    #[test]
    fn empty_source_gives_empty_report() {
        let mut sink: Vec<Message> = Vec::new();
        let report = run_decode(&block(), MemorySource::new(), &mut sink).unwrap();
        assert!(report.messages.is_empty());
        assert_eq!(report.totals.received, 0);
        assert_eq!(report.line_code.one_seq, "10");
        assert_eq!(report.line_code.zero_seq, "01");
    }

    struct FailingSink;

    impl crate::pdu::MessageSink for FailingSink {
        fn publish(&mut self, _message: Message) -> Result<(), SinkError> {
            Err(SinkError::Io(std::io::Error::other("disk full")))
        }
    }

    #[test]
    fn sink_failure_stops_run() {
        let source = MemorySource::from(vec![Message::bytes(vec![0x99])]);
        let err = run_decode(&block(), source, &mut FailingSink).unwrap_err();
        assert!(matches!(err, RunError::Sink(_)));
    }
}
