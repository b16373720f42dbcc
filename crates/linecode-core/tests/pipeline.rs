use std::io::Cursor;
use std::thread;

use linecode_core::codec::{Bit, bits_to_bytes, bytes_to_bits, parse_bits};
use linecode_core::line::{LineDecoder, LinePreset, Symbol, SymbolPattern};
use linecode_core::pdu::{DecodeBlock, HexLineSink, HexLineSource, run_decode};
use linecode_core::render::{DisplayMode, render_message};
use linecode_core::{PayloadPipeline, PipelineConfig, decode_payload};

fn pattern(symbol: Symbol, text: &str) -> SymbolPattern {
    SymbolPattern::parse(symbol, text).expect("valid pattern")
}

#[test]
fn manchester_payload_decodes_and_renders() {
    let one = pattern(Symbol::One, "10");
    let zero = pattern(Symbol::Zero, "01");
    let decoded = decode_payload(&[0xa5, 0x96], &one, &zero).expect("decode");
    assert_eq!(decoded, vec![0xc9]);
    assert_eq!(
        render_message(1, &decoded, DisplayMode::Hex),
        "Message    1, len=  1:\n0000: c9\n"
    );
}

#[test]
fn bits_survive_byte_round_trip() {
    let bits = parse_bits("1100 1001 0001 1111").expect("bits");
    let bytes = bits_to_bytes(&bits).expect("pack");
    assert_eq!(bytes, vec![0xc9, 0x1f]);
    assert_eq!(bytes_to_bits(&bytes), bits);
}

#[test]
fn pipeline_is_shareable_across_threads() {
    let pipeline = PayloadPipeline::new(LineDecoder::from_preset(LinePreset::Manchester));
    let inputs: Vec<Vec<u8>> = (0u8..8).map(|n| vec![0x99, 0xa5 ^ n, 0x96]).collect();
    let serial: Vec<Vec<u8>> = inputs
        .iter()
        .map(|input| pipeline.decode(input).expect("serial decode"))
        .collect();

    let shared = &pipeline;
    let parallel: Vec<Vec<u8>> = thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| scope.spawn(move || shared.decode(input).expect("parallel decode")))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("join"))
            .collect()
    });

    assert_eq!(serial, parallel);
}

#[test]
fn hex_text_in_hex_text_out() {
    let input = "# two frames\n99\n\nnot-hex\na596\n";
    let block = DecodeBlock::from_config(&PipelineConfig::from_preset(LinePreset::Manchester));
    let mut sink = HexLineSink::new(Vec::new());
    let report = run_decode(&block, HexLineSource::new(Cursor::new(input)), &mut sink)
        .expect("run decode");

    let out = String::from_utf8(sink.into_inner()).expect("utf8");
    assert_eq!(out, "a0\nc9\n");
    assert_eq!(report.totals.received, 3);
    assert_eq!(report.totals.dropped, 1);
    assert_eq!(report.messages[1].line, Some(4));
}

#[test]
fn encoded_payload_decodes_back() {
    let config = PipelineConfig::resolve(None, Some("1110"), Some("1000")).expect("config");
    let pipeline = PayloadPipeline::from_config(&config);
    let payload = b"OOK".to_vec();
    let encoded = pipeline.encode(&payload).expect("encode");
    assert_eq!(encoded.len(), payload.len() * 4);
    assert_eq!(pipeline.decode(&encoded).expect("decode"), payload);
}

#[test]
fn nrz_is_identity() {
    let decoder = LineDecoder::from_preset(LinePreset::Nrz);
    let bits = vec![Bit::One, Bit::Zero, Bit::Zero, Bit::One];
    assert_eq!(decoder.decode(&bits), bits);
}
