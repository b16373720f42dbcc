use std::fs;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("linecode"));
    cmd.env_remove("LINECODE_LOG");
    cmd
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn sample_capture() -> std::path::PathBuf {
    repo_root()
        .join("tests")
        .join("golden")
        .join("manchester")
        .join("input.hex")
}

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout")
}

#[test]
fn help_lists_subcommands() {
    for sub in ["decode", "encode", "dump"] {
        cmd().arg(sub).arg("--help").assert().success();
    }
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("decode").and(contains("Examples:")));
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.hex");
    let output = temp.path().join("out.hex");

    cmd()
        .arg("decode")
        .arg(missing)
        .arg("--preset")
        .arg("manchester")
        .arg("-o")
        .arg(output)
        .assert()
        .code(2)
        .stderr(contains("error: input file not found").and(contains("hint:")));
}

#[test]
fn decode_to_stdout_skips_dropped_messages() {
    let assert = cmd()
        .arg("decode")
        .arg(sample_capture())
        .arg("--preset")
        .arg("manchester")
        .arg("--stdout")
        .assert()
        .success();
    assert_eq!(stdout_of(&assert), "a0\nc9\n80\n");
}

#[test]
fn explicit_patterns_match_preset() {
    let assert = cmd()
        .arg("decode")
        .arg(sample_capture())
        .arg("--one")
        .arg("10")
        .arg("--zero")
        .arg("01")
        .arg("--stdout")
        .assert()
        .success();
    assert_eq!(stdout_of(&assert), "a0\nc9\n80\n");
}

#[test]
fn missing_line_code_shows_hint() {
    cmd()
        .arg("decode")
        .arg(sample_capture())
        .arg("--one")
        .arg("10")
        .arg("--stdout")
        .assert()
        .code(2)
        .stderr(contains("no zero pattern given").and(contains("hint:")));
}

#[test]
fn invalid_pattern_is_rejected() {
    cmd()
        .arg("decode")
        .arg(sample_capture())
        .arg("--one")
        .arg("12")
        .arg("--zero")
        .arg("01")
        .arg("--stdout")
        .assert()
        .code(2)
        .stderr(contains("invalid one pattern '12'").and(contains("strings of 0 and 1")));
}

#[test]
fn stdout_and_output_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("out.hex");

    cmd()
        .arg("decode")
        .arg(sample_capture())
        .arg("--preset")
        .arg("manchester")
        .arg("--stdout")
        .arg("-o")
        .arg(output)
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn output_writes_file_and_reports_ok() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("nested").join("out.hex");

    cmd()
        .arg("decode")
        .arg(sample_capture())
        .arg("--preset")
        .arg("manchester")
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stderr(contains("OK: 3 decoded, 1 dropped"));
    assert_eq!(fs::read_to_string(output).expect("output"), "a0\nc9\n80\n");
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("out.hex");

    cmd()
        .arg("decode")
        .arg(sample_capture())
        .arg("--preset")
        .arg("manchester")
        .arg("-o")
        .arg(output)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(contains("OK:").not());
}

#[test]
fn report_is_written_as_json() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("decode")
        .arg(sample_capture())
        .arg("--preset")
        .arg("manchester")
        .arg("--stdout")
        .arg("--report")
        .arg(&report)
        .arg("--pretty")
        .assert()
        .success();

    let text = fs::read_to_string(&report).expect("report");
    assert!(text.contains('\n'));
    let value: Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(value["line_code"]["one_seq"], "10");
    assert_eq!(value["totals"]["dropped"], 1);
    assert_eq!(value["messages"][3]["status"], "dropped");
}

#[test]
fn strict_fails_when_messages_dropped() {
    cmd()
        .arg("decode")
        .arg(sample_capture())
        .arg("--preset")
        .arg("manchester")
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .code(2)
        .stderr(contains("1 message(s) dropped"));
}

#[test]
fn strict_passes_on_clean_input() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("clean.hex");
    fs::write(&input, "99\na596\n").expect("write input");

    cmd()
        .arg("decode")
        .arg(&input)
        .arg("--preset")
        .arg("manchester")
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .success();
}

#[test]
fn display_renders_decoded_payloads_on_stderr() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("one.hex");
    fs::write(&input, "a596\n").expect("write input");

    let assert = cmd()
        .arg("decode")
        .arg(&input)
        .arg("--preset")
        .arg("manchester")
        .arg("--stdout")
        .arg("--display")
        .arg("hex")
        .assert()
        .success()
        .stderr(contains("Message    1, len=  1:\n0000: c9\n"));
    assert_eq!(stdout_of(&assert), "c9\n");
}

#[test]
fn config_file_with_pattern_override() {
    let temp = TempDir::new().expect("tempdir");
    let config = temp.path().join("line.json");
    let input = temp.path().join("ook.hex");
    fs::write(&config, r#"{"one_seq": "1110", "zero_seq": "0000"}"#).expect("write config");
    fs::write(&input, "e8 8e\n").expect("write input");

    let assert = cmd()
        .arg("decode")
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .arg("--zero")
        .arg("1000")
        .arg("--stdout")
        .assert()
        .success();
    assert_eq!(stdout_of(&assert), "90\n");
}

#[test]
fn invalid_config_file_shows_hint() {
    let temp = TempDir::new().expect("tempdir");
    let config = temp.path().join("line.json");
    fs::write(&config, r#"{"preset": "manchester", "baud": 9600}"#).expect("write config");

    cmd()
        .arg("decode")
        .arg(sample_capture())
        .arg("--config")
        .arg(&config)
        .arg("--stdout")
        .assert()
        .code(2)
        .stderr(contains("invalid config file").and(contains("hint:")));
}

#[test]
fn raw_input_is_one_message() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("frame.bin");
    fs::write(&input, [0xa5u8, 0x96]).expect("write input");

    let assert = cmd()
        .arg("decode")
        .arg(&input)
        .arg("--preset")
        .arg("manchester")
        .arg("--stdout")
        .assert()
        .success();
    assert_eq!(stdout_of(&assert), "c9\n");
}

#[test]
fn encode_then_decode_restores_payload() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("plain.hex");
    let encoded = temp.path().join("encoded.hex");
    let decoded = temp.path().join("decoded.hex");
    fs::write(&input, "68656c6c6f\n").expect("write input");

    cmd()
        .arg("encode")
        .arg(&input)
        .arg("--preset")
        .arg("manchester")
        .arg("-o")
        .arg(&encoded)
        .assert()
        .success()
        .stderr(contains("OK: 1 encoded, 0 skipped"));
    cmd()
        .arg("decode")
        .arg(&encoded)
        .arg("--preset")
        .arg("manchester")
        .arg("-o")
        .arg(&decoded)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(decoded).expect("decoded"), "68656c6c6f\n");
}

#[test]
fn dump_renders_ascii() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("text.hex");
    fs::write(&input, "4869\n00\n").expect("write input");

    let assert = cmd()
        .arg("dump")
        .arg(&input)
        .arg("--display")
        .arg("ascii")
        .assert()
        .success();
    assert_eq!(
        stdout_of(&assert),
        "Message    1, len=  2:  ASCII: Hi\nMessage    2, len=  1:  ASCII: ~\n"
    );
}

#[test]
fn partial_byte_prints_padding_notice() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("short.hex");
    fs::write(&input, "99\n").expect("write input");

    let assert = cmd()
        .arg("decode")
        .arg(&input)
        .arg("--preset")
        .arg("manchester")
        .arg("--stdout")
        .assert()
        .success()
        .stderr(
            contains("zero-padding final byte")
                .and(contains("padding_bits=4"))
                .and(contains("\u{1b}[").not()),
        );
    assert_eq!(stdout_of(&assert), "a0\n");
}

#[test]
fn quiet_hides_padding_notice() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("short.hex");
    fs::write(&input, "99\n").expect("write input");

    cmd()
        .arg("decode")
        .arg(&input)
        .arg("--preset")
        .arg("manchester")
        .arg("--stdout")
        .arg("--quiet")
        .assert()
        .success()
        .stderr(contains("zero-padding").not());
}

#[test]
fn glob_with_multiple_matches_fails() {
    let temp = TempDir::new().expect("tempdir");
    fs::write(temp.path().join("a.hex"), "99\n").expect("write a");
    fs::write(temp.path().join("b.hex"), "99\n").expect("write b");
    let pattern = temp.path().join("*.hex");

    cmd()
        .arg("dump")
        .arg(pattern)
        .assert()
        .code(2)
        .stderr(contains("multiple files match pattern").and(contains("hint:")));
}

#[test]
fn glob_with_single_match_resolves() {
    let temp = TempDir::new().expect("tempdir");
    fs::write(temp.path().join("only.hex"), "99\n").expect("write input");
    let pattern = temp.path().join("on*.hex");

    let assert = cmd()
        .arg("decode")
        .arg(pattern)
        .arg("--preset")
        .arg("manchester")
        .arg("--stdout")
        .assert()
        .success();
    assert_eq!(stdout_of(&assert), "a0\n");
}

#[test]
fn output_must_differ_from_input() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("same.hex");
    fs::write(&input, "99\n").expect("write input");

    cmd()
        .arg("decode")
        .arg(&input)
        .arg("--preset")
        .arg("manchester")
        .arg("-o")
        .arg(&input)
        .assert()
        .code(2)
        .stderr(contains("output path must differ from input"));
    assert_eq!(fs::read_to_string(&input).expect("input"), "99\n");
}
