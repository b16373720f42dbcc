use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use linecode_core::PipelineConfig;
use linecode_core::pdu::{DecodeBlock, Message, PduFormat, decode_file};

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let input = path.join("input.hex");
        let config = path.join("config.json");
        if !input.exists() || !config.exists() {
            continue;
        }
        let output = path.join("expected_report.json");
        regenerate_one(&config, &input, &output)?;
    }

    Ok(())
}

fn regenerate_one(config: &Path, input: &Path, output: &Path) -> Result<(), String> {
    let text = fs::read_to_string(config)
        .map_err(|err| format!("failed to read {}: {}", config.display(), err))?;
    let config: PipelineConfig = serde_json::from_str(&text)
        .map_err(|err| format!("invalid config {}: {}", config.display(), err))?;
    let block = DecodeBlock::from_config(&config);
    let mut sink: Vec<Message> = Vec::new();
    let report = decode_file(&block, input, PduFormat::Hex, &mut sink)
        .map_err(|err| format!("decode failed for {}: {}", input.display(), err))?;
    let mut json = serde_json::to_string_pretty(&report)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;
    json.push('\n');
    fs::write(output, json)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
