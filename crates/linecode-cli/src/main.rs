mod logging;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use glob::glob;
use linecode_core::line::{ConfigError, LinePreset, Symbol, SymbolPattern};
use linecode_core::pdu::{
    DecodeBlock, HexLineSink, Message, MessageSink, MessageSource, PduFileSource, PduFormat,
    SinkError, decode_file,
};
use linecode_core::render::{DisplayMode, MessagePrinter};
use linecode_core::{DecodeReport, PayloadPipeline, PipelineConfig};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("LINECODE_BUILD_COMMIT"),
    " ",
    env!("LINECODE_BUILD_DATE"),
    ")"
);

const EXAMPLES: &str = "Examples:\n  linecode decode capture.hex --preset manchester -o decoded.hex\n  linecode decode frame.bin --format raw --one 1110 --zero 1000 --stdout --display both\n  linecode decode capture.hex --config line.json -o out.hex --report report.json --strict\n  linecode encode payload.hex --preset manchester --stdout\n  linecode dump decoded.hex --display ascii";

#[derive(Parser, Debug)]
#[command(name = "linecode")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decode line-coded payloads (Manchester, NRZ or custom symbol patterns).",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// Increase log verbosity (warnings by default, -v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode every PDU of a file and write the decoded payloads as hex lines.
    Decode(DecodeArgs),
    /// Line-encode every PDU of a file (the inverse of decode).
    Encode(EncodeArgs),
    /// Render the PDUs of a file as hex and/or ASCII without decoding.
    Dump(DumpArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input PDU file (a glob pattern must match exactly one file)
    input: PathBuf,

    /// Input format: hex (one PDU per line) or raw (whole file is one PDU).
    /// Guessed from the extension when omitted.
    #[arg(long, value_name = "FORMAT")]
    format: Option<PduFormat>,
}

#[derive(Args, Debug)]
struct LineCodeArgs {
    /// Bit pattern of a logical 1, e.g. 10
    #[arg(long, value_name = "BITS")]
    one: Option<String>,

    /// Bit pattern of a logical 0, e.g. 01
    #[arg(long, value_name = "BITS")]
    zero: Option<String>,

    /// Named line code: manchester, manchester-ieee or nrz
    #[arg(long, value_name = "NAME", conflicts_with = "config")]
    preset: Option<LinePreset>,

    /// JSON pipeline config; --one/--zero override its patterns
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output path (hex lines)
    #[arg(short = 'o', long, value_name = "OUT", required_unless_present = "stdout")]
    output: Option<PathBuf>,

    /// Write output to stdout
    #[arg(long, conflicts_with = "output")]
    stdout: bool,
}

#[derive(Args, Debug)]
struct DecodeArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    line_code: LineCodeArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// Write a JSON decode report
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long, requires = "report")]
    pretty: bool,

    /// Render each decoded payload on stderr: hex, ascii or both
    #[arg(long, value_name = "MODE")]
    display: Option<DisplayMode>,

    /// Exit with a non-zero code if any message was dropped
    #[arg(long)]
    strict: bool,
}

#[derive(Args, Debug)]
struct EncodeArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    line_code: LineCodeArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct DumpArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Rendering: hex, ascii or both
    #[arg(long, value_name = "MODE", default_value_t = DisplayMode::Hex)]
    display: DisplayMode,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(logging::LogLevel::from_flags(cli.verbose, cli.quiet));

    let result = match cli.command {
        Commands::Decode(args) => cmd_decode(args, cli.quiet),
        Commands::Encode(args) => cmd_encode(args, cli.quiet),
        Commands::Dump(args) => cmd_dump(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        let hint = match &err {
            ConfigError::MissingPattern { .. } => {
                "use --preset NAME, --one BITS --zero BITS, or --config FILE".to_string()
            }
            ConfigError::UnknownPreset { .. } => format!("known presets: {}", preset_names()),
            ConfigError::EmptyPattern { .. } | ConfigError::InvalidPattern { .. } => {
                "patterns are strings of 0 and 1, e.g. --one 10 --zero 01".to_string()
            }
        };
        CliError::new(err.to_string(), Some(hint))
    }
}

fn cmd_decode(args: DecodeArgs, quiet: bool) -> Result<(), CliError> {
    let input = resolve_input_path(&args.input.input)?;
    validate_input_file(&input)?;
    let format = args
        .input
        .format
        .unwrap_or_else(|| PduFormat::from_path(&input));
    let mut config = load_config(&args.line_code)?;
    if let Some(mode) = args.display {
        config = config.with_display(mode);
    }

    let input_abs = fs::canonicalize(&input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    if let Some(output) = args.output.output.as_ref() {
        ensure_distinct_from_input(&input_abs, output)?;
    }
    if let Some(report) = args.report.as_ref() {
        ensure_distinct_from_input(&input_abs, report)?;
    }

    tracing::debug!(
        target: "linecode::cli",
        input = %input.display(),
        %format,
        one = %config.one_seq,
        zero = %config.zero_seq,
        "decoding"
    );

    let block = DecodeBlock::from_config(&config);
    let mut sink = OutputSink::new(
        open_output(&args.output)?,
        config
            .display
            .map(|mode| MessagePrinter::new(io::stderr(), mode)),
    );
    let rep = decode_file(&block, &input, format, &mut sink)
        .with_context(|| format!("Decoding failed for {}", input.display()))?;
    sink.finish().context("Failed to write output")?;

    if let Some(report) = args.report.as_ref() {
        let json = serialize_report(&rep, args.pretty)?;
        create_parent_dir(report)?;
        fs::write(report, json)
            .with_context(|| format!("Failed to write report: {}", report.display()))?;
        if !quiet {
            eprintln!("OK: report written -> {}", report.display());
        }
    }

    if !quiet {
        if let Some(output) = args.output.output.as_ref() {
            eprintln!(
                "OK: {} decoded, {} dropped -> {}",
                rep.totals.decoded,
                rep.totals.dropped,
                output.display()
            );
        }
    }

    if args.strict && rep.has_dropped() {
        return Err(CliError::new(
            format!("{} message(s) dropped", rep.totals.dropped),
            Some("see the error log above, or write a --report to inspect".to_string()),
        ));
    }
    Ok(())
}

fn cmd_encode(args: EncodeArgs, quiet: bool) -> Result<(), CliError> {
    let input = resolve_input_path(&args.input.input)?;
    validate_input_file(&input)?;
    let format = args
        .input
        .format
        .unwrap_or_else(|| PduFormat::from_path(&input));
    let config = load_config(&args.line_code)?;

    let input_abs = fs::canonicalize(&input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    if let Some(output) = args.output.output.as_ref() {
        ensure_distinct_from_input(&input_abs, output)?;
    }

    let pipeline = PayloadPipeline::from_config(&config);
    let mut source = PduFileSource::open(&input, format)
        .with_context(|| format!("Failed to open input: {}", input.display()))?;
    let mut sink = HexLineSink::new(open_output(&args.output)?);
    let mut encoded = 0u64;
    let mut skipped = 0u64;

    while let Some(message) = source.next_message().context("Failed to read input")? {
        let Some(bytes) = message.payload.as_bytes() else {
            skipped += 1;
            tracing::error!(
                target: "linecode::cli",
                line = message.metadata("line"),
                kind = message.payload.kind(),
                "skipping message without a byte payload"
            );
            continue;
        };
        let line = pipeline.encode(bytes).context("Encoding failed")?;
        sink.publish(Message::bytes(line))
            .context("Failed to write output")?;
        encoded += 1;
    }
    sink.into_inner()
        .flush()
        .context("Failed to write output")?;

    if !quiet {
        if let Some(output) = args.output.output.as_ref() {
            eprintln!(
                "OK: {} encoded, {} skipped -> {}",
                encoded,
                skipped,
                output.display()
            );
        }
    }
    Ok(())
}

fn cmd_dump(args: DumpArgs) -> Result<(), CliError> {
    let input = resolve_input_path(&args.input.input)?;
    validate_input_file(&input)?;
    let format = args
        .input
        .format
        .unwrap_or_else(|| PduFormat::from_path(&input));

    let mut source = PduFileSource::open(&input, format)
        .with_context(|| format!("Failed to open input: {}", input.display()))?;
    let mut printer = MessagePrinter::new(io::stdout().lock(), args.display);
    let mut printed = 0u64;

    while let Some(message) = source.next_message().context("Failed to read input")? {
        match message.payload.as_bytes() {
            Some(bytes) => {
                printed += 1;
                printer
                    .print(printed, bytes)
                    .context("Failed to write to stdout")?;
            }
            None => tracing::error!(
                target: "linecode::cli",
                line = message.metadata("line"),
                kind = message.payload.kind(),
                "cannot render message without a byte payload"
            ),
        }
    }
    Ok(())
}

/// Hex-line output plus optional rendering of each published payload.
struct OutputSink {
    hex: HexLineSink<Box<dyn Write>>,
    printer: Option<MessagePrinter<io::Stderr>>,
    printed: u64,
}

impl OutputSink {
    fn new(writer: Box<dyn Write>, printer: Option<MessagePrinter<io::Stderr>>) -> Self {
        Self {
            hex: HexLineSink::new(writer),
            printer,
            printed: 0,
        }
    }

    fn finish(self) -> io::Result<()> {
        self.hex.into_inner().flush()
    }
}

impl MessageSink for OutputSink {
    fn publish(&mut self, message: Message) -> Result<(), SinkError> {
        if let Some(printer) = self.printer.as_mut() {
            if let Some(bytes) = message.payload.as_bytes() {
                self.printed += 1;
                printer.print(self.printed, bytes)?;
            }
        }
        self.hex.publish(message)
    }
}

fn load_config(args: &LineCodeArgs) -> Result<PipelineConfig, CliError> {
    let Some(path) = args.config.as_ref() else {
        return Ok(PipelineConfig::resolve(
            args.preset,
            args.one.as_deref(),
            args.zero.as_deref(),
        )?);
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let mut config: PipelineConfig = serde_json::from_str(&text).map_err(|err| {
        CliError::new(
            format!("invalid config file {}: {}", path.display(), err),
            Some(r#"expected e.g. {"one_seq": "10", "zero_seq": "01"} or {"preset": "manchester"}"#.to_string()),
        )
    })?;
    if let Some(one) = args.one.as_deref() {
        config.one_seq = SymbolPattern::parse(Symbol::One, one)?;
    }
    if let Some(zero) = args.zero.as_deref() {
        config.zero_seq = SymbolPattern::parse(Symbol::Zero, zero)?;
    }
    Ok(config)
}

fn preset_names() -> String {
    LinePreset::ALL
        .iter()
        .map(|preset| preset.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn open_output(output: &OutputArgs) -> Result<Box<dyn Write>, CliError> {
    if output.stdout {
        return Ok(Box::new(io::stdout().lock()));
    }
    let path = output.output.as_ref().ok_or_else(|| {
        CliError::new(
            "missing output path",
            Some("use -o/--output or --stdout".to_string()),
        )
    })?;
    create_parent_dir(path)?;
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}

fn create_parent_dir(path: &Path) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    Ok(())
}

fn ensure_distinct_from_input(input_abs: &Path, path: &Path) -> Result<(), CliError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    // A directory that does not exist yet cannot contain the input.
    let Ok(dir) = fs::canonicalize(parent) else {
        return Ok(());
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid output path: {}", path.display()))?;
    if dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!("output path must differ from input: {}", path.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn serialize_report(rep: &DecodeReport, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(rep)
    } else {
        serde_json::to_string(rep)
    };
    json.context("JSON serialization failed")
        .map_err(Into::into)
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a .hex/.txt PDU list or a raw binary file".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a .hex/.txt PDU list or a raw binary file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let hint = "pass a single PDU file, or run once per file".to_string();
        let mut message = format!(
            "multiple files match pattern '{}' ({} matches)",
            pattern,
            matches.len()
        );
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>();
        message.push_str("; matches: ");
        message.push_str(&listed.join(", "));
        if matches.len() > 3 {
            message.push_str(", ...");
        }
        return Err(CliError::new(message, Some(hint)));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
