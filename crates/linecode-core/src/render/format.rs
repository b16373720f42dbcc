use std::fmt::Write;

use super::DisplayMode;
use super::layout;

/// Render a payload body without the message header.
///
/// # Examples
/// ```
/// use linecode_core::render::{DisplayMode, render_payload};
///
/// assert_eq!(render_payload(b"Hi\n", DisplayMode::Hex), "0000: 48 69 0a\n");
/// assert_eq!(render_payload(b"Hi\n", DisplayMode::Ascii), "ASCII: Hi~\n");
/// ```
pub fn render_payload(bytes: &[u8], mode: DisplayMode) -> String {
    let mut out = String::new();
    match mode {
        DisplayMode::Hex => {
            for (row, chunk) in bytes.chunks(layout::ROW_BYTES).enumerate() {
                push_line(&mut out, &hex_row(row, chunk));
            }
        }
        DisplayMode::Ascii => {
            // Not trimmed: a trailing space may be payload.
            let text: String = bytes.iter().map(|&byte| printable(byte)).collect();
            out.push_str(&format!("{} {text}\n", layout::ASCII_LABEL));
        }
        DisplayMode::Both => {
            for (row, chunk) in bytes.chunks(layout::ROW_BYTES).enumerate() {
                push_line(&mut out, &ascii_row(chunk));
                push_line(&mut out, &hex_row(row, chunk));
            }
        }
    }
    out
}

/// Render a payload with its `Message <n>, len=<len>:` header.
///
/// In ASCII mode the text follows the header on the same line; the other
/// modes start their rows on the next line.
///
/// # Examples
/// ```
/// use linecode_core::render::{DisplayMode, render_message};
///
/// let text = render_message(3, &[0x41, 0x00], DisplayMode::Both);
/// assert_eq!(text, "Message    3, len=  2:\nASCII: A  ~\n0000: 41 00\n");
/// ```
pub fn render_message(sequence: u64, bytes: &[u8], mode: DisplayMode) -> String {
    let header = format!("Message {sequence:>4}, len={:>3}:", bytes.len());
    let body = render_payload(bytes, mode);
    match mode {
        DisplayMode::Ascii => format!("{header}  {body}"),
        DisplayMode::Hex | DisplayMode::Both => format!("{header}\n{body}"),
    }
}

fn printable(byte: u8) -> char {
    if layout::PRINTABLE.contains(&byte) {
        char::from(byte)
    } else {
        layout::PLACEHOLDER
    }
}

fn hex_row(row: usize, chunk: &[u8]) -> String {
    let mut line = format!("{:04x}:", row * layout::ROW_BYTES);
    for byte in chunk {
        let _ = write!(line, " {byte:02x}");
    }
    line
}

// Each cell is three columns wide so characters sit under their hex digits.
// The last cell drops its right padding but keeps the character, even a space.
fn ascii_row(chunk: &[u8]) -> String {
    let mut line = String::from(layout::ASCII_LABEL);
    for (index, &byte) in chunk.iter().enumerate() {
        if index > 0 {
            line.push(' ');
        }
        let _ = write!(line, " {}", printable(byte));
    }
    line
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
