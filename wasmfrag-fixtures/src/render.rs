//! Text renderings of module bytes.

use std::fmt::Write as _;

/// Bytes per hexdump line
pub const HEXDUMP_WIDTH: usize = 16;

/// Bytes per line of a TypeScript array literal
pub const TYPESCRIPT_WIDTH: usize = 12;

/// One hexdump line, split so callers can style each column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexLine {
    /// Offset of the first byte
    pub offset: usize,
    /// Hex bytes padded to the full line width
    pub hex:    String,
    /// Printable ASCII with `.` for anything else
    pub ascii:  String,
}

impl std::fmt::Display for HexLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04x}  {} {}", self.offset, self.hex, self.ascii)
    }
}

/// Split `bytes` into hexdump lines
#[must_use]
pub fn hexdump_lines(bytes: &[u8]) -> Vec<HexLine> {
    bytes
        .chunks(HEXDUMP_WIDTH)
        .enumerate()
        .map(|(i, chunk)| HexLine {
            offset: i * HEXDUMP_WIDTH,
            hex:    format!("{:<48}", crate::validate::format_bytes(chunk)),
            ascii:  chunk
                .iter()
                .map(|&b| if (32..127).contains(&b) { char::from(b) } else { '.' })
                .collect(),
        })
        .collect()
}

/// Offset, hex and ASCII columns, one line per sixteen bytes
#[must_use]
pub fn hexdump(bytes: &[u8]) -> String {
    hexdump_lines(bytes)
        .iter()
        .fold(String::new(), |mut out, line| {
            let _ = writeln!(out, "{line}");
            out
        })
}

/// A `Uint8Array` literal for pasting into TypeScript tests
#[must_use]
pub fn typescript(bytes: &[u8], name: &str) -> String {
    let mut out = format!("// {name} - {} bytes\nreturn new Uint8Array([\n", bytes.len());
    for chunk in bytes.chunks(TYPESCRIPT_WIDTH) {
        let line = chunk
            .iter()
            .map(|b| format!("0x{b:02x}"))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "    {line},");
    }
    out.push_str("]);");
    out
}
