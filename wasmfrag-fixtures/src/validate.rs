//! Checks a generated fixture against the section scanner and known byte
//! sequences.

use core::fmt;

use wasmfrag_decoder::{parse_wasm_sections, SectionIndex};
use wasmfrag_error::Result;
use wasmfrag_format::{
    binary::{HEADER_LEN, WASM_MAGIC, WASM_VERSION},
    leb128, SectionId,
};

use crate::fixture::{panic_body, Fixture};

/// Unsigned LEB128 vectors: value and expected encoding
pub const ULEB128_CASES: &[(u64, &[u8])] = &[
    (0, &[0x00]),
    (1, &[0x01]),
    (127, &[0x7F]),
    (128, &[0x80, 0x01]),
    (255, &[0xFF, 0x01]),
    (256, &[0x80, 0x02]),
    (16384, &[0x80, 0x80, 0x01]),
];

/// Signed LEB128 vectors: value and expected encoding
pub const SLEB128_CASES: &[(i64, &[u8])] = &[
    (0, &[0x00]),
    (1, &[0x01]),
    (63, &[0x3F]),
    (64, &[0xC0, 0x00]),
    (127, &[0xFF, 0x00]),
    (-1, &[0x7F]),
    (-64, &[0x40]),
    (-65, &[0xBF, 0x7F]),
];

/// One named check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    /// What was checked
    pub name:   String,
    /// Observed value
    pub detail: String,
    /// Whether the check passed
    pub passed: bool,
}

/// A titled group of checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Report title
    pub title:  &'static str,
    /// Checks in the order they ran
    pub checks: Vec<Check>,
}

impl Report {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            checks: Vec::new(),
        }
    }

    fn check(&mut self, name: impl Into<String>, detail: impl Into<String>, passed: bool) {
        self.checks.push(Check {
            name: name.into(),
            detail: detail.into(),
            passed,
        });
    }

    /// Whether every check passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Checks that failed
    pub fn failures(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for check in &self.checks {
            let status = if check.passed { "ok" } else { "FAIL" };
            writeln!(f, "  {:<24} {:<40} {status}", check.name, check.detail)?;
        }
        Ok(())
    }
}

/// Space separated lowercase hex
#[must_use]
pub fn format_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check the LEB128 writers against known encodings
#[must_use]
pub fn validate_leb128() -> Report {
    let mut report = Report::new("LEB128 Encoding");
    for &(value, expected) in ULEB128_CASES {
        let actual = leb128::write_u64(value);
        report.check(
            format!("uleb128 {value}"),
            format_bytes(&actual),
            actual == expected,
        );
    }
    for &(value, expected) in SLEB128_CASES {
        let actual = leb128::write_i64(value);
        report.check(
            format!("sleb128 {value}"),
            format_bytes(&actual),
            actual == expected,
        );
    }
    report
}

/// Compare generated sizes with the sizes the scanner reports
///
/// Also checks that the generated sizes add up to the module length.
#[must_use]
pub fn validate_sizes(fixture: &Fixture, index: &SectionIndex) -> Report {
    let mut report = Report::new("Section Sizes");
    for part in fixture.sizes() {
        let scanned = match part.id {
            None => HEADER_LEN,
            Some(id) => index.section(id).map_or(0, |info| info.total_size),
        };
        report.check(
            part.name,
            format!("{} bytes (scanned {scanned})", part.size),
            part.size == scanned,
        );
    }

    let total = fixture.generated_len();
    report.check(
        "total",
        format!("{total} bytes"),
        total == fixture.bytes().len(),
    );
    report
}

/// Offset of the first function body, found by walking the code section
fn code_body_offset(bytes: &[u8], index: &SectionIndex) -> Result<Option<usize>> {
    let Some(code) = index.section(SectionId::Code) else {
        return Ok(None);
    };
    let (_, count_len) = leb128::read_u32(bytes, code.offset)?;
    let size_at = code.offset + count_len;
    let (_, size_len) = leb128::read_u32(bytes, size_at)?;
    Ok(Some(size_at + size_len))
}

/// Check the magic, the version and the `doPanic` body at their offsets
pub fn validate_bytes(fixture: &Fixture, index: &SectionIndex) -> Result<Report> {
    let bytes = fixture.bytes();
    let mut report = Report::new("Byte Sequences");

    let body = panic_body();
    let mut expected: Vec<(&str, usize, &[u8])> =
        vec![("magic", 0, &WASM_MAGIC[..]), ("version", 4, &WASM_VERSION[..])];
    match code_body_offset(bytes, index)? {
        Some(offset) => expected.push(("code body", offset, body.as_slice())),
        None => report.check("code body", "no code section", false),
    }

    for (name, offset, want) in expected {
        let actual = bytes.get(offset..offset + want.len()).unwrap_or_default();
        report.check(
            format!("@{offset:02x} {name}"),
            format_bytes(actual),
            actual == want,
        );
    }
    Ok(report)
}

/// Scan the fixture and run every check
pub fn validate_fixture(fixture: &Fixture) -> Result<Vec<Report>> {
    let index = parse_wasm_sections(fixture.bytes())?;
    Ok(vec![
        validate_leb128(),
        validate_sizes(fixture, &index),
        validate_bytes(fixture, &index)?,
    ])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fixture::build_panic_module;

    #[test]
    fn test_leb128_vectors_pass() {
        let report = validate_leb128();
        assert_eq!(report.checks.len(), ULEB128_CASES.len() + SLEB128_CASES.len());
        assert!(report.passed(), "{report}");
    }

    #[test]
    fn test_fixture_passes() {
        let fixture = build_panic_module().unwrap();
        for report in validate_fixture(&fixture).unwrap() {
            assert!(report.passed(), "{report}");
        }
    }

    #[test]
    fn test_body_offset() {
        let fixture = build_panic_module().unwrap();
        let index = parse_wasm_sections(fixture.bytes()).unwrap();
        // Code section starts at 66: id, size, count, body size.
        assert_eq!(code_body_offset(fixture.bytes(), &index).unwrap(), Some(70));
    }

    #[test]
    fn test_missing_code_section_fails() {
        let fixture = build_panic_module().unwrap();
        let report = validate_bytes(&fixture, &SectionIndex::new()).unwrap();
        assert!(!report.passed());
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(&[0x00, 0x61, 0xFF]), "00 61 ff");
        assert_eq!(format_bytes(&[]), "");
    }
}
