//! Section reader for WebAssembly modules
//!
//! This module identifies the top-level sections of a module without
//! decoding their contents. A module is an eight byte header followed by
//! sections laid out as `id size content`; the reader records where each
//! section's content starts and how large it is.

use alloc::collections::{btree_map, BTreeMap};

use wasmfrag_error::{kinds::ScanError, Error, Result};
use wasmfrag_format::{
    binary::{self, check_header, HEADER_LEN},
    config::{LengthEncoding, ScanConfig},
    leb128,
    section::{section_name, SectionId},
};

/// Location of one section inside a module buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionInfo {
    /// Section identifier byte
    pub id:           u8,
    /// Offset of the first content byte in the full buffer
    pub offset:       usize,
    /// Number of content bytes
    pub content_size: usize,
    /// Id byte, size field and content together
    pub total_size:   usize,
}

impl SectionInfo {
    /// Offset of the id byte
    ///
    /// Saturates at zero for a hand-built info whose header bytes would
    /// start before the buffer.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.offset.saturating_sub(self.total_size.saturating_sub(self.content_size))
    }

    /// Offset one past the last content byte
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.content_size
    }

    /// The content bytes of this section within `binary`
    ///
    /// Returns `None` when `binary` is not the buffer the section was read
    /// from and is too short to hold it.
    #[must_use]
    pub fn content<'a>(&self, binary: &'a [u8]) -> Option<&'a [u8]> {
        binary.get(self.offset..self.end())
    }
}

/// Sections of a module keyed by id
///
/// Each id maps to at most one section. When a module repeats an id the
/// section seen last replaces the earlier one. Iteration is by ascending id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionIndex {
    sections: BTreeMap<u8, SectionInfo>,
}

impl SectionIndex {
    /// Create an empty index
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sections: BTreeMap::new(),
        }
    }

    /// Record a section, returning the one it replaces
    pub fn insert(&mut self, info: SectionInfo) -> Option<SectionInfo> {
        self.sections.insert(info.id, info)
    }

    /// Look up a section by id byte
    #[must_use]
    pub fn get(&self, id: u8) -> Option<&SectionInfo> {
        self.sections.get(&id)
    }

    /// Look up a known section
    #[must_use]
    pub fn section(&self, id: SectionId) -> Option<&SectionInfo> {
        self.get(id.as_u8())
    }

    /// Whether a section with this id was seen
    #[must_use]
    pub fn contains(&self, id: u8) -> bool {
        self.sections.contains_key(&id)
    }

    /// Number of distinct section ids
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether no section was seen
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Sections in ascending id order
    pub fn iter(&self) -> btree_map::Values<'_, u8, SectionInfo> {
        self.sections.values()
    }

    /// Section ids in ascending order
    pub fn ids(&self) -> btree_map::Keys<'_, u8, SectionInfo> {
        self.sections.keys()
    }
}

impl<'a> IntoIterator for &'a SectionIndex {
    type IntoIter = btree_map::Values<'a, u8, SectionInfo>;
    type Item = &'a SectionInfo;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Progress of a [`SectionReader`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanState {
    /// The header has not been checked yet
    AwaitingHeader,
    /// Positioned at a section boundary with bytes left
    Scanning,
    /// Every byte of the module has been consumed
    Done,
}

/// Reader for accessing WebAssembly module sections
#[derive(Debug, Clone)]
pub struct SectionReader<'a> {
    /// The WebAssembly binary data
    binary:         &'a [u8],
    /// Current offset in the binary
    current_offset: usize,
    config:         ScanConfig,
    state:          ScanState,
}

impl<'a> SectionReader<'a> {
    /// Create a new section reader for a WebAssembly binary
    ///
    /// Verifies the WebAssembly header, then positions at the first section.
    pub fn new(binary: &'a [u8]) -> Result<Self> {
        Self::with_config(binary, ScanConfig::new())
    }

    /// Create a reader with an explicit configuration, checking the header
    pub fn with_config(binary: &'a [u8], config: ScanConfig) -> Result<Self> {
        let mut reader = Self::unchecked(binary, config);
        reader.read_header()?;
        Ok(reader)
    }

    /// Create a reader without checking the header
    ///
    /// The header is checked by the first call to
    /// [`next_section`](Self::next_section).
    #[must_use]
    pub const fn unchecked(binary: &'a [u8], config: ScanConfig) -> Self {
        Self {
            binary,
            current_offset: 0,
            config,
            state: ScanState::AwaitingHeader,
        }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> ScanState {
        self.state
    }

    /// Offset of the next byte to read
    #[must_use]
    pub const fn position(&self) -> usize {
        self.current_offset
    }

    /// Check the header and move to the first section
    ///
    /// Does nothing once the header has been accepted. On failure the reader
    /// stays in [`ScanState::AwaitingHeader`].
    pub fn read_header(&mut self) -> Result<()> {
        if self.state != ScanState::AwaitingHeader {
            return Ok(());
        }
        check_header(self.binary).map_err(Error::from)?;
        self.current_offset = HEADER_LEN;
        self.update_state();
        Ok(())
    }

    /// Reset the reader position to the beginning of sections (after header)
    ///
    /// A reader whose header was never accepted stays where it is.
    pub fn reset(&mut self) {
        if self.state != ScanState::AwaitingHeader {
            self.current_offset = HEADER_LEN;
            self.update_state();
        }
    }

    fn update_state(&mut self) {
        self.state = if self.current_offset < self.binary.len() {
            ScanState::Scanning
        } else {
            ScanState::Done
        };
    }

    /// Read the size field at `pos`, returning the size and the field length
    fn read_size(&self, section_id: u8, pos: usize) -> Result<(usize, usize)> {
        let Some(&byte) = self.binary.get(pos) else {
            return Err(ScanError::UnexpectedEnd {
                offset:   pos,
                expected: 1,
                actual:   0,
            }
            .into());
        };

        match self.config.length_encoding {
            LengthEncoding::SingleByte => {
                if byte > leb128::SINGLE_BYTE_MAX {
                    return Err(ScanError::MultiByteSizeField {
                        section_id,
                        offset: pos,
                        byte,
                    }
                    .into());
                }
                Ok((usize::from(byte), 1))
            }
            LengthEncoding::Leb128 => {
                let (size, len) = leb128::read_u32(self.binary, pos)?;
                Ok((size as usize, len))
            }
        }
    }

    /// Get the next section regardless of type
    ///
    /// Returns `None` once the end of the module is reached. A failing call
    /// leaves the reader where it was.
    pub fn next_section(&mut self) -> Result<Option<SectionInfo>> {
        self.read_header()?;
        if self.state == ScanState::Done {
            return Ok(None);
        }

        let start = self.current_offset;
        let id = self.binary[start];
        let (content_size, size_len) = self.read_size(id, start + 1)?;

        let offset = start + 1 + size_len;
        let remaining = self.binary.len() - offset;
        if content_size > remaining {
            return Err(ScanError::SectionSizeExceedsModule {
                section_id: id,
                section_size: content_size,
                remaining,
                offset,
            }
            .into());
        }

        let info = SectionInfo {
            id,
            offset,
            content_size,
            total_size: 1 + size_len + content_size,
        };

        log::trace!(
            "section {} (0x{id:02x}) at 0x{start:x}: {content_size} content bytes",
            section_name(id)
        );

        self.current_offset = info.end();
        self.update_state();
        Ok(Some(info))
    }

    /// Find the next section of the specified type
    ///
    /// Searches from the current position; the reader ends up just past the
    /// matching section, or at the end of the module when there is none.
    pub fn find_section(&mut self, section_id: u8) -> Result<Option<SectionInfo>> {
        while let Some(info) = self.next_section()? {
            if info.id == section_id {
                return Ok(Some(info));
            }
        }
        Ok(None)
    }

    /// Find a custom section with the specified name
    ///
    /// Returns the offset and size of the data following the name. Searches
    /// from the beginning of the module and leaves the reader position
    /// unchanged.
    pub fn find_custom_section(&mut self, name: &str) -> Result<Option<(usize, usize)>> {
        let saved = (self.current_offset, self.state);
        self.reset();
        let result = self.scan_custom_sections(name);
        (self.current_offset, self.state) = saved;
        result
    }

    fn scan_custom_sections(&mut self, name: &str) -> Result<Option<(usize, usize)>> {
        while let Some(info) = self.find_section(SectionId::Custom.as_u8())? {
            let Some(content) = info.content(self.binary) else {
                continue;
            };
            if content.is_empty() {
                continue;
            }

            let (found, name_size) = binary::read_string(content, 0)?;
            if found == name {
                return Ok(Some((info.offset + name_size, info.content_size - name_size)));
            }
        }
        Ok(None)
    }
}

/// Index the top-level sections of a module
///
/// Fails with an "invalid header" error when the buffer does not start with
/// the WebAssembly magic and version, and with a structural error when a
/// section is truncated. No partial index is returned.
pub fn parse_wasm_sections(binary: &[u8]) -> Result<SectionIndex> {
    parse_wasm_sections_with_config(binary, ScanConfig::new())
}

/// Index the top-level sections of a module using `config`
pub fn parse_wasm_sections_with_config(binary: &[u8], config: ScanConfig) -> Result<SectionIndex> {
    let mut reader = SectionReader::with_config(binary, config)?;
    let mut index = SectionIndex::new();

    while let Some(info) = reader.next_section()? {
        if let Some(previous) = index.insert(info) {
            log::debug!(
                "duplicate {} section (0x{:02x}) at 0x{:x} replaces the one at 0x{:x}",
                section_name(info.id),
                info.id,
                info.offset,
                previous.offset
            );
        }
    }

    log::debug!("indexed {} sections in {} bytes", index.len(), binary.len());
    Ok(index)
}

/// Content of the first section with the given id
pub fn section_content(binary: &[u8], section_id: u8) -> Result<Option<&[u8]>> {
    let mut reader = SectionReader::new(binary)?;
    Ok(reader
        .find_section(section_id)?
        .and_then(|info| info.content(binary)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wasmfrag_error::codes;
    use wasmfrag_format::binary::{CUSTOM_SECTION_ID, MEMORY_SECTION_ID, TYPE_SECTION_ID};

    use super::*;

    /// Create a simple test module with a custom section
    fn create_test_module() -> alloc::vec::Vec<u8> {
        let mut module = binary::WASM_HEADER.to_vec();

        let name = b"test";
        let content = b"test data";
        module.push(CUSTOM_SECTION_ID);
        module.push((1 + name.len() + content.len()) as u8);
        module.push(name.len() as u8);
        module.extend_from_slice(name);
        module.extend_from_slice(content);

        module.extend_from_slice(&[MEMORY_SECTION_ID, 3, 1, 0, 1]);
        module
    }

    #[test]
    fn test_start_of_hand_built_info_saturates() {
        let info = SectionInfo {
            id:           MEMORY_SECTION_ID,
            offset:       0,
            content_size: 0,
            total_size:   2,
        };
        assert_eq!(info.start(), 0);
        assert_eq!(info.end(), 0);

        let info = SectionInfo {
            id:           MEMORY_SECTION_ID,
            offset:       10,
            content_size: 3,
            total_size:   5,
        };
        assert_eq!(info.start(), 8);
    }

    #[test]
    fn test_section_reader_new() {
        let module = create_test_module();
        let reader = SectionReader::new(&module).unwrap();
        assert_eq!(reader.state(), ScanState::Scanning);
        assert_eq!(reader.position(), 8);

        let mut invalid_magic = module.clone();
        invalid_magic[0] = 0xFF;
        let error = SectionReader::new(&invalid_magic).unwrap_err();
        assert_eq!(error.code, codes::INVALID_HEADER);
        assert!(error.message().contains("Invalid WebAssembly magic bytes"));

        let mut invalid_version = module;
        invalid_version[4] = 0xFF;
        let error = SectionReader::new(&invalid_version).unwrap_err();
        assert!(error.message().contains("Unsupported WebAssembly version"));

        let error = SectionReader::new(&[0, 1, 2]).unwrap_err();
        assert!(error.message().contains("expected 8 bytes, but only 3 available"));
    }

    #[test]
    fn test_state_transitions() {
        let module = create_test_module();
        let mut reader = SectionReader::unchecked(&module, ScanConfig::new());
        assert_eq!(reader.state(), ScanState::AwaitingHeader);

        assert_eq!(reader.next_section().unwrap().unwrap().id, CUSTOM_SECTION_ID);
        assert_eq!(reader.state(), ScanState::Scanning);
        assert_eq!(reader.next_section().unwrap().unwrap().id, MEMORY_SECTION_ID);
        assert_eq!(reader.state(), ScanState::Done);
        assert_eq!(reader.next_section().unwrap(), None);

        reader.reset();
        assert_eq!(reader.state(), ScanState::Scanning);

        let header_only = binary::WASM_HEADER;
        assert_eq!(SectionReader::new(&header_only).unwrap().state(), ScanState::Done);
    }

    #[test]
    fn test_unchecked_reader_reports_bad_header() {
        let mut reader = SectionReader::unchecked(&[0, 0, 0, 0], ScanConfig::new());
        assert!(reader.next_section().is_err());
        assert_eq!(reader.state(), ScanState::AwaitingHeader);
    }

    #[test]
    fn test_find_section() {
        let module = create_test_module();
        let mut reader = SectionReader::new(&module).unwrap();

        let memory = reader.find_section(MEMORY_SECTION_ID).unwrap().unwrap();
        assert_eq!(memory.content(&module), Some(&[1u8, 0, 1][..]));
        assert_eq!(memory.start(), memory.offset - 2);

        reader.reset();
        assert_eq!(reader.find_section(TYPE_SECTION_ID).unwrap(), None);
        assert_eq!(reader.state(), ScanState::Done);
    }

    #[test]
    fn test_find_custom_section() {
        let module = create_test_module();
        let mut reader = SectionReader::new(&module).unwrap();
        reader.next_section().unwrap();
        let position = reader.position();

        let (offset, size) = reader.find_custom_section("test").unwrap().unwrap();
        assert_eq!(&module[offset..offset + size], b"test data");
        assert_eq!(reader.find_custom_section("missing").unwrap(), None);
        assert_eq!(reader.position(), position);
    }

    #[test]
    fn test_failed_read_keeps_position() {
        let mut module = binary::WASM_HEADER.to_vec();
        module.extend_from_slice(&[TYPE_SECTION_ID, 10, 0]);
        let mut reader = SectionReader::new(&module).unwrap();
        let error = reader.next_section().unwrap_err();
        assert_eq!(error.code, codes::SECTION_SIZE_EXCEEDS_MODULE);
        assert_eq!(reader.position(), 8);
        assert_eq!(reader.state(), ScanState::Scanning);
    }

    #[test]
    fn test_duplicate_ids_last_wins() {
        let mut module = binary::WASM_HEADER.to_vec();
        module.extend_from_slice(&[CUSTOM_SECTION_ID, 1, 0xAA]);
        module.extend_from_slice(&[CUSTOM_SECTION_ID, 2, 0xBB, 0xCC]);
        let index = parse_wasm_sections(&module).unwrap();
        assert_eq!(index.len(), 1);
        let custom = index.get(CUSTOM_SECTION_ID).unwrap();
        assert_eq!((custom.offset, custom.content_size), (13, 2));
    }

    #[test]
    fn test_section_content() {
        let module = create_test_module();
        assert_eq!(section_content(&module, MEMORY_SECTION_ID).unwrap(), Some(&[1u8, 0, 1][..]));
        assert_eq!(section_content(&module, TYPE_SECTION_ID).unwrap(), None);
    }
}
