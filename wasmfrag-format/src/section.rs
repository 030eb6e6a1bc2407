//! WebAssembly section identifiers.
//!
//! The numeric encoding lives on the enum discriminants; display names are
//! kept in a separate table so debug output never feeds back into the
//! binary layer.

use wasmfrag_error::{codes, Error, ErrorCategory, Result};

/// Standard WebAssembly section IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum SectionId {
    /// Custom section (0)
    Custom    = 0,
    /// Type section (1)
    Type      = 1,
    /// Import section (2)
    Import    = 2,
    /// Function section (3)
    Function  = 3,
    /// Table section (4)
    Table     = 4,
    /// Memory section (5)
    Memory    = 5,
    /// Global section (6)
    Global    = 6,
    /// Export section (7)
    Export    = 7,
    /// Start section (8)
    Start     = 8,
    /// Element section (9)
    Element   = 9,
    /// Code section (10)
    Code      = 10,
    /// Data section (11)
    Data      = 11,
    /// Data count section (12)
    DataCount = 12,
}

/// Section names indexed by section id.
pub const SECTION_NAMES: [(SectionId, &str); 13] = [
    (SectionId::Custom, "custom"),
    (SectionId::Type, "type"),
    (SectionId::Import, "import"),
    (SectionId::Function, "function"),
    (SectionId::Table, "table"),
    (SectionId::Memory, "memory"),
    (SectionId::Global, "global"),
    (SectionId::Export, "export"),
    (SectionId::Start, "start"),
    (SectionId::Element, "element"),
    (SectionId::Code, "code"),
    (SectionId::Data, "data"),
    (SectionId::DataCount, "datacount"),
];

impl SectionId {
    /// Convert a u8 to a `SectionId`
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Custom),
            1 => Some(Self::Type),
            2 => Some(Self::Import),
            3 => Some(Self::Function),
            4 => Some(Self::Table),
            5 => Some(Self::Memory),
            6 => Some(Self::Global),
            7 => Some(Self::Export),
            8 => Some(Self::Start),
            9 => Some(Self::Element),
            10 => Some(Self::Code),
            11 => Some(Self::Data),
            12 => Some(Self::DataCount),
            _ => None,
        }
    }

    /// The byte this id is encoded as
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Lower-case section name
    #[must_use]
    pub const fn name(self) -> &'static str {
        SECTION_NAMES[self as usize].1
    }
}

impl From<SectionId> for u8 {
    fn from(id: SectionId) -> Self {
        id as u8
    }
}

impl TryFrom<u8> for SectionId {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::from_u8(value).ok_or_else(|| {
            Error::with_message(
                ErrorCategory::Validation,
                codes::UNKNOWN_CONSTANT,
                alloc::format!("Unknown section id: {value}"),
            )
        })
    }
}

impl core::fmt::Display for SectionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Display name for a raw section id, `unknown_<id>` for ids outside the
/// standard set.
#[must_use]
pub fn section_name(id: u8) -> alloc::borrow::Cow<'static, str> {
    match SectionId::from_u8(id) {
        Some(section) => alloc::borrow::Cow::Borrowed(section.name()),
        None => alloc::borrow::Cow::Owned(alloc::format!("unknown_{id}")),
    }
}
