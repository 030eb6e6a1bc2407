//! Closed constant tables: value types, type constructors, external kinds
//! and opcodes.

use wasmfrag_error::{codes, Error, ErrorCategory, Result};

fn unknown(table: &str, value: u8) -> Error {
    Error::with_message(
        ErrorCategory::Validation,
        codes::UNKNOWN_CONSTANT,
        alloc::format!("Unknown {table}: 0x{value:02x}"),
    )
}

/// Generates `from_u8`, `name`, `From<T> for u8` and `TryFrom<u8>` for a
/// `#[repr(u8)]` enum.
macro_rules! byte_table {
    ($ty:ident, $label:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Look up the constant encoded as `value`
            #[must_use]
            pub const fn from_u8(value: u8) -> Option<Self> {
                $(
                    if value == Self::$variant as u8 {
                        return Some(Self::$variant);
                    }
                )+
                None
            }

            /// The byte this constant is encoded as
            #[must_use]
            pub const fn as_u8(self) -> u8 {
                self as u8
            }

            /// Display name
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl From<$ty> for u8 {
            fn from(value: $ty) -> Self {
                value as u8
            }
        }

        impl TryFrom<u8> for $ty {
            type Error = Error;

            fn try_from(value: u8) -> Result<Self> {
                Self::from_u8(value).ok_or_else(|| unknown($label, value))
            }
        }

        impl core::fmt::Display for $ty {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

/// WebAssembly number types used in function signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ValueType {
    /// 32-bit integer
    I32 = 0x7F,
    /// 64-bit integer
    I64 = 0x7E,
    /// 32-bit float
    F32 = 0x7D,
    /// 64-bit float
    F64 = 0x7C,
}

byte_table!(ValueType, "value type", {
    I32 => "i32",
    I64 => "i64",
    F32 => "f32",
    F64 => "f64",
});

/// Type constructors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypeConstructor {
    /// Function type
    Func = 0x60,
}

byte_table!(TypeConstructor, "type constructor", {
    Func => "func",
});

/// Kinds of import and export descriptors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ExternalKind {
    /// Function
    Func   = 0x00,
    /// Table
    Table  = 0x01,
    /// Memory
    Memory = 0x02,
    /// Global
    Global = 0x03,
}

byte_table!(ExternalKind, "external kind", {
    Func => "func",
    Table => "table",
    Memory => "memory",
    Global => "global",
});

/// Export descriptor kind
pub type ExportKind = ExternalKind;
/// Import descriptor kind
pub type ImportKind = ExternalKind;

/// The opcodes fragment builders need; not a complete instruction set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    /// `unreachable`
    Unreachable = 0x00,
    /// `nop`
    Nop         = 0x01,
    /// `block`
    Block       = 0x02,
    /// `loop`
    Loop        = 0x03,
    /// `if`
    If          = 0x04,
    /// `else`
    Else        = 0x05,
    /// `end`
    End         = 0x0B,
    /// `br`
    Br          = 0x0C,
    /// `br_if`
    BrIf        = 0x0D,
    /// `return`
    Return      = 0x0F,
    /// `call`
    Call        = 0x10,
    /// `drop`
    Drop        = 0x1A,
    /// `local.get`
    LocalGet    = 0x20,
    /// `local.set`
    LocalSet    = 0x21,
    /// `global.get`
    GlobalGet   = 0x23,
    /// `i32.const`
    I32Const    = 0x41,
    /// `i64.const`
    I64Const    = 0x42,
}

byte_table!(Opcode, "opcode", {
    Unreachable => "unreachable",
    Nop => "nop",
    Block => "block",
    Loop => "loop",
    If => "if",
    Else => "else",
    End => "end",
    Br => "br",
    BrIf => "br_if",
    Return => "return",
    Call => "call",
    Drop => "drop",
    LocalGet => "local.get",
    LocalSet => "local.set",
    GlobalGet => "global.get",
    I32Const => "i32.const",
    I64Const => "i64.const",
});

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_encoding() {
        assert_eq!(u8::from(ValueType::I32), 0x7F);
        assert_eq!(u8::from(ValueType::I64), 0x7E);
        assert_eq!(u8::from(ValueType::F32), 0x7D);
        assert_eq!(u8::from(ValueType::F64), 0x7C);
        assert_eq!(ValueType::from_u8(0x7C), Some(ValueType::F64));
        assert_eq!(ValueType::from_u8(0x7B), None);
    }

    #[test]
    fn test_opcode_lookup() {
        assert_eq!(Opcode::from_u8(0x0B), Some(Opcode::End));
        assert_eq!(Opcode::from_u8(0x10), Some(Opcode::Call));
        assert_eq!(Opcode::from_u8(0x41), Some(Opcode::I32Const));
        assert_eq!(Opcode::I32Const.name(), "i32.const");
        assert!(Opcode::try_from(0xFF).is_err());
    }

    #[test]
    fn test_external_kind_aliases() {
        assert_eq!(ExportKind::Memory.as_u8(), 2);
        assert_eq!(ImportKind::Func.as_u8(), 0);
        assert_eq!(ExternalKind::try_from(3).map(ExternalKind::name), Ok("global"));
    }

    #[test]
    fn test_type_constructor() {
        assert_eq!(TypeConstructor::Func.as_u8(), 0x60);
        let error = TypeConstructor::try_from(0x5F).unwrap_err();
        assert!(error.message().contains("0x5f"));
    }
}
