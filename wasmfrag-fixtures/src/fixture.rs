//! Fixture modules assembled from encoder fragments.

use wasmfrag_error::Result;
use wasmfrag_format::{
    binary::WASM_HEADER, leb128, Encoder, ExportKind, ImportKind, Limits, Opcode, SectionId,
    ValueType,
};

/// Name the fixture is exported under in generated TypeScript
pub const PANIC_MODULE_NAME: &str = "createWasmThatCallsPanic";

/// Arguments `doPanic` passes to the imported `_panic`
pub const PANIC_ARGS: (i32, i32) = (100, 10);

/// Function index of the `_panic` import
const PANIC_IMPORT_INDEX: u32 = 0;

/// Size of one part of a fixture as it was generated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSize {
    /// Display name, `header` for the module header
    pub name: &'static str,
    /// Section id, `None` for the header
    pub id:   Option<SectionId>,
    /// Bytes written for this part, id and size field included
    pub size: usize,
}

/// A generated module and the sizes recorded while building it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    name:  &'static str,
    bytes: Vec<u8>,
    sizes: Vec<SectionSize>,
}

impl Fixture {
    /// Fixture name
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The module bytes
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Generated sizes in build order, header first
    #[must_use]
    pub fn sizes(&self) -> &[SectionSize] {
        &self.sizes
    }

    /// Sum of the generated sizes
    #[must_use]
    pub fn generated_len(&self) -> usize {
        self.sizes.iter().map(|s| s.size).sum()
    }

    /// Take the module bytes
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

struct FixtureBuilder {
    encoder: Encoder,
    bytes:   Vec<u8>,
    sizes:   Vec<SectionSize>,
}

impl FixtureBuilder {
    fn new(encoder: Encoder) -> Self {
        Self {
            encoder,
            bytes: WASM_HEADER.to_vec(),
            sizes: vec![SectionSize {
                name: "header",
                id:   None,
                size: WASM_HEADER.len(),
            }],
        }
    }

    fn section(&mut self, id: SectionId, content: &[u8]) -> Result<&mut Self> {
        let section = self.encoder.section(id, content)?;
        self.sizes.push(SectionSize {
            name: id.name(),
            id:   Some(id),
            size: section.len(),
        });
        self.bytes.extend_from_slice(&section);
        Ok(self)
    }

    fn finish(self, name: &'static str) -> Fixture {
        log::debug!("built fixture {name}: {} bytes", self.bytes.len());
        Fixture {
            name,
            bytes: self.bytes,
            sizes: self.sizes,
        }
    }
}

/// Body of `doPanic`: no locals, push both arguments, call `_panic`
#[must_use]
pub fn panic_body() -> Vec<u8> {
    let mut body = vec![0];
    for arg in [PANIC_ARGS.0, PANIC_ARGS.1] {
        body.push(Opcode::I32Const.as_u8());
        body.extend(leb128::write_i32(arg));
    }
    body.push(Opcode::Call.as_u8());
    body.extend(leb128::write_u32(PANIC_IMPORT_INDEX));
    body.push(Opcode::End.as_u8());
    body
}

/// Build the panic fixture with single-byte length fields
///
/// | section  | content                                  |
/// |----------|------------------------------------------|
/// | type     | `(i32, i32) -> ()`, `() -> ()`           |
/// | import   | `env._panic`, function of type 0         |
/// | function | `doPanic` of type 1                      |
/// | memory   | one page, no maximum                     |
/// | export   | `memory` (memory 0), `doPanic` (func 1)  |
/// | code     | the [`panic_body`]                       |
pub fn build_panic_module() -> Result<Fixture> {
    build_panic_module_with(&Encoder::default())
}

/// Build the panic fixture with the given encoder
pub fn build_panic_module_with(encoder: &Encoder) -> Result<Fixture> {
    let types = encoder.vec(&[
        encoder.func_type(&[ValueType::I32, ValueType::I32], &[])?,
        encoder.func_type(&[], &[])?,
    ])?;

    let mut panic_import = encoder.string("env")?;
    panic_import.extend(encoder.string("_panic")?);
    panic_import.extend([ImportKind::Func.as_u8(), 0]);
    let imports = encoder.vec(&[panic_import])?;

    let functions = encoder.vec(&[[1u8]])?;

    let memories = encoder.vec(&[encoder.encode_limits(Limits::min_only(1))?])?;

    let mut memory_export = encoder.string("memory")?;
    memory_export.extend([ExportKind::Memory.as_u8(), 0]);
    let mut panic_export = encoder.string("doPanic")?;
    panic_export.extend([ExportKind::Func.as_u8(), 1]);
    let exports = encoder.vec(&[memory_export, panic_export])?;

    let body = panic_body();
    let mut entry = encoder
        .config()
        .length_encoding
        .encode("function body size", body.len())?;
    entry.extend(body);
    let code = encoder.vec(&[entry])?;

    let mut builder = FixtureBuilder::new(*encoder);
    builder
        .section(SectionId::Type, &types)?
        .section(SectionId::Import, &imports)?
        .section(SectionId::Function, &functions)?
        .section(SectionId::Memory, &memories)?
        .section(SectionId::Export, &exports)?
        .section(SectionId::Code, &code)?;
    Ok(builder.finish(PANIC_MODULE_NAME))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_body() {
        assert_eq!(panic_body(), [0x00, 0x41, 0xE4, 0x00, 0x41, 0x0A, 0x10, 0x00, 0x0B]);
    }

    #[test]
    fn test_sizes_in_build_order() {
        let fixture = build_panic_module().unwrap();
        let sizes: Vec<(&str, usize)> = fixture.sizes().iter().map(|s| (s.name, s.size)).collect();
        assert_eq!(
            sizes,
            [
                ("header", 8),
                ("type", 11),
                ("import", 16),
                ("function", 4),
                ("memory", 5),
                ("export", 22),
                ("code", 13),
            ]
        );
        assert_eq!(fixture.generated_len(), fixture.bytes().len());
        assert_eq!(fixture.bytes().len(), 79);
    }
}
