//! Property tests for the fragment encoder and LEB128 helpers.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use wasmfrag_format::{
    binary::read_string,
    encode_section, encode_string, encode_vec, is_valid_wasm_header, leb128, Encoder,
    EncoderConfig, LengthEncoding, WASM_HEADER,
};

fn leb128_encoder() -> Encoder {
    Encoder::new(EncoderConfig::new().with_length_encoding(LengthEncoding::Leb128))
}

proptest! {
    #[test]
    fn string_prefix_is_byte_length(s in "\\PC{0,31}") {
        // At most four bytes per character.
        let encoded = encode_string(&s).unwrap();
        prop_assert_eq!(encoded[0] as usize, s.len());
        prop_assert_eq!(&encoded[1..], s.as_bytes());

        let (decoded, consumed) = read_string(&encoded, 0).unwrap();
        prop_assert_eq!(decoded, s);
        prop_assert_eq!(consumed, encoded.len());
    }

    #[test]
    fn vec_prefix_is_item_count(items in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..4), 0..128)) {
        let encoded = encode_vec(&items).unwrap();
        prop_assert_eq!(encoded[0] as usize, items.len());
        let expected = items.concat();
        prop_assert_eq!(&encoded[1..], expected.as_slice());
    }

    #[test]
    fn section_length_is_content_plus_two(id in 0u8..=12, content in prop::collection::vec(any::<u8>(), 0..128)) {
        let encoded = encode_section(id, &content).unwrap();
        prop_assert_eq!(encoded.len(), 2 + content.len());
        prop_assert_eq!(encoded[0], id);
        prop_assert_eq!(encoded[1] as usize, content.len());
    }

    #[test]
    fn oversized_sections_are_rejected(len in 128usize..512) {
        let error = encode_section(0u8, &vec![0u8; len]).unwrap_err();
        prop_assert!(error.is_encoding_error());
        // The widened encoder accepts the same content.
        let widened = leb128_encoder().section(0u8, &vec![0u8; len]).unwrap();
        prop_assert_eq!(widened.len(), 1 + leb128::encoded_len_u64(len as u64) + len);
    }

    #[test]
    fn header_mutation_is_detected(index in 0usize..8, replacement in any::<u8>()) {
        prop_assume!(WASM_HEADER[index] != replacement);
        let mut header = WASM_HEADER;
        header[index] = replacement;
        prop_assert!(!is_valid_wasm_header(&header));
    }

    #[test]
    fn truncated_headers_are_invalid(len in 0usize..8) {
        prop_assert!(!is_valid_wasm_header(&WASM_HEADER[..len]));
    }

    #[test]
    fn unsigned_leb128_round_trip(value in any::<u64>()) {
        let bytes = leb128::write_u64(value);
        prop_assert_eq!(leb128::read_u64(&bytes, 0).unwrap(), (value, bytes.len()));
        prop_assert_eq!(bytes.len(), leb128::encoded_len_u64(value));
    }

    #[test]
    fn signed_leb128_round_trip(value in any::<i64>()) {
        let bytes = leb128::write_i64(value);
        prop_assert_eq!(leb128::read_i64(&bytes, 0).unwrap(), (value, bytes.len()));
    }

    #[test]
    fn narrow_leb128_round_trip(unsigned in any::<u32>(), signed in any::<i32>()) {
        let bytes = leb128::write_u32(unsigned);
        prop_assert_eq!(leb128::read_u32(&bytes, 0).unwrap(), (unsigned, bytes.len()));
        let bytes = leb128::write_i32(signed);
        prop_assert_eq!(leb128::read_i32(&bytes, 0).unwrap(), (signed, bytes.len()));
    }
}

#[test]
fn memory_module_matches_hex_fixture() {
    let limits = Encoder::default().limits(1, None).unwrap();
    let memory = encode_section(5u8, &encode_vec(&[limits]).unwrap()).unwrap();
    let module = Encoder::default().module(&[memory]);
    assert_eq!(hex::encode(&module), "0061736d010000000503010001");
}

#[test]
fn widened_encoder_matches_single_byte_below_128() {
    let widened = leb128_encoder();
    let plain = Encoder::default();
    for len in [0usize, 1, 64, 127] {
        let content = vec![0xAB; len];
        assert_eq!(widened.section(11u8, &content).unwrap(), plain.section(11u8, &content).unwrap());
    }
}
