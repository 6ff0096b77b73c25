use huffman_bitpack::bitpack::{self, render};
use huffman_bitpack::{
    CodeTable, FrequencyTable, HuffmanError, HuffmanTree, archive, compress, decompress,
};
use proptest::prelude::*;

fn optimal_cost(counts: &[u64]) -> u64 {
    let symbols = (0u8..).zip(counts.iter().copied());
    let frequencies = FrequencyTable::from_counts(symbols).unwrap();
    let codes = CodeTable::from_tree(&HuffmanTree::build(&frequencies));
    codes.weighted_length(&frequencies)
}

#[test]
fn reference_scenario() {
    let (bytes, tree) = compress(b"aabbbcc".as_slice()).unwrap();

    let codes = CodeTable::from_tree(&tree);
    assert_eq!(render(codes.get(&b'b').unwrap()), "0");
    assert_eq!(render(codes.get(&b'a').unwrap()), "10");
    assert_eq!(render(codes.get(&b'c').unwrap()), "11");

    // 11 code bits, 5 padding bits
    assert_eq!(bytes, vec![0x05, 0xA1, 0xE0]);
    assert_eq!(decompress(&bytes, &tree).unwrap(), b"aabbbcc");
}

#[test]
fn single_symbol_round_trip() {
    let (bytes, tree) = compress(b"aaaa".as_slice()).unwrap();
    assert_eq!(bytes, vec![0x04, 0x00]);
    assert_eq!(decompress(&bytes, &tree).unwrap(), b"aaaa");
}

#[test]
fn text_mode_round_trip() {
    let text: Vec<char> = "File compressed and saved – ünïcödé".chars().collect();
    let (bytes, tree) = compress(&text).unwrap();
    assert_eq!(decompress(&bytes, &tree).unwrap(), text);
}

#[test]
fn empty_input_fails() {
    let empty: &[u8] = &[];
    assert!(matches!(compress(empty), Err(HuffmanError::EmptyInput)));
}

#[test]
fn empty_buffer_is_malformed() {
    let (_, tree) = compress(b"abc".as_slice()).unwrap();
    assert!(matches!(
        decompress(&[], &tree),
        Err(HuffmanError::MalformedHeader { .. })
    ));
}

#[test]
fn dirty_padding_is_rejected() {
    let (_, tree) = compress(b"aabbbcc".as_slice()).unwrap();
    assert!(matches!(
        decompress(&[0x05, 0xA1, 0xFF], &tree),
        Err(HuffmanError::MalformedHeader {
            padding: Some(5),
            ..
        })
    ));
}

#[test]
fn buffer_ending_mid_code_is_truncated() {
    let (_, tree) = compress(b"aabbbcc".as_slice()).unwrap();
    // "1" alone stops on the internal node above a and c
    let bytes = bitpack::pack(&bitpack::unpack(&[0x07, 0x80]).unwrap());
    assert_eq!(bytes, vec![0x07, 0x80]);
    assert!(matches!(
        decompress(&bytes, &tree),
        Err(HuffmanError::TruncatedStream { bit_position: 1 })
    ));
}

#[test]
fn optimal_costs_on_small_tables() {
    assert_eq!(optimal_cost(&[2, 3, 2]), 11);
    assert_eq!(optimal_cost(&[1, 1, 1, 1]), 8);
    assert_eq!(optimal_cost(&[1, 1, 2, 3, 5]), 25);
    assert_eq!(optimal_cost(&[45, 13, 12, 16, 9, 5]), 224);
    assert_eq!(optimal_cost(&[10, 10]), 20);
}

proptest! {
    #[test]
    fn proptest_round_trip(data in prop::collection::vec(any::<u8>(), 1..512)) {
        let (bytes, tree) = compress(&data).unwrap();
        prop_assert_eq!(decompress(&bytes, &tree).unwrap(), data);
    }

    #[test]
    fn proptest_text_round_trip(text in "\\PC{1,64}") {
        let symbols: Vec<char> = text.chars().collect();
        let (bytes, tree) = compress(&symbols).unwrap();
        prop_assert_eq!(decompress(&bytes, &tree).unwrap(), symbols);
    }

    #[test]
    fn proptest_prefix_free(data in prop::collection::vec(any::<u8>(), 1..256)) {
        let frequencies = FrequencyTable::from_symbols(&data).unwrap();
        let codes = CodeTable::from_tree(&HuffmanTree::build(&frequencies));
        prop_assert_eq!(codes.len(), frequencies.len());

        for (a, code_a) in codes.iter() {
            prop_assert!(!code_a.is_empty());
            for (b, code_b) in codes.iter() {
                if a != b {
                    prop_assert!(!code_b.starts_with(code_a));
                }
            }
        }
    }

    #[test]
    fn proptest_padding(data in prop::collection::vec(any::<u8>(), 1..256)) {
        let (bytes, tree) = compress(&data).unwrap();
        let padding = bytes[0] as usize;
        prop_assert!((1..=8).contains(&padding));

        let frequencies = FrequencyTable::from_symbols(&data).unwrap();
        let codes = CodeTable::from_tree(&tree);
        let code_bits = (bytes.len() - 1) * 8 - padding;
        prop_assert_eq!(code_bits as u64, codes.weighted_length(&frequencies));
        prop_assert_eq!(bitpack::unpack(&bytes).unwrap().len(), code_bits);
    }

    #[test]
    fn proptest_tree_codec(data in prop::collection::vec(any::<u8>(), 1..256)) {
        let (_, tree) = compress(&data).unwrap();
        let restored = HuffmanTree::<u8>::from_bytes(&tree.to_bytes()).unwrap();
        prop_assert_eq!(CodeTable::from_tree(&restored), CodeTable::from_tree(&tree));
    }

    #[test]
    fn proptest_archive(data in prop::collection::vec(any::<u8>(), 1..256)) {
        let bytes = archive::write(&data).unwrap();
        prop_assert_eq!(archive::read::<u8>(&bytes).unwrap(), data);
    }
}
