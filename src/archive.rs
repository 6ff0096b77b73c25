//! Self-contained artifact: the canonical tree travels in front of the payload.
//!
//! ```text
//! magic "HUFB" | symbol width (1 byte) | tree frame length (u32, big endian)
//! | tree frame | payload
//! ```
//!
//! Both frames use the padding header described in [`crate::bitpack`].

use log::debug;

use crate::error::{HuffmanError, Result};
use crate::huffman::HuffmanTree;
use crate::symbol::Symbol;
use crate::{compress, decompress};

pub const MAGIC: &[u8; 4] = b"HUFB";

const PREFIX_LEN: usize = MAGIC.len() + 1 + 4;

/// Assembles an archive from an already built tree and its payload.
pub fn assemble<S: Symbol>(tree: &HuffmanTree<S>, payload: &[u8]) -> Result<Vec<u8>> {
    let tree_frame = tree.to_bytes();
    let tree_len = u32::try_from(tree_frame.len()).map_err(|_| {
        HuffmanError::MalformedArchive(format!("tree frame of {} bytes", tree_frame.len()))
    })?;

    let mut bytes = Vec::with_capacity(PREFIX_LEN + tree_frame.len() + payload.len());
    bytes.extend_from_slice(MAGIC);
    bytes.push(S::WIDTH as u8);
    bytes.extend_from_slice(&tree_len.to_be_bytes());
    bytes.extend_from_slice(&tree_frame);
    bytes.extend_from_slice(payload);

    debug!(
        "Archive: {} byte tree frame, {} byte payload",
        tree_frame.len(),
        payload.len()
    );
    Ok(bytes)
}

/// Splits an archive into its tree and the raw payload.
pub fn disassemble<S: Symbol>(bytes: &[u8]) -> Result<(HuffmanTree<S>, &[u8])> {
    if bytes.len() < PREFIX_LEN {
        return Err(HuffmanError::MalformedArchive(format!(
            "{} bytes is shorter than the archive prefix",
            bytes.len()
        )));
    }

    let (magic, rest) = bytes.split_at(MAGIC.len());
    if magic != MAGIC {
        return Err(HuffmanError::MalformedArchive("bad magic".to_string()));
    }

    let width = rest[0] as usize;
    if width != S::WIDTH {
        return Err(HuffmanError::MalformedArchive(format!(
            "symbol width {width} does not match the expected {}",
            S::WIDTH
        )));
    }

    let tree_len = u32::from_be_bytes([rest[1], rest[2], rest[3], rest[4]]) as usize;
    let rest = &rest[5..];
    if tree_len > rest.len() {
        return Err(HuffmanError::MalformedArchive(format!(
            "tree frame of {tree_len} bytes overruns the {} remaining",
            rest.len()
        )));
    }

    let (tree_frame, payload) = rest.split_at(tree_len);
    let tree = HuffmanTree::from_bytes(tree_frame)?;
    Ok((tree, payload))
}

pub fn write<S: Symbol>(input: &[S]) -> Result<Vec<u8>> {
    let (payload, tree) = compress(input)?;
    assemble(&tree, &payload)
}

pub fn read<S: Symbol>(bytes: &[u8]) -> Result<Vec<S>> {
    let (tree, payload) = disassemble::<S>(bytes)?;
    decompress(payload, &tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_layout() {
        let bytes = write(b"aabbbcc".as_slice()).unwrap();
        assert_eq!(&bytes[..4], b"HUFB");
        assert_eq!(bytes[4], 8);

        let tree_len = u32::from_be_bytes([bytes[5], bytes[6], bytes[7], bytes[8]]) as usize;
        // 29 tree bits + 3 padding bits + header byte
        assert_eq!(tree_len, 5);
        assert_eq!(&bytes[9 + tree_len..], &[0x05u8, 0xA1, 0xE0]);
    }

    #[test]
    fn text_round_trip() {
        let text: Vec<char> = "zażółć gęślą jaźń".chars().collect();
        let bytes = write(&text).unwrap();
        assert_eq!(read::<char>(&bytes).unwrap(), text);
    }

    #[test]
    fn rejects_foreign_data() {
        assert!(matches!(
            read::<u8>(b"HUF"),
            Err(HuffmanError::MalformedArchive(_))
        ));
        assert!(matches!(
            read::<u8>(b"NOPE\x08\x00\x00\x00\x00"),
            Err(HuffmanError::MalformedArchive(_))
        ));

        let bytes = write(b"abc".as_slice()).unwrap();
        assert!(matches!(
            read::<char>(&bytes),
            Err(HuffmanError::MalformedArchive(_))
        ));

        let mut overrun = bytes.clone();
        overrun[5..9].copy_from_slice(&u32::MAX.to_be_bytes());
        assert!(matches!(
            read::<u8>(&overrun),
            Err(HuffmanError::MalformedArchive(_))
        ));
    }

    #[test]
    fn missing_payload_is_a_header_error() {
        let bytes = write(b"abc".as_slice()).unwrap();
        let tree_len = u32::from_be_bytes([bytes[5], bytes[6], bytes[7], bytes[8]]) as usize;
        let without_payload = &bytes[..9 + tree_len];
        assert!(matches!(
            read::<u8>(without_payload),
            Err(HuffmanError::MalformedHeader { byte_len: 0, .. })
        ));
    }
}
