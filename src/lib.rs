//! Huffman compression with an explicit padding frame.
//!
//! [`compress`] turns a symbol sequence into a packed buffer and hands back the tree
//! it was built with; [`decompress`] needs that same tree. The [`archive`] module
//! stores the tree in front of the payload for a self-contained file.
//!
//! ```
//! use huffman_bitpack::{compress, decompress};
//!
//! let (bytes, tree) = compress(b"aabbbcc".as_slice())?;
//! assert_eq!(bytes, [0x05, 0xA1, 0xE0]);
//! assert_eq!(decompress(&bytes, &tree)?, b"aabbbcc");
//! # Ok::<(), huffman_bitpack::HuffmanError>(())
//! ```

pub mod archive;
pub mod bitpack;
pub mod decoding;
pub mod error;
pub mod files;
pub mod huffman;
pub mod stats;
pub mod symbol;

use log::debug;

pub use bitpack::Bits;
pub use decoding::HuffmanDecoder;
pub use error::{HuffmanError, Result};
pub use huffman::{CodeTable, FrequencyTable, HuffmanTree, Node, NodeId};
pub use symbol::Symbol;

/// Compresses `input`. The tree is not part of the returned bytes.
pub fn compress<S: Symbol>(input: &[S]) -> Result<(Vec<u8>, HuffmanTree<S>)> {
    let frequencies = FrequencyTable::from_symbols(input)?;
    let tree = HuffmanTree::build(&frequencies);
    let codes = CodeTable::from_tree(&tree);

    let bits = bitpack::encode_symbols(input, &codes)?;
    let bytes = bitpack::pack(&bits);

    debug!(
        "Compressed {} symbols into {} bytes",
        input.len(),
        bytes.len()
    );
    Ok((bytes, tree))
}

/// Reverses [`compress`]; `tree` must be the one returned alongside `bytes`.
pub fn decompress<S: Symbol>(bytes: &[u8], tree: &HuffmanTree<S>) -> Result<Vec<S>> {
    let bits = bitpack::unpack(bytes)?;
    HuffmanDecoder::new(tree).decode(&bits)
}
