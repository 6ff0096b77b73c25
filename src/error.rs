use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HuffmanError {
    #[error("cannot build a Huffman tree from empty input")]
    EmptyInput,

    #[error("symbol counts add up to more than u64::MAX")]
    WeightOverflow,

    #[error("symbol {symbol} at position {position} has no entry in the code table")]
    UnknownSymbol { symbol: String, position: usize },

    #[error("malformed padding header in {byte_len} byte buffer (padding {padding:?}): {reason}")]
    MalformedHeader {
        byte_len: usize,
        padding: Option<u8>,
        reason: &'static str,
    },

    #[error("bit stream ends inside a code word after {bit_position} bits")]
    TruncatedStream { bit_position: usize },

    #[error("bit {bit_position} does not follow any path of the code tree")]
    UnexpectedBit { bit_position: usize },

    #[error("malformed tree encoding: {0}")]
    MalformedTree(String),

    #[error("malformed archive: {0}")]
    MalformedArchive(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
