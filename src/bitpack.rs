//! Bit-level framing of encoded symbols.
//!
//! A packed buffer starts with one byte holding the padding count (1 to 8), followed
//! by the code bits and that many zero bits, packed most significant bit first. An
//! already aligned stream still receives a full byte of padding, so the count is
//! never zero.

use bitvec::prelude::*;
use log::debug;

use crate::error::{HuffmanError, Result};
use crate::huffman::CodeTable;
use crate::symbol::Symbol;

pub type Bits = BitVec<u8, Msb0>;

const HEADER_BITS: usize = 8;

/// Renders bits as a string of `0` and `1`.
pub fn render(bits: &BitSlice<u8, Msb0>) -> String {
    bits.iter()
        .by_vals()
        .map(|bit| if bit { '1' } else { '0' })
        .collect()
}

/// Concatenates the code of every symbol in order.
pub fn encode_symbols<S: Symbol>(symbols: &[S], codes: &CodeTable<S>) -> Result<Bits> {
    let mut bits = Bits::with_capacity(symbols.len() * 2);

    for (position, symbol) in symbols.iter().enumerate() {
        let code = codes
            .get(symbol)
            .ok_or_else(|| HuffmanError::UnknownSymbol {
                symbol: format!("{symbol:?}"),
                position,
            })?;
        bits.extend_from_bitslice(code);
    }

    debug!("Encoded {} symbols into {} bits", symbols.len(), bits.len());
    Ok(bits)
}

/// Number of zero bits appended after `bit_len` code bits, always in `1..=8`.
pub fn padding_for(bit_len: usize) -> u8 {
    (8 - bit_len % 8) as u8
}

pub fn pack(bits: &BitSlice<u8, Msb0>) -> Vec<u8> {
    let extra = padding_for(bits.len());
    let mut framed = Bits::with_capacity(HEADER_BITS + bits.len() + extra as usize);

    for shift in (0..HEADER_BITS).rev() {
        framed.push((extra >> shift) & 1 == 1);
    }
    framed.extend_from_bitslice(bits);
    framed.resize(framed.len() + extra as usize, false);

    debug!(
        "Packed {} bits with {} padding bits into {} bytes",
        bits.len(),
        extra,
        framed.len() / 8
    );
    framed.into_vec()
}

/// Strips the padding header and the trailing padding bits, which must all be zero.
pub fn unpack(bytes: &[u8]) -> Result<Bits> {
    let Some(&extra) = bytes.first() else {
        return Err(HuffmanError::MalformedHeader {
            byte_len: 0,
            padding: None,
            reason: "buffer has no padding byte",
        });
    };

    if extra == 0 || extra as usize > 8 {
        return Err(HuffmanError::MalformedHeader {
            byte_len: bytes.len(),
            padding: Some(extra),
            reason: "padding count must be between 1 and 8",
        });
    }

    let payload = bytes[1..].view_bits::<Msb0>();
    if payload.len() < extra as usize {
        return Err(HuffmanError::MalformedHeader {
            byte_len: bytes.len(),
            padding: Some(extra),
            reason: "padding count exceeds the payload",
        });
    }

    let end = payload.len() - extra as usize;
    if payload[end..].any() {
        return Err(HuffmanError::MalformedHeader {
            byte_len: bytes.len(),
            padding: Some(extra),
            reason: "padding bits are not zero",
        });
    }

    debug!("Unpacked {} bytes into {} bits", bytes.len(), end);
    Ok(payload[..end].to_bitvec())
}
