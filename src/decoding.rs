use bitvec::prelude::*;
use log::debug;

use crate::error::{HuffmanError, Result};
use crate::huffman::{HuffmanTree, Node, NodeId};
use crate::symbol::Symbol;

/// Position of the walk between two bits. Reaching a leaf emits a symbol and goes
/// straight back to the root, so there is no state for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AtRoot,
    AtInternal(NodeId),
}

/// Recovers symbols by walking the tree one bit at a time: `0` goes left, `1` goes
/// right.
pub struct HuffmanDecoder<'t, S> {
    tree: &'t HuffmanTree<S>,
}

impl<'t, S: Symbol> HuffmanDecoder<'t, S> {
    pub fn new(tree: &'t HuffmanTree<S>) -> Self {
        HuffmanDecoder { tree }
    }

    /// Fails if the bits end anywhere but on a code word boundary.
    pub fn decode(&self, bits: &BitSlice<u8, Msb0>) -> Result<Vec<S>> {
        let root = self.tree.root();
        let mut output = Vec::new();
        let mut state = State::AtRoot;

        for (bit_position, bit) in bits.iter().by_vals().enumerate() {
            let current = match state {
                State::AtRoot => root,
                State::AtInternal(id) => id,
            };

            let next = match self.tree.node(current) {
                Node::Internal { left, right, .. } => {
                    if bit {
                        *right
                    } else {
                        *left
                    }
                }
                // A lone leaf at the root owns the code `0`.
                Node::Leaf { symbol, .. } if !bit => {
                    output.push(*symbol);
                    continue;
                }
                Node::Leaf { .. } => return Err(HuffmanError::UnexpectedBit { bit_position }),
            };

            state = match self.tree.node(next) {
                Node::Leaf { symbol, .. } => {
                    output.push(*symbol);
                    State::AtRoot
                }
                Node::Internal { .. } => State::AtInternal(next),
            };
        }

        if state != State::AtRoot {
            return Err(HuffmanError::TruncatedStream {
                bit_position: bits.len(),
            });
        }

        debug!("Decoded {} bits into {} symbols", bits.len(), output.len());
        Ok(output)
    }
}
