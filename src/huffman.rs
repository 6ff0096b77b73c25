use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use bitvec::prelude::*;
use log::{debug, trace};

use crate::bitpack::{self, Bits, render};
use crate::error::{HuffmanError, Result};
use crate::symbol::Symbol;

/// Occurrence count of every symbol seen in the input. Counts are always positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<S: Symbol> {
    counts: HashMap<S, u64>,
}

impl<S: Symbol> FrequencyTable<S> {
    pub fn from_symbols(symbols: &[S]) -> Result<Self> {
        if symbols.is_empty() {
            return Err(HuffmanError::EmptyInput);
        }

        let mut counts = HashMap::new();
        for &symbol in symbols {
            *counts.entry(symbol).or_insert(0) += 1;
        }

        debug!(
            "Counted {} symbols, {} distinct",
            symbols.len(),
            counts.len()
        );
        Ok(Self { counts })
    }

    /// Builds a table from externally supplied counts. Zero counts are dropped and
    /// repeated symbols are summed. The total of all counts must fit in a `u64`, so
    /// merging weights while building the tree cannot overflow.
    pub fn from_counts<I>(counts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
    {
        let mut table = HashMap::new();
        let mut total: u64 = 0;
        for (symbol, count) in counts.into_iter().filter(|&(_, count)| count > 0) {
            total = total
                .checked_add(count)
                .ok_or(HuffmanError::WeightOverflow)?;
            *table.entry(symbol).or_insert(0) += count;
        }

        if table.is_empty() {
            return Err(HuffmanError::EmptyInput);
        }
        Ok(Self { counts: table })
    }

    pub fn get(&self, symbol: &S) -> Option<u64> {
        self.counts.get(symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (S, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Shannon entropy in bits per symbol.
    pub fn entropy(&self) -> f64 {
        let total = self.total() as f64;

        let entropy: f64 = self
            .counts
            .values()
            .map(|&count| {
                let p = count as f64 / total;
                -p * p.log2()
            })
            .sum();

        debug!(
            "Calculated entropy: {:.4} bits/symbol (Total samples: {})",
            entropy, total
        );
        entropy
    }
}

/// Index of a node inside a [`HuffmanTree`] arena.
pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<S> {
    Leaf {
        symbol: S,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: NodeId,
        right: NodeId,
    },
}

impl<S: Copy> Node<S> {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn symbol(&self) -> Option<S> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct HeapNode {
    weight: u64,
    id: NodeId,
}

impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behaviour. Node ids follow insertion order, so equal
        // weights pop in the order they were pushed.
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Prefix-code tree stored as a flat arena. Every node except the root is the child
/// of exactly one internal node, and children always precede their parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree<S> {
    nodes: Vec<Node<S>>,
    root: NodeId,
}

impl<S: Symbol> HuffmanTree<S> {
    /// Builds the tree by repeatedly merging the two lightest nodes. Leaves are seeded
    /// in ascending symbol order; ties on weight go to the node inserted first, and
    /// the first node popped becomes the left child.
    pub fn build(frequencies: &FrequencyTable<S>) -> Self {
        debug!(
            "Building Huffman Tree from {} unique symbols",
            frequencies.len()
        );

        let mut leaves: Vec<(S, u64)> = frequencies.iter().collect();
        leaves.sort_unstable_by_key(|&(symbol, _)| symbol);

        let mut nodes = Vec::with_capacity((2 * leaves.len()).saturating_sub(1));
        let mut heap = BinaryHeap::with_capacity(leaves.len());

        for (symbol, weight) in leaves {
            heap.push(HeapNode {
                weight,
                id: nodes.len(),
            });
            nodes.push(Node::Leaf { symbol, weight });
        }

        while heap.len() > 1 {
            if let (Some(left), Some(right)) = (heap.pop(), heap.pop()) {
                let weight = left.weight + right.weight;
                let id = nodes.len();
                nodes.push(Node::Internal {
                    weight,
                    left: left.id,
                    right: right.id,
                });
                heap.push(HeapNode { weight, id });
            }
        }

        let root = heap.pop().map_or(0, |last| last.id);
        debug!("Tree construction complete. {} nodes.", nodes.len());
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &Node<S> {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.len() / 2 + 1
    }

    pub fn is_single_leaf(&self) -> bool {
        matches!(self.nodes[self.root], Node::Leaf { .. })
    }

    /// Total weight of the tree, i.e. the input length it was built from. Trees read
    /// back from their canonical encoding carry no weights.
    pub fn weight(&self) -> u64 {
        self.nodes[self.root].weight()
    }

    /// Canonical pre-order encoding: `0` for an internal node followed by its left and
    /// right subtrees, `1` for a leaf followed by the symbol in `S::WIDTH` bits.
    pub fn serialize(&self) -> Bits {
        let mut bits = Bits::new();
        let mut stack = vec![self.root];

        while let Some(id) = stack.pop() {
            match self.nodes[id] {
                Node::Leaf { symbol, .. } => {
                    bits.push(true);
                    let raw = symbol.to_raw();
                    for shift in (0..S::WIDTH).rev() {
                        bits.push((raw >> shift) & 1 == 1);
                    }
                }
                Node::Internal { left, right, .. } => {
                    bits.push(false);
                    stack.push(right);
                    stack.push(left);
                }
            }
        }

        trace!("Serialized tree into {} bits", bits.len());
        bits
    }

    pub fn deserialize(bits: &BitSlice<u8, Msb0>) -> Result<Self> {
        let truncated =
            |at: usize| HuffmanError::MalformedTree(format!("encoding truncated at bit {at}"));

        let mut nodes = Vec::new();
        let mut seen = HashSet::new();
        // Internal nodes still waiting for children, with their left child once known.
        let mut pending: Vec<Option<NodeId>> = Vec::new();
        let mut pos = 0;

        let root = 'parse: loop {
            let is_leaf = bits.get(pos).map(|bit| *bit).ok_or_else(|| truncated(pos))?;
            pos += 1;

            if !is_leaf {
                pending.push(None);
                continue;
            }

            let end = pos + S::WIDTH;
            if end > bits.len() {
                return Err(truncated(bits.len()));
            }
            let raw = bits[pos..end]
                .iter()
                .by_vals()
                .fold(0u32, |acc, bit| (acc << 1) | bit as u32);
            pos = end;

            let symbol = S::from_raw(raw).ok_or_else(|| {
                HuffmanError::MalformedTree(format!("invalid symbol value {raw:#x}"))
            })?;
            if !seen.insert(symbol) {
                return Err(HuffmanError::MalformedTree(format!(
                    "symbol {symbol:?} appears twice"
                )));
            }

            let mut completed = nodes.len();
            nodes.push(Node::Leaf { symbol, weight: 0 });

            loop {
                match pending.pop() {
                    None => break 'parse completed,
                    Some(None) => {
                        pending.push(Some(completed));
                        break;
                    }
                    Some(Some(left)) => {
                        nodes.push(Node::Internal {
                            weight: 0,
                            left,
                            right: completed,
                        });
                        completed = nodes.len() - 1;
                    }
                }
            }
        };

        if pos != bits.len() {
            return Err(HuffmanError::MalformedTree(format!(
                "{} trailing bits after the tree",
                bits.len() - pos
            )));
        }

        debug!("Deserialized tree with {} nodes", nodes.len());
        Ok(Self { nodes, root })
    }

    /// Canonical encoding framed with the same padding header as the payload.
    pub fn to_bytes(&self) -> Vec<u8> {
        bitpack::pack(&self.serialize())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::deserialize(&bitpack::unpack(bytes)?)
    }
}

/// Symbol to code word mapping derived from a [`HuffmanTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<S: Symbol> {
    codes: HashMap<S, Bits>,
}

impl<S: Symbol> CodeTable<S> {
    /// Left edges append `0`, right edges append `1`. A tree made of a single leaf
    /// gets the one-bit code `0`.
    pub fn from_tree(tree: &HuffmanTree<S>) -> Self {
        let mut codes = HashMap::with_capacity(tree.leaf_count());

        if let Node::Leaf { symbol, .. } = tree.node(tree.root()) {
            trace!("Single symbol {:?} gets code '0'", symbol);
            codes.insert(*symbol, bitvec![u8, Msb0; 0]);
            return Self { codes };
        }

        let mut stack = vec![(tree.root(), Bits::new())];
        while let Some((id, path)) = stack.pop() {
            match tree.node(id) {
                Node::Leaf { symbol, .. } => {
                    trace!("Assigning code to {:?} : '{}'", symbol, render(&path));
                    codes.insert(*symbol, path);
                }
                Node::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    let mut left_path = path;
                    left_path.push(false);

                    stack.push((*right, right_path));
                    stack.push((*left, left_path));
                }
            }
        }

        Self { codes }
    }

    pub fn get(&self, symbol: &S) -> Option<&BitSlice<u8, Msb0>> {
        self.codes.get(symbol).map(|code| code.as_bitslice())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (S, &BitSlice<u8, Msb0>)> + '_ {
        self.codes
            .iter()
            .map(|(&symbol, code)| (symbol, code.as_bitslice()))
    }

    /// Sum over all symbols of count times code length, i.e. the encoded bit count.
    pub fn weighted_length(&self, frequencies: &FrequencyTable<S>) -> u64 {
        frequencies
            .iter()
            .map(|(symbol, count)| {
                count * self.codes.get(&symbol).map_or(0, |code| code.len() as u64)
            })
            .sum()
    }
}
