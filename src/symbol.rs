use std::fmt::Debug;
use std::hash::Hash;

/// An atomic unit of the alphabet being compressed.
///
/// `WIDTH` is the number of bits a symbol takes in the canonical tree encoding.
pub trait Symbol: Copy + Eq + Hash + Ord + Debug {
    const WIDTH: usize;

    fn to_raw(self) -> u32;

    /// Returns `None` when `raw` is not a valid symbol value.
    fn from_raw(raw: u32) -> Option<Self>;
}

impl Symbol for u8 {
    const WIDTH: usize = 8;

    fn to_raw(self) -> u32 {
        self as u32
    }

    fn from_raw(raw: u32) -> Option<Self> {
        u8::try_from(raw).ok()
    }
}

// Largest scalar value is 0x10FFFF.
impl Symbol for char {
    const WIDTH: usize = 21;

    fn to_raw(self) -> u32 {
        self as u32
    }

    fn from_raw(raw: u32) -> Option<Self> {
        char::from_u32(raw)
    }
}
