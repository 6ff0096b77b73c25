use crate::huffman::{CodeTable, FrequencyTable};
use crate::symbol::Symbol;

/// Summary of one compression run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionStats {
    pub input_bytes: usize,
    pub output_bytes: usize,
    pub unique_symbols: usize,
    /// Bits per symbol.
    pub entropy: f64,
    /// Bits per symbol actually spent by the code.
    pub average_code_length: f64,
}

impl CompressionStats {
    pub fn new<S: Symbol>(
        frequencies: &FrequencyTable<S>,
        codes: &CodeTable<S>,
        input_bytes: usize,
        output_bytes: usize,
    ) -> Self {
        let total = frequencies.total() as f64;
        CompressionStats {
            input_bytes,
            output_bytes,
            unique_symbols: frequencies.len(),
            entropy: frequencies.entropy(),
            average_code_length: codes.weighted_length(frequencies) as f64 / total,
        }
    }

    /// Space saved relative to the input, in percent. Negative when the output grew.
    pub fn ratio(&self) -> f64 {
        if self.input_bytes > 0 {
            100.0 * (1.0 - (self.output_bytes as f64) / (self.input_bytes as f64))
        } else {
            0.0
        }
    }
}
