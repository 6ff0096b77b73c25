//! File level helpers behind the `encode` and `decode` binaries.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::decompress;
use crate::error::Result;
use crate::huffman::{CodeTable, FrequencyTable, HuffmanTree};
use crate::stats::CompressionStats;
use crate::{archive, bitpack};

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// `<input>.huff`
pub fn default_output(input: &Path) -> PathBuf {
    with_suffix(input, ".huff")
}

/// Where a raw artifact keeps its tree: `<output>.tree`.
pub fn sidecar_path(output: &Path) -> PathBuf {
    with_suffix(output, ".tree")
}

/// Compresses `input` into `output`. With `raw` the bare padded stream is written and
/// the tree goes to the sidecar file; otherwise a self-contained archive is written.
pub fn encode_file(input: &Path, output: &Path, raw: bool) -> Result<CompressionStats> {
    info!("Reading input file: {}", input.display());
    let data = fs::read(input)?;

    let frequencies = FrequencyTable::from_symbols(&data)?;
    let tree = HuffmanTree::build(&frequencies);
    let codes = CodeTable::from_tree(&tree);
    let payload = bitpack::pack(&bitpack::encode_symbols(&data, &codes)?);

    let written = if raw {
        // Sidecar before payload, so no payload is left without its tree.
        let sidecar = sidecar_path(output);
        let tree_bytes = tree.to_bytes();
        fs::write(&sidecar, &tree_bytes)?;
        debug!(
            "Tree stored in {} ({} bytes)",
            sidecar.display(),
            tree_bytes.len()
        );
        fs::write(output, &payload)?;
        payload.len() + tree_bytes.len()
    } else {
        let bytes = archive::assemble(&tree, &payload)?;
        fs::write(output, &bytes)?;
        bytes.len()
    };
    info!("Wrote {} ({} bytes)", output.display(), written);

    Ok(CompressionStats::new(
        &frequencies,
        &codes,
        data.len(),
        written,
    ))
}

/// Decompresses `input` into `output` and returns the number of bytes written. A
/// `tree` path means `input` is a raw artifact described by that sidecar.
pub fn decode_file(input: &Path, output: &Path, tree: Option<&Path>) -> Result<usize> {
    info!("Reading encoded file: {}", input.display());
    let content = fs::read(input)?;
    debug!("Total file size: {} bytes", content.len());

    let decoded = match tree {
        Some(tree_path) => {
            let tree = HuffmanTree::<u8>::from_bytes(&fs::read(tree_path)?)?;
            decompress(&content, &tree)?
        }
        None => archive::read::<u8>(&content)?,
    };

    info!("Writing decoded output to file: {}", output.display());
    fs::write(output, &decoded)?;
    Ok(decoded.len())
}
