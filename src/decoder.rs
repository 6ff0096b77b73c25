use std::path::PathBuf;

use clap::Parser;
use log::{error, info};

use huffman_bitpack::files::decode_file;

#[derive(Parser, Debug)]
#[command(author, version, about = "Decode a Huffman-encoded file", long_about = None)]
struct Args {
    /// Path to the encoded file
    input: PathBuf,

    /// Path to write the decoded output
    output: PathBuf,

    /// Tree sidecar of a raw stream written with `encode --raw`
    #[arg(long, env = "HUFF_TREE")]
    tree: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    info!("--- Start Decoding ---");

    let written = match decode_file(&args.input, &args.output, args.tree.as_deref()) {
        Ok(written) => written,
        Err(e) => {
            error!("Failed to decode {}: {}", args.input.display(), e);
            std::process::exit(1);
        }
    };

    let input_size = std::fs::metadata(&args.input)
        .map(|m| m.len())
        .unwrap_or(0);

    println!(
        "\r\n✅ decoding successful.\n\
         📂 input file:  {} ({} bytes)\n\
         💾 output file: {} ({} bytes)",
        args.input.display(),
        input_size,
        args.output.display(),
        written
    );

    info!("--- End ---");
}
