use std::path::PathBuf;

use clap::Parser;
use log::{error, info};

use huffman_bitpack::files::{default_output, encode_file, sidecar_path};

#[derive(Parser, Debug)]
#[command(author, version, about = "Huffman-encode a file", long_about = None)]
struct Args {
    /// Path to the file to encode
    input: PathBuf,

    /// Path to write the encoded output. Defaults to `<input>.huff`
    output: Option<PathBuf>,

    /// Write only the padded bit stream and keep the tree in `<output>.tree`
    #[arg(long, env = "HUFF_RAW")]
    raw: bool,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&args.input));

    info!("--- Start Encoding ---");

    let stats = match encode_file(&args.input, &output, args.raw) {
        Ok(stats) => stats,
        Err(e) => {
            error!("Failed to encode {}: {}", args.input.display(), e);
            std::process::exit(1);
        }
    };

    println!(
        "\r\n✅ Encoding successful.\n\
         📂  Input:       {} ({} bytes)\n\
         💾  Output:      {} ({} bytes)\n\
         🔣  Symbols:     {} distinct\n\
         ℹ️  Entropy:     {:.4} bits/symbol\n\
         📏  Code length: {:.4} bits/symbol\n\
         🗜️  Ratio:       {:.4}%",
        args.input.display(),
        stats.input_bytes,
        output.display(),
        stats.output_bytes,
        stats.unique_symbols,
        stats.entropy,
        stats.average_code_length,
        stats.ratio()
    );
    if args.raw {
        println!("🌳  Tree:        {}", sidecar_path(&output).display());
    }

    info!("--- End ---");
}
