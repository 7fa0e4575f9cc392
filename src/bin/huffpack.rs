//! huffpack CLI - static Huffman compression for files.
//!
//! ```text
//! huffpack -c input.txt output.huff
//! huffpack -d output.huff restored.txt
//! ```

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{ArgGroup, Parser};

use huffpack::{CodeTable, Container, HuffmanTree};

/// Compress or decompress a file with static Huffman coding.
#[derive(Parser, Debug)]
#[command(name = "huffpack")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["compress", "decompress"])))]
struct Args {
    /// Compress INPUT into a container
    #[arg(short = 'c', long)]
    compress: bool,

    /// Decompress a container back into the original bytes
    #[arg(short = 'd', long)]
    decompress: bool,

    /// File to read
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// File to write
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Print the code assigned to each symbol
    #[arg(long)]
    show_codes: bool,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Size and timing of one run.
struct Stats {
    original_len: usize,
    compressed_len: usize,
    elapsed: Duration,
}

impl Stats {
    /// Compressed size as a percentage of the original.
    fn ratio(&self) -> f64 {
        if self.original_len == 0 {
            return 0.0;
        }
        100.0 * self.compressed_len as f64 / self.original_len as f64
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> huffpack::Result<()> {
    let args = Args::parse();
    let input = fs::read(&args.input)?;

    let start = Instant::now();
    let output = if args.compress {
        huffpack::compress(&input)?
    } else {
        huffpack::decompress(&input)?
    };
    let elapsed = start.elapsed();

    fs::write(&args.output, &output)?;

    let (original_len, compressed_len) = if args.compress {
        (input.len(), output.len())
    } else {
        (output.len(), input.len())
    };
    let stats = Stats {
        original_len,
        compressed_len,
        elapsed,
    };

    if args.show_codes || args.verbose {
        let container = if args.compress {
            Container::decode(&output)?
        } else {
            Container::decode(&input)?
        };
        if !container.frequencies().is_empty() {
            let tree = HuffmanTree::build(container.frequencies())?;
            let codes = CodeTable::from_tree(&tree);
            if args.verbose {
                eprintln!("Model:");
                eprintln!("  Symbols: {}", codes.len());
                eprintln!("  Tree depth: {}", tree.depth());
                eprintln!("  Longest code: {} bits", codes.max_len());
                eprintln!("  Payload: {} bits", tree.weighted_path_length());
            }
            if args.show_codes {
                println!("Huffman codes:");
                print!("{codes}");
            }
        }
    }

    let verb = if args.compress {
        "Compression"
    } else {
        "Decompression"
    };
    println!("{verb} completed in {} ms", stats.elapsed.as_millis());
    println!("Original: {} bytes", stats.original_len);
    println!("Compressed: {} bytes", stats.compressed_len);
    println!("Compression ratio: {:.1}%", stats.ratio());

    Ok(())
}
