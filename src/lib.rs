//! # Static Huffman coding
//!
//! *Byte-oriented prefix coding with a self-describing container.*
//!
//! ## Intuition First
//!
//! Morse code gives `E` a single dot and `Q` four symbols: common letters get
//! short codes, rare ones long codes. Huffman coding does the same for bytes,
//! but picks the code lengths from the actual input so the total output is as
//! short as any prefix code can make it.
//!
//! ## The Problem
//!
//! A prefix code is only decodable if the decoder uses exactly the tree the
//! encoder used. The greedy Huffman construction leaves the tree shape open
//! whenever two nodes have the same frequency, so this crate fixes a
//! tie-break: nodes are ordered by `(frequency, creation id)`, and ids are
//! handed out to leaves in ascending symbol order. Shipping only the
//! frequency table is then enough to rebuild the tree on the other side.
//!
//! ## Historical Context
//!
//! ```text
//! 1948  Shannon     Entropy as the fundamental limit
//! 1952  Huffman     Optimal prefix codes by greedy merging
//! 1978  Gallager    Adaptive (dynamic) Huffman coding
//! 1991  Katz        DEFLATE: LZ77 + Huffman, still everywhere
//! ```
//!
//! ## Mathematical Formulation
//!
//! Given frequencies $f_s$ and code lengths $l_s$, Huffman's construction
//! minimises the weighted path length
//!
//! ```text
//! W = sum_s f_s * l_s
//! ```
//!
//! over all binary prefix codes. `W` is exactly the payload size in bits.
//!
//! ## Complexity Analysis
//!
//! - **Time**: $O(n + k \log k)$ for $n$ input bytes and $k \le 256$ symbols.
//! - **Space**: $O(k)$ for the tree and code table, plus the output.
//!
//! ## Failure Modes
//!
//! 1. **Single symbol**: the tree is a lone leaf with an empty path. Such a
//!    symbol is assigned the one-bit code `0` so it can still be decoded.
//! 2. **Padding**: the last payload byte is zero-padded and the padding length
//!    is not stored. Decoding stops after `sum(f_s)` symbols instead.
//! 3. **Full alphabet**: 256 does not fit the one-byte size field; it is
//!    written as `0` and told apart from the empty container by the bytes that
//!    follow.
//!
//! ## Usage
//!
//! ```rust
//! let packed = huffpack::compress(b"aabbbcc")?;
//! assert_eq!(huffpack::decompress(&packed)?, b"aabbbcc");
//! # Ok::<(), huffpack::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bits;
pub mod code;
pub mod container;
pub mod error;
pub mod frequency;
pub mod huffman;
pub mod tree;

pub use bits::{BitStr, BitString};
pub use code::CodeTable;
pub use container::Container;
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use huffman::{compress, decompress, HuffmanDecoder, HuffmanEncoder};
pub use tree::HuffmanTree;
