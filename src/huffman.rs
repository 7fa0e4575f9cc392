//! Static Huffman encoder and decoder.
//!
//! [`compress`] and [`decompress`] run the whole pipeline. The encoder and
//! decoder types are exposed for callers that want to reuse one model or
//! work with raw payloads.

use crate::bits::{BitReader, BitWriter};
use crate::code::CodeTable;
use crate::container::Container;
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node};

/// Huffman encoder.
#[derive(Debug, Clone)]
pub struct HuffmanEncoder {
    codes: CodeTable,
}

impl HuffmanEncoder {
    /// Create an encoder from symbol frequencies.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if `freqs` is empty.
    pub fn new(freqs: &FrequencyTable) -> Result<Self> {
        Ok(Self::from_tree(&HuffmanTree::build(freqs)?))
    }

    /// Create an encoder from an already built tree.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        Self {
            codes: CodeTable::from_tree(tree),
        }
    }

    /// The code table in use.
    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    /// Append the codes of `data` to `writer`.
    ///
    /// # Errors
    /// Returns `Error::Encoding` for a byte outside the encoder's alphabet.
    pub fn encode_into(&self, data: &[u8], writer: &mut BitWriter) -> Result<()> {
        for &s in data {
            let code = self.codes.get(s).ok_or(Error::Encoding { symbol: s })?;
            writer.write_bits(code);
        }
        Ok(())
    }

    /// Encode `data` into packed, zero-padded bytes.
    ///
    /// # Errors
    /// Returns `Error::Encoding` for a byte outside the encoder's alphabet.
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut writer = BitWriter::with_capacity(data.len() / 2);
        self.encode_into(data, &mut writer)?;
        log::debug!("encoded {} bytes into {} bits", data.len(), writer.bit_len());
        Ok(writer.finish())
    }
}

/// Huffman decoder.
#[derive(Debug, Clone)]
pub struct HuffmanDecoder {
    tree: HuffmanTree,
    freqs: FrequencyTable,
}

impl HuffmanDecoder {
    /// Create a decoder from the frequencies the encoder used.
    ///
    /// The number of symbols to decode is the sum of the frequencies.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if `freqs` is empty.
    pub fn new(freqs: &FrequencyTable) -> Result<Self> {
        Ok(Self {
            tree: HuffmanTree::build(freqs)?,
            freqs: freqs.clone(),
        })
    }

    /// The rebuilt tree.
    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    /// Number of symbols a full decode yields.
    pub fn symbol_count(&self) -> u64 {
        self.freqs.total()
    }

    /// Decode one symbol, consuming its bits from `reader`.
    ///
    /// # Errors
    /// Returns `Error::CorruptContainer` if the bits run out mid-code, or a
    /// single-symbol stream carries a `1` bit.
    pub fn decode_symbol(&self, reader: &mut BitReader<'_>) -> Result<u8> {
        let mut node = self.tree.root();

        if let Node::Leaf { symbol, .. } = node {
            // Lone leaf: one `0` bit per occurrence.
            return match reader.next() {
                Some(false) => Ok(*symbol),
                Some(true) => Err(Error::corrupt("unexpected 1 bit in single-symbol stream")),
                None => Err(Error::corrupt("payload exhausted")),
            };
        }

        loop {
            match node {
                Node::Leaf { symbol, .. } => return Ok(*symbol),
                Node::Internal { left, right, .. } => {
                    let bit = reader
                        .next()
                        .ok_or_else(|| Error::corrupt("payload exhausted"))?;
                    node = if bit { right } else { left };
                }
            }
        }
    }

    /// Decode a packed payload.
    ///
    /// Stops after [`symbol_count`](Self::symbol_count) symbols. What is
    /// left must be the zero padding of the final byte, and the decoded
    /// bytes must have exactly the frequencies the decoder was built from.
    ///
    /// # Errors
    /// Returns `Error::CorruptContainer` if the payload is too short, has
    /// whole bytes left over, has non-zero padding, or decodes to different
    /// symbol counts.
    pub fn decode(&self, payload: &[u8]) -> Result<Vec<u8>> {
        let symbols = self.freqs.total();
        // Every code is at least one bit long.
        let available = payload.len() as u64 * 8;
        if symbols > available {
            return Err(Error::corrupt(format!(
                "{symbols} symbols declared but payload holds only {available} bits"
            )));
        }

        let mut reader = BitReader::new(payload);
        let mut out = Vec::with_capacity(symbols as usize);
        for _ in 0..symbols {
            out.push(self.decode_symbol(&mut reader)?);
        }

        let used = reader.position();
        if payload.len() != used.div_ceil(8) {
            return Err(Error::corrupt(format!(
                "{} trailing payload bytes",
                payload.len() - used.div_ceil(8)
            )));
        }
        if reader.any(|bit| bit) {
            return Err(Error::corrupt("non-zero padding bits"));
        }
        let mut counts = [0u64; 256];
        for &b in &out {
            counts[b as usize] += 1;
        }
        if let Some(s) = (0..=255u8).find(|&s| counts[s as usize] != self.freqs.get(s) as u64) {
            return Err(Error::corrupt(format!(
                "symbol 0x{s:02x} decoded {} times, header says {}",
                counts[s as usize],
                self.freqs.get(s)
            )));
        }

        log::debug!("decoded {} bits into {} bytes", used, out.len());
        Ok(out)
    }
}

/// Compress `data` into container bytes.
///
/// Empty input produces the one-byte empty container.
///
/// # Errors
/// Returns `Error::InvalidInput` if a byte value occurs more often than the
/// container can record.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let freqs = FrequencyTable::from_bytes(data)?;
    if freqs.is_empty() {
        return Container::new(freqs, Vec::new()).encode();
    }

    let payload = HuffmanEncoder::new(&freqs)?.encode(data)?;
    Container::new(freqs, payload).encode()
}

/// Reconstruct the original bytes from container bytes.
///
/// # Errors
/// Returns `Error::CorruptContainer` if `data` is not a valid container.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let container = Container::decode(data)?;
    if container.frequencies().is_empty() {
        return Ok(Vec::new());
    }

    HuffmanDecoder::new(container.frequencies())?.decode(container.payload())
}
