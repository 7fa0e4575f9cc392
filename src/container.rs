//! Self-describing container format.
//!
//! ```text
//! +---------------+---------------------------------+---------------+
//! | alphabet_size | (symbol u8, freq i32 LE) x size | payload ...   |
//! |     1 byte    |         5 bytes per pair        | packed bits   |
//! +---------------+---------------------------------+---------------+
//! ```
//!
//! Pairs are written in ascending symbol order. A full 256-symbol alphabet
//! does not fit the size byte and is written as `0`; a `0` with nothing after
//! it is the empty container produced for empty input.

use crate::bits::{self, BitReader, BitStr, BitString};
use crate::error::{Error, Result};
use crate::frequency::{FrequencyTable, MAX_FREQUENCY};

/// Width of the alphabet-size field.
pub const HEADER_WIDTH: usize = 1;

/// Width of one `(symbol, frequency)` pair.
pub const PAIR_WIDTH: usize = 5;

/// Largest alphabet the format describes.
pub const MAX_ALPHABET: usize = 256;

/// A frequency table plus the packed Huffman payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    frequencies: FrequencyTable,
    payload: Vec<u8>,
}

impl Container {
    /// Combine a table with already packed payload bytes.
    pub fn new(frequencies: FrequencyTable, payload: Vec<u8>) -> Self {
        Self {
            frequencies,
            payload,
        }
    }

    /// Combine a table with an unpacked bit sequence.
    pub fn from_bits(frequencies: FrequencyTable, bits: &BitStr) -> Self {
        Self::new(frequencies, bits::pack(bits))
    }

    /// The recovered frequency table.
    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    /// Packed payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Iterate over the payload bits, padding included.
    pub fn bits(&self) -> BitReader<'_> {
        BitReader::new(&self.payload)
    }

    /// The payload as an owned bit sequence, padding included.
    pub fn bit_sequence(&self) -> BitString {
        bits::unpack(&self.payload)
    }

    /// Split into table and payload.
    pub fn into_parts(self) -> (FrequencyTable, Vec<u8>) {
        (self.frequencies, self.payload)
    }

    /// Serialize to container bytes.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if a frequency exceeds what the signed
    /// 32-bit field holds, or if the payload is empty for a non-empty
    /// alphabet or non-empty for an empty one. [`decode`](Self::decode)
    /// would reject either.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let alphabet = self.frequencies.alphabet_size();
        match (alphabet, self.payload.is_empty()) {
            (0, false) => {
                return Err(Error::InvalidInput(
                    "payload without an alphabet cannot be framed".into(),
                ))
            }
            (1.., true) => {
                return Err(Error::InvalidInput(
                    "non-empty alphabet needs a non-empty payload".into(),
                ))
            }
            _ => {}
        }
        let mut out =
            Vec::with_capacity(HEADER_WIDTH + alphabet * PAIR_WIDTH + self.payload.len());

        // 256 wraps to 0; decode tells it apart from the empty container by
        // the bytes that follow.
        out.push((alphabet % MAX_ALPHABET) as u8);

        for (symbol, freq) in self.frequencies.iter() {
            if freq > MAX_FREQUENCY {
                return Err(Error::InvalidInput(format!(
                    "frequency {freq} of symbol 0x{symbol:02x} does not fit the container"
                )));
            }
            out.push(symbol);
            out.extend_from_slice(&(freq as i32).to_le_bytes());
        }

        out.extend_from_slice(&self.payload);
        log::debug!(
            "container: {} symbols, {} header bytes, {} payload bytes",
            alphabet,
            out.len() - self.payload.len(),
            self.payload.len()
        );
        Ok(out)
    }

    /// Parse container bytes.
    ///
    /// Everything after the pairs is taken as payload. Whether the payload
    /// holds the right number of bits is checked during decoding, once the
    /// tree is known.
    ///
    /// # Errors
    /// Returns `Error::CorruptContainer` if the header is truncated, pairs
    /// are not in strictly ascending symbol order, a frequency is not
    /// positive, or a non-empty alphabet has no payload.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let (&size, rest) = data
            .split_first()
            .ok_or_else(|| Error::corrupt("missing alphabet size"))?;

        let alphabet = match size {
            0 if rest.is_empty() => 0,
            0 => MAX_ALPHABET,
            n => n as usize,
        };

        let header_len = alphabet * PAIR_WIDTH;
        if rest.len() < header_len {
            return Err(Error::corrupt(format!(
                "{alphabet} symbols need {header_len} header bytes, only {} present",
                rest.len()
            )));
        }
        let (pairs, payload) = rest.split_at(header_len);

        let mut frequencies = FrequencyTable::new();
        let mut prev: Option<u8> = None;
        for pair in pairs.chunks_exact(PAIR_WIDTH) {
            let symbol = pair[0];
            if prev.is_some_and(|p| p >= symbol) {
                return Err(Error::corrupt(format!(
                    "symbol 0x{symbol:02x} out of order or repeated"
                )));
            }
            prev = Some(symbol);
            let freq = i32::from_le_bytes([pair[1], pair[2], pair[3], pair[4]]);
            if freq <= 0 {
                return Err(Error::corrupt(format!(
                    "symbol 0x{symbol:02x} has non-positive frequency {freq}"
                )));
            }
            frequencies.insert(symbol, freq as u32);
        }

        if alphabet > 0 && payload.is_empty() {
            return Err(Error::corrupt("empty payload for a non-empty alphabet"));
        }

        Ok(Self::new(frequencies, payload.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let freqs: FrequencyTable = [(b'b', 3), (b'a', 2)].into_iter().collect();
        let bytes = Container::new(freqs, vec![0xAB]).encode().unwrap();
        assert_eq!(bytes, vec![2, b'a', 2, 0, 0, 0, b'b', 3, 0, 0, 0, 0xAB]);
    }

    #[test]
    fn test_empty_container() {
        let bytes = Container::new(FrequencyTable::new(), Vec::new()).encode().unwrap();
        assert_eq!(bytes, vec![0]);
        let c = Container::decode(&bytes).unwrap();
        assert!(c.frequencies().is_empty());
        assert!(c.payload().is_empty());
    }

    #[test]
    fn test_full_alphabet_size_wraps_to_zero() {
        let freqs: FrequencyTable = (0..=255u8).map(|s| (s, 1)).collect();
        let c = Container::new(freqs, vec![0x12, 0x34]);
        let bytes = c.encode().unwrap();
        assert_eq!(bytes[0], 0);
        assert_eq!(bytes.len(), 1 + 256 * PAIR_WIDTH + 2);
        assert_eq!(Container::decode(&bytes).unwrap(), c);
    }

    #[test]
    fn test_from_bits_packs() {
        let bits: BitString = [true, false, true, true, false].into_iter().collect();
        let c = Container::from_bits([(b'x', 1)].into_iter().collect(), &bits);
        assert_eq!(c.payload(), &[0b1011_0000]);
        assert_eq!(c.bits().count(), 8);
        assert_eq!(c.bit_sequence().len(), 8);
    }

    #[test]
    fn test_rejects_missing_size() {
        assert!(matches!(
            Container::decode(&[]),
            Err(Error::CorruptContainer(_))
        ));
    }

    #[test]
    fn test_rejects_truncated_pairs() {
        assert!(matches!(
            Container::decode(&[2, b'a', 1, 0, 0, 0, b'b', 1]),
            Err(Error::CorruptContainer(_))
        ));
    }

    #[test]
    fn test_rejects_missing_payload() {
        assert!(matches!(
            Container::decode(&[1, b'a', 4, 0, 0, 0]),
            Err(Error::CorruptContainer(_))
        ));
    }

    #[test]
    fn test_rejects_bad_frequencies() {
        let zero = [1, b'a', 0, 0, 0, 0, 0x00];
        let negative = [1, b'a', 0xFF, 0xFF, 0xFF, 0xFF, 0x00];
        let duplicate = [2, b'a', 1, 0, 0, 0, b'a', 1, 0, 0, 0, 0x00];
        let unordered = [2, b'b', 1, 0, 0, 0, b'a', 1, 0, 0, 0, 0x00];
        for bytes in [&zero[..], &negative[..], &duplicate[..], &unordered[..]] {
            assert!(matches!(
                Container::decode(bytes),
                Err(Error::CorruptContainer(_))
            ));
        }
    }

    #[test]
    fn test_encode_rejects_payload_without_alphabet() {
        // Would be written as [0, 0xAA], which reads back as a 256-symbol header.
        let c = Container::new(FrequencyTable::new(), vec![0xAA]);
        assert!(matches!(c.encode(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_encode_rejects_alphabet_without_payload() {
        let freqs: FrequencyTable = [(b'a', 4)].into_iter().collect();
        let c = Container::new(freqs, Vec::new());
        assert!(matches!(c.encode(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_encoded_containers_decode() {
        let one: FrequencyTable = [(b'a', 4)].into_iter().collect();
        let all: FrequencyTable = (0..=255u8).map(|s| (s, 1)).collect();
        for c in [
            Container::new(FrequencyTable::new(), Vec::new()),
            Container::new(one, vec![0x00]),
            Container::new(all, vec![0x00; 256]),
        ] {
            assert_eq!(Container::decode(&c.encode().unwrap()).unwrap(), c);
        }
    }

    #[test]
    fn test_encode_rejects_oversized_frequency() {
        let freqs: FrequencyTable = [(b'a', MAX_FREQUENCY + 1)].into_iter().collect();
        assert!(matches!(
            Container::new(freqs, vec![0]).encode(),
            Err(Error::InvalidInput(_))
        ));
    }
}
