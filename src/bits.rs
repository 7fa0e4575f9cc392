//! Bit packing.
//!
//! Bits are grouped into bytes most-significant bit first, in emission
//! order. A final partial byte is completed with zero bits on the right.
//! The padding length is not recorded anywhere; readers must know from
//! context when to stop.

use bitvec::prelude::{BitSlice, BitVec, Msb0};

/// An owned bit sequence, MSB-first within each byte.
pub type BitString = BitVec<u8, Msb0>;

/// A borrowed bit sequence, MSB-first within each byte.
pub type BitStr = BitSlice<u8, Msb0>;

/// Packs bits into bytes, MSB first.
#[derive(Debug)]
pub struct BitWriter {
    buffer: Vec<u8>,
    current_byte: u8,
    bit_position: u8,
}

impl BitWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty writer with room for `capacity` output bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            current_byte: 0,
            bit_position: 0,
        }
    }

    /// Append one bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.current_byte |= (bit as u8) << (7 - self.bit_position);
        self.bit_position += 1;

        if self.bit_position == 8 {
            self.buffer.push(self.current_byte);
            self.current_byte = 0;
            self.bit_position = 0;
        }
    }

    /// Append a run of bits in order.
    pub fn write_bits(&mut self, bits: &BitStr) {
        for bit in bits.iter().by_vals() {
            self.write_bit(bit);
        }
    }

    /// Number of bits written so far.
    pub fn bit_len(&self) -> usize {
        self.buffer.len() * 8 + self.bit_position as usize
    }

    /// Zero-pad the last partial byte and return the packed bytes.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_position > 0 {
            self.buffer.push(self.current_byte);
        }
        self.buffer
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads bits back out of packed bytes, MSB first.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BitReader<'a> {
    /// Start reading at the first bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Number of bits consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of bits left, padding included.
    pub fn remaining(&self) -> usize {
        self.data.len() * 8 - self.position
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    #[inline]
    fn next(&mut self) -> Option<bool> {
        let byte = *self.data.get(self.position / 8)?;
        let bit = (byte >> (7 - self.position % 8)) & 1 == 1;
        self.position += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitReader<'_> {}

/// Pack `bits` into bytes, zero-padding the final byte.
pub fn pack(bits: &BitStr) -> Vec<u8> {
    let mut packed = BitString::with_capacity(bits.len());
    packed.extend_from_bitslice(bits);
    packed.set_uninitialized(false);
    packed.into_vec()
}

/// Expand every byte into eight bits, MSB first.
///
/// The inverse of [`pack`] only up to the trailing padding.
pub fn unpack(bytes: &[u8]) -> BitString {
    BitString::from_slice(bytes)
}
