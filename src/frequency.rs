//! Symbol frequency model.
//!
//! Counts how often each byte value occurs. The table is dense (one slot per
//! byte value) so iteration is always in ascending symbol order, regardless
//! of the order in which counts were inserted. The tree builder relies on
//! that ordering to hand out creation ids reproducibly.

use crate::error::{Error, Result};

/// Largest count a single symbol may carry.
///
/// The container stores each frequency as a signed 32-bit integer.
pub const MAX_FREQUENCY: u32 = i32::MAX as u32;

/// Occurrence counts for the 256 byte symbols.
#[derive(Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u32; 256],
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self { counts: [0; 256] }
    }

    /// Count every byte of `data`.
    ///
    /// Empty input yields an empty table, which callers treat as "nothing to
    /// compress" rather than an error.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if one byte value occurs more than
    /// [`MAX_FREQUENCY`] times.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut wide = [0u64; 256];
        for &b in data {
            wide[b as usize] += 1;
        }

        let mut counts = [0u32; 256];
        for (symbol, (&n, slot)) in wide.iter().zip(counts.iter_mut()).enumerate() {
            if n > MAX_FREQUENCY as u64 {
                return Err(Error::InvalidInput(format!(
                    "symbol 0x{symbol:02x} occurs {n} times, more than the container can record"
                )));
            }
            *slot = n as u32;
        }

        let table = Self { counts };
        log::debug!(
            "frequency table: {} bytes, {} distinct symbols",
            data.len(),
            table.alphabet_size()
        );
        Ok(table)
    }

    /// Set the count of `symbol`, returning the previous non-zero count.
    ///
    /// A count of zero removes the symbol from the alphabet.
    pub fn insert(&mut self, symbol: u8, freq: u32) -> Option<u32> {
        let prev = std::mem::replace(&mut self.counts[symbol as usize], freq);
        (prev > 0).then_some(prev)
    }

    /// Count of `symbol` (zero when absent).
    pub fn get(&self, symbol: u8) -> u32 {
        self.counts[symbol as usize]
    }

    /// Number of distinct symbols with a non-zero count.
    pub fn alphabet_size(&self) -> usize {
        self.counts.iter().filter(|&&n| n > 0).count()
    }

    /// True when no symbol has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&n| n == 0)
    }

    /// Sum of all counts, i.e. the length of the modelled input.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&n| n as u64).sum()
    }

    /// Present symbols and their counts, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, n)| **n > 0)
            .map(|(s, &n)| (s as u8, n))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Later pairs for the same symbol overwrite earlier ones.
impl FromIterator<(u8, u32)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, u32)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (symbol, freq) in iter {
            table.insert(symbol, freq);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_exact_occurrences() {
        let table = FrequencyTable::from_bytes(b"aabbbcc").unwrap();
        assert_eq!(table.get(b'a'), 2);
        assert_eq!(table.get(b'b'), 3);
        assert_eq!(table.get(b'c'), 2);
        assert_eq!(table.get(b'd'), 0);
        assert_eq!(table.alphabet_size(), 3);
        assert_eq!(table.total(), 7);
    }

    #[test]
    fn test_empty_input_gives_empty_table() {
        let table = FrequencyTable::from_bytes(&[]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.alphabet_size(), 0);
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn test_iteration_is_ascending_regardless_of_insertion_order() {
        let table: FrequencyTable = [(b'z', 1), (b'a', 4), (b'm', 2)].into_iter().collect();
        let symbols: Vec<u8> = table.iter().map(|(s, _)| s).collect();
        assert_eq!(symbols, vec![b'a', b'm', b'z']);
    }

    #[test]
    fn test_insert_reports_previous_count() {
        let mut table = FrequencyTable::new();
        assert_eq!(table.insert(7, 3), None);
        assert_eq!(table.insert(7, 5), Some(3));
        assert_eq!(table.get(7), 5);
        assert_eq!(table.insert(7, 0), Some(5));
        assert!(table.is_empty());
    }

    #[test]
    fn test_full_alphabet() {
        let data: Vec<u8> = (0..=255).collect();
        let table = FrequencyTable::from_bytes(&data).unwrap();
        assert_eq!(table.alphabet_size(), 256);
        assert!(table.iter().all(|(_, n)| n == 1));
    }
}
