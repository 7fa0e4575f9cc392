//! Code table generation.
//!
//! Walks the tree depth-first, appending a `0` bit when descending left and
//! a `1` bit when descending right.

use std::fmt;

use crate::bits::{BitStr, BitString};
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node};

/// Symbol to bit-string mapping derived from a [`HuffmanTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<BitString>, // symbol -> bit sequence, empty when absent
}

impl CodeTable {
    /// Derive the code of every leaf in `tree`.
    ///
    /// A lone leaf root would get an empty path, which encodes every
    /// occurrence as zero bits and cannot be decoded. It is given the
    /// one-bit code `0` instead.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = vec![BitString::new(); 256];
        Self::build_codes(tree.root(), BitString::new(), &mut codes);
        Self { codes }
    }

    fn build_codes(node: &Node, prefix: BitString, codes: &mut [BitString]) {
        match node {
            Node::Leaf { symbol, .. } => {
                let mut code = prefix;
                if code.is_empty() {
                    code.push(false);
                }
                codes[*symbol as usize] = code;
            }
            Node::Internal { left, right, .. } => {
                let mut left_prefix = prefix.clone();
                left_prefix.push(false);
                Self::build_codes(left, left_prefix, codes);

                let mut right_prefix = prefix;
                right_prefix.push(true);
                Self::build_codes(right, right_prefix, codes);
            }
        }
    }

    /// Code for `symbol`, or `None` if it is outside the alphabet.
    pub fn get(&self, symbol: u8) -> Option<&BitStr> {
        let code = &self.codes[symbol as usize];
        (!code.is_empty()).then_some(code.as_bitslice())
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| !c.is_empty()).count()
    }

    /// True when no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitStr)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_empty())
            .map(|(s, c)| (s as u8, c.as_bitslice()))
    }

    /// Length of the longest code.
    pub fn max_len(&self) -> usize {
        self.codes.iter().map(|c| c.len()).max().unwrap_or(0)
    }

    /// Number of bits produced when encoding input described by `freqs`.
    ///
    /// Symbols without a code contribute nothing.
    pub fn encoded_bits(&self, freqs: &FrequencyTable) -> u64 {
        freqs
            .iter()
            .map(|(s, n)| n as u64 * self.codes[s as usize].len() as u64)
            .sum()
    }

    /// True when no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&BitStr> = self.iter().map(|(_, c)| c).collect();
        codes.iter().enumerate().all(|(i, &a)| {
            codes[i + 1..]
                .iter()
                .all(|&b| !a.starts_with(b) && !b.starts_with(a))
        })
    }
}

/// One `symbol: bits` line per entry.
impl fmt::Display for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, code) in self.iter() {
            match symbol {
                b'\n' => write!(f, "\\n")?,
                b' ' => write!(f, "' '")?,
                s if s.is_ascii_graphic() => write!(f, "{}", s as char)?,
                s => write!(f, "0x{s:02x}")?,
            }
            let bits: String = code
                .iter()
                .by_vals()
                .map(|b| if b { '1' } else { '0' })
                .collect();
            writeln!(f, ": {bits}")?;
        }
        Ok(())
    }
}
