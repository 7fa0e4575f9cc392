//! Huffman tree construction.
//!
//! Leaves are created in ascending symbol order and every node receives a
//! creation id from a counter owned by a single [`HuffmanTree::build`] call.
//! The priority queue orders nodes by `(freq, id)`, so two builders given the
//! same table always merge the same pairs in the same order and produce the
//! same tree. An independent decoder can therefore rebuild the encoder's
//! tree from frequencies alone.
//!
//! # Historical Context
//!
//! Huffman (1952) showed that repeatedly merging the two least frequent
//! nodes yields a prefix code of minimum weighted path length. The greedy
//! step leaves the shape unspecified whenever frequencies tie; the id
//! tie-break closes that gap.

use std::collections::BinaryHeap;

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;

/// Creation-order tag used to break frequency ties.
pub type NodeId = u32;

/// Huffman tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A symbol with its frequency.
    Leaf {
        /// The byte value.
        symbol: u8,
        /// Occurrence count.
        freq: u64,
        /// Creation-order tag.
        id: NodeId,
    },
    /// A merge of two subtrees. `freq` is the sum of both children.
    Internal {
        /// Combined frequency.
        freq: u64,
        /// Creation-order tag, greater than the ids of both children.
        id: NodeId,
        /// Subtree reached by a `0` bit.
        left: Box<Node>,
        /// Subtree reached by a `1` bit.
        right: Box<Node>,
    },
}

impl Node {
    /// Frequency carried by this node.
    pub fn freq(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } => *freq,
            Node::Internal { freq, .. } => *freq,
        }
    }

    /// Creation-order tag of this node.
    pub fn id(&self) -> NodeId {
        match self {
            Node::Leaf { id, .. } => *id,
            Node::Internal { id, .. } => *id,
        }
    }

    /// True for leaves.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    fn sum_depths(&self, depth: u64) -> u64 {
        match self {
            Node::Leaf { freq, .. } => freq * depth,
            Node::Internal { left, right, .. } => {
                left.sum_depths(depth + 1) + right.sum_depths(depth + 1)
            }
        }
    }

    fn max_depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.max_depth().max(right.max_depth()),
        }
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Min-priority queue: lowest frequency first, then oldest node.
        (other.freq(), other.id()).cmp(&(self.freq(), self.id()))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// A built Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build the tree for a non-empty frequency table.
    ///
    /// With a single distinct symbol the root is that symbol's leaf and no
    /// merge takes place.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if `table` is empty.
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        let mut next_id: NodeId = 0;
        let mut pq = BinaryHeap::with_capacity(table.alphabet_size());

        for (symbol, freq) in table.iter() {
            pq.push(Node::Leaf {
                symbol,
                freq: freq as u64,
                id: next_id,
            });
            next_id += 1;
        }

        let root = loop {
            let Some(left) = pq.pop() else {
                return Err(Error::InvalidInput(
                    "cannot build a Huffman tree from an empty frequency table".into(),
                ));
            };
            let Some(right) = pq.pop() else {
                break left;
            };

            let freq = left.freq() + right.freq();
            log::trace!(
                "merge #{} + #{} -> #{next_id} (freq {freq})",
                left.id(),
                right.id()
            );
            pq.push(Node::Internal {
                freq,
                id: next_id,
                left: Box::new(left),
                right: Box::new(right),
            });
            next_id += 1;
        };

        let tree = Self { root };
        log::debug!("huffman tree: {} nodes, depth {}", next_id, tree.depth());
        Ok(tree)
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Length of the longest root-to-leaf path.
    ///
    /// A lone leaf root has depth 0 even though its code is one bit long.
    pub fn depth(&self) -> usize {
        self.root.max_depth()
    }

    /// Sum over symbols of frequency times code length.
    ///
    /// This equals the number of payload bits the tree produces. The
    /// single-symbol tree counts one bit per occurrence.
    pub fn weighted_path_length(&self) -> u64 {
        match &self.root {
            Node::Leaf { freq, .. } => *freq,
            root => root.sum_depths(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(u8, u32)]) -> FrequencyTable {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let err = HuffmanTree::build(&FrequencyTable::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_single_symbol_root_is_leaf() {
        let tree = HuffmanTree::build(&table(&[(b'a', 4)])).unwrap();
        assert!(tree.root().is_leaf());
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.weighted_path_length(), 4);
    }

    #[test]
    fn test_tie_break_uses_creation_order() {
        // a:2 (#0), b:3 (#1), c:2 (#2). a and c tie; a is older so it goes left.
        let tree = HuffmanTree::build(&table(&[(b'a', 2), (b'b', 3), (b'c', 2)])).unwrap();
        let Node::Internal { left, right, freq, id } = tree.root() else {
            panic!("expected internal root");
        };
        assert_eq!(*freq, 7);
        assert_eq!(*id, 4);
        assert!(matches!(**left, Node::Leaf { symbol: b'b', .. }));
        let Node::Internal { left: l, right: r, id, .. } = &**right else {
            panic!("expected internal right child");
        };
        assert_eq!(*id, 3);
        assert!(matches!(**l, Node::Leaf { symbol: b'a', .. }));
        assert!(matches!(**r, Node::Leaf { symbol: b'c', .. }));
        assert_eq!(tree.weighted_path_length(), 11);
    }

    #[test]
    fn test_internal_ids_exceed_children() {
        fn check(node: &Node) {
            if let Node::Internal { id, left, right, freq } = node {
                assert!(*id > left.id() && *id > right.id());
                assert_eq!(*freq, left.freq() + right.freq());
                check(left);
                check(right);
            }
        }
        let data: Vec<u8> = b"the quick brown fox jumps over the lazy dog".to_vec();
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(&data).unwrap()).unwrap();
        check(tree.root());
        assert_eq!(tree.root().freq(), data.len() as u64);
    }

    #[test]
    fn test_builds_are_identical() {
        let t = table(&[(1, 5), (2, 5), (3, 5), (4, 5), (5, 1)]);
        assert_eq!(HuffmanTree::build(&t).unwrap(), HuffmanTree::build(&t).unwrap());
    }

    #[test]
    fn test_full_alphabet_uniform_is_balanced() {
        let t: FrequencyTable = (0..=255u8).map(|s| (s, 1)).collect();
        let tree = HuffmanTree::build(&t).unwrap();
        assert_eq!(tree.depth(), 8);
        assert_eq!(tree.weighted_path_length(), 256 * 8);
    }
}
