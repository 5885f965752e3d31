//! Builds a huffman tree from symbol weights by repeatedly merging the two lightest nodes.
//!
//! Every node waiting in the forest carries an id taken from a counter that only ever goes
//! up. Leaves get their ids in input order, and each fork gets the next id when it is put
//! back. The two lightest nodes are picked by weight, and on equal weight by the lower id.
//! That is the same pair a single scan over the forest in id order picks when it keeps the
//! two smallest seen so far and only replaces them on a strictly smaller weight, so the
//! resulting tree is fully determined by the input order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{debug, info, trace, warn};
use rustc_hash::FxHashSet;

use super::node::Node;
use crate::error::HuffError;

/// Opaque identity of a node while it waits in the forest.
pub type NodeId = usize;

#[derive(Debug)]
struct Entry {
    id: NodeId,
    node: Node,
}

impl Ord for Entry {
    /// Reversed so the max-heap pops the lightest node, lowest id first on a tie.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .node
            .weight
            .total_cmp(&self.node.weight)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// Nodes not yet merged into the tree.
#[derive(Debug, Default)]
pub struct Forest {
    heap: BinaryHeap<Entry>,
    next_id: NodeId,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(size: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(size),
            next_id: 0,
        }
    }

    /// Put a node in the forest under a fresh id and return that id.
    pub fn insert(&mut self, node: Node) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        self.heap.push(Entry { id, node });
        id
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Take the two lightest nodes out of the forest, lightest first.
    pub fn pop_min_pair(&mut self) -> Result<(Node, Node), HuffError> {
        if self.heap.len() < 2 {
            return Err(HuffError::InsufficientElements(self.heap.len()));
        }
        let first = self.heap.pop().ok_or(HuffError::InsufficientElements(0))?;
        let second = self.heap.pop().ok_or(HuffError::InsufficientElements(1))?;
        trace!(
            "Merging #{} ({}) with #{} ({})",
            first.id,
            first.node.weight,
            second.id,
            second.node.weight
        );
        Ok((first.node, second.node))
    }

    /// Merge until a single node is left and return it.
    pub fn into_root(mut self) -> Result<Node, HuffError> {
        while self.heap.len() > 1 {
            let (left, right) = self.pop_min_pair()?;
            self.insert(Node::fork(left, right));
        }
        self.heap
            .pop()
            .map(|entry| entry.node)
            .ok_or(HuffError::EmptyInput)
    }
}

/// Build the huffman tree for an ordered list of (symbol, weight) pairs.
pub fn build_tree(weights: &[(char, f64)]) -> Result<Node, HuffError> {
    if weights.is_empty() {
        return Err(HuffError::EmptyInput);
    }

    let mut seen = FxHashSet::default();
    let mut forest = Forest::with_capacity(weights.len());
    for &(symbol, weight) in weights {
        if !seen.insert(symbol) {
            return Err(HuffError::DuplicateSymbol(symbol));
        }
        if weight == 0.0 {
            warn!("{:?} has a weight of zero", symbol);
        }
        forest.insert(Node::leaf(symbol, weight)?);
    }

    let root = forest.into_root()?;
    info!(
        "Built a tree of {} symbols, {} levels deep.",
        weights.len(),
        root.depth()
    );
    debug!("Total weight is {}", root.weight);
    Ok(root)
}

#[cfg(test)]
mod test {
    use super::{build_tree, Forest};
    use crate::error::HuffError;
    use crate::huffman_coding::node::{Node, NodeData};

    fn leaf(c: char, w: f64) -> Node {
        Node::leaf(c, w).unwrap()
    }

    /// Checks that every fork weighs as much as its kids and returns the sum of leaf weights.
    fn check_weights(node: &Node) -> f64 {
        match &node.node_data {
            NodeData::Kids(left, right) => {
                let sum = check_weights(left) + check_weights(right);
                assert_eq!(node.weight, left.weight + right.weight);
                sum
            }
            NodeData::Leaf(_) => node.weight,
        }
    }

    #[test]
    fn empty_pop_test() {
        let mut forest = Forest::new();
        assert!(matches!(
            forest.pop_min_pair(),
            Err(HuffError::InsufficientElements(0))
        ));
    }

    #[test]
    fn one_element_pop_test() {
        let mut forest = Forest::new();
        forest.insert(leaf('O', 0.0));
        assert!(matches!(
            forest.pop_min_pair(),
            Err(HuffError::InsufficientElements(1))
        ));
        assert_eq!(forest.len(), 1);
    }

    #[test]
    fn two_elements_pop_test() {
        let mut forest = Forest::new();
        forest.insert(leaf('O', 1.0));
        forest.insert(leaf('1', 2.0));
        let (fst, snd) = forest.pop_min_pair().unwrap();
        assert_eq!(fst, leaf('O', 1.0));
        assert_eq!(snd, leaf('1', 2.0));
        assert!(forest.is_empty());
    }

    #[test]
    fn three_elements_pop_test() {
        let mut forest = Forest::new();
        forest.insert(leaf('O', 4.0));
        forest.insert(leaf('1', 2.0));
        forest.insert(leaf('2', 1.0));
        let (fst, snd) = forest.pop_min_pair().unwrap();
        assert_eq!(fst, leaf('2', 1.0));
        assert_eq!(snd, leaf('1', 2.0));
        assert_eq!(forest.len(), 1);
    }

    #[test]
    fn tie_break_test() {
        // Equal weights go out in insertion order.
        let mut forest = Forest::new();
        forest.insert(leaf('x', 2.0));
        forest.insert(leaf('y', 1.0));
        forest.insert(leaf('z', 1.0));
        forest.insert(leaf('w', 1.0));
        let (fst, snd) = forest.pop_min_pair().unwrap();
        assert_eq!(fst.symbol(), Some('y'));
        assert_eq!(snd.symbol(), Some('z'));
    }

    #[test]
    fn ids_test() {
        let mut forest = Forest::new();
        assert_eq!(forest.insert(leaf('a', 1.0)), 0);
        assert_eq!(forest.insert(leaf('b', 1.0)), 1);
        let (l, r) = forest.pop_min_pair().unwrap();
        assert_eq!(forest.insert(Node::fork(l, r)), 2);
    }

    #[test]
    fn empty_input_test() {
        assert!(matches!(build_tree(&[]), Err(HuffError::EmptyInput)));
        assert!(matches!(Forest::new().into_root(), Err(HuffError::EmptyInput)));
    }

    #[test]
    fn single_symbol_test() {
        let root = build_tree(&[('X', 5.0)]).unwrap();
        assert_eq!(root, leaf('X', 5.0));
    }

    #[test]
    fn duplicate_symbol_test() {
        assert!(matches!(
            build_tree(&[('a', 1.0), ('b', 1.0), ('a', 3.0)]),
            Err(HuffError::DuplicateSymbol('a'))
        ));
    }

    #[test]
    fn invalid_weight_test() {
        assert!(matches!(
            build_tree(&[('a', 1.0), ('b', -0.5)]),
            Err(HuffError::InvalidWeight { symbol: 'b', .. })
        ));
    }

    #[test]
    fn equal_weights_test() {
        let root = build_tree(&[('A', 1.0), ('b', 1.0), ('C', 1.0)]).unwrap();
        // A and b merge first, then C joins the (A b) fork.
        let expected = Node::fork(
            leaf('C', 1.0),
            Node::fork(leaf('A', 1.0), leaf('b', 1.0)),
        );
        assert_eq!(root, expected);
        assert_eq!(root.leaf_count(), 3);
    }

    #[test]
    fn weight_conservation_test() {
        let weights = [
            ('e', 13.0),
            ('t', 9.0),
            ('a', 8.0),
            ('o', 8.0),
            ('i', 7.0),
            ('n', 7.0),
            ('s', 6.0),
            ('h', 6.0),
            ('r', 6.0),
            ('z', 0.0),
        ];
        let root = build_tree(&weights).unwrap();
        let total: f64 = weights.iter().map(|(_, w)| w).sum();
        assert_eq!(check_weights(&root), total);
        assert_eq!(root.weight, total);
        let mut symbols = root.symbols();
        symbols.sort_unstable();
        let mut expected: Vec<char> = weights.iter().map(|(c, _)| *c).collect();
        expected.sort_unstable();
        assert_eq!(symbols, expected);
    }

    #[test]
    fn deterministic_test() {
        let weights = [('a', 0.25), ('b', 0.25), ('c', 0.25), ('d', 0.125), ('e', 0.125)];
        assert_eq!(build_tree(&weights).unwrap(), build_tree(&weights).unwrap());
    }
}
