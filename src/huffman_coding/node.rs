//! Tree elements for the huffman coder.
//!
//! A node is either a leaf holding exactly one symbol, or a fork owning exactly two children.
//! Nodes are never changed once they are built; the code table builder and the decoder
//! only ever read them.

use crate::error::HuffError;

#[derive(PartialEq, Debug, Clone)]
pub enum NodeData {
    Kids(Box<Node>, Box<Node>),
    Leaf(char),
}

#[derive(PartialEq, Debug, Clone)]
pub struct Node {
    pub weight: f64,
    pub node_data: NodeData,
}

impl Node {
    /// Create a leaf for a symbol. Weights must be finite and not negative.
    pub fn leaf(symbol: char, weight: f64) -> Result<Node, HuffError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(HuffError::InvalidWeight { symbol, weight });
        }
        Ok(Node {
            // -0.0 would sort below 0.0
            weight: weight.abs(),
            node_data: NodeData::Leaf(symbol),
        })
    }

    /// Join two nodes under a new fork. The fork weighs as much as both kids together.
    pub fn fork(left: Node, right: Node) -> Node {
        Node {
            weight: left.weight + right.weight,
            node_data: NodeData::Kids(Box::new(left), Box::new(right)),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node_data, NodeData::Leaf(_))
    }

    /// The symbol of a leaf, None for a fork.
    pub fn symbol(&self) -> Option<char> {
        match self.node_data {
            NodeData::Leaf(c) => Some(c),
            NodeData::Kids(..) => None,
        }
    }

    /// Step one level down: 0 goes left, 1 goes right. Only a root leaf is ever asked
    /// for a child, which means the alphabet has a single symbol.
    pub fn child(&self, bit: u8) -> Result<&Node, HuffError> {
        match (&self.node_data, bit) {
            (NodeData::Kids(left, _), 0) => Ok(&**left),
            (NodeData::Kids(_, right), 1) => Ok(&**right),
            (NodeData::Leaf(c), 0 | 1) => Err(HuffError::DegenerateAlphabet(*c)),
            (_, other) => Err(HuffError::InvalidBit(other)),
        }
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match &self.node_data {
            NodeData::Kids(left, right) => left.leaf_count() + right.leaf_count(),
            NodeData::Leaf(_) => 1,
        }
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match &self.node_data {
            NodeData::Kids(left, right) => 1 + left.depth().max(right.depth()),
            NodeData::Leaf(_) => 0,
        }
    }

    /// Symbols of all leaves, left to right.
    pub fn symbols(&self) -> Vec<char> {
        let mut out = Vec::with_capacity(self.leaf_count());
        collect_symbols(self, &mut out);
        out
    }
}

fn collect_symbols(node: &Node, out: &mut Vec<char>) {
    match &node.node_data {
        NodeData::Kids(left, right) => {
            collect_symbols(left, out);
            collect_symbols(right, out);
        }
        NodeData::Leaf(c) => out.push(*c),
    }
}

#[cfg(test)]
mod test {
    use super::{Node, NodeData};
    use crate::error::HuffError;

    fn small_tree() -> Node {
        // ((a b) c)
        let a = Node::leaf('a', 1.0).unwrap();
        let b = Node::leaf('b', 2.0).unwrap();
        let c = Node::leaf('c', 4.0).unwrap();
        Node::fork(Node::fork(a, b), c)
    }

    #[test]
    fn fork_weight_test() {
        let root = small_tree();
        assert_eq!(root.weight, 7.0);
        match &root.node_data {
            NodeData::Kids(left, right) => {
                assert_eq!(left.weight, 3.0);
                assert_eq!(right.symbol(), Some('c'));
            }
            NodeData::Leaf(_) => panic!("root should be a fork"),
        }
    }

    #[test]
    fn bad_weight_test() {
        assert!(matches!(
            Node::leaf('x', -1.0),
            Err(HuffError::InvalidWeight { symbol: 'x', .. })
        ));
        assert!(Node::leaf('x', f64::NAN).is_err());
        assert!(Node::leaf('x', f64::INFINITY).is_err());
        assert!(Node::leaf('x', 0.0).is_ok());
    }

    #[test]
    fn child_test() {
        let root = small_tree();
        assert_eq!(root.child(1).unwrap().symbol(), Some('c'));
        let left = root.child(0).unwrap();
        assert_eq!(left.child(0).unwrap().symbol(), Some('a'));
        assert_eq!(left.child(1).unwrap().symbol(), Some('b'));
        assert!(matches!(root.child(2), Err(HuffError::InvalidBit(2))));
        assert!(matches!(
            root.child(1).unwrap().child(0),
            Err(HuffError::DegenerateAlphabet('c'))
        ));
    }

    #[test]
    fn shape_test() {
        let root = small_tree();
        assert_eq!(root.leaf_count(), 3);
        assert_eq!(root.depth(), 2);
        assert_eq!(root.symbols(), vec!['a', 'b', 'c']);
        assert!(!root.is_leaf());
        assert!(Node::leaf('z', 1.0).unwrap().is_leaf());
    }
}
