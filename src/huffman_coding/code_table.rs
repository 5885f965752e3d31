//! Turns a finished huffman tree into a symbol -> code lookup table.
//!
//! A code is the path from the root to the symbol's leaf: 0 for every left turn and 1 for
//! every right turn. Only leaves carry symbols, so no code can be the start of another one.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use log::{log_enabled, trace, Level};
use rustc_hash::FxHashMap;

use super::node::{Node, NodeData};
use crate::error::HuffError;

/// The bits of one symbol's code, first bit first. Every element is 0 or 1.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code {
    bits: Vec<u8>,
}

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a code from a slice of 0/1 values.
    pub fn from_bits(bits: &[u8]) -> Result<Self, HuffError> {
        if let Some(&bad) = bits.iter().find(|&&b| b > 1) {
            return Err(HuffError::InvalidBit(bad));
        }
        Ok(Self {
            bits: bits.to_vec(),
        })
    }

    /// A copy of this code with one more bit on the end.
    pub fn with(&self, bit: u8) -> Self {
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        Self { bits }
    }

    pub fn push(&mut self, bit: u8) {
        self.bits.push(bit);
    }

    pub fn clear(&mut self) {
        self.bits.clear();
    }

    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// True when every bit of self starts other. A code is a prefix of itself.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for bit in &self.bits {
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}

impl FromStr for Code {
    type Err = HuffError;

    /// Parse a string of '0' and '1' characters, e.g. "001".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = s
            .bytes()
            .map(|b| match b {
                b'0' => Ok(0),
                b'1' => Ok(1),
                other => Err(HuffError::InvalidBit(other)),
            })
            .collect::<Result<Vec<u8>, HuffError>>()?;
        Ok(Self { bits })
    }
}

/// Symbol -> code lookup table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CodeTable {
    codes: FxHashMap<char, Code>,
}

impl CodeTable {
    /// Walk the tree once and record the code of every leaf.
    pub fn from_tree(root: &Node) -> Self {
        let mut codes = FxHashMap::default();
        return_leaves(root, Code::new(), &mut codes);
        if log_enabled!(Level::Trace) {
            trace!("Code table:");
            for (symbol, code) in sorted(&codes) {
                trace!("  {:?} -> {}", symbol, code);
            }
        }
        Self { codes }
    }

    /// Build a table from explicit codes. Nothing checks that the codes are prefix free;
    /// use is_prefix_free() for that.
    pub fn from_codes<I: IntoIterator<Item = (char, Code)>>(codes: I) -> Self {
        Self {
            codes: codes.into_iter().collect(),
        }
    }

    pub fn get(&self, symbol: char) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Length of the longest code, 0 for an empty table.
    pub fn max_len(&self) -> usize {
        self.codes.values().map(Code::len).max().unwrap_or(0)
    }

    /// True when no code starts another one.
    pub fn is_prefix_free(&self) -> bool {
        let mut all: Vec<&Code> = self.codes.values().collect();
        // After sorting, a prefix always lands right before some code it starts.
        all.sort_unstable();
        all.windows(2).all(|pair| !pair[0].is_prefix_of(pair[1]))
    }

    /// Average code length weighted by the given symbol weights. Symbols without a code
    /// are ignored.
    pub fn mean_len(&self, weights: &[(char, f64)]) -> f64 {
        let (bits, total) = weights
            .iter()
            .filter_map(|(c, w)| self.codes.get(c).map(|code| (code.len() as f64 * w, *w)))
            .fold((0.0, 0.0), |(bits, total), (b, w)| (bits + b, total + w));
        if total > 0.0 {
            bits / total
        } else {
            0.0
        }
    }

    /// Code -> symbol map, used to decode without the tree.
    pub fn decoder(&self) -> FxHashMap<Code, char> {
        self.codes
            .iter()
            .map(|(symbol, code)| (code.clone(), *symbol))
            .collect()
    }

    /// (symbol, code) pairs ordered by code length, then code.
    pub fn entries(&self) -> Vec<(char, &Code)> {
        sorted(&self.codes)
    }
}

impl Display for CodeTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (symbol, code) in self.entries() {
            writeln!(f, "{:>8} {}", format!("{:?}", symbol), code)?;
        }
        Ok(())
    }
}

fn sorted(codes: &FxHashMap<char, Code>) -> Vec<(char, &Code)> {
    let mut entries: Vec<(char, &Code)> = codes.iter().map(|(s, c)| (*s, c)).collect();
    entries.sort_unstable_by(|a, b| a.1.len().cmp(&b.1.len()).then_with(|| a.1.cmp(b.1)));
    entries
}

/// Recursively walk the tree. Left adds a 0 to the code so far, right adds a 1, and a leaf
/// stores the code it was reached with. A root leaf gets the empty code.
fn return_leaves(node: &Node, prefix: Code, codes: &mut FxHashMap<char, Code>) {
    match &node.node_data {
        NodeData::Kids(left_child, right_child) => {
            return_leaves(left_child, prefix.with(0), codes);
            return_leaves(right_child, prefix.with(1), codes);
        }
        NodeData::Leaf(symbol) => {
            codes.insert(*symbol, prefix);
        }
    };
}

#[cfg(test)]
mod test {
    use super::{Code, CodeTable};
    use crate::error::HuffError;
    use crate::huffman_coding::forest::build_tree;

    fn code(s: &str) -> Code {
        s.parse().unwrap()
    }

    #[test]
    fn code_parse_test() {
        let c = code("001");
        assert_eq!(c.bits(), &[0, 0, 1]);
        assert_eq!(c.to_string(), "001");
        assert!(matches!("012".parse::<Code>(), Err(HuffError::InvalidBit(b'2'))));
        assert!(matches!(Code::from_bits(&[0, 3]), Err(HuffError::InvalidBit(3))));
        assert!(code("").is_empty());
    }

    #[test]
    fn prefix_test() {
        assert!(code("01").is_prefix_of(&code("011")));
        assert!(!code("011").is_prefix_of(&code("01")));
        assert!(!code("10").is_prefix_of(&code("01")));
        assert!(Code::new().is_prefix_of(&code("1")));
    }

    #[test]
    fn equal_weights_test() {
        let root = build_tree(&[('A', 1.0), ('b', 1.0), ('C', 1.0)]).unwrap();
        let table = CodeTable::from_tree(&root);
        assert_eq!(table.len(), 3);
        assert_eq!(table.get('C'), Some(&code("0")));
        assert_eq!(table.get('A'), Some(&code("10")));
        assert_eq!(table.get('b'), Some(&code("11")));
        let mut lens: Vec<usize> = "AbC".chars().map(|c| table.get(c).unwrap().len()).collect();
        lens.sort_unstable();
        assert_eq!(lens, vec![1, 2, 2]);
        assert_eq!(table.max_len(), 2);
    }

    #[test]
    fn single_symbol_test() {
        let root = build_tree(&[('X', 5.0)]).unwrap();
        let table = CodeTable::from_tree(&root);
        assert_eq!(table.get('X'), Some(&Code::new()));
        assert_eq!(table.max_len(), 0);
    }

    #[test]
    fn prefix_free_test() {
        let weights: Vec<(char, f64)> = "etaoinshrdlucmfwypvbgkjqxz"
            .chars()
            .enumerate()
            .map(|(i, c)| (c, 1.0 / (i as f64 + 1.0)))
            .collect();
        let table = CodeTable::from_tree(&build_tree(&weights).unwrap());
        assert_eq!(table.len(), weights.len());
        assert!(table.is_prefix_free());
        for (a, ca) in table.entries() {
            for (b, cb) in table.entries() {
                if a != b {
                    assert!(!ca.is_prefix_of(cb), "{} starts {}", ca, cb);
                }
            }
        }
    }

    #[test]
    fn not_prefix_free_test() {
        let table = CodeTable::from_codes([('A', code("1")), ('b', code("10")), ('C', code("0"))]);
        assert!(!table.is_prefix_free());
    }

    #[test]
    fn heavier_is_shorter_test() {
        let weights = [('a', 50.0), ('b', 20.0), ('c', 20.0), ('d', 5.0), ('e', 5.0)];
        let table = CodeTable::from_tree(&build_tree(&weights).unwrap());
        let a = table.get('a').unwrap().len();
        for c in ['b', 'c', 'd', 'e'] {
            assert!(table.get(c).unwrap().len() >= a);
        }
        // a=0 c=10 b=111 d=1100 e=1101
        let expected = (50.0 + 40.0 + 60.0 + 20.0 + 20.0) / 100.0;
        assert!((table.mean_len(&weights) - expected).abs() < 1e-9);
    }

    #[test]
    fn deterministic_test() {
        let weights = [('x', 3.0), ('y', 3.0), ('z', 3.0), ('w', 3.0), ('v', 1.0)];
        let one = CodeTable::from_tree(&build_tree(&weights).unwrap());
        let two = CodeTable::from_tree(&build_tree(&weights).unwrap());
        assert_eq!(one, two);
    }

    #[test]
    fn decoder_test() {
        let table = CodeTable::from_codes([('A', code("1")), ('b', code("01"))]);
        let decoder = table.decoder();
        assert_eq!(decoder.get(&code("01")), Some(&'b'));
        assert_eq!(decoder.get(&code("1")), Some(&'A'));
        assert_eq!(decoder.get(&code("0")), None);
    }

    #[test]
    fn display_test() {
        let table = CodeTable::from_codes([('b', code("01")), ('A', code("1"))]);
        assert_eq!(table.to_string(), "     'A' 1\n     'b' 01\n");
    }
}
