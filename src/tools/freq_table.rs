//! Reads and writes symbol weight tables.
//!
//! One entry per line, `symbol;weight`. The line is split at the last ';', so ';' itself can be
//! listed. Symbols that can't be typed on a line are escaped: `\n`, `\r`, `\t`, `\s` (space,
//! handy when trailing blanks get stripped) and `\\`.

use std::fs;
use std::path::Path;

use log::info;

use crate::error::HuffError;

/// Symbol weights in the order they were listed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FreqTable {
    entries: Vec<(char, f64)>,
}

impl FreqTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol. Duplicates are not checked here; the tree builder rejects them.
    pub fn push(&mut self, symbol: char, weight: f64) {
        self.entries.push((symbol, weight));
    }

    pub fn entries(&self) -> &[(char, f64)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    /// Parse the text form. Blank lines are skipped; any other bad line fails the whole table.
    pub fn parse(text: &str) -> Result<Self, HuffError> {
        let mut table = FreqTable::new();
        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let malformed = |reason: String| HuffError::MalformedRow {
                line: idx + 1,
                reason,
            };
            let (symbol, weight) = line
                .rsplit_once(';')
                .ok_or_else(|| malformed(format!("no ';' in {:?}", line)))?;
            let symbol = unescape(symbol).ok_or_else(|| {
                malformed(format!("{:?} is not a single symbol", symbol))
            })?;
            let weight = weight
                .trim()
                .parse::<f64>()
                .map_err(|e| malformed(format!("failed to parse {:?}: {}", weight, e)))?;
            table.push(symbol, weight);
        }
        Ok(table)
    }

    /// Load a table from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, HuffError> {
        let text = fs::read_to_string(path.as_ref())?;
        let table = Self::parse(&text)?;
        info!(
            "Read {} symbols from {}.",
            table.len(),
            path.as_ref().display()
        );
        Ok(table)
    }

    /// Text form that parse() reads back.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (symbol, weight) in &self.entries {
            out.push_str(&format!("{};{}\n", escape(*symbol), weight));
        }
        out
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), HuffError> {
        fs::write(path, self.to_text())?;
        Ok(())
    }
}

impl FromIterator<(char, f64)> for FreqTable {
    fn from_iter<I: IntoIterator<Item = (char, f64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Decode the symbol field. None unless it stands for exactly one char.
fn unescape(field: &str) -> Option<char> {
    let mut chars = field.chars();
    let symbol = match chars.next()? {
        '\\' => match chars.next() {
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('s') => ' ',
            Some('\\') => '\\',
            // A lone backslash is just a backslash.
            None => return Some('\\'),
            Some(_) => return None,
        },
        c => c,
    };
    match chars.next() {
        None => Some(symbol),
        Some(_) => None,
    }
}

fn escape(symbol: char) -> String {
    match symbol {
        '\n' => "\\n".to_string(),
        '\r' => "\\r".to_string(),
        '\t' => "\\t".to_string(),
        ' ' => "\\s".to_string(),
        '\\' => "\\\\".to_string(),
        c => c.to_string(),
    }
}
