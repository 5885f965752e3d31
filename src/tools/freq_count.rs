use rustc_hash::FxHashMap;

use super::freq_table::FreqTable;

/// Returns a frequency count of the chars in the input, in order of first appearance.
pub fn freqs(data: &str) -> FreqTable {
    let mut index: FxHashMap<char, usize> = FxHashMap::default();
    let mut counts: Vec<(char, f64)> = Vec::new();
    data.chars().for_each(|c| {
        let slot = *index.entry(c).or_insert_with(|| {
            counts.push((c, 0.0));
            counts.len() - 1
        });
        counts[slot].1 += 1.0;
    });
    counts.into_iter().collect()
}

#[test]
fn freqs_test() {
    let table = freqs("abracadabra\n");
    assert_eq!(
        table.entries(),
        &[('a', 5.0), ('b', 2.0), ('r', 2.0), ('c', 1.0), ('d', 1.0), ('\n', 1.0)]
    );
}

#[test]
fn freqs_empty_test() {
    assert!(freqs("").is_empty());
}
