//! Syllable-boundary disambiguation (apostrophe insertion).
//!
//! Schemes that write a word's syllables without separators can produce a
//! string that re-parses as a different syllable sequence. For every adjacent
//! pair `(prev, cur)` the boundary is slid backward through `prev`, one
//! character at a time; as soon as `prev[..k]` and `prev[k..] + cur` are both
//! valid spellings, `cur` is marked with a leading apostrophe.
//!
//! The first split found wins; it is not necessarily the most plausible one.
//! Only proper splits are tested, so a single-character `prev` is never
//! marked. Membership in the spelling set is the only criterion.

use crate::tables::ValidSpellingSet;

pub const APOSTROPHE: char = '\'';

/// Whether `prev` followed by `cur` can be re-split into two other valid
/// spellings.
pub fn is_ambiguous(prev: &str, cur: &str, spellings: &ValidSpellingSet) -> bool {
    let boundaries: Vec<usize> = prev.char_indices().skip(1).map(|(i, _)| i).collect();
    let mut merged = String::with_capacity(prev.len() + cur.len());
    // Suffix of length 1, 2, ... chars: walk the boundaries right to left.
    boundaries.iter().rev().any(|&split| {
        let (prefix, suffix) = prev.split_at(split);
        merged.clear();
        merged.push_str(suffix);
        merged.push_str(cur);
        spellings.contains(prefix) && spellings.contains(&merged)
    })
}

/// Mark every syllable whose boundary with its predecessor is ambiguous.
///
/// Marks are applied left to right and each pair is tested against the
/// predecessor as already emitted, leading apostrophe included.
pub fn add_apostrophes(syllables: &[String], spellings: &ValidSpellingSet) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(syllables.len());
    for cur in syllables {
        let marked = match out.last() {
            Some(prev) if is_ambiguous(prev, cur, spellings) => format!("{APOSTROPHE}{cur}"),
            _ => cur.clone(),
        };
        out.push(marked);
    }
    out
}
