use std::collections::BTreeMap;
use std::fmt;

use lexime_trie::{DoubleArray, TrieSearch};

use super::config::{parse_romaji_toml, RomajiConfigError, DEFAULT_TOML};

#[derive(Debug, PartialEq)]
pub enum TrieLookupResult {
    None,
    Prefix,
    Exact(String),
    ExactAndPrefix(String),
}

/// Double-array trie over romaji keys. Built once and read-only afterwards.
pub struct RomajiTrie {
    da: DoubleArray<u8>,
    values: Vec<String>,
}

impl fmt::Debug for RomajiTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RomajiTrie")
            .field("len", &self.values.len())
            .finish_non_exhaustive()
    }
}

impl RomajiTrie {
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        // BTreeMap iterates in byte order, which the double array build needs.
        let keys: Vec<&[u8]> = map.keys().map(|r| r.as_bytes()).collect();
        let values: Vec<String> = map.values().cloned().collect();
        let da = DoubleArray::<u8>::build(&keys);
        RomajiTrie { da, values }
    }

    /// Parse and validate a `[mappings]` TOML table, then build the trie.
    pub fn from_toml(toml_str: &str) -> Result<Self, RomajiConfigError> {
        Ok(Self::from_map(&parse_romaji_toml(toml_str)?))
    }

    /// Trie over the embedded default table.
    pub fn embedded() -> Self {
        // The embedded table is covered by `parse_default_toml`.
        let map = parse_romaji_toml(DEFAULT_TOML).expect("embedded romaji TOML must be valid");
        Self::from_map(&map)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn lookup(&self, romaji: &str) -> TrieLookupResult {
        let pr = self.da.probe(romaji.as_bytes());
        match (pr.value, pr.has_children) {
            (None, false) => TrieLookupResult::None,
            (None, true) => TrieLookupResult::Prefix,
            (Some(id), false) => TrieLookupResult::Exact(self.values[id as usize].clone()),
            (Some(id), true) => TrieLookupResult::ExactAndPrefix(self.values[id as usize].clone()),
        }
    }

    /// Exact match only, regardless of whether longer keys exist.
    pub fn get(&self, romaji: &str) -> Option<String> {
        match self.lookup(romaji) {
            TrieLookupResult::Exact(kana) | TrieLookupResult::ExactAndPrefix(kana) => Some(kana),
            _ => None,
        }
    }
}
