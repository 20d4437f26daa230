//! Lookup tables consumed by the schemes.
//!
//! Every table is loaded once from a flat JSON object and never mutated
//! afterwards. `ReplacementTable` keeps the document order of its rules since
//! later rules may refine earlier ones; the other tables are unordered.

mod io;
mod resources;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

pub use io::{load_json, load_language_map, save_language_map, SaveError};
pub use resources::{Fixups, ResourcePaths, Resources, CORRESPONDENCE_TABLES};

/// Localization key → UI string. Sorted keys give byte-stable output.
pub type LanguageMap = BTreeMap<String, String>;

/// Curated whole-value overrides, keyed like the map they patch.
pub type FixupMap = LanguageMap;

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("cannot read {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {name}: {source}")]
    Json {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid entry in {name}: {reason}")]
    Invalid { name: String, reason: String },
}

/// Syllable → symbol mapping for one romanization scheme.
///
/// The set of distinct symbols (the scheme's valid spellings) is computed at
/// construction for the boundary disambiguator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "HashMap<String, String>")]
pub struct CorrespondenceTable {
    map: HashMap<String, String>,
    spellings: ValidSpellingSet,
}

impl From<HashMap<String, String>> for CorrespondenceTable {
    fn from(map: HashMap<String, String>) -> Self {
        let spellings = ValidSpellingSet(map.values().cloned().collect());
        Self { map, spellings }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CorrespondenceTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect::<HashMap<String, String>>()
            .into()
    }
}

impl CorrespondenceTable {
    /// Target symbol for `syllable`, or the syllable itself when the table
    /// has no entry for it.
    pub fn lookup<'a>(&'a self, syllable: &'a str) -> &'a str {
        self.map.get(syllable).map_or(syllable, String::as_str)
    }

    pub fn get(&self, syllable: &str) -> Option<&str> {
        self.map.get(syllable).map(String::as_str)
    }

    pub fn spellings(&self) -> &ValidSpellingSet {
        &self.spellings
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// All symbols a scheme can produce for a single syllable.
#[derive(Debug, Clone, Default)]
pub struct ValidSpellingSet(HashSet<String>);

impl ValidSpellingSet {
    pub fn contains(&self, spelling: &str) -> bool {
        self.0.contains(spelling)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ValidSpellingSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Ordered literal substitutions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementTable {
    rules: Vec<(String, String)>,
}

impl ReplacementTable {
    /// Apply every rule in order; each rule replaces all of its occurrences
    /// before the next one runs.
    pub fn apply(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (old, new) in &self.rules {
            if !old.is_empty() && out.contains(old.as_str()) {
                out = out.replace(old.as_str(), new);
            }
        }
        out
    }

    /// A copy of this table with `extra` rules appended (or updated in place
    /// when the pattern already exists, keeping its original position).
    pub fn extended<'a>(&self, extra: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut rules = self.rules.clone();
        for (old, new) in extra {
            match rules.iter_mut().find(|(o, _)| o == old) {
                Some(rule) => rule.1 = new.to_string(),
                None => rules.push((old.to_string(), new.to_string())),
            }
        }
        Self { rules }
    }

    pub fn rules(&self) -> &[(String, String)] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ReplacementTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl<'de> Deserialize<'de> for ReplacementTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RulesVisitor;

        impl<'de> Visitor<'de> for RulesVisitor {
            type Value = ReplacementTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object of string replacements")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut rules: Vec<(String, String)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((old, new)) = access.next_entry::<String, String>()? {
                    // A repeated key keeps its first position, like a dict update.
                    match rules.iter_mut().find(|(o, _)| *o == old) {
                        Some(rule) => rule.1 = new,
                        None => rules.push((old, new)),
                    }
                }
                Ok(ReplacementTable { rules })
            }
        }

        deserializer.deserialize_map(RulesVisitor)
    }
}

fn single_char_key(name: &str, key: &str) -> Result<char, TableError> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(kana), None) => Ok(kana),
        _ => Err(TableError::Invalid {
            name: name.to_string(),
            reason: format!("key {key:?} is not a single character"),
        }),
    }
}

/// Kana → Man'yōgana substitution. A value replaces its kana as a whole; it
/// may span several characters or be empty.
#[derive(Debug, Clone, Default)]
pub struct KanaTable {
    map: HashMap<char, String>,
}

impl KanaTable {
    pub fn from_map(name: &str, raw: HashMap<String, String>) -> Result<Self, TableError> {
        let mut map = HashMap::with_capacity(raw.len());
        for (key, value) in raw {
            map.insert(single_char_key(name, &key)?, value);
        }
        Ok(Self { map })
    }

    pub fn get(&self, kana: char) -> Option<&str> {
        self.map.get(&kana).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Kana → alternative Man'yōgana spellings, one of which the random variant
/// picks per occurrence.
#[derive(Debug, Clone, Default)]
pub struct KanaCandidates {
    map: HashMap<char, Vec<String>>,
}

impl KanaCandidates {
    pub fn from_map(name: &str, raw: HashMap<String, Vec<String>>) -> Result<Self, TableError> {
        let mut map = HashMap::with_capacity(raw.len());
        for (key, candidates) in raw {
            let kana = single_char_key(name, &key)?;
            if candidates.is_empty() {
                return Err(TableError::Invalid {
                    name: name.to_string(),
                    reason: format!("no candidates for {key:?}"),
                });
            }
            map.insert(kana, candidates);
        }
        Ok(Self { map })
    }

    /// Each kana's only candidate is its fixed substitution.
    pub fn from_table(table: &KanaTable) -> Self {
        let map = table
            .map
            .iter()
            .map(|(&kana, value)| (kana, vec![value.clone()]))
            .collect();
        Self { map }
    }

    pub fn get(&self, kana: char) -> Option<&[String]> {
        self.map.get(&kana).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Word → syllable readings that override the per-character defaults.
///
/// Readings are stored tone-marked; the romanizer derives the other styles.
#[derive(Debug, Clone, Default)]
pub struct PhraseTable {
    phrases: HashMap<String, Vec<String>>,
    max_chars: usize,
}

impl PhraseTable {
    /// Build from `word → "syl syl …"` pairs. Each word must have exactly
    /// one syllable per character.
    pub fn from_map(name: &str, raw: HashMap<String, String>) -> Result<Self, TableError> {
        let mut phrases = HashMap::with_capacity(raw.len());
        let mut max_chars = 0;
        for (word, reading) in raw {
            let syllables: Vec<String> = reading.split_whitespace().map(str::to_string).collect();
            let chars = word.chars().count();
            if chars == 0 || syllables.len() != chars {
                return Err(TableError::Invalid {
                    name: name.to_string(),
                    reason: format!(
                        "{word:?} has {chars} characters but {} syllables",
                        syllables.len()
                    ),
                });
            }
            max_chars = max_chars.max(chars);
            phrases.insert(word, syllables);
        }
        Ok(Self { phrases, max_chars })
    }

    /// Entries of `overrides` replace same-word entries here.
    pub fn with_overrides(mut self, overrides: PhraseTable) -> Self {
        self.max_chars = self.max_chars.max(overrides.max_chars);
        self.phrases.extend(overrides.phrases);
        self
    }

    pub fn get(&self, word: &str) -> Option<&[String]> {
        self.phrases.get(word).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Length in characters of the longest phrase.
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}
