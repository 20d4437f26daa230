//! Han characters → pinyin syllables.
//!
//! Readings come from the `pinyin` crate's per-character defaults, overridden
//! by the phrase table wherever a phrase matches (longest match first).
//! Characters without a reading are grouped into verbatim chunks.
//!
//! The phrase table starts from the embedded word dictionary
//! (`default_phrases.json`), which carries the readings of common words
//! whose characters have more than one pronunciation.

pub mod tone;
pub mod zhuyin;

#[cfg(test)]
mod tests;

use pinyin::ToPinyin;
use tracing::warn;

use crate::tables::PhraseTable;
use crate::unicode::is_han;

pub const DEFAULT_PHRASES_JSON: &str = include_str!("default_phrases.json");

/// The embedded word dictionary.
pub fn default_phrases() -> PhraseTable {
    // The embedded dictionary is covered by `embedded_phrases_are_valid`.
    let raw = serde_json::from_str(DEFAULT_PHRASES_JSON).expect("embedded phrases must be JSON");
    PhraseTable::from_map("default_phrases.json", raw).expect("embedded phrases must be valid")
}

/// Output form of a romanized syllable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// `hǎo`
    ToneMarked,
    /// `hao3`; neutral tone `5`, `ü` written `v`
    ToneNumeral,
    /// `hao`; `ü` written `v`
    Plain,
    /// `ㄏㄠˇ`; neutral-tone dot in front
    Bopomofo,
}

impl Style {
    /// Render a tone-marked syllable in this style.
    pub fn render(self, marked: &str) -> String {
        match self {
            Style::ToneMarked => marked.to_string(),
            Style::ToneNumeral => tone::to_numeral(marked),
            Style::Plain => tone::to_plain(marked),
            Style::Bopomofo => {
                zhuyin::encode(marked).unwrap_or_else(|| {
                    warn!(syllable = marked, "no zhuyin spelling, keeping pinyin");
                    marked.to_string()
                })
            }
        }
    }
}

/// One unit of romanizer output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reading {
    /// The reading of one Han character.
    Syllable(String),
    /// A run of characters without a reading, copied unchanged.
    Verbatim(String),
}

impl Reading {
    pub fn as_str(&self) -> &str {
        match self {
            Reading::Syllable(s) | Reading::Verbatim(s) => s,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Reading::Syllable(s) | Reading::Verbatim(s) => s,
        }
    }

    pub fn is_syllable(&self) -> bool {
        matches!(self, Reading::Syllable(_))
    }
}

#[derive(Debug, Clone)]
pub struct Romanizer {
    phrases: PhraseTable,
}

impl Default for Romanizer {
    fn default() -> Self {
        Self::new(default_phrases())
    }
}

impl Romanizer {
    pub fn new(phrases: PhraseTable) -> Self {
        Self { phrases }
    }

    /// Readings of `text` in order. Concatenating the verbatim chunks with
    /// the characters behind each syllable gives back `text`.
    pub fn readings(&self, text: &str, style: Style) -> Vec<Reading> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut out = Vec::with_capacity(chars.len());
        let mut verbatim = String::new();
        let mut i = 0;

        while i < chars.len() {
            if let Some((len, syllables)) = self.match_phrase(text, &chars, i) {
                flush(&mut verbatim, &mut out);
                out.extend(syllables.iter().map(|s| Reading::Syllable(style.render(s))));
                i += len;
                continue;
            }
            let c = chars[i].1;
            match c.to_pinyin() {
                Some(py) => {
                    flush(&mut verbatim, &mut out);
                    out.push(Reading::Syllable(style.render(py.with_tone())));
                }
                None => verbatim.push(c),
            }
            i += 1;
        }
        flush(&mut verbatim, &mut out);
        out
    }

    /// `readings` flattened to strings.
    pub fn romanize(&self, text: &str, style: Style) -> Vec<String> {
        self.readings(text, style)
            .into_iter()
            .map(Reading::into_string)
            .collect()
    }

    /// Longest phrase starting at char index `start`, as (chars consumed,
    /// tone-marked syllables).
    fn match_phrase(
        &self,
        text: &str,
        chars: &[(usize, char)],
        start: usize,
    ) -> Option<(usize, &[String])> {
        if self.phrases.is_empty() || !is_han(chars[start].1) {
            return None;
        }
        let longest = self.phrases.max_chars().min(chars.len() - start);
        (1..=longest).rev().find_map(|n| {
            let from = chars[start].0;
            let to = chars.get(start + n).map_or(text.len(), |&(pos, _)| pos);
            self.phrases.get(&text[from..to]).map(|syls| (n, syls))
        })
    }
}

fn flush(verbatim: &mut String, out: &mut Vec<Reading>) {
    if !verbatim.is_empty() {
        out.push(Reading::Verbatim(std::mem::take(verbatim)));
    }
}
