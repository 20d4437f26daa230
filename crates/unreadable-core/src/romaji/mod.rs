//! Romaji-to-kana transliteration.
//!
//! Uses a trie-based lookup table to convert ASCII words into hiragana,
//! handling sokuon (っ), hatsuon (ん) and yōon (きゃ), then to katakana for the
//! English kana schemes.

mod config;
mod convert;
mod trie;

pub use config::{default_toml, parse_romaji_toml, RomajiConfigError};
pub use convert::{romaji_to_hiragana, to_katakana};
pub use trie::{RomajiTrie, TrieLookupResult};
