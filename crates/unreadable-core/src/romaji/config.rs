use std::collections::BTreeMap;

use serde::Deserialize;

use crate::unicode::{is_hiragana, is_katakana};

pub const DEFAULT_TOML: &str = include_str!("default_romaji.toml");

/// Layout of a romaji table file: a single `[mappings]` table.
#[derive(Deserialize)]
struct RomajiFile {
    mappings: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RomajiConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[mappings] table is empty")]
    Empty,
    /// Input is lower-cased before lookup, so such a key could never match.
    #[error("key {0:?} must be lowercase ASCII")]
    BadKey(String),
    #[error("value for {key:?} must be non-empty kana, got {value:?}")]
    BadValue { key: String, value: String },
}

/// Returns the embedded default romaji TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_TOML
}

fn valid_key(key: &str) -> bool {
    !key.is_empty() && key.is_ascii() && !key.bytes().any(|b| b.is_ascii_uppercase())
}

fn valid_value(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| is_hiragana(c) || is_katakana(c))
}

/// Parse and validate a romaji table into a sorted `romaji → kana` map.
pub fn parse_romaji_toml(toml_str: &str) -> Result<BTreeMap<String, String>, RomajiConfigError> {
    let file: RomajiFile =
        toml::from_str(toml_str).map_err(|e| RomajiConfigError::Parse(e.to_string()))?;

    if file.mappings.is_empty() {
        return Err(RomajiConfigError::Empty);
    }
    if let Some(key) = file.mappings.keys().find(|k| !valid_key(k)) {
        return Err(RomajiConfigError::BadKey(key.clone()));
    }
    if let Some((key, value)) = file.mappings.iter().find(|(_, v)| !valid_value(v)) {
        return Err(RomajiConfigError::BadValue {
            key: key.clone(),
            value: value.clone(),
        });
    }

    Ok(file.mappings)
}
