//! Turns Minecraft language maps into hard-to-read transliterations.
//!
//! English values become katakana, Man'yōgana or i18n-style abbreviations;
//! Chinese values are segmented into words and written in one of a dozen
//! romanization and phonetic systems.

pub mod boundary;
pub mod format;
pub mod pipeline;
pub mod romaji;
pub mod romanize;
pub mod scheme;
pub mod segment;
pub mod settings;
pub mod tables;
pub mod unicode;

pub use pipeline::{ConvertError, ConvertOptions, Conversion, Converter, Replacements};
pub use scheme::{SchemeId, TranscribeError};
pub use segment::{SegmentMode, Segmenter};
pub use settings::{parse_settings_toml, Settings, SettingsError};
pub use tables::{LanguageMap, ResourcePaths, Resources, TableError};
