//! The output schemes and the per-value transcription each one performs.
//!
//! A scheme is chosen by `SchemeId`; everything that varies between schemes
//! is data in its `SchemeConfig`.

mod chinese;
mod english;

use std::fmt;
use std::str::FromStr;

use crate::romanize::{Romanizer, Style};
use crate::segment::{SegmentMode, Segmenter};
use crate::tables::{ReplacementTable, Resources};

pub use chinese::tone_to_ipa;
pub use english::{abbreviate, DEFAULT_MANYOGANA_SEED};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemeId {
    EnI7h,
    JaKatakana,
    JaManyogana,
    JaManyoganaRandom,
    ZhSplit,
    ZhPinyin,
    ZhIpa,
    ZhBopomofo,
    ZhWadeGiles,
    ZhRomatzyh,
    ZhSimpRomatzyh,
    ZhMps2,
    ZhTongyong,
    ZhYale,
    ZhKatakana,
    ZhCyrillic,
    ZhXiaojing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLanguage {
    English,
    Chinese,
}

/// Which transcription routine a scheme runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transcription {
    /// i7h word abbreviation.
    Abbreviate,
    /// English → katakana through the romaji table.
    Katakana,
    /// Katakana, then the Man'yōgana table. Replacements are applied to the
    /// katakana, before the kana table.
    Manyogana,
    /// Like `Manyogana`, picking one candidate per kana at random.
    ManyoganaRandom,
    /// Segmentation only.
    Split,
    /// Tone-marked pinyin with zero-initial apostrophes.
    Pinyin,
    /// Per-token syllables through a correspondence table.
    Words,
    /// Per-character syllables joined by single spaces.
    Characters,
    /// Per-character IPA with tone contours.
    Ipa,
}

/// Everything that varies between schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemeConfig {
    pub source: SourceLanguage,
    pub transcription: Transcription,
    pub style: Style,
    /// Correspondence table resource name.
    pub table: Option<&'static str>,
    /// Between the syllables of one token.
    pub delimiter: &'static str,
    /// Mark ambiguous syllable boundaries using the table's spellings.
    pub apostrophes: bool,
    /// Attach a `了` token to the word before it.
    pub attach_le: bool,
    /// Rewrite `不` to `bu` inside each token before romanizing.
    pub literal_bu: bool,
    /// Apply the replacement table to the result.
    pub replace: bool,
    /// Title and line capitalization.
    pub capitalize: bool,
    /// Reads `fixed/<output>.json`, written by fix-data.
    pub generated_fixups: bool,
    /// Reads `fixed/manual_<output>.json` on top of the scheme tier.
    pub manual_fixups: bool,
    /// Uses the pre-tokenized source map itself as the scheme tier.
    pub source_fixups: bool,
}

const ENGLISH: SchemeConfig = SchemeConfig {
    source: SourceLanguage::English,
    transcription: Transcription::Abbreviate,
    style: Style::Plain,
    table: None,
    delimiter: "",
    apostrophes: false,
    attach_le: false,
    literal_bu: false,
    replace: false,
    capitalize: false,
    generated_fixups: false,
    manual_fixups: false,
    source_fixups: false,
};

const CHINESE: SchemeConfig = SchemeConfig {
    source: SourceLanguage::Chinese,
    transcription: Transcription::Words,
    style: Style::ToneNumeral,
    table: None,
    delimiter: "-",
    apostrophes: false,
    attach_le: true,
    literal_bu: false,
    replace: true,
    capitalize: true,
    generated_fixups: true,
    manual_fixups: false,
    source_fixups: false,
};

/// Per-character schemes: no segmentation, no post-processing, no fixups.
const CHARACTERS: SchemeConfig = SchemeConfig {
    transcription: Transcription::Characters,
    delimiter: " ",
    attach_le: false,
    replace: false,
    capitalize: false,
    generated_fixups: false,
    ..CHINESE
};

impl SchemeId {
    pub const ALL: [SchemeId; 17] = [
        SchemeId::EnI7h,
        SchemeId::JaKatakana,
        SchemeId::JaManyogana,
        SchemeId::JaManyoganaRandom,
        SchemeId::ZhSplit,
        SchemeId::ZhPinyin,
        SchemeId::ZhIpa,
        SchemeId::ZhBopomofo,
        SchemeId::ZhWadeGiles,
        SchemeId::ZhRomatzyh,
        SchemeId::ZhSimpRomatzyh,
        SchemeId::ZhMps2,
        SchemeId::ZhTongyong,
        SchemeId::ZhYale,
        SchemeId::ZhKatakana,
        SchemeId::ZhCyrillic,
        SchemeId::ZhXiaojing,
    ];

    /// Output file stem, also the scheme's command-line name.
    pub fn output_name(self) -> &'static str {
        match self {
            SchemeId::EnI7h => "en_i7h",
            SchemeId::JaKatakana => "ja_kk",
            SchemeId::JaManyogana => "ja_my",
            SchemeId::JaManyoganaRandom => "ja_my_rand",
            SchemeId::ZhSplit => "zh_split",
            SchemeId::ZhPinyin => "zh_py",
            SchemeId::ZhIpa => "zh_ipa",
            SchemeId::ZhBopomofo => "zh_bpmf",
            SchemeId::ZhWadeGiles => "zh_wg",
            SchemeId::ZhRomatzyh => "zh_gr",
            SchemeId::ZhSimpRomatzyh => "zh_sgr",
            SchemeId::ZhMps2 => "zh_mps2",
            SchemeId::ZhTongyong => "zh_ty",
            SchemeId::ZhYale => "zh_yale",
            SchemeId::ZhKatakana => "zh_kk",
            SchemeId::ZhCyrillic => "zh_cy",
            SchemeId::ZhXiaojing => "zh_xj",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SchemeId::EnI7h => "English, words abbreviated (internationalization → i18n)",
            SchemeId::JaKatakana => "English in katakana",
            SchemeId::JaManyogana => "English in Man'yōgana",
            SchemeId::JaManyoganaRandom => "English in Man'yōgana, random variants",
            SchemeId::ZhSplit => "Chinese, segmented into words",
            SchemeId::ZhPinyin => "Hanyu Pinyin",
            SchemeId::ZhIpa => "IPA (broad)",
            SchemeId::ZhBopomofo => "Zhuyin (Bopomofo)",
            SchemeId::ZhWadeGiles => "Wade-Giles",
            SchemeId::ZhRomatzyh => "Gwoyeu Romatzyh",
            SchemeId::ZhSimpRomatzyh => "Simplified Gwoyeu Romatzyh",
            SchemeId::ZhMps2 => "Mandarin Phonetic Symbols II",
            SchemeId::ZhTongyong => "Tongyong Pinyin",
            SchemeId::ZhYale => "Yale romanization",
            SchemeId::ZhKatakana => "Chinese in katakana",
            SchemeId::ZhCyrillic => "Cyrillic (Palladius)",
            SchemeId::ZhXiaojing => "Xiao'erjing",
        }
    }

    pub fn config(self) -> SchemeConfig {
        let words = |table, delimiter| SchemeConfig {
            table: Some(table),
            delimiter,
            ..CHINESE
        };
        match self {
            SchemeId::EnI7h => ENGLISH,
            SchemeId::JaKatakana => SchemeConfig {
                transcription: Transcription::Katakana,
                replace: true,
                ..ENGLISH
            },
            SchemeId::JaManyogana => SchemeConfig {
                transcription: Transcription::Manyogana,
                ..ENGLISH
            },
            SchemeId::JaManyoganaRandom => SchemeConfig {
                transcription: Transcription::ManyoganaRandom,
                ..ENGLISH
            },
            SchemeId::ZhSplit => SchemeConfig {
                transcription: Transcription::Split,
                delimiter: " ",
                capitalize: false,
                generated_fixups: false,
                source_fixups: true,
                ..CHINESE
            },
            SchemeId::ZhPinyin => SchemeConfig {
                transcription: Transcription::Pinyin,
                style: Style::ToneMarked,
                delimiter: "",
                manual_fixups: true,
                ..CHINESE
            },
            SchemeId::ZhIpa => SchemeConfig {
                transcription: Transcription::Ipa,
                table: Some("py2ipa"),
                ..CHARACTERS
            },
            SchemeId::ZhBopomofo => SchemeConfig {
                style: Style::Bopomofo,
                ..CHARACTERS
            },
            SchemeId::ZhWadeGiles => words("py2wg", "-"),
            SchemeId::ZhRomatzyh => SchemeConfig {
                apostrophes: true,
                attach_le: false,
                literal_bu: true,
                ..words("py2gr", "")
            },
            SchemeId::ZhSimpRomatzyh => words("py2sgr", ""),
            SchemeId::ZhMps2 => words("py2mps2", "-"),
            SchemeId::ZhTongyong => words("py2ty", "-"),
            SchemeId::ZhYale => words("py2yale", "-"),
            SchemeId::ZhKatakana => SchemeConfig {
                style: Style::Plain,
                table: Some("py2kk"),
                ..CHARACTERS
            },
            SchemeId::ZhCyrillic => SchemeConfig {
                style: Style::Plain,
                apostrophes: true,
                attach_le: false,
                ..words("py2cy", "")
            },
            SchemeId::ZhXiaojing => SchemeConfig {
                style: Style::Plain,
                attach_le: false,
                capitalize: false,
                ..words("py2xj", "\u{200C}")
            },
        }
    }
}

impl fmt::Display for SchemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.output_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scheme: {0}")]
pub struct UnknownScheme(pub String);

impl FromStr for SchemeId {
    type Err = UnknownScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchemeId::ALL
            .into_iter()
            .find(|id| id.output_name() == s)
            .ok_or_else(|| UnknownScheme(s.to_string()))
    }
}

/// A single value could not be transcribed.
#[derive(Debug, thiserror::Error)]
pub enum TranscribeError {
    #[error("correspondence table {0} is not loaded")]
    MissingTable(&'static str),
    #[error("Man'yōgana table is not loaded")]
    MissingKanaTable,
}

/// Read-only state a transcription needs.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub resources: &'a Resources,
    pub segmenter: &'a Segmenter,
    pub romanizer: &'a Romanizer,
    pub mode: SegmentMode,
    pub replacements: &'a ReplacementTable,
}

/// Transcribe one value with `id`'s rules, finishing pass included.
///
/// `rng` is consumed only by the random Man'yōgana variant; sharing one
/// generator across a map keeps that output reproducible.
pub fn transcribe(
    id: SchemeId,
    ctx: &Context<'_>,
    text: &str,
    rng: &mut fastrand::Rng,
) -> Result<String, TranscribeError> {
    let cfg = id.config();
    let raw = match cfg.transcription {
        Transcription::Abbreviate => abbreviate(text),
        Transcription::Katakana => english::katakana(ctx, text),
        Transcription::Manyogana => english::manyogana(ctx, text)?,
        Transcription::ManyoganaRandom => english::manyogana_random(ctx, text, rng)?,
        Transcription::Split => return Ok(chinese::split(ctx, text)),
        Transcription::Pinyin => chinese::pinyin(ctx, text),
        Transcription::Words => chinese::words(ctx, &cfg, text)?,
        Transcription::Characters => chinese::characters(ctx, &cfg, text)?,
        Transcription::Ipa => chinese::ipa(ctx, &cfg, text)?,
    };
    Ok(finish(&cfg, ctx.replacements, raw))
}

fn finish(cfg: &SchemeConfig, replacements: &ReplacementTable, text: String) -> String {
    match (cfg.replace, cfg.capitalize) {
        (true, true) => crate::format::finish(&text, replacements),
        (true, false) => replacements.apply(&text),
        (false, true) => {
            crate::format::capitalize_lines(&crate::format::capitalize_titles(&text))
        }
        (false, false) => text,
    }
}
