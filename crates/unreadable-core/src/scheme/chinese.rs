use std::borrow::Cow;

use crate::boundary::add_apostrophes;
use crate::romanize::{Reading, Style};
use crate::tables::CorrespondenceTable;

use super::{Context, SchemeConfig, TranscribeError};

const LE: &str = "了";

/// Tokens after which a `了` keeps its own word.
const SENTENCE_END: [&str; 4] = ["。", "！", "？", "…"];

/// Letters a zero-initial syllable can start with.
const ZERO_INITIAL: [char; 15] = [
    'a', 'ā', 'á', 'ǎ', 'à', 'o', 'ō', 'ó', 'ǒ', 'ò', 'e', 'ē', 'é', 'ě', 'è',
];

/// Rules the split scheme appends to the replacement table.
const SPLIT_RULES: [(&str, &str); 5] = [
    ("了.", " 了."),
    ("了!", " 了!"),
    ("了?", " 了?"),
    ("了…", " 了…"),
    ("之物", "之 物"),
];

/// IPA contour for a tone digit; anything else passes through.
pub fn tone_to_ipa(tone: &str) -> &str {
    match tone {
        "1" => "˥",
        "2" => "˧˥",
        "3" => "˨˩˦",
        "4" => "˥˩",
        "5" => "",
        other => other,
    }
}

fn table<'a>(
    ctx: &Context<'a>,
    cfg: &SchemeConfig,
) -> Result<Option<&'a CorrespondenceTable>, TranscribeError> {
    match cfg.table {
        Some(name) => ctx
            .resources
            .table(name)
            .map(Some)
            .ok_or(TranscribeError::MissingTable(name)),
        None => Ok(None),
    }
}

/// Join rendered tokens with spaces. With `attach_le`, a `了` token sticks to
/// the word before it unless it ends the value or precedes sentence-final
/// punctuation.
fn join_tokens(tokens: &[String], rendered: &[String], attach_le: bool) -> String {
    let mut out = String::new();
    for (i, word) in rendered.iter().enumerate() {
        let attached = attach_le
            && tokens[i] == LE
            && tokens
                .get(i + 1)
                .is_some_and(|next| !SENTENCE_END.contains(&next.as_str()));
        if i > 0 && !attached {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Segmentation only; `了` is re-attached except before sentence ends.
pub(super) fn split(ctx: &Context<'_>, text: &str) -> String {
    let joined = ctx
        .segmenter
        .segment(text, ctx.mode)
        .join(" ")
        .replace(" 了", LE);
    ctx.replacements.extended(SPLIT_RULES).apply(&joined)
}

pub(super) fn pinyin(ctx: &Context<'_>, text: &str) -> String {
    let tokens = ctx.segmenter.segment(text, ctx.mode);
    let rendered: Vec<String> = tokens
        .iter()
        .map(|token| {
            let mut word = String::new();
            let mut prev_alpha = false;
            for reading in ctx.romanizer.readings(token, Style::ToneMarked) {
                let s = reading.as_str();
                if prev_alpha && s.starts_with(&ZERO_INITIAL[..]) {
                    word.push('\'');
                }
                prev_alpha = s.chars().last().is_some_and(char::is_alphabetic);
                word.push_str(s);
            }
            word
        })
        .collect();
    join_tokens(&tokens, &rendered, true)
}

/// Table-driven schemes that write one word per token.
pub(super) fn words(
    ctx: &Context<'_>,
    cfg: &SchemeConfig,
    text: &str,
) -> Result<String, TranscribeError> {
    let table = table(ctx, cfg)?;
    let tokens = ctx.segmenter.segment(text, ctx.mode);
    let rendered: Vec<String> = tokens
        .iter()
        .map(|token| {
            let source = if cfg.literal_bu {
                Cow::Owned(token.replace('不', "bu"))
            } else {
                Cow::Borrowed(token.as_str())
            };
            let syllables: Vec<String> = ctx
                .romanizer
                .romanize(&source, cfg.style)
                .into_iter()
                .map(|s| match table {
                    Some(t) => t.lookup(&s).to_string(),
                    None => s,
                })
                .collect();
            let syllables = match table {
                Some(t) if cfg.apostrophes => add_apostrophes(&syllables, t.spellings()),
                _ => syllables,
            };
            syllables.join(cfg.delimiter)
        })
        .collect();
    Ok(join_tokens(&tokens, &rendered, cfg.attach_le))
}

/// One symbol per character, space-separated; no segmentation.
pub(super) fn characters(
    ctx: &Context<'_>,
    cfg: &SchemeConfig,
    text: &str,
) -> Result<String, TranscribeError> {
    let table = table(ctx, cfg)?;
    let symbols: Vec<String> = ctx
        .romanizer
        .romanize(text, cfg.style)
        .into_iter()
        .map(|s| match table {
            Some(t) => t.lookup(&s).to_string(),
            None => s,
        })
        .collect();
    Ok(symbols.join(cfg.delimiter))
}

/// Per-character IPA: the toneless syllable through the table, then the
/// tone contour.
pub(super) fn ipa(
    ctx: &Context<'_>,
    cfg: &SchemeConfig,
    text: &str,
) -> Result<String, TranscribeError> {
    let table = table(ctx, cfg)?;
    let symbols: Vec<String> = ctx
        .romanizer
        .readings(text, Style::ToneNumeral)
        .into_iter()
        .map(|reading| match reading {
            Reading::Syllable(s) => {
                let split = s.char_indices().last().map_or(0, |(i, _)| i);
                let (base, tone) = s.split_at(split);
                let base = table.map_or(base, |t| t.lookup(base));
                format!("{base}{}", tone_to_ipa(tone))
            }
            Reading::Verbatim(s) => s,
        })
        .collect();
    Ok(symbols.join(cfg.delimiter))
}
