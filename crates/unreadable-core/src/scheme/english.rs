use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::romaji::to_katakana;
use crate::tables::KanaTable;

use super::{Context, TranscribeError};

/// Seed of the random Man'yōgana variant when none is configured.
pub const DEFAULT_MANYOGANA_SEED: u64 = 0x6d61_6e79_6f67_616e;

fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Unicode letters and digits, without the underscore \w includes.
    RE.get_or_init(|| Regex::new(r"[^\W_]+").expect("word pattern is valid"))
}

/// i7h: every word longer than two characters becomes its first character,
/// the count of the characters in between, and its last character.
pub fn abbreviate(text: &str) -> String {
    word_regex()
        .replace_all(text, |caps: &Captures| {
            let word = &caps[0];
            let mut chars = word.chars();
            let len = word.chars().count();
            match (chars.next(), chars.next_back()) {
                (Some(first), Some(last)) if len > 2 => format!("{first}{}{last}", len - 2),
                _ => word.to_string(),
            }
        })
        .into_owned()
}

pub(super) fn katakana(ctx: &Context<'_>, text: &str) -> String {
    to_katakana(&ctx.resources.romaji, text)
}

fn kana_table<'a>(ctx: &Context<'a>) -> Result<&'a KanaTable, TranscribeError> {
    let table = &ctx.resources.manyogana;
    if table.is_empty() {
        return Err(TranscribeError::MissingKanaTable);
    }
    Ok(table)
}

/// Katakana with replacements applied, then each kana swapped for its
/// Man'yōgana value.
pub(super) fn manyogana(ctx: &Context<'_>, text: &str) -> Result<String, TranscribeError> {
    let table = kana_table(ctx)?;
    let kana = ctx.replacements.apply(&katakana(ctx, text));
    let mut out = String::with_capacity(kana.len());
    for c in kana.chars() {
        match table.get(c) {
            Some(value) => out.push_str(value),
            None => out.push(c),
        }
    }
    Ok(out)
}

/// Like [`manyogana`], drawing each kana's spelling from its candidates
/// with `rng`.
pub(super) fn manyogana_random(
    ctx: &Context<'_>,
    text: &str,
    rng: &mut fastrand::Rng,
) -> Result<String, TranscribeError> {
    let candidates = &ctx.resources.manyogana_candidates;
    if candidates.is_empty() {
        return Err(TranscribeError::MissingKanaTable);
    }
    let kana = ctx.replacements.apply(&katakana(ctx, text));
    let mut out = String::with_capacity(kana.len());
    for c in kana.chars() {
        match candidates.get(c) {
            Some(cands) => out.push_str(&cands[rng.usize(..cands.len())]),
            None => out.push(c),
        }
    }
    Ok(out)
}
