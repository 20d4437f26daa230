//! Text-level post-processing shared by every scheme.
//!
//! `capitalize_lines` and `capitalize_titles` are independent of each other
//! and both idempotent.

#[cfg(test)]
mod tests;

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::tables::ReplacementTable;
use crate::unicode::upper_first;

/// Sub-sentence delimiters inside a line.
const ELLIPSES: [&str; 2] = ["...", "…"];

/// Uppercase the first letter of every line, and of every sub-sentence that
/// follows an ellipsis (`...` or `…`) within a line.
///
/// Leading whitespace of a (sub)sentence is kept and skipped over. Line
/// breaks are preserved exactly.
pub fn capitalize_lines(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    text.split('\n')
        .map(capitalize_sentences)
        .collect::<Vec<_>>()
        .join("\n")
}

fn capitalize_sentences(line: &str) -> String {
    let mut out = String::with_capacity(line.len() + 4);
    let mut rest = line;
    loop {
        let next = ELLIPSES
            .iter()
            .filter_map(|e| rest.find(e).map(|pos| (pos, e.len())))
            .min_by_key(|&(pos, _)| pos);
        match next {
            Some((pos, len)) => {
                out.push_str(&capitalize_part(&rest[..pos]));
                out.push_str(&rest[pos..pos + len]);
                rest = &rest[pos + len..];
            }
            None => {
                out.push_str(&capitalize_part(rest));
                return out;
            }
        }
    }
}

fn capitalize_part(part: &str) -> String {
    let body = part.trim_start();
    let indent = &part[..part.len() - body.len()];
    format!("{indent}{}", upper_first(body))
}

fn title_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"《(.*?)》").expect("title pattern is valid"))
}

/// Uppercase the first character of every whitespace-delimited word inside
/// `《…》`. Words are re-joined with single spaces; text outside the brackets
/// is untouched.
pub fn capitalize_titles(text: &str) -> String {
    title_regex()
        .replace_all(text, |caps: &Captures| {
            let words: Vec<String> = caps[1].split_whitespace().map(upper_first).collect();
            format!("《{}》", words.join(" "))
        })
        .into_owned()
}

/// Standard finishing pass: replacements, then title and line
/// capitalization.
pub fn finish(text: &str, replacements: &ReplacementTable) -> String {
    capitalize_lines(&capitalize_titles(&replacements.apply(text)))
}
