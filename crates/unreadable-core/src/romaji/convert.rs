use crate::unicode::hiragana_to_katakana;

use super::trie::{RomajiTrie, TrieLookupResult};

fn is_vowel(ch: char) -> bool {
    matches!(ch, 'a' | 'i' | 'u' | 'e' | 'o')
}

fn is_consonant(ch: char) -> bool {
    ch.is_ascii_lowercase() && !is_vowel(ch)
}

/// Convert a romaji string to hiragana in one pass.
///
/// Every ambiguous sequence is resolved immediately: trailing "n" becomes ん,
/// doubled consonants become っ, and a consonant with no following vowel gets
/// an epenthetic one (`o` after t/d, `u` otherwise). Characters the table
/// cannot place are copied through.
pub fn romaji_to_hiragana(trie: &RomajiTrie, romaji: &str) -> String {
    let mut composed = String::with_capacity(romaji.len() * 3);
    let mut pending = romaji;

    while !pending.is_empty() {
        match trie.lookup(pending) {
            TrieLookupResult::Exact(kana) | TrieLookupResult::ExactAndPrefix(kana) => {
                composed.push_str(&kana);
                break;
            }
            TrieLookupResult::Prefix | TrieLookupResult::None => {
                let consumed = drain_head(trie, &mut composed, pending);
                pending = &pending[consumed..];
            }
        }
    }

    composed
}

/// Consume the head of `pending` when the whole string has no match.
/// Returns the number of bytes consumed (always at least one char).
fn drain_head(trie: &RomajiTrie, composed: &mut String, pending: &str) -> usize {
    // Longest proper prefix that maps to kana.
    let boundaries: Vec<usize> = pending.char_indices().skip(1).map(|(i, _)| i).collect();
    for &end in boundaries.iter().rev() {
        if let Some(kana) = trie.get(&pending[..end]) {
            composed.push_str(&kana);
            return end;
        }
    }

    let mut chars = pending.chars();
    let Some(first) = chars.next() else {
        return 0;
    };
    let second = chars.next();

    match second {
        Some(second) if first == second && first != 'n' && is_consonant(first) => {
            composed.push('っ');
        }
        Some(second) if first == 'n' && !is_vowel(second) && second != 'y' => {
            composed.push('ん');
        }
        None if first == 'n' => composed.push('ん'),
        _ if is_consonant(first) => {
            let vowel = if matches!(first, 't' | 'd') { 'o' } else { 'u' };
            match trie.get(&format!("{first}{vowel}")) {
                Some(kana) => composed.push_str(&kana),
                None => composed.push(first),
            }
        }
        _ => composed.push(first),
    }
    first.len_utf8()
}

/// Transliterate English text into katakana.
///
/// Runs of ASCII letters are lower-cased and converted as romaji (`x` is read
/// as `ks`); every other character is kept in place.
pub fn to_katakana(trie: &RomajiTrie, text: &str) -> String {
    let mut hiragana = String::with_capacity(text.len() * 3);
    let mut word = String::new();

    for ch in text.chars() {
        if ch.is_ascii_alphabetic() {
            match ch.to_ascii_lowercase() {
                'x' => word.push_str("ks"),
                lower => word.push(lower),
            }
        } else {
            if !word.is_empty() {
                hiragana.push_str(&romaji_to_hiragana(trie, &word));
                word.clear();
            }
            hiragana.push(ch);
        }
    }
    if !word.is_empty() {
        hiragana.push_str(&romaji_to_hiragana(trie, &word));
    }

    hiragana_to_katakana(&hiragana)
}
