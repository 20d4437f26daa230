//! Conversions out of tone-marked pinyin.
//!
//! Syllables go through `pinyin_zhuyin::decode_pinyin`; what it rejects
//! (syllabic nasals, combining marks) is split here first.

/// Nasals that carry the mark on the consonant.
const NASALS: [(char, char, u8); 4] = [('ḿ', 'm', 2), ('ń', 'n', 2), ('ň', 'n', 3), ('ǹ', 'n', 4)];

/// Combining marks (used on ê and on decomposed input).
const COMBINING: [(char, u8); 4] = [('\u{0304}', 1), ('\u{0301}', 2), ('\u{030C}', 3), ('\u{0300}', 4)];

pub const NEUTRAL_TONE: u8 = 5;

/// Strip nasal and combining marks, returning the remaining spelling and the
/// tone they carried (neutral when none).
pub fn split_tone(marked: &str) -> (String, u8) {
    let mut base = String::with_capacity(marked.len());
    let mut tone = None;
    for c in marked.chars() {
        if let Some(&(_, letter, t)) = NASALS.iter().find(|(m, _, _)| *m == c) {
            base.push(letter);
            tone.get_or_insert(t);
        } else if let Some(&(_, t)) = COMBINING.iter().find(|(m, _)| *m == c) {
            tone.get_or_insert(t);
        } else {
            base.push(c);
        }
    }
    (base, tone.unwrap_or(NEUTRAL_TONE))
}

/// The decoder spells ü as `v` after j/q/x/y too; pinyin writes `u` there.
fn written_u(numbered: &str) -> String {
    let mut chars = numbered.chars();
    match (chars.next(), chars.next()) {
        (Some(c @ ('j' | 'q' | 'x' | 'y')), Some('v')) => format!("{c}u{}", chars.as_str()),
        _ => numbered.to_string(),
    }
}

/// `hǎo` → `hao3`, `lǜ` → `lv4`, `de` → `de5`.
pub fn to_numeral(marked: &str) -> String {
    if let Some(numbered) = pinyin_zhuyin::decode_pinyin(marked) {
        return written_u(&numbered);
    }
    let (base, tone) = split_tone(marked);
    match pinyin_zhuyin::decode_pinyin(&base) {
        Some(mut numbered) => {
            numbered.pop();
            format!("{}{tone}", written_u(&numbered))
        }
        None => format!("{}{tone}", base.replace('ü', "v")),
    }
}

/// `hǎo` → `hao`, `lǜ` → `lv`.
pub fn to_plain(marked: &str) -> String {
    let mut numbered = to_numeral(marked);
    if numbered.ends_with(|c: char| c.is_ascii_digit()) {
        numbered.pop();
    }
    numbered
}
