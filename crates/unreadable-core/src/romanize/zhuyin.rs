//! Tone-marked pinyin → zhuyin (Bopomofo).

use super::tone;

const NEUTRAL_DOT: char = '˙';

const TONE_MARKS: [&str; 4] = ["", "ˊ", "ˇ", "ˋ"];

/// Syllables without a vowel, absent from the pinyin tables.
const SYLLABIC: [(&str, &str); 3] = [("m", "ㄇ"), ("n", "ㄋ"), ("ng", "ㄫ")];

/// Encode one tone-marked syllable (`zhōng`, `lǜ`, `de` = neutral).
///
/// The neutral-tone dot is placed in front of the syllable. Returns `None`
/// for anything that is not a pinyin syllable.
pub fn encode(marked: &str) -> Option<String> {
    if let Some(z) = pinyin_zhuyin::pinyin_to_zhuyin(marked) {
        return Some(dot_first(z));
    }
    let (base, tone) = tone::split_tone(marked);
    let body = SYLLABIC.iter().find(|(p, _)| *p == base).map(|(_, z)| *z)?;
    Some(match tone {
        1..=4 => format!("{body}{}", TONE_MARKS[usize::from(tone) - 1]),
        _ => format!("{NEUTRAL_DOT}{body}"),
    })
}

fn dot_first(z: String) -> String {
    match z.strip_suffix(NEUTRAL_DOT) {
        Some(body) => format!("{NEUTRAL_DOT}{body}"),
        None => z,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_syllables() {
        assert_eq!(encode("mǎ").as_deref(), Some("ㄇㄚˇ"));
        assert_eq!(encode("zhōng").as_deref(), Some("ㄓㄨㄥ"));
        assert_eq!(encode("guó").as_deref(), Some("ㄍㄨㄛˊ"));
        assert_eq!(encode("shuàng").as_deref(), Some("ㄕㄨㄤˋ"));
    }

    #[test]
    fn neutral_dot_goes_first() {
        assert_eq!(encode("de").as_deref(), Some("˙ㄉㄜ"));
        assert_eq!(encode("ma").as_deref(), Some("˙ㄇㄚ"));
        assert_eq!(encode("r").as_deref(), Some("˙ㄦ"));
    }

    #[test]
    fn buzzing_i_is_dropped() {
        assert_eq!(encode("shì").as_deref(), Some("ㄕˋ"));
        assert_eq!(encode("zi").as_deref(), Some("˙ㄗ"));
        assert_eq!(encode("jī").as_deref(), Some("ㄐㄧ"));
    }

    #[test]
    fn zero_initial_spellings() {
        assert_eq!(encode("yǒu").as_deref(), Some("ㄧㄡˇ"));
        assert_eq!(encode("yuán").as_deref(), Some("ㄩㄢˊ"));
        assert_eq!(encode("wèi").as_deref(), Some("ㄨㄟˋ"));
        assert_eq!(encode("ér").as_deref(), Some("ㄦˊ"));
    }

    #[test]
    fn umlaut_finals() {
        assert_eq!(encode("lǜ").as_deref(), Some("ㄌㄩˋ"));
        assert_eq!(encode("xué").as_deref(), Some("ㄒㄩㄝˊ"));
        assert_eq!(encode("jūn").as_deref(), Some("ㄐㄩㄣ"));
    }

    #[test]
    fn syllabic_nasals() {
        assert_eq!(encode("ňg").as_deref(), Some("ㄫˇ"));
        assert_eq!(encode("ḿ").as_deref(), Some("ㄇˊ"));
        assert_eq!(encode("ń").as_deref(), Some("ㄋˊ"));
        assert_eq!(encode("n").as_deref(), Some("˙ㄋ"));
    }

    #[test]
    fn rejects_non_pinyin() {
        assert_eq!(encode(""), None);
        assert_eq!(encode("llama"), None);
        assert_eq!(encode("，"), None);
    }
}
