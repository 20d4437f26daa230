use std::collections::HashMap;

use super::*;

fn romanizer(phrases: &[(&str, &str)]) -> Romanizer {
    let raw: HashMap<String, String> = phrases
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Romanizer::new(PhraseTable::from_map("phrases", raw).unwrap())
}

#[test]
fn tone_marked_per_character() {
    let r = Romanizer::default();
    assert_eq!(r.romanize("你好", Style::ToneMarked), ["nǐ", "hǎo"]);
    assert_eq!(r.romanize("世界", Style::ToneMarked), ["shì", "jiè"]);
}

#[test]
fn numeral_and_plain_styles() {
    let r = Romanizer::default();
    assert_eq!(r.romanize("中国", Style::ToneNumeral), ["zhong1", "guo2"]);
    assert_eq!(r.romanize("中国", Style::Plain), ["zhong", "guo"]);
    assert_eq!(r.romanize("绿", Style::ToneNumeral), ["lv4"]);
}

#[test]
fn bopomofo_style() {
    let r = Romanizer::default();
    assert_eq!(r.romanize("你好", Style::Bopomofo), ["ㄋㄧˇ", "ㄏㄠˇ"]);
}

#[test]
fn unreadable_runs_are_one_chunk() {
    let r = Romanizer::default();
    let readings = r.readings("你好，world! 世", Style::ToneMarked);
    assert_eq!(
        readings,
        [
            Reading::Syllable("nǐ".into()),
            Reading::Syllable("hǎo".into()),
            Reading::Verbatim("，world! ".into()),
            Reading::Syllable("shì".into()),
        ]
    );
    assert!(!readings[2].is_syllable());
}

#[test]
fn non_han_text_passes_through() {
    let r = Romanizer::default();
    assert_eq!(r.romanize("%s", Style::ToneNumeral), ["%s"]);
    assert!(r.romanize("", Style::Plain).is_empty());
}

#[test]
fn phrase_overrides_character_readings() {
    let r = romanizer(&[("银行", "yín háng"), ("的", "de")]);
    assert_eq!(r.romanize("去银行", Style::ToneMarked), ["qù", "yín", "háng"]);
    assert_eq!(r.romanize("我的", Style::ToneNumeral), ["wo3", "de5"]);
    assert_eq!(r.romanize("的", Style::Bopomofo), ["˙ㄉㄜ"]);
}

#[test]
fn longest_phrase_wins() {
    let r = romanizer(&[("长", "cháng"), ("长大", "zhǎng dà")]);
    assert_eq!(r.romanize("长大", Style::ToneNumeral), ["zhang3", "da4"]);
    assert_eq!(r.romanize("长", Style::ToneNumeral), ["chang2"]);
}

#[test]
fn embedded_phrases_are_valid() {
    let phrases = default_phrases();
    assert!(phrases.len() > 300);
    assert!(phrases.max_chars() >= 4);
}

#[test]
fn dictionary_words_read_as_words() {
    let r = Romanizer::default();
    assert_eq!(r.romanize("银行", Style::ToneMarked), ["yín", "háng"]);
    assert_eq!(r.romanize("音乐", Style::ToneMarked), ["yīn", "yuè"]);
    assert_eq!(r.romanize("睡觉", Style::ToneMarked), ["shuì", "jiào"]);
    assert_eq!(r.romanize("成为", Style::ToneMarked), ["chéng", "wéi"]);
    assert_eq!(r.romanize("头发", Style::ToneMarked), ["tóu", "fa"]);
    assert_eq!(r.romanize("了解", Style::ToneMarked), ["liǎo", "jiě"]);
    assert_eq!(r.romanize("为了", Style::ToneMarked), ["wèi", "le"]);
}

#[test]
fn dictionary_words_inside_longer_text() {
    let r = Romanizer::default();
    assert_eq!(
        r.romanize("重新生成", Style::ToneNumeral),
        ["chong2", "xin1", "sheng1", "cheng2"]
    );
    assert_eq!(
        r.romanize("下界传送门", Style::Plain),
        ["xia", "jie", "chuan", "song", "men"]
    );
}

#[test]
fn loaded_phrases_override_the_dictionary() {
    let custom = PhraseTable::from_map(
        "phrases",
        [("银行".to_string(), "yín xíng".to_string())].into_iter().collect(),
    )
    .unwrap();
    let r = Romanizer::new(default_phrases().with_overrides(custom));
    assert_eq!(r.romanize("银行", Style::ToneMarked), ["yín", "xíng"]);
    assert_eq!(r.romanize("音乐", Style::ToneMarked), ["yīn", "yuè"]);
}
