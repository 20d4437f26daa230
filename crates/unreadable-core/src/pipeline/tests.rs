use super::*;
use crate::tables::CorrespondenceTable;

fn map(pairs: &[(&str, &str)]) -> LanguageMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn resources() -> Resources {
    let mut res = Resources::default();
    res.rep_zh = [(" ，", ","), (" ！", "!")].into_iter().collect();
    res.rep_ja_kk = [("%ス", "%s")].into_iter().collect();
    res.insert_table(
        "py2wg",
        [("ni3", "ni3"), ("hao3", "hao3")]
            .into_iter()
            .collect::<CorrespondenceTable>(),
    );
    res.fixups.universal = map(&[("menu.quit", "Universal"), ("menu.title", "Universal")]);
    res.fixups
        .scheme
        .insert("zh_py".into(), map(&[("menu.title", "Scheme"), ("menu.options", "Scheme")]));
    res.fixups.manual = map(&[("menu.options", "Manual")]);
    res.fixups.source = map(&[("gui.split", "预 分词")]);
    res.reading_override_keys.insert("gui.stand".into());
    res
}

fn converter(res: Resources) -> Converter {
    Converter::with_segmenter(res, Segmenter::new())
}

#[test]
fn demo_greeting_in_pinyin() {
    let conv = converter(resources());
    let input = map(&[("demo.greeting", "你好，世界！")]);
    let out = conv
        .convert(SchemeId::ZhPinyin, &input, &ConvertOptions::default())
        .unwrap();
    assert_eq!(out.map["demo.greeting"], "Nǐhǎo, shìjiè!");
    assert_eq!(out.scheme, SchemeId::ZhPinyin);
}

#[test]
fn minecraft_in_katakana() {
    let conv = converter(resources());
    let input = map(&[("title", "Minecraft"), ("fmt", "%s")]);
    let out = conv
        .convert(SchemeId::JaKatakana, &input, &ConvertOptions::default())
        .unwrap();
    assert_eq!(out.map["title"], "ミネクラフト");
    assert_eq!(out.map["fmt"], "%s");
    // no fixup tier for English schemes
    assert_eq!(out.map.len(), 2);
}

#[test]
fn empty_map_stays_empty_without_tiers() {
    let conv = converter(resources());
    let empty = LanguageMap::new();
    let out = conv
        .convert(SchemeId::EnI7h, &empty, &ConvertOptions::default())
        .unwrap();
    assert!(out.map.is_empty());
    let out = conv
        .convert(SchemeId::ZhWadeGiles, &empty, &ConvertOptions::fix_data())
        .unwrap();
    assert!(out.map.is_empty());
}

#[test]
fn empty_map_still_gets_fixups() {
    let conv = converter(resources());
    let out = conv
        .convert(SchemeId::ZhWadeGiles, &LanguageMap::new(), &ConvertOptions::default())
        .unwrap();
    assert_eq!(out.map, resources().fixups.universal);
}

#[test]
fn fixup_precedence() {
    let conv = converter(resources());
    let input = map(&[("menu.quit", "你好"), ("menu.title", "你好"), ("menu.options", "你好")]);
    let out = conv
        .convert(SchemeId::ZhPinyin, &input, &ConvertOptions::default())
        .unwrap();
    assert_eq!(out.map["menu.quit"], "Universal");
    assert_eq!(out.map["menu.title"], "Scheme");
    assert_eq!(out.map["menu.options"], "Manual");
}

#[test]
fn manual_tier_is_pinyin_only() {
    let mut res = resources();
    res.fixups
        .scheme
        .insert("zh_wg".into(), map(&[("menu.options", "Scheme WG")]));
    let conv = converter(res);
    let out = conv
        .convert(SchemeId::ZhWadeGiles, &LanguageMap::new(), &ConvertOptions::default())
        .unwrap();
    assert_eq!(out.map["menu.options"], "Scheme WG");
}

#[test]
fn split_uses_source_tier() {
    let conv = converter(resources());
    let out = conv
        .convert(SchemeId::ZhSplit, &LanguageMap::new(), &ConvertOptions::default())
        .unwrap();
    assert_eq!(out.map["gui.split"], "预 分词");
}

#[test]
fn custom_replacements_skip_universal_tier() {
    let conv = converter(resources());
    let opts = ConvertOptions {
        mode: SegmentMode::Whitespace,
        replacements: Replacements::Custom(FIX_DATA_REPLACEMENTS.into_iter().collect()),
        ..ConvertOptions::default()
    };
    let out = conv
        .convert(SchemeId::ZhPinyin, &map(&[("k", "你好 ，")]), &opts)
        .unwrap();
    assert!(!out.map.contains_key("menu.quit"));
    assert_eq!(out.map["menu.title"], "Scheme");
}

#[test]
fn fix_data_options() {
    let conv = converter(resources());
    let input = map(&[("k", "你好 ！:(")]);
    let out = conv
        .convert(SchemeId::ZhWadeGiles, &input, &ConvertOptions::fix_data())
        .unwrap();
    assert_eq!(out.map, map(&[("k", "Ni3-hao3 ! :(")]));
}

#[test]
fn reading_override_rewrites_wei() {
    let conv = converter(resources());
    let input = map(&[("gui.stand", "成为"), ("gui.other", "成为")]);
    let opts = ConvertOptions {
        mode: SegmentMode::Whitespace,
        apply_fixups: false,
        ..ConvertOptions::default()
    };
    let out = conv.convert(SchemeId::ZhPinyin, &input, &opts).unwrap();
    assert_eq!(out.map["gui.stand"], "Chéngwèi");
    assert_eq!(out.map["gui.other"], "Chéngwéi");

    let split = conv.convert(SchemeId::ZhSplit, &input, &opts).unwrap();
    assert_eq!(split.map["gui.stand"], "成为");
}

#[test]
fn fixup_value_is_exact() {
    let mut res = resources();
    res.fixups
        .scheme
        .insert("zh_wg".into(), map(&[("item.apple", "  raw, not formatted  ")]));
    let conv = converter(res);
    let out = conv
        .convert(
            SchemeId::ZhWadeGiles,
            &map(&[("item.apple", "你好")]),
            &ConvertOptions::default(),
        )
        .unwrap();
    assert_eq!(out.map["item.apple"], "  raw, not formatted  ");
}

#[test]
fn failing_entry_names_key_and_scheme() {
    let conv = converter(resources());
    let input = map(&[("a.first", "你好"), ("b.second", "世界")]);
    let err = conv
        .convert(SchemeId::ZhYale, &input, &ConvertOptions::default())
        .unwrap_err();
    let ConvertError::Entry { scheme, key, source } = &err;
    assert_eq!(*scheme, SchemeId::ZhYale);
    assert_eq!(key, "a.first");
    assert!(matches!(source, TranscribeError::MissingTable("py2yale")));
    assert!(err.to_string().contains("zh_yale"));
}

#[test]
fn output_is_deterministic() {
    let mut res = resources();
    let kana = [("ミ", "美弥"), ("ネ", "祢"), ("ク", "久玖"), ("ラ", "良"), ("フ", "布"), ("ト", "斗")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.chars().map(String::from).collect()))
        .collect();
    res.manyogana_candidates =
        crate::tables::KanaCandidates::from_map("manyogana_rand", kana).unwrap();
    let conv = converter(res);
    let input = map(&[("b", "Minecraft"), ("a", "Crafting Table"), ("c", "ok")]);
    let opts = ConvertOptions::default();

    let first = conv.convert(SchemeId::JaManyoganaRandom, &input, &opts).unwrap();
    let second = conv.convert(SchemeId::JaManyoganaRandom, &input, &opts).unwrap();
    assert_eq!(first.map, second.map);
    let keys: Vec<&str> = first.map.keys().map(String::as_str).collect();
    assert_eq!(keys, ["a", "b", "c"]);
}

#[test]
fn convert_text_previews_one_value() {
    let conv = converter(resources());
    let out = conv
        .convert_text(SchemeId::EnI7h, "Crafting Table", &ConvertOptions::default())
        .unwrap();
    assert_eq!(out, "C6g T3e");
}
