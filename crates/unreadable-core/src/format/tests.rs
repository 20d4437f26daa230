use proptest::prelude::*;

use super::*;

#[test]
fn capitalizes_first_letter() {
    assert_eq!(capitalize_lines("nǐhǎo, shìjiè!"), "Nǐhǎo, shìjiè!");
    assert_eq!(capitalize_lines(""), "");
}

#[test]
fn capitalizes_each_line() {
    assert_eq!(capitalize_lines("yī\nèr\n\nsān"), "Yī\nÈr\n\nSān");
    assert_eq!(capitalize_lines("a\n"), "A\n");
}

#[test]
fn capitalizes_after_ellipsis() {
    assert_eq!(capitalize_lines("foo... bar"), "Foo... Bar");
    assert_eq!(capitalize_lines("foo...bar"), "Foo...Bar");
    assert_eq!(capitalize_lines("foo… bar"), "Foo… Bar");
}

#[test]
fn trailing_ellipsis_is_left_alone() {
    assert_eq!(capitalize_lines("wait..."), "Wait...");
    assert_eq!(capitalize_lines("wait... "), "Wait... ");
}

#[test]
fn leading_whitespace_is_preserved() {
    assert_eq!(capitalize_lines("  indented"), "  Indented");
    assert_eq!(capitalize_lines("a...   b"), "A...   B");
}

#[test]
fn non_letters_are_not_skipped() {
    assert_eq!(capitalize_lines("%s jiā"), "%s jiā");
    assert_eq!(capitalize_lines("《wǒ de shìjiè》"), "《wǒ de shìjiè》");
}

#[test]
fn titles_are_title_cased() {
    assert_eq!(
        capitalize_titles("dǎkāi 《wǒ de shìjiè》 ba"),
        "dǎkāi 《Wǒ De Shìjiè》 ba"
    );
}

#[test]
fn titles_keep_rest_of_word() {
    assert_eq!(capitalize_titles("《mcDonald》"), "《McDonald》");
}

#[test]
fn titles_match_non_greedy() {
    assert_eq!(capitalize_titles("《a b》 c 《d》"), "《A B》 c 《D》");
}

#[test]
fn unmatched_titles_pass_through() {
    assert_eq!(capitalize_titles("《a b"), "《a b");
    assert_eq!(capitalize_titles("a b》"), "a b》");
}

#[test]
fn finish_applies_replacements_before_capitalizing() {
    let rep: ReplacementTable = [("，", ", "), ("！", "!")].into_iter().collect();
    assert_eq!(finish("hǎo，zàijiàn！", &rep), "Hǎo, zàijiàn!");
}

proptest! {
    #[test]
    fn capitalize_lines_is_idempotent(text in "[a-zà-ǜ .…\\n《》]{0,40}") {
        let once = capitalize_lines(&text);
        prop_assert_eq!(capitalize_lines(&once), once.clone());
    }

    #[test]
    fn capitalize_titles_is_idempotent(text in "[a-z 《》]{0,40}") {
        let once = capitalize_titles(&text);
        prop_assert_eq!(capitalize_titles(&once), once.clone());
    }

    #[test]
    fn capitalize_lines_keeps_line_count(text in "[a-z.\\n]{0,40}") {
        let out = capitalize_lines(&text);
        prop_assert_eq!(out.matches('\n').count(), text.matches('\n').count());
    }
}
