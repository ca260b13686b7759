use autoreader::document::{FlatView, Position, TextDocument, WordRange};
use autoreader::locate::{expand_word, is_word_char, locate_offset, locate_word};
use rstest::rstest;

const FOX: &str = "The quick brown fox";

#[rstest]
#[case(0, 0, 3)]
#[case(2, 0, 3)]
#[case(4, 4, 9)]
#[case(8, 4, 9)]
#[case(12, 10, 15)]
#[case(18, 16, 19)]
fn test_offset_resolves_to_enclosing_word(
    #[case] offset: usize,
    #[case] start: usize,
    #[case] end: usize,
) {
    let view = FOX.flat_view();
    assert_eq!(Some(WordRange::new(start, end)), locate_offset(&view, offset));
}

#[test]
fn test_offset_scenario_quick() {
    let view = FOX.flat_view();
    let range = locate_offset(&view, 4).unwrap();
    assert_eq!("quick", view.slice(range));
    assert_eq!(4..9, range.as_range());
}

#[rstest]
#[case(19)]
#[case(20)]
#[case(usize::MAX)]
fn test_offset_past_end_is_not_found(#[case] offset: usize) {
    assert_eq!(None, locate_offset(&FOX.flat_view(), offset));
}

#[test]
fn test_offset_on_whitespace_covers_single_char() {
    let view = FOX.flat_view();
    assert_eq!(Some(WordRange::new(3, 4)), locate_offset(&view, 3));
}

#[test]
fn test_offset_in_empty_document() {
    assert_eq!(None, locate_offset(&"".flat_view(), 0));
}

#[test]
fn test_words_resolve_progressively() {
    let view = FOX.flat_view();
    let mut from = 0;
    let mut ranges = Vec::new();
    for word in ["The", "quick", "brown", "fox"] {
        let range = locate_word(&view, from, word).unwrap();
        assert_eq!(word, view.slice(range));
        from = range.end;
        ranges.push(range);
    }
    assert_eq!(
        vec![
            WordRange::new(0, 3),
            WordRange::new(4, 9),
            WordRange::new(10, 15),
            WordRange::new(16, 19)
        ],
        ranges
    );
}

#[test]
fn test_word_search_skips_earlier_occurrences() {
    let view = "the cat saw the dog".flat_view();
    assert_eq!(Some(WordRange::new(0, 3)), locate_word(&view, 0, "the"));
    assert_eq!(Some(WordRange::new(12, 15)), locate_word(&view, 3, "the"));
}

#[test]
fn test_word_search_prefers_whole_words() {
    let view = "other the".flat_view();
    assert_eq!(Some(WordRange::new(6, 9)), locate_word(&view, 0, "the"));
}

#[test]
fn test_word_search_falls_back_to_substring() {
    let view = "we breathe".flat_view();
    let range = locate_word(&view, 0, "eat").unwrap();
    assert_eq!("breathe", view.slice(range));
}

#[test]
fn test_word_with_punctuation() {
    let view = "Look, the fox.".flat_view();
    let range = locate_word(&view, 0, "fox.").unwrap();
    assert_eq!("fox", view.slice(range));
}

#[test]
fn test_word_with_inner_punctuation() {
    let view = "a well-known fact".flat_view();
    let range = locate_word(&view, 0, "well-known").unwrap();
    assert_eq!(WordRange::new(2, 12), range);
    assert_eq!("well-known", view.slice(range));
    assert_eq!(Some(WordRange::new(13, 17)), locate_word(&view, range.end, "fact"));
}

#[rstest]
#[case("fox", 17)]
#[case("", 0)]
#[case("   ", 0)]
#[case("wolf", 0)]
fn test_word_not_found(#[case] word: &str, #[case] from: usize) {
    assert_eq!(None, locate_word(&FOX.flat_view(), from, word));
}

#[test]
fn test_word_split_across_spans() {
    let view = FlatView::new(["The qu", "ick", " brown fox"]);
    let range = locate_word(&view, 3, "quick").unwrap();
    assert_eq!(WordRange::new(4, 9), range);
    assert_eq!(Some(Position { span: 1, offset: 0 }), view.position(6));
}

#[test]
fn test_offset_maps_through_span_walk() {
    let view = FlatView::new(["", "ab", "", "c d"]);
    assert_eq!(Some(Position { span: 1, offset: 0 }), view.position(0));
    assert_eq!(Some(Position { span: 3, offset: 0 }), view.position(2));
    assert_eq!(Some(Position { span: 3, offset: 2 }), view.position(4));
    assert_eq!(None, view.position(5));
    assert_eq!(Some(WordRange::new(0, 3)), locate_offset(&view, 1));
}

#[rstest]
#[case("don't stop", 2, "don't")]
#[case("'quoted' text", 1, "quoted")]
#[case("it\u{2019}s fine", 0, "it\u{2019}s")]
#[case("snake_case word", 6, "snake_case")]
#[case("na\u{ef}ve caf\u{e9}", 7, "caf\u{e9}")]
#[case("cafe\u{301} au lait", 1, "cafe\u{301}")]
fn test_word_boundaries(#[case] text: &str, #[case] offset: usize, #[case] expected: &str) {
    let view = text.flat_view();
    assert_eq!(expected, view.slice(expand_word(&view, offset)));
}

#[test]
fn test_expand_past_end_is_empty() {
    let view = FOX.flat_view();
    assert!(expand_word(&view, 40).is_empty());
}

#[test]
fn test_word_chars() {
    assert!(is_word_char('a'));
    assert!(is_word_char('7'));
    assert!(is_word_char('_'));
    assert!(!is_word_char(' '));
    assert!(!is_word_char('\''));
    assert!(!is_word_char(','));
}
