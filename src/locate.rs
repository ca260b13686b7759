//! Finding the exact boundaries of the word a speech engine is speaking.
//!
//! Engines report progress in one of two ways: the character offset where the spoken word begins,
//! or the text of the word itself. Both are resolved against a [`FlatView`] of the live document,
//! and the hit is then widened to the whole word so the highlight never covers a single character
//! of it.

use crate::document::{FlatView, WordRange};

/// Resolves a character offset to the word containing it.
///
/// Returns `None` if the offset is at or past the end of the document. A late report from an
/// engine that is still speaking text which has since been replaced lands here.
pub fn locate_offset(view: &FlatView, offset: usize) -> Option<WordRange> {
    let position = view.position(offset)?;
    let anchor = view.offset_of(position)?;
    Some(expand_word(view, anchor))
}

/// Finds the first occurrence of `word` at or after `from` and returns the boundaries of the word
/// it falls on. A word with inner punctuation, such as `well-known`, yields the range of all the
/// words it spans.
///
/// The search runs over the flattened remaining text, so a word split across several spans is
/// still found. An occurrence standing on its own (not part of a longer word) is preferred; if
/// there is none, the first occurrence inside a longer word is used.
pub fn locate_word(view: &FlatView, from: usize, word: &str) -> Option<WordRange> {
    let needle: Vec<char> = word.trim().chars().collect();
    if needle.is_empty() || from >= view.char_len() {
        return None;
    }

    let chars = view.chars();
    let haystack = &chars[from..];
    let mut fallback = None;
    for idx in 0..=haystack.len().checked_sub(needle.len())? {
        if haystack[idx..idx + needle.len()] != needle[..] {
            continue;
        }
        let start = from + idx;
        let end = start + needle.len();
        if is_word_start(chars, start) && is_word_end(chars, end) {
            return Some(expand_match(view, start, end));
        }
        if fallback.is_none() {
            fallback = Some((start, end));
        }
    }
    fallback.map(|(start, end)| expand_match(view, start, end))
}

/// Widens the character at `offset` to the word it belongs to.
///
/// A character that is not part of any word (whitespace, punctuation) yields a range covering just
/// that character, so the result always contains `offset` when `offset` is inside the document.
pub fn expand_word(view: &FlatView, offset: usize) -> WordRange {
    let chars = view.chars();
    if offset >= chars.len() {
        return WordRange::new(chars.len(), chars.len());
    }
    if !in_word(chars, offset) {
        return WordRange::new(offset, offset + 1);
    }

    let mut start = offset;
    while start > 0 && in_word(chars, start - 1) {
        start -= 1;
    }
    let mut end = offset + 1;
    while end < chars.len() && in_word(chars, end) {
        end += 1;
    }
    WordRange::new(start, end)
}

/// Returns `true` for characters that make up words: letters, digits, underscores and combining
/// marks. Apostrophes count only between two such characters (see [`expand_word`]).
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || is_combining_mark(c)
}

// Covers every word the match touches, so a reported word with inner punctuation is highlighted
// whole. Punctuation at the edges of the match stays outside.
fn expand_match(view: &FlatView, start: usize, end: usize) -> WordRange {
    let chars = view.chars();
    let mut inner = (start..end).filter(|&idx| in_word(chars, idx));
    let first = inner.next().unwrap_or(start);
    let last = inner.last().unwrap_or(first);
    let head = expand_word(view, first);
    let tail = expand_word(view, last);
    WordRange::new(head.start, head.end.max(tail.end))
}

fn in_word(chars: &[char], idx: usize) -> bool {
    let c = chars[idx];
    if is_word_char(c) {
        return true;
    }
    is_apostrophe(c)
        && idx > 0
        && idx + 1 < chars.len()
        && is_word_char(chars[idx - 1])
        && is_word_char(chars[idx + 1])
}

fn is_word_start(chars: &[char], idx: usize) -> bool {
    idx == 0 || !in_word(chars, idx - 1) || !in_word(chars, idx)
}

fn is_word_end(chars: &[char], idx: usize) -> bool {
    idx == chars.len() || !in_word(chars, idx) || !in_word(chars, idx - 1)
}

fn is_apostrophe(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}')
}

fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036f}'
        | '\u{1ab0}'..='\u{1aff}'
        | '\u{1dc0}'..='\u{1dff}'
        | '\u{20d0}'..='\u{20ff}'
        | '\u{fe20}'..='\u{fe2f}')
}
