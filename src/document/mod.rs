//! The document being read, as the rest of the crate sees it.
//!
//! A document is a sequence of text-bearing spans (runs of text, paragraph breaks, and so on).
//! Offsets reported by a speech engine refer to the document's plain text, which is the
//! concatenation of those spans. Everything that needs to interpret such an offset works on a
//! [`FlatView`], a read-only flattening of the spans that knows where each span starts.

use std::ops::Range;

use crate::highlight::Emphasis;

mod rich;

pub use rich::{Paragraph, RichDocument, Run};

/// The boundaries of one word, as absolute character offsets into the document's plain text. The
/// end is exclusive.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct WordRange {
    /// Offset of the first character of the word.
    pub start: usize,
    /// Offset one past the last character of the word.
    pub end: usize,
}

impl WordRange {
    /// Constructs a new range. `start` must not be greater than `end`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "word range starts after it ends");
        Self {
            start,
            end,
        }
    }

    /// Returns `true` if the character at `offset` is part of this range.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Number of characters in the range.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the range covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the range as a standard library range of offsets.
    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// A structured position: a character offset within one of the document's text-bearing spans.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct Position {
    /// Index of the span, in document order.
    pub span: usize,
    /// Character offset within the span.
    pub offset: usize,
}

/// Where a span sits within the flattened text.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub struct SpanExtent {
    /// Absolute character offset of the span's first character.
    pub start: usize,
    /// Number of characters in the span.
    pub len: usize,
}

/// A read-only, flattened view of a document's text-bearing spans.
///
/// The view owns a copy of the text, so it stays valid while the document itself is being
/// restyled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatView {
    chars: Vec<char>,
    spans: Vec<SpanExtent>,
}

impl FlatView {
    /// Flattens the given spans, in order.
    pub fn new<'s, I: IntoIterator<Item = &'s str>>(spans: I) -> Self {
        let mut chars = Vec::new();
        let mut extents = Vec::new();
        for span in spans {
            let start = chars.len();
            chars.extend(span.chars());
            extents.push(SpanExtent {
                start,
                len: chars.len() - start,
            });
        }
        Self {
            chars,
            spans: extents,
        }
    }

    /// Total number of characters in the document.
    pub fn char_len(&self) -> usize {
        self.chars.len()
    }

    /// Returns `true` if the document has no text.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The extents of all spans, in document order. Empty spans are included.
    pub fn spans(&self) -> &[SpanExtent] {
        &self.spans
    }

    /// The character at the given absolute offset.
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.chars.get(offset).copied()
    }

    /// Maps an absolute character offset to a position inside the span that holds it, by walking
    /// the spans and accumulating their lengths. Returns `None` if the offset is at or past the
    /// end of the document.
    pub fn position(&self, offset: usize) -> Option<Position> {
        let mut consumed = 0;
        for (span, extent) in self.spans.iter().enumerate() {
            if consumed + extent.len > offset {
                return Some(Position {
                    span,
                    offset: offset - consumed,
                });
            }
            consumed += extent.len;
        }
        None
    }

    /// Maps a structured position back to an absolute offset. A position just past the end of a
    /// span is valid.
    pub fn offset_of(&self, position: Position) -> Option<usize> {
        let extent = self.spans.get(position.span)?;
        (position.offset <= extent.len).then(|| extent.start + position.offset)
    }

    /// The text covered by the range, clipped to the document.
    pub fn slice(&self, range: WordRange) -> String {
        let end = range.end.min(self.chars.len());
        let start = range.start.min(end);
        self.chars[start..end].iter().collect()
    }

    /// The text from the given offset to the end of the document.
    pub fn text_from(&self, offset: usize) -> String {
        self.slice(WordRange::new(offset.min(self.chars.len()), self.chars.len()))
    }

    pub(crate) fn chars(&self) -> &[char] {
        &self.chars
    }
}

/// A document whose text can be read as a sequence of spans.
pub trait TextDocument {
    /// The text-bearing spans of the document, in order. Their concatenation is the document's
    /// plain text.
    fn text_spans(&self) -> Vec<&str>;

    /// A flattened view of the document's current text.
    fn flat_view(&self) -> FlatView {
        FlatView::new(self.text_spans())
    }

    /// The document's plain text.
    fn plain_text(&self) -> String {
        self.text_spans().concat()
    }
}

impl TextDocument for str {
    fn text_spans(&self) -> Vec<&str> {
        vec![self]
    }
}

impl TextDocument for String {
    fn text_spans(&self) -> Vec<&str> {
        vec![self.as_str()]
    }
}

/// A document that can be visually styled and laid out.
pub trait StyledDocument: TextDocument {
    /// Applies the given emphasis to the range, or resets the range to default styling if
    /// `emphasis` is `None`.
    fn set_emphasis(&mut self, range: WordRange, emphasis: Option<Emphasis>);

    /// The zero-based index of the visual line holding the character at `offset`.
    fn line_index(&self, offset: usize) -> usize;
}
