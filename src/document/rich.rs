use crate::highlight::Emphasis;

use super::{StyledDocument, TextDocument, WordRange};

/// A stretch of text sharing one style.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Run {
    text: String,
    emphasis: Option<Emphasis>,
}

impl Run {
    /// Constructs an unstyled run.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            emphasis: None,
        }
    }

    /// Constructs a run carrying the given emphasis.
    pub fn emphasized<S: Into<String>>(text: S, emphasis: Emphasis) -> Self {
        Self {
            text: text.into(),
            emphasis: Some(emphasis),
        }
    }

    /// The text of the run.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The emphasis applied to the run, if any.
    pub fn emphasis(&self) -> Option<Emphasis> {
        self.emphasis
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// A block of runs. Consecutive paragraphs are separated by a line break.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Paragraph {
    runs: Vec<Run>,
}

impl Paragraph {
    /// Constructs an empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a run to the paragraph.
    pub fn push_run(&mut self, run: Run) -> &mut Self {
        self.runs.push(run);
        self
    }

    /// The runs of the paragraph, in order.
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    fn char_len(&self) -> usize {
        self.runs.iter().map(Run::char_len).sum()
    }

    // Splits the runs overlapping [start, end) so the range can carry its own style, then merges
    // neighbours that ended up with the same style.
    fn restyle(&mut self, start: usize, end: usize, emphasis: Option<Emphasis>) {
        let mut runs = Vec::with_capacity(self.runs.len() + 2);
        let mut run_start = 0;
        for run in self.runs.drain(..) {
            let run_end = run_start + run.char_len();
            let lo = start.clamp(run_start, run_end);
            let hi = end.clamp(run_start, run_end);
            if lo < hi {
                let (head, rest) = split_chars(&run.text, lo - run_start);
                let (middle, tail) = split_chars(rest, hi - lo);
                runs.push(Run {
                    text: head.to_string(),
                    emphasis: run.emphasis,
                });
                runs.push(Run {
                    text: middle.to_string(),
                    emphasis,
                });
                runs.push(Run {
                    text: tail.to_string(),
                    emphasis: run.emphasis,
                });
            } else {
                runs.push(run);
            }
            run_start = run_end;
        }
        self.runs = merge_runs(runs);
    }
}

impl From<&str> for Paragraph {
    fn from(text: &str) -> Self {
        let mut paragraph = Self::new();
        if !text.is_empty() {
            paragraph.push_run(Run::new(text));
        }
        paragraph
    }
}

fn split_chars(s: &str, count: usize) -> (&str, &str) {
    match s.char_indices().nth(count) {
        Some((idx, _)) => s.split_at(idx),
        None => (s, ""),
    }
}

fn merge_runs(runs: Vec<Run>) -> Vec<Run> {
    let mut merged: Vec<Run> = Vec::with_capacity(runs.len());
    for run in runs {
        if run.text.is_empty() {
            continue;
        }
        match merged.last_mut() {
            Some(last) if last.emphasis == run.emphasis => last.text.push_str(&run.text),
            _ => merged.push(run),
        }
    }
    merged
}

/// An in-memory rich text document: a list of paragraphs made of styled runs.
///
/// Paragraph breaks appear in the plain text as a single `'\n'` and are exposed as a span of their
/// own, so offsets into the plain text and offsets into the spans always agree.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct RichDocument {
    paragraphs: Vec<Paragraph>,
    wrap_columns: Option<usize>,
}

impl RichDocument {
    /// Constructs an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a document with one unstyled paragraph per line of `text`. Both `"\n"` and
    /// `"\r\n"` end a line.
    pub fn from_text(text: &str) -> Self {
        let mut document = Self::new();
        document.replace_text(text);
        document
    }

    /// Soft-wraps lines every `columns` characters when computing line positions. Zero disables
    /// wrapping.
    pub fn with_wrap(mut self, columns: usize) -> Self {
        self.wrap_columns = (columns > 0).then(|| columns);
        self
    }

    /// The paragraphs of the document.
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Appends a paragraph to the document.
    pub fn push_paragraph(&mut self, paragraph: Paragraph) -> &mut Self {
        self.paragraphs.push(paragraph);
        self
    }

    /// Removes all content.
    pub fn clear(&mut self) {
        self.paragraphs.clear();
    }

    /// Replaces all content with unstyled text.
    pub fn replace_text(&mut self, text: &str) {
        self.paragraphs = text
            .split('\n')
            .map(|line| Paragraph::from(line.strip_suffix('\r').unwrap_or(line)))
            .collect();
    }

    /// Number of characters in the plain text, including paragraph breaks.
    pub fn char_len(&self) -> usize {
        let text: usize = self.paragraphs.iter().map(Paragraph::char_len).sum();
        text + self.paragraphs.len().saturating_sub(1)
    }

    /// The absolute ranges currently carrying emphasis, with the emphasis applied to each.
    pub fn emphasized_ranges(&self) -> Vec<(WordRange, Emphasis)> {
        let mut ranges: Vec<(WordRange, Emphasis)> = Vec::new();
        let mut offset = 0;
        for paragraph in &self.paragraphs {
            for run in &paragraph.runs {
                let len = run.char_len();
                if let Some(emphasis) = run.emphasis {
                    match ranges.last_mut() {
                        Some((range, last)) if range.end == offset && *last == emphasis => {
                            range.end += len
                        }
                        _ => ranges.push((WordRange::new(offset, offset + len), emphasis)),
                    }
                }
                offset += len;
            }
            offset += 1;
        }
        ranges
    }

    fn line_count(&self, len: usize) -> usize {
        match self.wrap_columns {
            Some(columns) => ((len + columns - 1) / columns).max(1),
            None => 1,
        }
    }

    fn wrapped_line(&self, local: usize, len: usize) -> usize {
        match self.wrap_columns {
            Some(columns) => (local / columns).min(self.line_count(len) - 1),
            None => 0,
        }
    }
}

impl TextDocument for RichDocument {
    fn text_spans(&self) -> Vec<&str> {
        let mut spans = Vec::new();
        for (idx, paragraph) in self.paragraphs.iter().enumerate() {
            if idx > 0 {
                spans.push("\n");
            }
            spans.extend(paragraph.runs.iter().map(|run| run.text.as_str()));
        }
        spans
    }
}

impl StyledDocument for RichDocument {
    fn set_emphasis(&mut self, range: WordRange, emphasis: Option<Emphasis>) {
        let mut para_start = 0;
        for paragraph in &mut self.paragraphs {
            let len = paragraph.char_len();
            let lo = range.start.max(para_start);
            let hi = range.end.min(para_start + len);
            if lo < hi {
                paragraph.restyle(lo - para_start, hi - para_start, emphasis);
            }
            para_start += len + 1;
        }
    }

    fn line_index(&self, offset: usize) -> usize {
        let mut line = 0;
        let mut para_start = 0;
        for paragraph in &self.paragraphs {
            let len = paragraph.char_len();
            if offset <= para_start + len {
                return line + self.wrapped_line(offset - para_start, len);
            }
            line += self.line_count(len);
            para_start += len + 1;
        }
        line.saturating_sub(1)
    }
}
