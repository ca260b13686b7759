use std::borrow::Cow;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::ops::Range;
use std::path::Path;

use xml::escape::{escape_str_attribute, escape_str_pcdata};
use xml::reader::{EventReader, XmlEvent};

use crate::document::{FlatView, WordRange};
use crate::locate::expand_word;
use crate::{Error, Result};

use super::{RenderedSpeech, SourceMap, Speech};

/// How a word should be pronounced.
#[derive(Debug, Hash, PartialEq, Eq, Clone)]
pub enum Pronunciation {
    /// A phonetic transcription, passed to the engine as-is.
    Phoneme(String),
    /// Replacement text to speak instead of the word.
    Alias(String),
}

/// Pronunciation overrides for individual words.
///
/// A lexicon is usually loaded from a [Pronunciation Lexicon Specification] document:
///
/// ```xml
/// <lexicon version="1.0" xmlns="http://www.w3.org/2005/01/pronunciation-lexicon"
///          alphabet="x-microsoft-ups" xml:lang="en-US">
///   <lexeme>
///     <grapheme>Thames</grapheme>
///     <phoneme>T EH M S</phoneme>
///   </lexeme>
///   <lexeme>
///     <grapheme>W3C</grapheme>
///     <alias>World Wide Web Consortium</alias>
///   </lexeme>
/// </lexicon>
/// ```
///
/// Graphemes are matched against whole words, case-sensitively, so a grapheme must itself be a
/// single word: loading a lexeme whose grapheme spans spaces or punctuation (`New York`, `e.g.`)
/// fails. When a lexeme has several pronunciations, the first one wins.
///
/// [Pronunciation Lexicon Specification]: https://www.w3.org/TR/pronunciation-lexicon/
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Lexicon {
    entries: HashMap<String, Pronunciation>,
}

#[derive(Clone, Copy)]
enum Field {
    Grapheme,
    Phoneme,
    Alias,
}

#[derive(Default)]
struct Lexeme {
    graphemes: Vec<String>,
    pronunciation: Option<Pronunciation>,
}

impl Lexicon {
    /// Constructs an empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a lexicon from a PLS file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    /// Parses a lexicon from a PLS document.
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        let mut lexicon = Self::new();
        let mut seen_root = false;
        let mut lexeme: Option<Lexeme> = None;
        let mut field: Option<Field> = None;
        let mut text = String::new();

        for event in EventReader::new(source) {
            match event? {
                XmlEvent::StartElement {
                    name,
                    ..
                } => {
                    let next = match name.local_name.as_str() {
                        "lexicon" => {
                            seen_root = true;
                            None
                        }
                        "lexeme" => {
                            lexeme = Some(Lexeme::default());
                            None
                        }
                        "grapheme" => Some(Field::Grapheme),
                        "phoneme" => Some(Field::Phoneme),
                        "alias" => Some(Field::Alias),
                        _ => None,
                    };
                    if next.is_some() {
                        field = next;
                        text.clear();
                    }
                }
                XmlEvent::Characters(s) | XmlEvent::CData(s) => {
                    if field.is_some() {
                        text.push_str(&s);
                    }
                }
                XmlEvent::EndElement {
                    name,
                } => match name.local_name.as_str() {
                    "grapheme" | "phoneme" | "alias" => {
                        if let (Some(field), Some(lexeme)) = (field.take(), lexeme.as_mut()) {
                            lexeme.add(field, text.trim());
                        }
                    }
                    "lexeme" => {
                        if let Some(lexeme) = lexeme.take() {
                            lexicon.add_lexeme(lexeme)?;
                        }
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        if !seen_root {
            return Err(Error::Lexicon("missing <lexicon> root element".to_string()));
        }
        Ok(lexicon)
    }

    /// Adds or replaces the pronunciation of a word. A grapheme that is not a single word is stored
    /// but never matches.
    pub fn insert<S: Into<String>>(&mut self, grapheme: S, pronunciation: Pronunciation) {
        self.entries.insert(grapheme.into(), pronunciation);
    }

    /// The pronunciation of a word, if the lexicon has one.
    pub fn get(&self, word: &str) -> Option<&Pronunciation> {
        self.entries.get(word)
    }

    /// Number of words in the lexicon.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the lexicon has no words.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders text for an engine that understands SAPI markup, applying the lexicon.
    ///
    /// Words with a phoneme are wrapped in `<pron sym="...">` elements, words with an alias are
    /// replaced by it, and all other text is escaped. Text without any word from the lexicon is
    /// returned as plain text.
    pub fn render<'t>(&self, text: &'t str) -> RenderedSpeech<'t> {
        let view = FlatView::new([text]);
        let overrides = self.find_overrides(&view);
        if overrides.is_empty() {
            return RenderedSpeech::plain(text);
        }

        let mut out = MappedWriter::default();
        let mut overrides = overrides.into_iter().peekable();
        let mut idx = 0;
        while idx < view.char_len() {
            match overrides.peek() {
                Some((range, pronunciation)) if range.start == idx => {
                    out.write_override(&view, *range, pronunciation);
                    idx = range.end;
                    overrides.next();
                }
                _ => {
                    if let Some(c) = view.char_at(idx) {
                        out.write_char(c);
                    }
                    idx += 1;
                }
            }
        }

        let (xml, map) = out.finish();
        RenderedSpeech {
            speech: Speech::Xml(Cow::Owned(xml)),
            map,
        }
    }

    fn find_overrides(&self, view: &FlatView) -> Vec<(WordRange, &Pronunciation)> {
        let mut overrides = Vec::new();
        let mut idx = 0;
        while idx < view.char_len() {
            let range = expand_word(view, idx);
            if let Some(pronunciation) = self.entries.get(&view.slice(range)) {
                overrides.push((range, pronunciation));
            }
            idx = range.end.max(idx + 1);
        }
        overrides
    }

    fn add_lexeme(&mut self, lexeme: Lexeme) -> Result<()> {
        if lexeme.graphemes.is_empty() {
            return Err(Error::Lexicon("lexeme without a grapheme".to_string()));
        }
        let pronunciation = lexeme.pronunciation.ok_or_else(|| {
            Error::Lexicon(format!(
                "lexeme {:?} has neither a phoneme nor an alias",
                lexeme.graphemes[0]
            ))
        })?;
        if let Some(grapheme) = lexeme.graphemes.iter().find(|g| !is_single_word(g)) {
            return Err(Error::Lexicon(format!("grapheme {:?} is not a single word", grapheme)));
        }
        for grapheme in lexeme.graphemes {
            self.entries.insert(grapheme, pronunciation.clone());
        }
        Ok(())
    }
}

impl Lexeme {
    fn add(&mut self, field: Field, text: &str) {
        if text.is_empty() {
            return;
        }
        match field {
            Field::Grapheme => self.graphemes.push(text.to_string()),
            Field::Phoneme if self.pronunciation.is_none() => {
                self.pronunciation = Some(Pronunciation::Phoneme(text.to_string()))
            }
            Field::Alias if self.pronunciation.is_none() => {
                self.pronunciation = Some(Pronunciation::Alias(text.to_string()))
            }
            Field::Phoneme | Field::Alias => {}
        }
    }
}

fn is_single_word(grapheme: &str) -> bool {
    let view = FlatView::new([grapheme]);
    !view.is_empty() && expand_word(&view, 0).len() == view.char_len()
}

// Builds the markup while recording which UTF-16 positions each source character occupies.
#[derive(Default)]
struct MappedWriter {
    xml: String,
    units: usize,
    spans: Vec<Range<usize>>,
}

impl MappedWriter {
    fn push(&mut self, s: &str) -> Range<usize> {
        let start = self.units;
        self.xml.push_str(s);
        self.units += s.encode_utf16().count();
        start..self.units
    }

    fn write_char(&mut self, c: char) {
        let mut buf = [0; 4];
        let span = self.push(&escape_str_pcdata(c.encode_utf8(&mut buf)));
        self.spans.push(span);
    }

    fn write_override(&mut self, view: &FlatView, range: WordRange, pronunciation: &Pronunciation) {
        match pronunciation {
            Pronunciation::Phoneme(symbols) => {
                self.push(&format!("<pron sym=\"{}\">", escape_str_attribute(symbols)));
                for c in view.slice(range).chars() {
                    self.write_char(c);
                }
                self.push("</pron>");
            }
            Pronunciation::Alias(alias) => {
                let span = self.push(&escape_str_pcdata(alias));
                self.spans.extend(std::iter::repeat(span).take(range.len()));
            }
        }
    }

    fn finish(self) -> (String, SourceMap) {
        let map = SourceMap::from_spans(self.spans, self.units);
        (self.xml, map)
    }
}
