//! The speech engine, as the reader sees it.
//!
//! A [`Speaker`] renders text asynchronously and reports what it is doing by posting
//! [`Notification`](crate::playback::Notification)s. Engines that accept markup get a rendered
//! [`Speech`] along with a [`SourceMap`] that translates the positions they report back into
//! character offsets of the text it was rendered from.

use std::borrow::{Borrow, Cow};
use std::ops::Range;
use std::path::PathBuf;

use crate::audio::AudioFormat;
use crate::playback::SynthesizerState;
use crate::Result;

mod lexicon;
mod types;

pub use lexicon::{Lexicon, Pronunciation};
pub use types::{Rate, Volume};

/// Where the output of speech synthesis goes.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub enum SpeechOutput {
    /// The default audio device on the system.
    #[default]
    Default,
    /// A wave file, created or overwritten when speech starts.
    WaveFile {
        /// Path of the file.
        path: PathBuf,
        /// Format of the audio written to the file.
        format: AudioFormat,
    },
}

impl SpeechOutput {
    /// Output to a wave file in the default format.
    pub fn wave_file<P: Into<PathBuf>>(path: P) -> Self {
        Self::WaveFile {
            path: path.into(),
            format: AudioFormat::default(),
        }
    }
}

/// A speech engine.
///
/// Every method returns as soon as the request has been handed to the engine. The engine reports
/// progress and state changes by posting notifications into the sender it was created with; a
/// cancelled speech, in particular, only becomes [`Ready`](SynthesizerState::Ready) when the engine
/// says so.
pub trait Speaker {
    /// Queues the text for speaking.
    fn speak(&mut self, text: &str) -> Result<()>;

    /// Pauses speaking.
    fn pause(&mut self) -> Result<()>;

    /// Resumes paused speech.
    fn resume(&mut self) -> Result<()>;

    /// Discards the current and all queued speech.
    fn cancel_all(&mut self) -> Result<()>;

    /// Directs subsequent speech to the given output.
    fn set_output(&mut self, output: SpeechOutput) -> Result<()>;

    /// Sets the rate of speech.
    fn set_rate(&mut self, rate: Rate) -> Result<()>;

    /// Sets the speech volume.
    fn set_volume(&mut self, volume: Volume) -> Result<()>;

    /// Installs pronunciation overrides for subsequent speech.
    fn set_lexicon(&mut self, lexicon: Lexicon) -> Result<()>;

    /// The engine's current state.
    fn state(&self) -> SynthesizerState;

    /// Gives an engine that queues its events a chance to deliver them on the calling thread.
    fn poll_events(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A speech to be rendered by an engine.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Speech<'s> {
    /// Plain text
    Text(Cow<'s, str>),
    /// XML-encoded speech
    Xml(Cow<'s, str>),
}

impl<'s> Speech<'s> {
    /// The text or markup handed to the engine.
    pub fn contents(&self) -> &str {
        match self {
            Self::Text(cow) => cow.borrow(),
            Self::Xml(cow) => cow.borrow(),
        }
    }

    /// Returns `true` if the contents are markup.
    pub fn is_xml(&self) -> bool {
        matches!(self, Self::Xml(_))
    }
}

impl<'s> From<&'s str> for Speech<'s> {
    fn from(s: &'s str) -> Self {
        Self::Text(s.into())
    }
}

impl<'s> From<String> for Speech<'s> {
    fn from(s: String) -> Self {
        Self::Text(s.into())
    }
}

/// Maps positions in a rendered speech back to character offsets in the text it was rendered
/// from.
///
/// Rendered positions are counted in UTF-16 code units, which is what SAPI reports. Every source
/// character covers a span of the rendering: itself, its escaped form, or a substituted alias
/// shared by all characters of the replaced word. Positions inside markup map to the character
/// that follows the markup.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct SourceMap {
    spans: Vec<Range<usize>>,
    rendered_len: usize,
}

impl SourceMap {
    /// The map for text handed to the engine verbatim.
    pub fn plain(text: &str) -> Self {
        let mut spans = Vec::with_capacity(text.len());
        let mut pos = 0;
        for c in text.chars() {
            let end = pos + c.len_utf16();
            spans.push(pos..end);
            pos = end;
        }
        Self {
            spans,
            rendered_len: pos,
        }
    }

    pub(crate) fn from_spans(spans: Vec<Range<usize>>, rendered_len: usize) -> Self {
        Self {
            spans,
            rendered_len,
        }
    }

    /// Number of characters in the source text.
    pub fn source_len(&self) -> usize {
        self.spans.len()
    }

    /// Length of the rendered speech, in UTF-16 code units.
    pub fn rendered_len(&self) -> usize {
        self.rendered_len
    }

    /// Translates a position in the rendered speech to a character offset in the source text.
    /// Returns `None` for positions past the last source character.
    pub fn to_source(&self, rendered: usize) -> Option<usize> {
        if rendered >= self.rendered_len {
            return None;
        }
        let idx = self.spans.partition_point(|span| span.start <= rendered);
        if idx > 0 && rendered < self.spans[idx - 1].end {
            Some(idx - 1)
        } else if idx < self.spans.len() {
            Some(idx)
        } else {
            None
        }
    }
}

/// A speech ready for an engine, with the map back to its source text.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct RenderedSpeech<'s> {
    /// What to hand to the engine.
    pub speech: Speech<'s>,
    /// How to interpret the positions the engine reports.
    pub map: SourceMap,
}

impl<'s> RenderedSpeech<'s> {
    /// Renders text without any markup.
    pub fn plain(text: &'s str) -> Self {
        Self {
            speech: Speech::Text(Cow::Borrowed(text)),
            map: SourceMap::plain(text),
        }
    }
}
