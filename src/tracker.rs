//! Turning progress reports into highlight changes.

use serde::Deserialize;
use strum_macros::{EnumString, IntoStaticStr};

use crate::document::{FlatView, WordRange};
use crate::locate::{locate_offset, locate_word};
use crate::playback::SynthesizerState;

/// A hint from the speech engine about what it is speaking.
#[derive(Debug, Hash, PartialEq, Eq, Clone)]
pub enum Anchor {
    /// The character offset, into the document's plain text, where the spoken word begins.
    Offset(usize),
    /// The text of the spoken word. It is only known to occur somewhere after the previously
    /// spoken word.
    Word(String),
}

/// The outcome of a resolved progress report or a state change: the range to reset to default
/// styling, and the range to emphasize.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, Default)]
pub struct HighlightChange {
    /// The previously highlighted range, if any.
    pub previous: Option<WordRange>,
    /// The newly highlighted range, or `None` if the highlight was cleared.
    pub current: Option<WordRange>,
}

/// What happens to the highlight when speech is paused.
#[derive(
    Debug, Hash, PartialEq, Eq, Clone, Copy, Default, Deserialize, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum PausePolicy {
    /// The highlight stays on the paused word.
    #[default]
    Persist,
    /// The highlight is cleared, and comes back with the next progress report after resuming.
    Clear,
}

/// Owns the current highlight and moves it as progress reports arrive.
///
/// At most one range is highlighted at any time. It always corresponds to the most recently
/// resolved anchor, and it is dropped as soon as the synthesizer reports it is ready again.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct ProgressTracker {
    current: Option<WordRange>,
    cursor: usize,
    pause_policy: PausePolicy,
}

impl ProgressTracker {
    /// Constructs a tracker with no highlight.
    pub fn new(pause_policy: PausePolicy) -> Self {
        Self {
            current: None,
            cursor: 0,
            pause_policy,
        }
    }

    /// The currently highlighted range.
    pub fn current(&self) -> Option<WordRange> {
        self.current
    }

    /// Where the next [`Anchor::Word`] will be searched from: the end of the last resolved range.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The pause policy of this tracker.
    pub fn pause_policy(&self) -> PausePolicy {
        self.pause_policy
    }

    /// Resolves the anchor against the document and moves the highlight to the resulting word.
    ///
    /// Offset anchors are resolved from the start of the document, independently of any earlier
    /// report. Word anchors are searched for from the end of the last resolved range, so they must
    /// arrive in reading order. An anchor that cannot be resolved is ignored and returns `None`.
    pub fn on_progress(&mut self, view: &FlatView, anchor: &Anchor) -> Option<HighlightChange> {
        let resolved = match anchor {
            Anchor::Offset(offset) => locate_offset(view, *offset),
            Anchor::Word(word) => locate_word(view, self.cursor, word),
        };
        let range = match resolved {
            Some(range) => range,
            None => {
                tracing::trace!(?anchor, cursor = self.cursor, "ignoring unresolved anchor");
                return None;
            }
        };

        tracing::trace!(?anchor, start = range.start, end = range.end, "resolved anchor");
        self.cursor = range.end;
        let previous = self.current.replace(range);
        Some(HighlightChange {
            previous,
            current: Some(range),
        })
    }

    /// Reacts to a synthesizer state change. Returns the change to apply if the highlight was
    /// cleared.
    pub fn on_state_change(&mut self, state: SynthesizerState) -> Option<HighlightChange> {
        match state {
            SynthesizerState::Ready => {
                self.cursor = 0;
                self.clear()
            }
            SynthesizerState::Paused if self.pause_policy == PausePolicy::Clear => self.clear(),
            SynthesizerState::Paused | SynthesizerState::Speaking => None,
        }
    }

    /// Drops the highlight and the search position without producing a change. Used when the
    /// document the highlight referred to has been replaced.
    pub fn forget(&mut self) {
        self.current = None;
        self.cursor = 0;
    }

    fn clear(&mut self) -> Option<HighlightChange> {
        self.current.take().map(|previous| HighlightChange {
            previous: Some(previous),
            current: None,
        })
    }
}
