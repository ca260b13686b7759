//! The reader: a document, a speech engine, and the highlight that follows the spoken word.
//!
//! [`Reader`] holds no toolkit state. A host application forwards its button clicks and pastes to
//! it, calls [`Reader::pump`] regularly on its UI thread, and renders [`Reader::document`],
//! [`Reader::status`] and [`Reader::viewport`] however it likes.

use std::path::PathBuf;

use strum_macros::IntoStaticStr;

use crate::config::ReaderConfig;
use crate::document::{RichDocument, StyledDocument, TextDocument, WordRange};
use crate::highlight::HighlightApplier;
use crate::playback::{
    notification_channel, Notification, NotificationReceiver, NotificationSender, StateObserver,
    SynthesizerState,
};
use crate::scroll::Viewport;
use crate::speech::{Lexicon, Speaker, SpeechOutput};
use crate::tracker::{Anchor, ProgressTracker};
use crate::Result;

/// The informational message shown to the user.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, IntoStaticStr)]
pub enum Information {
    /// Nothing has been read yet.
    #[strum(serialize = "Ready.")]
    Ready,
    /// Reading is in progress.
    #[strum(serialize = "Speech in Process")]
    Speaking,
    /// Reading is paused.
    #[strum(serialize = "Paused.")]
    Paused,
    /// Reading finished or was stopped.
    #[strum(serialize = "Done. Ready.")]
    Done,
    /// Saving was requested, but no file was chosen.
    #[strum(serialize = "No file selected.")]
    NoFileSelected,
    /// The speech is being written to the chosen file.
    #[strum(serialize = "File save complete")]
    FileSaveComplete,
}

impl Information {
    /// The message text.
    pub fn text(&self) -> &'static str {
        self.into()
    }
}

/// The caption of the start/stop button.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, IntoStaticStr)]
#[allow(missing_docs)]
pub enum ButtonLabel {
    Start,
    Stop,
}

impl ButtonLabel {
    /// The caption text.
    pub fn text(&self) -> &'static str {
        self.into()
    }
}

/// What the user is shown about playback.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub struct Status {
    /// The informational message.
    pub information: Information,
    /// The caption of the start/stop button.
    pub button: ButtonLabel,
}

/// Asks the user where to save the speech. Returns `None` if the user chose nothing.
pub type SavePrompt = Box<dyn FnMut() -> Option<PathBuf>>;

/// Reads a document aloud and keeps the spoken word highlighted and in view.
pub struct Reader<S: Speaker> {
    speaker: S,
    receiver: NotificationReceiver,
    document: RichDocument,
    tracker: ProgressTracker,
    applier: HighlightApplier,
    viewport: Viewport,
    observer: StateObserver,
    status: Status,
    auto_play: bool,
    auto_save: bool,
    exit_on_ready: bool,
    save_prompt: Option<SavePrompt>,
    pending_play: bool,
    stale: bool,
    exit_requested: bool,
}

impl<S: Speaker> Reader<S> {
    /// Creates a reader with an empty document. `connect` creates the speech engine, given the
    /// sender it must post its notifications to. The engine is then configured with the rate,
    /// volume and lexicon from `config`.
    pub fn new<F>(config: &ReaderConfig, connect: F) -> Result<Self>
    where
        F: FnOnce(NotificationSender) -> Result<S>,
    {
        let (sender, receiver) = notification_channel();
        let mut speaker = connect(sender)?;
        speaker.set_rate(config.rate())?;
        speaker.set_volume(config.volume())?;
        if let Some(path) = &config.lexicon {
            speaker.set_lexicon(Lexicon::load(path)?)?;
        }

        Ok(Self {
            speaker,
            receiver,
            document: RichDocument::new().with_wrap(config.wrap_columns),
            tracker: ProgressTracker::new(config.pause_policy),
            applier: HighlightApplier::from_config(&config.highlight),
            viewport: config.viewport,
            observer: StateObserver::default(),
            status: Status {
                information: Information::Ready,
                button: ButtonLabel::Start,
            },
            auto_play: config.auto_play,
            auto_save: config.auto_save,
            exit_on_ready: config.exit_on_ready,
            save_prompt: None,
            pending_play: false,
            stale: false,
            exit_requested: false,
        })
    }

    /// Sets the prompt used to pick a wave file when saving is enabled.
    pub fn with_save_prompt<F: FnMut() -> Option<PathBuf> + 'static>(mut self, prompt: F) -> Self {
        self.save_prompt = Some(Box::new(prompt));
        self
    }

    /// The document being read.
    pub fn document(&self) -> &RichDocument {
        &self.document
    }

    /// The speech engine.
    pub fn speaker(&self) -> &S {
        &self.speaker
    }

    /// The speech engine, mutably.
    pub fn speaker_mut(&mut self) -> &mut S {
        &mut self.speaker
    }

    /// What the user is shown about playback.
    pub fn status(&self) -> Status {
        self.status
    }

    /// The visible window onto the document.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The visible window onto the document, mutably. Hosts update it when the user scrolls or
    /// resizes the window.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// The highlighted word, if any.
    pub fn highlight(&self) -> Option<WordRange> {
        self.tracker.current()
    }

    /// Returns `true` once reading has finished in exit-on-ready mode.
    pub fn should_exit(&self) -> bool {
        self.exit_requested
    }

    /// Replaces the document's content. Speech already in progress is not interrupted, but its
    /// progress no longer refers to the document: every progress report is ignored until the
    /// engine reports it is ready again.
    pub fn set_text(&mut self, text: &str) {
        self.document.replace_text(text);
        self.tracker.forget();
        if self.speaker.state() != SynthesizerState::Ready {
            self.stale = true;
        }
    }

    /// Starts reading the document from the beginning. Does nothing if the engine is not ready.
    ///
    /// When saving is enabled, the save prompt picks the wave file to write to; if it picks none,
    /// nothing is read.
    pub fn play(&mut self) -> Result<()> {
        if self.speaker.state() != SynthesizerState::Ready {
            return Ok(());
        }

        let text = self.document.plain_text();
        self.speaker.set_output(SpeechOutput::Default)?;
        if self.auto_save {
            let path = self
                .save_prompt
                .as_mut()
                .and_then(|prompt| prompt())
                .filter(|path| !path.as_os_str().is_empty());
            match path {
                Some(path) => {
                    self.speaker.set_output(SpeechOutput::wave_file(path))?;
                    self.status.information = Information::FileSaveComplete;
                }
                None => {
                    self.status.information = Information::NoFileSelected;
                    return Ok(());
                }
            }
        }
        self.speaker.speak(&text)
    }

    /// The start/stop button: stops reading if the engine is busy, starts it otherwise.
    pub fn toggle(&mut self) -> Result<()> {
        if self.speaker.state() != SynthesizerState::Ready {
            return self.speaker.cancel_all();
        }
        self.play()
    }

    /// Handles text pasted into the document. With auto-play on, the text replaces the document
    /// and is read immediately, and `true` is returned to tell the host to cancel its own paste.
    /// Otherwise returns `false` and leaves the paste to the host.
    pub fn paste(&mut self, text: &str) -> Result<bool> {
        if !self.auto_play {
            return Ok(false);
        }
        self.set_text(text);
        self.play()?;
        Ok(true)
    }

    /// Stops any reading, replaces the document with the text, and reads it. If the engine was
    /// busy, reading starts once it reports it has stopped.
    pub fn clear_and_paste(&mut self, text: &str) -> Result<()> {
        self.set_text(text);
        if self.speaker.state() != SynthesizerState::Ready {
            self.pending_play = true;
            return self.speaker.cancel_all();
        }
        self.play()
    }

    /// Pauses reading.
    pub fn pause(&mut self) -> Result<()> {
        self.speaker.pause()
    }

    /// Resumes paused reading.
    pub fn resume(&mut self) -> Result<()> {
        self.speaker.resume()
    }

    /// Lets the engine deliver its queued events, then handles every pending notification.
    /// Returns how many notifications were handled.
    pub fn pump(&mut self) -> Result<usize> {
        self.speaker.poll_events()?;
        let mut count = 0;
        while let Ok(notification) = self.receiver.try_recv() {
            self.dispatch(notification)?;
            count += 1;
        }
        Ok(count)
    }

    /// Handles one notification.
    pub fn dispatch(&mut self, notification: Notification) -> Result<()> {
        match notification {
            Notification::Progress(anchor) if self.stale => {
                tracing::trace!(?anchor, "ignoring progress of replaced text");
                Ok(())
            }
            Notification::Progress(anchor) => {
                self.on_progress(&anchor);
                Ok(())
            }
            Notification::StateChanged(state) => self.on_state_change(state),
        }
    }

    fn on_progress(&mut self, anchor: &Anchor) {
        let view = self.document.flat_view();
        let change = match self.tracker.on_progress(&view, anchor) {
            Some(change) => change,
            None => return,
        };
        self.applier.apply(&mut self.document, &change);
        if let Some(current) = change.current {
            let top = self.viewport.line_top(self.document.line_index(current.start));
            if self.viewport.follow(top) {
                tracing::trace!(offset = self.viewport.offset, "scrolled to spoken word");
            }
        }
    }

    fn on_state_change(&mut self, state: SynthesizerState) -> Result<()> {
        self.observer.observe(state);
        if let Some(change) = self.tracker.on_state_change(state) {
            self.applier.apply(&mut self.document, &change);
        }

        match state {
            SynthesizerState::Speaking => {
                self.status.information = Information::Speaking;
                self.status.button = ButtonLabel::Stop;
            }
            SynthesizerState::Paused => {
                self.status.information = Information::Paused;
            }
            SynthesizerState::Ready => {
                self.stale = false;
                self.status.information = Information::Done;
                self.status.button = ButtonLabel::Start;
                if self.pending_play {
                    self.pending_play = false;
                    return self.play();
                }
                if self.exit_on_ready {
                    self.exit_requested = true;
                }
            }
        }
        Ok(())
    }
}
