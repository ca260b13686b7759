//! Reader configuration, loaded from TOML.
//!
//! Every field has a default, so an empty file is a valid configuration:
//!
//! ```toml
//! auto_play = true
//! auto_save = false
//! exit_on_ready = false
//! pause_policy = "persist"
//! rate = 0
//! volume = 100
//! lexicon = "pronunciations.pls"
//! wrap_columns = 80
//!
//! [highlight]
//! style = "background"
//! color = "#ffff00"
//!
//! [viewport]
//! height = 400.0
//! line_height = 16.0
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::highlight::{Color, HighlightStyle};
use crate::scroll::Viewport;
use crate::speech::{Rate, Volume};
use crate::tracker::PausePolicy;
use crate::Result;

/// How the spoken word is highlighted.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HighlightConfig {
    /// Bold text or a background fill.
    pub style: HighlightStyle,
    /// The background fill color, when `style` is `background`.
    pub color: Color,
}

/// Settings for a [`Reader`](crate::Reader).
#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReaderConfig {
    /// Start reading as soon as text is pasted.
    pub auto_play: bool,
    /// Ask for a wave file to save the speech to, instead of playing it on the default device.
    pub auto_save: bool,
    /// Request the application to exit once reading is done.
    pub exit_on_ready: bool,
    /// Whether the highlight survives a pause.
    pub pause_policy: PausePolicy,
    /// Rate of speech, in the interval [-10, 10].
    pub rate: i32,
    /// Speech volume, in the interval [0, 100].
    pub volume: u32,
    /// A pronunciation lexicon to load into the speech engine.
    pub lexicon: Option<PathBuf>,
    /// Column at which lines soft-wrap, for scrolling purposes. Zero disables wrapping.
    pub wrap_columns: usize,
    /// Highlight appearance.
    pub highlight: HighlightConfig,
    /// Initial viewport geometry.
    pub viewport: Viewport,
}

impl ReaderConfig {
    /// Parses a configuration from a TOML string.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads and parses a TOML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// The configured rate of speech.
    pub fn rate(&self) -> Rate {
        Rate::new(self.rate)
    }

    /// The configured speech volume.
    pub fn volume(&self) -> Volume {
        Volume::new(self.volume)
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            auto_play: true,
            auto_save: false,
            exit_on_ready: false,
            pause_policy: PausePolicy::default(),
            rate: 0,
            volume: 100,
            lexicon: None,
            wrap_columns: 0,
            highlight: HighlightConfig::default(),
            viewport: Viewport::default(),
        }
    }
}
