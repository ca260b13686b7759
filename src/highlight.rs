//! Visual emphasis of the word being spoken.

use std::fmt::Display;
use std::str::FromStr;

use serde::Deserialize;
use strum_macros::{EnumString, IntoStaticStr};

use crate::config::HighlightConfig;
use crate::document::{StyledDocument, WordRange};
use crate::tracker::HighlightChange;

/// An RGB color.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, Deserialize)]
#[serde(try_from = "String")]
#[allow(missing_docs)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// The default highlight color.
    pub const YELLOW: Self = Self::rgb(0xff, 0xff, 0x00);

    /// Constructs a color from its components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::YELLOW
    }
}

/// The error returned when a string is not a `#rrggbb` color.
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
#[error("invalid color {0:?}, expected #rrggbb")]
pub struct ParseColorError(String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let component = |idx: usize| u8::from_str_radix(&hex[idx..idx + 2], 16).map_err(|_| err());
        Ok(Self::rgb(component(0)?, component(2)?, component(4)?))
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// How the spoken word is emphasized.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum Emphasis {
    /// Bold font weight.
    Bold,
    /// A background fill of the given color.
    Background(Color),
}

/// The configurable kind of emphasis, without its parameters.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, Default, Deserialize, EnumString, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum HighlightStyle {
    /// See [`Emphasis::Bold`].
    Bold,
    /// See [`Emphasis::Background`].
    #[default]
    Background,
}

/// Moves the highlight from one word to the next.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct HighlightApplier {
    emphasis: Emphasis,
}

impl HighlightApplier {
    /// Constructs an applier that will emphasize words with the given emphasis.
    pub fn new(emphasis: Emphasis) -> Self {
        Self {
            emphasis,
        }
    }

    /// Constructs an applier from the highlight section of the configuration.
    pub fn from_config(config: &HighlightConfig) -> Self {
        Self::new(match config.style {
            HighlightStyle::Bold => Emphasis::Bold,
            HighlightStyle::Background => Emphasis::Background(config.color),
        })
    }

    /// The emphasis this applier uses.
    pub fn emphasis(&self) -> Emphasis {
        self.emphasis
    }

    /// Resets the previously highlighted range to default styling and emphasizes the new one.
    pub fn apply<D: StyledDocument + ?Sized>(&self, document: &mut D, change: &HighlightChange) {
        if let Some(previous) = change.previous {
            self.clear(document, previous);
        }
        if let Some(current) = change.current {
            document.set_emphasis(current, Some(self.emphasis));
        }
    }

    /// Resets the range to default styling.
    pub fn clear<D: StyledDocument + ?Sized>(&self, document: &mut D, range: WordRange) {
        document.set_emphasis(range, None);
    }
}

impl Default for HighlightApplier {
    fn default() -> Self {
        Self::new(Emphasis::Background(Color::YELLOW))
    }
}
