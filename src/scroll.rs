//! Keeping the spoken word visible.

use serde::Deserialize;

/// The visible window onto a vertically scrolling document. All values are in the same unit
/// (usually device-independent pixels), measured from the top of the document.
#[derive(Debug, PartialEq, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Distance from the top of the document to the top of the visible window.
    pub offset: f64,
    /// Height of the visible window.
    pub height: f64,
    /// Height of one line of text.
    pub line_height: f64,
}

impl Viewport {
    /// Constructs a viewport scrolled to the top of the document.
    pub fn new(height: f64, line_height: f64) -> Self {
        Self {
            offset: 0.0,
            height,
            line_height,
        }
    }

    /// The vertical position of the top of the given line.
    pub fn line_top(&self, line: usize) -> f64 {
        line as f64 * self.line_height
    }

    /// Returns the offset to jump to if a word whose line starts at `word_top` would end up below
    /// the visible window, or `None` if no scrolling is needed. The jump puts the word's line at
    /// the top of the window. Words above the window never cause a scroll.
    pub fn scroll_target(&self, word_top: f64) -> Option<f64> {
        let below = word_top + self.line_height > self.offset + self.height;
        (below && word_top > self.offset).then(|| word_top)
    }

    /// Scrolls the viewport so the word whose line starts at `word_top` is visible, if it is not
    /// already. Returns `true` if the viewport moved.
    pub fn follow(&mut self, word_top: f64) -> bool {
        match self.scroll_target(word_top) {
            Some(offset) => {
                self.offset = offset;
                true
            }
            None => false,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(400.0, 16.0)
    }
}
