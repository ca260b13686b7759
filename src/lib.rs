#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Reads text aloud through the system speech synthesizer while highlighting the word currently
//! being spoken.
//!
//! # Overview
//!
//! A speech engine renders text asynchronously and, while it does so, reports its progress: either
//! the character offset of the word it is about to speak, or the text of that word. This crate maps
//! those reports back onto a live, styled document so the spoken word can be emphasized, keeps that
//! word scrolled into view, and clears the emphasis when playback ends.
//!
//! The pieces are deliberately independent of any GUI toolkit:
//!
//! * The [document] module describes the document as a sequence of text-bearing spans and exposes
//!   a flattened, read-only [`FlatView`](document::FlatView) of it. [`RichDocument`] is an
//!   in-memory paragraph/run tree implementing the styling side as well.
//! * The [locate] module finds the exact boundaries of a word from an offset or from the word's
//!   text.
//! * The [tracker] module owns the single current highlight and turns progress reports into
//!   [`HighlightChange`](tracker::HighlightChange)s.
//! * The [highlight] module applies and clears emphasis, and the [scroll] module keeps the word
//!   visible.
//! * The [reader] module wires all of the above to a [`Speaker`](speech::Speaker), reproducing the
//!   play/stop, paste-to-play and save-to-file behavior of a small desktop reader.
//!
//! # Threading
//!
//! Speech engines usually report progress from a thread of their own. Those reports are posted as
//! [`Notification`](playback::Notification)s into a channel, and only the owner of the receiving
//! end (normally the UI thread) ever touches the document or the highlight. Nothing in this crate
//! spawns a thread or blocks.
//!
//! # Windows
//!
//! On Windows, the `sapi` module provides a [`Speaker`](speech::Speaker) backed by Microsoft's
//! Speech API. SAPI is a COM library: call `sapi::initialize()` on every thread that uses it,
//! and `sapi::finalize()` when done.

pub mod audio;
pub mod config;
pub mod document;
mod error;
pub mod highlight;
pub mod locate;
pub mod playback;
pub mod reader;
#[cfg(windows)]
#[cfg_attr(docsrs, doc(cfg(windows)))]
pub mod sapi;
pub mod scroll;
pub mod speech;
pub mod tracker;

pub use config::ReaderConfig;
pub use document::{RichDocument, WordRange};
pub use error::Error;
pub use reader::Reader;

/// The type returned by fallible functions and methods in this crate.
pub type Result<T> = std::result::Result<T, Error>;
