//! Audio formats for speech written to files.

mod format;
#[cfg(windows)]
mod stream;

pub use format::{AudioFormat, BitRate, Channels, SampleRate};
#[cfg(windows)]
pub(crate) use stream::WaveFileStream;
