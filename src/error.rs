/// The error type returned by this crate's functions and methods.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A call into the Speech API failed.
    #[cfg(windows)]
    #[error("speech API call failed: {0}")]
    Sapi(#[from] windows::core::Error),

    /// A pronunciation lexicon could not be parsed as XML.
    #[error("failed to parse lexicon: {0}")]
    LexiconXml(#[from] xml::reader::Error),

    /// A pronunciation lexicon was well-formed XML, but not a usable lexicon.
    #[error("malformed lexicon: {0}")]
    Lexicon(String),

    /// A configuration file could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Reading a file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A speech engine reported a failure of its own.
    #[error("speech engine error: {0}")]
    Engine(String),
}

impl Error {
    /// Creates an [`Error::Engine`] from any message.
    pub fn engine<S: Into<String>>(message: S) -> Self {
        Self::Engine(message.into())
    }
}
