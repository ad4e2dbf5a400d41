use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A strict accessor or a seedless aggregate ran over an empty sequence.
    #[error("sequence contains no elements")]
    EmptySequence,

    #[error("sequence contains no matching element")]
    NoMatch,

    #[error("sequence contains more than one matching element")]
    MoreThanOneElement,

    #[error("an element with the same key has already been added")]
    DuplicateKey,

    // Cursors are forward-only and single-pass.
    #[error("cursor reset is not supported")]
    ResetUnsupported,

    #[error("Invalid configuration: {0}")]
    Config(String),

    // The core crate does not allocate through the arena, but higher layers
    // map their budget errors into this variant for convenience.
    #[error("memory error (mapped into core): {0}")]
    Memory(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}
