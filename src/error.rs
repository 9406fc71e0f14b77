//! Top-level error for a whole render run.

use std::fmt;

use crate::config::ConfigError;
use crate::notation::NotationError;

#[derive(Debug)]
pub enum Error {
    /// The score could not be interpreted.
    Notation(NotationError),
    /// The config file could not be loaded.
    Config(ConfigError),
    /// Reading the score failed.
    Io(std::io::Error),
    /// Writing the WAV file failed.
    Wav(hound::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Notation(e) => write!(f, "{e}"),
            Error::Config(e) => write!(f, "{e}"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Wav(e) => write!(f, "WAV error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Notation(e) => Some(e),
            Error::Config(e) => Some(e),
            Error::Io(e) => Some(e),
            Error::Wav(e) => Some(e),
        }
    }
}

impl From<NotationError> for Error {
    fn from(e: NotationError) -> Self {
        Error::Notation(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<hound::Error> for Error {
    fn from(e: hound::Error) -> Self {
        Error::Wav(e)
    }
}
