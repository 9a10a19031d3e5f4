use thiserror::Error;

use crate::rfc::vcard::build::WriteError;
use crate::rfc::vcard::parse::ParseError;

/// Codec errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Write error: {0}")]
    Write(#[from] WriteError),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error(transparent)]
    CoreError(#[from] cardwire_core::error::CoreError),
}

impl RfcError {
    /// Error returned by readers and writers used after `close()`.
    pub(crate) fn closed(what: &str) -> Self {
        Self::Io(std::io::Error::new(
            std::io::ErrorKind::NotConnected,
            format!("{what} is closed"),
        ))
    }
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
