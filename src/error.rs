//! The single error type surfaced while decoding a run-length stream.
//!
//! Encoding is total and has no error type of its own; the streaming
//! encoder only ever reports failures of its underlying writer.

use std::io;
use std::string::FromUtf8Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    /// The stream ended inside an escape token, either right after the
    /// marker or after the length byte.
    #[error("malformed stream: truncated escape sequence at byte {offset}")]
    MalformedStream { offset: usize },

    /// The byte-level decode succeeded but the result is not valid UTF-8.
    #[error("decoded bytes are not valid text: {0}")]
    InvalidText(#[from] FromUtf8Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl DecodeError {
    pub(crate) fn into_io(self) -> io::Error {
        match self {
            DecodeError::Io(err) => err,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}
