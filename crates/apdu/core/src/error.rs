//! Error types for APDU operations

use crate::response::status::StatusWord;
use crate::transport::TransportError;

/// Error type for APDU operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport-level failure reaching the token
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The token answered with a non-success status word
    #[error("status word {0}")]
    Status(StatusWord),

    /// The response frame was malformed
    #[error("invalid response: {0}")]
    InvalidResponse(&'static str),

    /// The command frame had an invalid length
    #[error("invalid command length: {0}")]
    InvalidCommandLength(usize),

    /// Any other error
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Create an error from a message
    pub fn message(msg: impl Into<String>) -> Self {
        Self::Message(msg.into())
    }
}
