//! Error types for the PC/SC transport

use ykoath_apdu_core::TransportError;

/// Error type for PC/SC operations
#[derive(Debug, thiserror::Error)]
pub enum PcscError {
    /// Error from the PC/SC stack
    #[error(transparent)]
    Pcsc(#[from] pcsc::Error),

    /// No reader matched the request
    #[error("reader not found: {0}")]
    ReaderNotFound(String),

    /// No card present in the selected reader
    #[error("no card present in reader {0}")]
    NoCard(String),

    /// The connection to the card was lost
    #[error("card disconnected")]
    Disconnected,
}

impl From<PcscError> for TransportError {
    fn from(error: PcscError) -> Self {
        match error {
            PcscError::Pcsc(e) => match e {
                pcsc::Error::InsufficientBuffer => Self::BufferTooSmall,
                pcsc::Error::NoSmartcard | pcsc::Error::RemovedCard => {
                    Self::Connection(e.to_string())
                }
                _ => Self::Device(e.to_string()),
            },
            PcscError::ReaderNotFound(name) => Self::Device(format!("reader not found: {name}")),
            PcscError::NoCard(name) => Self::Connection(format!("no card in reader {name}")),
            PcscError::Disconnected => Self::Connection("card disconnected".into()),
        }
    }
}
