use ykoath_apdu_core::{StatusWord, TransportError};

use crate::tlv::TlvError;

/// Result type for OATH operations
pub type Result<T> = std::result::Result<T, Error>;

/// Classification of a non-success status word
///
/// Derived from a static lookup table so the mapping stays exhaustive and
/// auditable in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolErrorKind {
    /// 0x6984: the referenced credential does not exist on the token
    NotFound,
    /// 0x6982: authentication required or failed
    AuthRequired,
    /// 0x6A80: incorrect parameters in the data field
    WrongSyntax,
    /// 0x6700: wrong length
    WrongLength,
    /// Any other status word
    Unknown,
}

const STATUS_KINDS: &[(u16, ProtocolErrorKind)] = &[
    (0x6984, ProtocolErrorKind::NotFound),
    (0x6982, ProtocolErrorKind::AuthRequired),
    (0x6A80, ProtocolErrorKind::WrongSyntax),
    (0x6700, ProtocolErrorKind::WrongLength),
];

impl ProtocolErrorKind {
    /// Classify a terminal status word
    pub fn classify(status: StatusWord) -> Self {
        STATUS_KINDS
            .iter()
            .find(|(sw, _)| *sw == status.to_u16())
            .map_or(Self::Unknown, |(_, kind)| *kind)
    }
}

/// Error type for OATH operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport-level failure reaching the token
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The token rejected a command with a non-success status word
    #[error("token returned status {status} ({kind:?})")]
    Protocol {
        /// Classified error kind
        kind: ProtocolErrorKind,
        /// The raw status word
        status: StatusWord,
    },

    /// Malformed TLV received from the token
    ///
    /// Treated as fatal: it implies a token or protocol version mismatch.
    #[error("malformed response: {0}")]
    Encoding(#[from] TlvError),

    /// A response decoded but carried unexpected content
    #[error("invalid response data: {0}")]
    InvalidData(&'static str),

    /// Lower-level APDU failure (malformed frames and the like)
    #[error(transparent)]
    Apdu(ykoath_apdu_core::Error),

    /// No credential name matched the query (client-side, never a status word)
    #[error("no credential matches {0:?}")]
    NoSuchCredential(String),

    /// The query matched several credentials; a longer query is needed
    #[error("{query:?} matches multiple credentials: {candidates:?}")]
    MultipleMatches {
        /// The ambiguous query
        query: String,
        /// Names of every substring match
        candidates: Vec<String>,
    },

    /// Caller-supplied parameters out of range, rejected before transmission
    #[error("validation failed: {0}")]
    Validation(&'static str),

    /// The token failed the mutual challenge-response check
    #[error("token authentication response did not verify")]
    AuthenticationFailed,
}

impl From<ykoath_apdu_core::Error> for Error {
    fn from(error: ykoath_apdu_core::Error) -> Self {
        match error {
            ykoath_apdu_core::Error::Transport(e) => Self::Transport(e),
            ykoath_apdu_core::Error::Status(status) => Self::Protocol {
                kind: ProtocolErrorKind::classify(status),
                status,
            },
            other => Self::Apdu(other),
        }
    }
}
