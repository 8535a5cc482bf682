//! APDU response definitions
//!
//! A response frame is the payload octets (possibly empty) followed by a
//! 2-octet status word.

pub mod status;

use bytes::Bytes;

use crate::Error;
use status::StatusWord;

/// A parsed APDU response: optional payload plus trailing status word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    payload: Option<Bytes>,
    status: StatusWord,
}

impl Response {
    /// Create a response from a payload and status word
    pub const fn new(payload: Option<Bytes>, status: StatusWord) -> Self {
        Self { payload, status }
    }

    /// Create a success (0x9000) response
    pub const fn success(payload: Option<Bytes>) -> Self {
        Self::new(payload, status::common::SW_NO_ERROR)
    }

    /// Parse a raw response frame
    ///
    /// The last two octets are the status word; everything before them is the
    /// payload. A frame shorter than two octets is malformed.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() < 2 {
            return Err(Error::InvalidResponse("response shorter than status word"));
        }

        let (payload, trailer) = bytes.split_at(bytes.len() - 2);
        let status = StatusWord::new(trailer[0], trailer[1]);
        let payload = (!payload.is_empty()).then(|| Bytes::copy_from_slice(payload));

        Ok(Self { payload, status })
    }

    /// The response payload, if any
    pub const fn payload(&self) -> &Option<Bytes> {
        &self.payload
    }

    /// The trailing status word
    pub const fn status(&self) -> StatusWord {
        self.status
    }

    /// Consume the response, yielding the payload on success
    ///
    /// This is the single point where a terminal status word is classified:
    /// anything other than 0x9000 becomes [`Error::Status`].
    pub fn into_payload(self) -> Result<Bytes, Error> {
        if self.status.is_success() {
            Ok(self.payload.unwrap_or_default())
        } else {
            Err(Error::Status(self.status))
        }
    }
}

impl From<Response> for Bytes {
    fn from(response: Response) -> Self {
        let mut buf = bytes::BytesMut::new();
        if let Some(payload) = response.payload {
            buf.extend_from_slice(&payload);
        }
        buf.extend_from_slice(&[response.status.sw1, response.status.sw2]);
        buf.freeze()
    }
}
