use bytes::Bytes;
use ykoath_apdu_core::Command;

use crate::constants::{tags, CLA, OATH_AID};
use crate::error::Error;
use crate::tlv;
use crate::types::{Algorithm, Version};

/// Build the applet SELECT command (ISO SELECT by AID)
pub fn select() -> Command {
    Command::new_with_data(CLA, 0xA4, 0x04, 0x00, Bytes::from_static(OATH_AID))
}

/// Parsed SELECT response
///
/// VERSION and NAME are always present. ALGORITHM and CHALLENGE appear only
/// when the applet is protected by a validation code; a caller must then
/// authenticate before credential operations succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectResponse {
    /// Applet protocol version
    pub version: Version,
    /// Opaque token device identifier (the access-key derivation salt)
    pub device_id: Vec<u8>,
    /// Validation algorithm, if the applet is protected
    pub algorithm: Option<Algorithm>,
    /// Authentication challenge, if the applet is protected
    pub challenge: Option<Vec<u8>>,
}

impl SelectResponse {
    /// Whether the applet requires Validate before other operations
    pub const fn requires_validation(&self) -> bool {
        self.challenge.is_some()
    }
}

impl TryFrom<&[u8]> for SelectResponse {
    type Error = Error;

    fn try_from(payload: &[u8]) -> Result<Self, Self::Error> {
        let mut version = None;
        let mut device_id = None;
        let mut algorithm = None;
        let mut challenge = None;

        for record in tlv::parse(payload) {
            let record = record?;
            match record.tag {
                tags::VERSION => version = Some(Version::try_from(record.value)?),
                tags::NAME => device_id = Some(record.value.to_vec()),
                tags::ALGORITHM => match record.value {
                    &[octet] => algorithm = Some(Algorithm::try_from(octet)?),
                    _ => return Err(Error::InvalidData("algorithm is not one octet")),
                },
                tags::CHALLENGE => challenge = Some(record.value.to_vec()),
                _ => return Err(Error::InvalidData("unexpected tag in select response")),
            }
        }

        Ok(Self {
            version: version.ok_or(Error::InvalidData("select response missing version"))?,
            device_id: device_id.ok_or(Error::InvalidData("select response missing name"))?,
            algorithm,
            challenge,
        })
    }
}
