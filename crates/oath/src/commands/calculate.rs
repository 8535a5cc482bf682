use bytes::BytesMut;
use ykoath_apdu_core::Command;

use crate::constants::{ins, tags, CLA};
use crate::crypto::Challenge;
use crate::error::Error;
use crate::tlv;
use crate::types::Code;

/// Build a single-credential CALCULATE command
///
/// The challenge must be the identical octets the originating batch used, so
/// the code cannot land in a different time window than what was displayed.
/// HOTP credentials take no challenge; the token advances its own counter.
pub fn calculate(name: &str, challenge: Option<&Challenge>) -> Command {
    let mut data = BytesMut::new();
    tlv::encode_into(&mut data, tags::NAME, name.as_bytes());
    if let Some(challenge) = challenge {
        tlv::encode_into(&mut data, tags::CHALLENGE, challenge);
    }
    Command::new_with_data(CLA, ins::CALCULATE, 0x00, 0x01, data.freeze())
}

/// Parse a CALCULATE payload: one truncated response record
pub fn parse_calculate(payload: &[u8]) -> Result<Code, Error> {
    let record = tlv::parse(payload)
        .next()
        .transpose()?
        .ok_or(Error::InvalidData("empty calculate response"))?;

    if record.tag != tags::TRUNCATED_RESPONSE {
        return Err(Error::InvalidData("unexpected tag in calculate response"));
    }

    super::calculate_all::parse_truncated(record.value)
}
