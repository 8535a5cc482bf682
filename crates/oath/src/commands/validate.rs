use bytes::BytesMut;
use ykoath_apdu_core::Command;

use crate::constants::{ins, tags, CLA};
use crate::crypto::Challenge;
use crate::error::Error;
use crate::tlv;

/// Build a VALIDATE command
///
/// `response` answers the challenge the applet issued at select time;
/// `client_challenge` is this side's counter-challenge, which the token must
/// answer in turn for the authentication to be mutual.
pub fn validate(response: &[u8], client_challenge: &Challenge) -> Command {
    let mut data = BytesMut::new();
    tlv::encode_into(&mut data, tags::RESPONSE, response);
    tlv::encode_into(&mut data, tags::CHALLENGE, client_challenge);
    Command::new_with_data(CLA, ins::VALIDATE, 0x00, 0x00, data.freeze())
}

/// Parse a VALIDATE payload: the token's response to the client challenge
pub fn parse_validate(payload: &[u8]) -> Result<Vec<u8>, Error> {
    let record = tlv::parse(payload)
        .next()
        .transpose()?
        .ok_or(Error::InvalidData("empty validate response"))?;

    if record.tag != tags::RESPONSE {
        return Err(Error::InvalidData("unexpected tag in validate response"));
    }

    Ok(record.value.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_command_layout() {
        let response = [0xAA; 20];
        let client_challenge = [0x11; 8];
        let bytes = validate(&response, &client_challenge).to_bytes();

        assert_eq!(&bytes[..4], &[0x00, ins::VALIDATE, 0x00, 0x00]);
        assert_eq!(bytes[4] as usize, 2 + 20 + 2 + 8);
        assert_eq!(bytes[5], tags::RESPONSE);
        assert_eq!(bytes[6], 20);
        assert_eq!(bytes[27], tags::CHALLENGE);
        assert_eq!(bytes[28], 8);
    }

    #[test]
    fn test_parse_validate() {
        let payload = tlv::encode(tags::RESPONSE, &[0xBB; 20]);
        assert_eq!(parse_validate(&payload).unwrap(), vec![0xBB; 20]);

        assert!(parse_validate(&[]).is_err());
        assert!(parse_validate(&tlv::encode(tags::NAME, b"x")).is_err());
    }
}
