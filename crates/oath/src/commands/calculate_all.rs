use bytes::BytesMut;
use ykoath_apdu_core::Command;

use crate::constants::{ins, tags, CLA};
use crate::crypto::Challenge;
use crate::error::Error;
use crate::tlv;
use crate::types::{CalculateResult, Code, CodeEntry};

/// Build the CALCULATE ALL command for one batch challenge
///
/// P2=0x01 requests truncated responses.
pub fn calculate_all(challenge: &Challenge) -> Command {
    let mut data = BytesMut::new();
    tlv::encode_into(&mut data, tags::CHALLENGE, challenge);
    Command::new_with_data(CLA, ins::CALCULATE_ALL, 0x00, 0x01, data.freeze())
}

/// Parse a CALCULATE ALL payload: alternating name and result records
///
/// Each name is followed by either a truncated response (digits + 4-octet
/// value), a touch marker (digits only; the token withheld the code pending
/// physical confirmation), or a no-response marker (HOTP; a batch
/// computation would mutate the counter).
pub fn parse_calculate_all(payload: &[u8]) -> Result<Vec<CodeEntry>, Error> {
    let mut entries = Vec::new();
    let mut records = tlv::parse(payload);

    while let Some(record) = records.next() {
        let record = record?;
        if record.tag != tags::NAME {
            return Err(Error::InvalidData("expected name in calculate-all response"));
        }
        let name = String::from_utf8(record.value.to_vec())
            .map_err(|_| Error::InvalidData("credential name is not valid UTF-8"))?;

        let result = records
            .next()
            .transpose()?
            .ok_or(Error::InvalidData("credential name without a result"))?;

        let result = match result.tag {
            tags::TRUNCATED_RESPONSE => CalculateResult::Computed(parse_truncated(result.value)?),
            tags::TOUCH => CalculateResult::Deferred {
                digits: marker_digits(result.value),
                touch_required: true,
                hotp: false,
            },
            tags::NO_RESPONSE => CalculateResult::Deferred {
                digits: marker_digits(result.value),
                touch_required: false,
                hotp: true,
            },
            _ => return Err(Error::InvalidData("unexpected result tag")),
        };

        entries.push(CodeEntry { name, result });
    }

    Ok(entries)
}

/// Parse a truncated response value: digits octet + 4-octet big-endian value
pub(crate) fn parse_truncated(value: &[u8]) -> Result<Code, Error> {
    match value {
        &[digits, a, b, c, d] => Ok(Code::new(digits, u32::from_be_bytes([a, b, c, d]))),
        _ => Err(Error::InvalidData("truncated response is not five octets")),
    }
}

// Deferral markers carry the digit count when the applet knows it
fn marker_digits(value: &[u8]) -> u8 {
    value.first().copied().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_bytes() {
        let challenge = 1u64.to_be_bytes();
        assert_eq!(
            calculate_all(&challenge).to_bytes().as_ref(),
            &hex::decode("00a400010a74080000000000000001").unwrap()[..]
        );
    }

    #[test]
    fn test_parse_mixed_results() {
        let mut payload = BytesMut::new();
        tlv::encode_into(&mut payload, tags::NAME, b"ready");
        tlv::encode_into(&mut payload, tags::TRUNCATED_RESPONSE, &[0x06, 0x00, 0x04, 0x61, 0x6A]);
        tlv::encode_into(&mut payload, tags::NAME, b"touchy");
        tlv::encode_into(&mut payload, tags::TOUCH, &[0x07]);
        tlv::encode_into(&mut payload, tags::NAME, b"counter");
        tlv::encode_into(&mut payload, tags::NO_RESPONSE, &[0x08]);

        let entries = parse_calculate_all(&payload).unwrap();
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].name, "ready");
        assert_eq!(
            entries[0].result,
            CalculateResult::Computed(Code::new(6, 0x0004_616A))
        );

        assert_eq!(entries[1].name, "touchy");
        assert_eq!(
            entries[1].result,
            CalculateResult::Deferred {
                digits: 7,
                touch_required: true,
                hotp: false
            }
        );

        assert_eq!(entries[2].name, "counter");
        assert_eq!(
            entries[2].result,
            CalculateResult::Deferred {
                digits: 8,
                touch_required: false,
                hotp: true
            }
        );
    }

    #[test]
    fn test_parse_rejects_dangling_name(){
        let payload = tlv::encode(tags::NAME, b"dangling");
        assert!(parse_calculate_all(&payload).is_err());
    }

    #[test]
    fn test_parse_rejects_short_truncated_value() {
        let mut payload = BytesMut::new();
        tlv::encode_into(&mut payload, tags::NAME, b"x");
        tlv::encode_into(&mut payload, tags::TRUNCATED_RESPONSE, &[0x06, 0x00]);
        assert!(parse_calculate_all(&payload).is_err());
    }
}
