use ykoath_apdu_core::Command;

use crate::constants::{ins, tags, CLA};
use crate::error::Error;
use crate::tlv;
use crate::types::Credential;

/// Build the LIST command
pub fn list() -> Command {
    Command::new(CLA, ins::LIST, 0x00, 0x00)
}

/// Parse a LIST payload: a sequence of name-list records, each one packed
/// algorithm/type octet followed by the credential name
pub fn parse_list(payload: &[u8]) -> Result<Vec<Credential>, Error> {
    let mut credentials = Vec::new();

    for record in tlv::parse(payload) {
        let record = record?;
        if record.tag != tags::NAME_LIST {
            return Err(Error::InvalidData("unexpected tag in list response"));
        }

        let (&packed, name) = record
            .value
            .split_first()
            .ok_or(Error::InvalidData("empty list entry"))?;
        let (algorithm, oath_type) = crate::types::unpack(packed)?;

        let name = String::from_utf8(name.to_vec())
            .map_err(|_| Error::InvalidData("credential name is not valid UTF-8"))?;

        credentials.push(Credential {
            name,
            algorithm,
            oath_type,
        });
    }

    Ok(credentials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Algorithm, OathType};

    #[test]
    fn test_list_command_bytes() {
        assert_eq!(list().to_bytes().as_ref(), &[0x00, 0xA1, 0x00, 0x00]);
    }

    #[test]
    fn test_parse_entries() {
        // 0x21 = TOTP/SHA1, 0x13 = HOTP/SHA512
        let mut payload = Vec::new();
        payload.extend(tlv::encode(tags::NAME_LIST, &[&[0x21u8][..], b"alpha"].concat()));
        payload.extend(tlv::encode(tags::NAME_LIST, &[&[0x13u8][..], b"beta"].concat()));

        let credentials = parse_list(&payload).unwrap();
        assert_eq!(
            credentials,
            vec![
                Credential {
                    name: "alpha".into(),
                    algorithm: Algorithm::HmacSha1,
                    oath_type: OathType::Totp,
                },
                Credential {
                    name: "beta".into(),
                    algorithm: Algorithm::HmacSha512,
                    oath_type: OathType::Hotp,
                },
            ]
        );
    }

    #[test]
    fn test_parse_rejects_foreign_tag() {
        let payload = tlv::encode(tags::NAME, b"alpha");
        assert!(parse_list(&payload).is_err());
    }

    #[test]
    fn test_parse_empty_directory() {
        assert_eq!(parse_list(&[]).unwrap(), vec![]);
    }
}
