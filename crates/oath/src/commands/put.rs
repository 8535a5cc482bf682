use bytes::{BufMut, BytesMut};
use ykoath_apdu_core::Command;

use crate::constants::{ins, properties, tags, CLA, NAME_LEN_RANGE};
use crate::error::Error;
use crate::types::{pack, Algorithm, OathType};

/// Build a PUT command
///
/// The key value is `[packed algorithm/type octet][digits octet][raw key]`.
/// A touch-required credential carries the property octet as a raw two-octet
/// suffix (tag + flag, no length octet; applet quirk).
///
/// Parameter validation happens here, before anything reaches the wire.
pub fn put(
    name: &str,
    algorithm: Algorithm,
    oath_type: OathType,
    digits: u8,
    key: &[u8],
    require_touch: bool,
) -> Result<Command, Error> {
    if !NAME_LEN_RANGE.contains(&name.len()) {
        return Err(Error::Validation("name must be 1 to 64 octets"));
    }
    if !(6..=8).contains(&digits) {
        return Err(Error::Validation("digits must be 6, 7 or 8"));
    }
    if key.is_empty() {
        return Err(Error::Validation("key must not be empty"));
    }

    let mut key_value = BytesMut::with_capacity(2 + key.len());
    key_value.put_u8(pack(algorithm, oath_type));
    key_value.put_u8(digits);
    key_value.put_slice(key);

    let mut data = BytesMut::new();
    crate::tlv::encode_into(&mut data, tags::NAME, name.as_bytes());
    crate::tlv::encode_into(&mut data, tags::KEY, &key_value);
    if require_touch {
        data.put_u8(tags::PROPERTY);
        data.put_u8(properties::REQUIRE_TOUCH);
    }

    Ok(Command::new_with_data(
        CLA,
        ins::PUT,
        0x00,
        0x00,
        data.freeze(),
    ))
}
