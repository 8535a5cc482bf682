use bytes::{BufMut, BytesMut};
use ykoath_apdu_core::Command;

use crate::constants::{ins, tags, CLA};
use crate::crypto::Challenge;
use crate::tlv;
use crate::types::{pack, Algorithm, OathType};

/// Build a SET CODE command provisioning a validation code
///
/// The key value is `[packed algorithm octet][16-octet derived key]`. The
/// challenge/response pair proves this side actually holds the key it is
/// setting, so a garbled exchange cannot lock the token.
pub fn set_code(
    algorithm: Algorithm,
    key: &[u8],
    challenge: &Challenge,
    response: &[u8],
) -> Command {
    let mut key_value = BytesMut::with_capacity(1 + key.len());
    key_value.put_u8(pack(algorithm, OathType::Totp));
    key_value.put_slice(key);

    let mut data = BytesMut::new();
    tlv::encode_into(&mut data, tags::KEY, &key_value);
    tlv::encode_into(&mut data, tags::CHALLENGE, challenge);
    tlv::encode_into(&mut data, tags::RESPONSE, response);

    Command::new_with_data(CLA, ins::SET_CODE, 0x00, 0x00, data.freeze())
}

/// Build a SET CODE command that removes the validation code
pub fn clear_code() -> Command {
    Command::new_with_data(CLA, ins::SET_CODE, 0x00, 0x00, tlv::encode(tags::KEY, &[]))
}
