use ykoath_apdu_core::Command;

use crate::constants::{ins, tags, CLA};
use crate::tlv;

/// Build a DELETE command for an exact credential name
///
/// The token answers 0x6984 when no credential with that name exists.
pub fn delete(name: &str) -> Command {
    Command::new_with_data(
        CLA,
        ins::DELETE,
        0x00,
        0x00,
        tlv::encode(tags::NAME, name.as_bytes()),
    )
}
