use ykoath_apdu_core::Command;

use crate::constants::{ins, CLA};

/// Build the RESET command, wiping all credentials and the validation code
///
/// P1/P2 carry the 0xDEAD confirmation marker the applet insists on.
pub fn reset() -> Command {
    Command::new(CLA, ins::RESET, 0xDE, 0xAD)
}
