use std::time::Duration;

/// Application identifier of the OATH applet
pub const OATH_AID: &[u8] = b"\xA0\x00\x00\x05\x27\x21\x01";

/// Class byte used by every OATH command
pub const CLA: u8 = 0x00;

/// Default TOTP timestep
pub const DEFAULT_TIMESTEP: Duration = Duration::from_secs(30);

/// Credential names are 1 to 64 octets
pub const NAME_LEN_RANGE: std::ops::RangeInclusive<usize> = 1..=64;

/// Derived access keys are always 16 octets
pub const ACCESS_KEY_LEN: usize = 16;

/// PBKDF2 iteration count for access-key derivation
pub const ACCESS_KEY_ITERATIONS: u32 = 1000;

pub mod ins {
    //! Instruction bytes understood by the OATH applet

    /// Store a credential
    pub const PUT: u8 = 0x01;
    /// Remove a credential
    pub const DELETE: u8 = 0x02;
    /// Provision or remove the validation code
    pub const SET_CODE: u8 = 0x03;
    /// Wipe all credentials and the validation code
    pub const RESET: u8 = 0x04;
    /// Enumerate the credential directory
    pub const LIST: u8 = 0xA1;
    /// Compute one credential's code
    pub const CALCULATE: u8 = 0xA2;
    /// Challenge-response authentication
    pub const VALIDATE: u8 = 0xA3;
    /// Batch code computation; 0xA4 also serves applet SELECT with
    /// P1=0x04, P2=0x00 and an AID payload
    pub const CALCULATE_ALL: u8 = 0xA4;
    /// Fetch the remainder of a chained response
    pub const SEND_REMAINING: u8 = 0xA5;
}

pub mod tags {
    //! TLV tags used in OATH request and response payloads

    /// Credential name (1-64 octets)
    pub const NAME: u8 = 0x71;
    /// List entry: 1 packed algorithm/type octet followed by the name
    pub const NAME_LIST: u8 = 0x72;
    /// Key material: packed algorithm/type octet, digits octet, raw key
    pub const KEY: u8 = 0x73;
    /// 8-octet big-endian challenge
    pub const CHALLENGE: u8 = 0x74;
    /// Full (untruncated) HMAC response
    pub const RESPONSE: u8 = 0x75;
    /// Truncated response: digits octet + 4-octet big-endian value
    pub const TRUNCATED_RESPONSE: u8 = 0x76;
    /// Batch marker for an HOTP credential (code withheld, digits only)
    pub const NO_RESPONSE: u8 = 0x77;
    /// Credential property octet (no length octet on the wire)
    pub const PROPERTY: u8 = 0x78;
    /// Applet version (3 octets)
    pub const VERSION: u8 = 0x79;
    /// Initial moving factor for HOTP credentials
    pub const IMF: u8 = 0x7A;
    /// Validation algorithm octet
    pub const ALGORITHM: u8 = 0x7B;
    /// Batch marker for a touch-required credential (digits only)
    pub const TOUCH: u8 = 0x7C;
}

pub mod properties {
    //! Credential property flags

    /// Physical touch confirmation required for every calculation
    pub const REQUIRE_TOUCH: u8 = 0x02;
}
