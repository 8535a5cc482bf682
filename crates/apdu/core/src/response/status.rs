//! Status word interpretation
//!
//! Every APDU response terminates in a 2-octet status word. 0x9000 is the
//! terminal success, 0x61xx signals more response data waiting to be fetched,
//! and everything else is an error left for the caller to classify.

use std::fmt;

/// A 2-octet APDU status word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusWord {
    /// First status octet
    pub sw1: u8,
    /// Second status octet
    pub sw2: u8,
}

impl StatusWord {
    /// Create a status word from its two octets
    pub const fn new(sw1: u8, sw2: u8) -> Self {
        Self { sw1, sw2 }
    }

    /// Create a status word from a 16-bit value
    pub const fn from_u16(sw: u16) -> Self {
        Self {
            sw1: (sw >> 8) as u8,
            sw2: (sw & 0xFF) as u8,
        }
    }

    /// The status word as a 16-bit value
    pub const fn to_u16(self) -> u16 {
        ((self.sw1 as u16) << 8) | self.sw2 as u16
    }

    /// Whether this is the terminal success status (0x9000)
    pub const fn is_success(self) -> bool {
        self.to_u16() == 0x9000
    }

    /// Whether more response data is available (0x61xx)
    ///
    /// The second octet is a hint for the size of the next chunk; 0x00 means
    /// unspecified. Either way the remainder is fetched with the same
    /// continuation command.
    pub const fn has_more_data(self) -> bool {
        self.sw1 == 0x61
    }
}

impl fmt::Display for StatusWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}", self.sw1, self.sw2)
    }
}

/// Commonly used status words
pub mod common {
    use super::StatusWord;

    /// Success
    pub const SW_NO_ERROR: StatusWord = StatusWord::new(0x90, 0x00);
    /// More response data available, unspecified length
    pub const SW_MORE_DATA: StatusWord = StatusWord::new(0x61, 0x00);
    /// Referenced data not found
    pub const SW_DATA_NOT_FOUND: StatusWord = StatusWord::new(0x69, 0x84);
    /// Security status not satisfied
    pub const SW_SECURITY_STATUS_NOT_SATISFIED: StatusWord = StatusWord::new(0x69, 0x82);
    /// Incorrect parameters in the data field
    pub const SW_WRONG_DATA: StatusWord = StatusWord::new(0x6A, 0x80);
    /// Wrong length
    pub const SW_WRONG_LENGTH: StatusWord = StatusWord::new(0x67, 0x00);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success() {
        assert!(StatusWord::new(0x90, 0x00).is_success());
        assert!(!StatusWord::new(0x90, 0x01).is_success());
        assert!(!StatusWord::new(0x69, 0x84).is_success());
    }

    #[test]
    fn test_more_data() {
        assert!(StatusWord::new(0x61, 0x00).has_more_data());
        assert!(StatusWord::new(0x61, 0xFF).has_more_data());
        assert!(!StatusWord::new(0x90, 0x00).has_more_data());
    }

    #[test]
    fn test_u16_round_trip() {
        let sw = StatusWord::from_u16(0x6A80);
        assert_eq!(sw.sw1, 0x6A);
        assert_eq!(sw.sw2, 0x80);
        assert_eq!(sw.to_u16(), 0x6A80);
        assert_eq!(sw.to_string(), "6A80");
    }
}
