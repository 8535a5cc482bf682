use derive_more::Display;

use crate::error::Error;

/// HMAC algorithm backing a credential
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Algorithm {
    /// HMAC-SHA1
    #[display("SHA1")]
    HmacSha1 = 0x01,
    /// HMAC-SHA256
    #[display("SHA256")]
    HmacSha256 = 0x02,
    /// HMAC-SHA512
    #[display("SHA512")]
    HmacSha512 = 0x03,
}

impl TryFrom<u8> for Algorithm {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(Self::HmacSha1),
            0x02 => Ok(Self::HmacSha256),
            0x03 => Ok(Self::HmacSha512),
            _ => Err(Error::InvalidData("unknown algorithm octet")),
        }
    }
}

/// Kind of one-time password credential
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OathType {
    /// Event-based (counter) credential
    #[display("HOTP")]
    Hotp = 0x10,
    /// Time-based credential
    #[display("TOTP")]
    Totp = 0x20,
}

impl TryFrom<u8> for OathType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x10 => Ok(Self::Hotp),
            0x20 => Ok(Self::Totp),
            _ => Err(Error::InvalidData("unknown oath type octet")),
        }
    }
}

/// Pack an algorithm and type into the wire octet (type high nibble,
/// algorithm low nibble)
pub(crate) const fn pack(algorithm: Algorithm, oath_type: OathType) -> u8 {
    oath_type as u8 | algorithm as u8
}

/// Split a packed algorithm/type octet
pub(crate) fn unpack(octet: u8) -> Result<(Algorithm, OathType), Error> {
    let algorithm = Algorithm::try_from(octet & 0x0F)?;
    let oath_type = OathType::try_from(octet & 0xF0)?;
    Ok((algorithm, oath_type))
}

/// A directory entry as returned by List: no secret material, no codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Credential name, unique on the token
    pub name: String,
    /// HMAC algorithm
    pub algorithm: Algorithm,
    /// HOTP or TOTP
    pub oath_type: OathType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_unpack() {
        assert_eq!(pack(Algorithm::HmacSha1, OathType::Totp), 0x21);
        assert_eq!(pack(Algorithm::HmacSha512, OathType::Hotp), 0x13);

        let (algorithm, oath_type) = unpack(0x22).unwrap();
        assert_eq!(algorithm, Algorithm::HmacSha256);
        assert_eq!(oath_type, OathType::Totp);

        assert!(unpack(0x24).is_err());
        assert!(unpack(0x31).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Algorithm::HmacSha256.to_string(), "SHA256");
        assert_eq!(OathType::Totp.to_string(), "TOTP");
    }
}
