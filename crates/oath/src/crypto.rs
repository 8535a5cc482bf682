//! Challenge derivation and challenge-response authentication primitives
//!
//! The token computes every one-time code itself; the only client-side
//! cryptography is the TOTP challenge (a timestamp counter), the access-key
//! derivation for validation-code-protected applets, and the HMAC
//! challenge-response exchange driven by Validate and SetCode.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use zeroize::Zeroizing;

use crate::constants::{ACCESS_KEY_ITERATIONS, ACCESS_KEY_LEN};
use crate::types::Algorithm;

/// An 8-octet big-endian challenge
pub type Challenge = [u8; 8];

/// A derived access key, wiped on drop
pub type AccessKey = Zeroizing<[u8; ACCESS_KEY_LEN]>;

/// Derive the TOTP challenge for a point in time:
/// `floor(time / timestep)` as an 8-octet big-endian integer
pub fn totp_challenge(time: SystemTime, timestep: Duration) -> Challenge {
    let seconds = time
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let counter = seconds / timestep.as_secs().max(1);
    counter.to_be_bytes()
}

/// Derive the access key for a validation-code-protected applet
///
/// PBKDF2-HMAC-SHA1 over the access code with the token device identifier as
/// salt, 1000 iterations, 16 octets. These parameters are fixed by the token
/// vendor's published derivation and are not configurable.
pub fn derive_access_key(access_code: &str, device_id: &[u8]) -> AccessKey {
    let mut key = Zeroizing::new([0u8; ACCESS_KEY_LEN]);
    pbkdf2_hmac::<Sha1>(
        access_code.as_bytes(),
        device_id,
        ACCESS_KEY_ITERATIONS,
        key.as_mut_slice(),
    );
    key
}

macro_rules! with_mac {
    ($algorithm:expr, $key:expr, |$mac:ident| $body:expr) => {
        match $algorithm {
            // HMAC accepts keys of any length
            Algorithm::HmacSha1 => {
                let mut $mac =
                    Hmac::<Sha1>::new_from_slice($key).expect("HMAC key of any length");
                $body
            }
            Algorithm::HmacSha256 => {
                let mut $mac =
                    Hmac::<Sha256>::new_from_slice($key).expect("HMAC key of any length");
                $body
            }
            Algorithm::HmacSha512 => {
                let mut $mac =
                    Hmac::<Sha512>::new_from_slice($key).expect("HMAC key of any length");
                $body
            }
        }
    };
}

/// Compute the HMAC response for a challenge
pub fn hmac_response(algorithm: Algorithm, key: &[u8], challenge: &[u8]) -> Vec<u8> {
    with_mac!(algorithm, key, |mac| {
        mac.update(challenge);
        mac.finalize().into_bytes().to_vec()
    })
}

/// Verify an HMAC response in constant time
pub fn verify_response(algorithm: Algorithm, key: &[u8], challenge: &[u8], tag: &[u8]) -> bool {
    with_mac!(algorithm, key, |mac| {
        mac.update(challenge);
        mac.verify_slice(tag).is_ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Code;

    #[test]
    fn test_totp_challenge() {
        let step = Duration::from_secs(30);
        for (seconds, counter) in [(0u64, 0u64), (29, 0), (30, 1), (59, 1), (60, 2)] {
            assert_eq!(
                totp_challenge(UNIX_EPOCH + Duration::from_secs(seconds), step),
                counter.to_be_bytes(),
                "t={seconds}"
            );
        }
    }

    /// Compute a code the way the token does: HMAC over the challenge,
    /// dynamic truncation per RFC 4226.
    fn reference_code(algorithm: Algorithm, key: &[u8], challenge: &Challenge, digits: u8) -> Code {
        let mac = hmac_response(algorithm, key, challenge);
        let offset = (mac[mac.len() - 1] & 0x0F) as usize;
        let value = u32::from_be_bytes(mac[offset..offset + 4].try_into().unwrap()) & 0x7FFF_FFFF;
        Code::new(digits, value)
    }

    #[test]
    fn test_rfc_6238_vectors() {
        // T = 59, 30 second step
        let challenge = totp_challenge(
            UNIX_EPOCH + Duration::from_secs(59),
            Duration::from_secs(30),
        );

        let sha1_key = b"12345678901234567890";
        let sha256_key = b"12345678901234567890123456789012";
        let sha512_key =
            b"1234567890123456789012345678901234567890123456789012345678901234";

        let vectors: [(Algorithm, &[u8], u8, &str); 4] = [
            (Algorithm::HmacSha1, sha1_key, 6, "287082"),
            (Algorithm::HmacSha1, sha1_key, 8, "94287082"),
            (Algorithm::HmacSha256, sha256_key, 8, "46119246"),
            (Algorithm::HmacSha512, sha512_key, 8, "90693936"),
        ];

        for (algorithm, key, digits, expected) in vectors {
            let code = reference_code(algorithm, key, &challenge, digits);
            assert_eq!(code.to_string(), expected, "{algorithm} {digits} digits");
        }
    }

    #[test]
    fn test_access_key_derivation() {
        let device_id = [0x7C, 0x06, 0x60, 0x15, 0x20, 0xFC, 0x3F, 0x8F];
        let key = derive_access_key("secret", &device_id);
        let again = derive_access_key("secret", &device_id);
        assert_eq!(*key, *again);
        assert_ne!(*key, [0u8; ACCESS_KEY_LEN]);

        let other = derive_access_key("secret2", &device_id);
        assert_ne!(*key, *other);
    }

    #[test]
    fn test_hmac_round_trip() {
        let key = b"0123456789abcdef";
        let challenge = [1, 2, 3, 4, 5, 6, 7, 8];

        for algorithm in [
            Algorithm::HmacSha1,
            Algorithm::HmacSha256,
            Algorithm::HmacSha512,
        ] {
            let tag = hmac_response(algorithm, key, &challenge);
            assert!(verify_response(algorithm, key, &challenge, &tag));
            assert!(!verify_response(algorithm, key, &[8, 7, 6, 5, 4, 3, 2, 1], &tag));
        }
    }
}
