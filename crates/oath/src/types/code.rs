use std::fmt;

use crate::crypto::Challenge;

/// A truncated one-time code as computed by the token
///
/// The token performs the HMAC and dynamic truncation; the only client-side
/// work is reducing the 4-octet value modulo 10^digits and zero-padding,
/// which is what `Display` produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    /// Number of decimal digits to render
    pub digits: u8,
    /// The 4-octet big-endian truncated value
    pub value: u32,
}

impl Code {
    /// Create a code from its digit count and truncated value
    pub const fn new(digits: u8, value: u32) -> Self {
        Self { digits, value }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.digits as usize;
        let code = self.value % 10u32.pow(self.digits as u32);
        write!(f, "{code:0>digits$}")
    }
}

/// Outcome for one credential in a batch calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculateResult {
    /// The token computed the code; ready to format
    Computed(Code),
    /// The token deliberately withheld the code; an explicit follow-up
    /// Calculate is required
    Deferred {
        /// Number of decimal digits the credential produces
        digits: u8,
        /// Whether the follow-up requires physical touch confirmation
        touch_required: bool,
        /// Whether the credential is counter-based (no challenge applies)
        hotp: bool,
    },
}

impl CalculateResult {
    /// The computed code, if the token returned one
    pub const fn code(&self) -> Option<&Code> {
        match self {
            Self::Computed(code) => Some(code),
            Self::Deferred { .. } => None,
        }
    }

    /// Whether an explicit follow-up calculation is needed
    pub const fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred { .. })
    }

    /// Whether the follow-up needs physical touch confirmation
    pub const fn requires_touch(&self) -> bool {
        matches!(
            self,
            Self::Deferred {
                touch_required: true,
                ..
            }
        )
    }
}

/// One (name, outcome) pair from a batch calculation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeEntry {
    /// Credential name
    pub name: String,
    /// Computed code or deferral marker
    pub result: CalculateResult,
}

/// The full directory returned by a batch calculation
///
/// Carries the challenge the batch was computed against so follow-up
/// single-credential calculations can reuse the identical octets and never
/// straddle a time window boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeDirectory {
    /// The challenge every computed entry was derived from
    pub challenge: Challenge,
    /// One entry per credential, in token order
    pub entries: Vec<CodeEntry>,
}
