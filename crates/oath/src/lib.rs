//! Client implementation of the YKOATH protocol
//!
//! Talks to the OATH applet on a security token over any
//! [`CardTransport`](ykoath_apdu_core::CardTransport): enumerate credentials,
//! compute one-time codes (including the touch-confirmation workflow), add
//! and remove credentials, and authenticate to a validation-code-protected
//! applet. The token holds all secret key material and computes every code
//! itself; this crate only drives the protocol.
//!
//! Open a transport (for instance with `ykoath-apdu-transport-pcsc`), then:
//!
//! ```no_run
//! use ykoath::OathSession;
//! # use ykoath_apdu_core::transport::MockTransport;
//! # fn open_transport() -> MockTransport { MockTransport::new() }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = OathSession::new(open_transport());
//! let code = session.calculate("github", Some(&mut |name: &str| {
//!     eprintln!("touch the token to confirm {name}");
//! }))?;
//! println!("{code}");
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

pub mod commands;
mod constants;
mod crypto;
mod error;
mod resolve;
mod session;
pub mod tlv;
mod types;

pub use commands::SelectResponse;
pub use constants::{ins, properties, tags, CLA, DEFAULT_TIMESTEP, OATH_AID};
pub use crypto::{
    derive_access_key, hmac_response, totp_challenge, verify_response, AccessKey, Challenge,
};
pub use error::{Error, ProtocolErrorKind, Result};
pub use session::{Clock, OathSession};
pub use types::{
    Algorithm, CalculateResult, Code, CodeDirectory, CodeEntry, Credential, OathType, Version,
};

// Re-export the APDU layer for downstream use
pub use ykoath_apdu_core as apdu;
