//! The OATH session: high-level operations over one token transport
//!
//! Every public operation is a fresh protocol exchange; the session caches
//! nothing between calls except the applet-selection context. Exchanges are
//! strictly sequential; callers must not interleave two logical operations
//! on one session.

use std::fmt;
use std::time::{Duration, SystemTime};

use rand::RngCore;
use tracing::debug;
use ykoath_apdu_core::prelude::GetResponseProcessor;
use ykoath_apdu_core::{CardExecutor, CardTransport, Command, Executor};

use crate::commands::{self, SelectResponse};
use crate::constants::{ins, CLA, DEFAULT_TIMESTEP};
use crate::crypto::{self, Challenge};
use crate::error::{Error, Result};
use crate::resolve;
use crate::types::{Algorithm, CalculateResult, Code, CodeDirectory, Credential, OathType};

/// Clock used to derive TOTP challenges; injectable for tests
pub type Clock = Box<dyn Fn() -> SystemTime + Send + Sync>;

/// A session with the OATH applet on one token
pub struct OathSession<E: Executor> {
    executor: E,
    timestep: Duration,
    clock: Clock,
    applet: Option<SelectResponse>,
}

impl<E: Executor> fmt::Debug for OathSession<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OathSession")
            .field("timestep", &self.timestep)
            .field("applet", &self.applet)
            .finish_non_exhaustive()
    }
}

impl<T: CardTransport> OathSession<CardExecutor<T>> {
    /// Create a session over an already-connected transport
    ///
    /// The executor is set up with the applet's SEND REMAINING continuation
    /// so chained responses reassemble transparently for every instruction.
    pub fn new(transport: T) -> Self {
        let continuation = Command::new(CLA, ins::SEND_REMAINING, 0x00, 0x00);
        let executor =
            CardExecutor::with_processor(transport, Box::new(GetResponseProcessor::new(continuation)));
        Self::with_executor(executor)
    }
}

impl<E: Executor> OathSession<E> {
    /// Create a session over a prepared executor
    pub fn with_executor(executor: E) -> Self {
        Self {
            executor,
            timestep: DEFAULT_TIMESTEP,
            clock: Box::new(SystemTime::now),
            applet: None,
        }
    }

    /// Override the TOTP timestep
    pub fn with_timestep(mut self, timestep: Duration) -> Self {
        self.timestep = timestep;
        self
    }

    /// Override the clock used for TOTP challenges
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// The underlying executor
    pub const fn executor(&self) -> &E {
        &self.executor
    }

    /// Select the OATH applet, establishing context for the other operations
    pub fn select(&mut self) -> Result<SelectResponse> {
        let payload = self.executor.execute(&commands::select::select())?;
        let response = SelectResponse::try_from(payload.as_ref())?;

        debug!(
            version = %response.version,
            protected = response.requires_validation(),
            "selected oath applet"
        );

        self.applet = Some(response.clone());
        Ok(response)
    }

    fn ensure_selected(&mut self) -> Result<SelectResponse> {
        if let Some(info) = &self.applet {
            return Ok(info.clone());
        }
        self.select()
    }

    /// Enumerate the credentials on the token
    pub fn list(&mut self) -> Result<Vec<Credential>> {
        self.ensure_selected()?;
        let payload = self.executor.execute(&commands::list::list())?;
        commands::parse_list(&payload)
    }

    /// Store a credential
    ///
    /// The raw key is write-only: it goes to the token and is not retained
    /// here after the call returns. Out-of-range parameters are rejected
    /// before anything is transmitted.
    pub fn put(
        &mut self,
        name: &str,
        algorithm: Algorithm,
        oath_type: OathType,
        digits: u8,
        key: &[u8],
        require_touch: bool,
    ) -> Result<()> {
        let command = commands::put::put(name, algorithm, oath_type, digits, key, require_touch)?;
        self.ensure_selected()?;
        self.executor.execute(&command)?;
        Ok(())
    }

    /// Delete a credential by its exact name
    pub fn delete(&mut self, name: &str) -> Result<()> {
        self.ensure_selected()?;
        self.executor.execute(&commands::delete::delete(name))?;
        Ok(())
    }

    /// Compute codes for the whole directory in one batch
    ///
    /// Entries the token withheld (touch-required or HOTP) come back as
    /// deferred markers; resolve them with [`calculate`](Self::calculate).
    pub fn calculate_all(&mut self) -> Result<CodeDirectory> {
        self.ensure_selected()?;
        let challenge = crypto::totp_challenge((self.clock)(), self.timestep);
        self.calculate_all_with_challenge(challenge)
    }

    fn calculate_all_with_challenge(&mut self, challenge: Challenge) -> Result<CodeDirectory> {
        let payload = self
            .executor
            .execute(&commands::calculate_all::calculate_all(&challenge))?;

        Ok(CodeDirectory {
            challenge,
            entries: commands::parse_calculate_all(&payload)?,
        })
    }

    /// Compute the code for the credential matching `query`
    ///
    /// The query resolves against a fresh batch: an exact name match wins,
    /// otherwise it must select exactly one name as a substring. A deferred
    /// credential triggers one follow-up exchange against the identical batch
    /// challenge; `touch_callback` fires once beforehand when that follow-up
    /// will wait for physical confirmation. The exchange then blocks until
    /// the token answers or the transport gives up.
    pub fn calculate(
        &mut self,
        query: &str,
        touch_callback: Option<&mut dyn FnMut(&str)>,
    ) -> Result<Code> {
        let directory = self.calculate_all()?;
        let entry = resolve::resolve(directory.entries, query)?;

        match entry.result {
            CalculateResult::Computed(code) => Ok(code),
            CalculateResult::Deferred {
                touch_required,
                hotp,
                ..
            } => {
                if touch_required {
                    debug!(name = %entry.name, "waiting for touch confirmation");
                    if let Some(callback) = touch_callback {
                        callback(&entry.name);
                    }
                }

                let challenge = (!hotp).then_some(&directory.challenge);
                let payload = self
                    .executor
                    .execute(&commands::calculate::calculate(&entry.name, challenge))?;
                commands::parse_calculate(&payload)
            }
        }
    }

    /// Authenticate to a validation-code-protected applet
    ///
    /// Answers the challenge the applet issued at select time and verifies
    /// the token's response to a fresh client challenge, making the
    /// authentication mutual.
    pub fn validate(&mut self, access_code: &str) -> Result<()> {
        let info = self.ensure_selected()?;
        let card_challenge = info
            .challenge
            .ok_or(Error::Validation("applet has no validation code"))?;
        let algorithm = info.algorithm.unwrap_or(Algorithm::HmacSha1);
        let key = crypto::derive_access_key(access_code, &info.device_id);

        let mut client_challenge: Challenge = [0; 8];
        rand::rng().fill_bytes(&mut client_challenge);

        self.validate_inner(algorithm, &key[..], &card_challenge, &client_challenge)
    }

    fn validate_inner(
        &mut self,
        algorithm: Algorithm,
        key: &[u8],
        card_challenge: &[u8],
        client_challenge: &Challenge,
    ) -> Result<()> {
        let response = crypto::hmac_response(algorithm, key, card_challenge);
        let payload = self
            .executor
            .execute(&commands::validate::validate(&response, client_challenge))?;
        let token_response = commands::parse_validate(&payload)?;

        if !crypto::verify_response(algorithm, key, client_challenge, &token_response) {
            return Err(Error::AuthenticationFailed);
        }
        Ok(())
    }

    /// Provision a validation code derived from `access_code`
    pub fn set_code(&mut self, access_code: &str) -> Result<()> {
        let info = self.ensure_selected()?;
        let key = crypto::derive_access_key(access_code, &info.device_id);

        let mut challenge: Challenge = [0; 8];
        rand::rng().fill_bytes(&mut challenge);
        let response = crypto::hmac_response(Algorithm::HmacSha1, &key[..], &challenge);

        self.executor.execute(&commands::set_code::set_code(
            Algorithm::HmacSha1,
            &key[..],
            &challenge,
            &response,
        ))?;
        Ok(())
    }

    /// Remove the validation code
    pub fn clear_code(&mut self) -> Result<()> {
        self.ensure_selected()?;
        self.executor.execute(&commands::set_code::clear_code())?;
        Ok(())
    }

    /// Wipe all credentials and the validation code
    pub fn reset(&mut self) -> Result<()> {
        self.ensure_selected()?;
        self.executor.execute(&commands::reset::reset())?;
        // Force a fresh select; the wiped applet reports new state
        self.applet = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::tags;
    use crate::tlv;
    use ykoath_apdu_core::transport::MockTransport;

    const DEVICE_ID: [u8; 8] = [0x7C, 0x06, 0x60, 0x15, 0x20, 0xFC, 0x3F, 0x8F];

    fn select_exchange(mock: &mut MockTransport, suffix: &[u8]) {
        let mut response = Vec::new();
        response.extend(tlv::encode(tags::VERSION, &[0x04, 0x03, 0x03]));
        response.extend(tlv::encode(tags::NAME, &DEVICE_ID));
        response.extend_from_slice(suffix);
        response.extend_from_slice(&[0x90, 0x00]);
        mock.expect(
            hex::decode("00a4040007a0000005272101").unwrap(),
            response,
        );
    }

    fn session(mock: MockTransport) -> OathSession<CardExecutor<MockTransport>> {
        OathSession::new(mock)
    }

    #[test]
    fn test_validate_success() {
        let algorithm = Algorithm::HmacSha1;
        let key = crypto::derive_access_key("secret", &DEVICE_ID);
        let card_challenge = [0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17];
        let client_challenge: Challenge = [1, 2, 3, 4, 5, 6, 7, 8];

        let expected = commands::validate::validate(
            &crypto::hmac_response(algorithm, &key[..], &card_challenge),
            &client_challenge,
        )
        .to_bytes();

        let mut answer = tlv::encode(
            tags::RESPONSE,
            &crypto::hmac_response(algorithm, &key[..], &client_challenge),
        )
        .to_vec();
        answer.extend_from_slice(&[0x90, 0x00]);

        let mut mock = MockTransport::new();
        mock.expect(expected.to_vec(), answer);

        let mut session = session(mock);
        session
            .validate_inner(algorithm, &key[..], &card_challenge, &client_challenge)
            .unwrap();
    }

    #[test]
    fn test_validate_bad_token_response() {
        let algorithm = Algorithm::HmacSha256;
        let key = crypto::derive_access_key("secret", &DEVICE_ID);
        let card_challenge = [0u8; 8];
        let client_challenge: Challenge = [9; 8];

        // Token answers with an HMAC over the wrong challenge
        let mut answer = tlv::encode(
            tags::RESPONSE,
            &crypto::hmac_response(algorithm, &key[..], &card_challenge),
        )
        .to_vec();
        answer.extend_from_slice(&[0x90, 0x00]);

        let mut mock = MockTransport::new();
        mock.expect(
            commands::validate::validate(
                &crypto::hmac_response(algorithm, &key[..], &card_challenge),
                &client_challenge,
            )
            .to_bytes()
            .to_vec(),
            answer,
        );

        let mut session = session(mock);
        let result =
            session.validate_inner(algorithm, &key[..], &card_challenge, &client_challenge);
        assert!(matches!(result, Err(Error::AuthenticationFailed)));
    }

    #[test]
    fn test_validate_without_protection_fails_fast() {
        let mut mock = MockTransport::new();
        select_exchange(&mut mock, &[]);

        let mut session = session(mock);
        assert!(matches!(
            session.validate("secret"),
            Err(Error::Validation(_))
        ));
        session.executor().transport().assert_exhausted();
    }

    #[test]
    fn test_put_rejects_before_any_exchange() {
        // No expectations: a single transmitted frame would panic
        let mut session = session(MockTransport::new());
        let result = session.put(
            "name",
            Algorithm::HmacSha1,
            OathType::Totp,
            5,
            b"12345678901234567890",
            false,
        );
        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(session.executor().transport().transmitted().is_empty());
    }

    #[test]
    fn test_select_cached_after_first_operation() {
        let mut mock = MockTransport::new();
        select_exchange(&mut mock, &[]);
        mock.expect(vec![0x00, 0xA1, 0x00, 0x00], vec![0x90, 0x00])
            .expect(vec![0x00, 0xA1, 0x00, 0x00], vec![0x90, 0x00]);

        let mut session = session(mock);
        assert_eq!(session.list().unwrap(), vec![]);
        // Second list must not re-select
        assert_eq!(session.list().unwrap(), vec![]);
        session.executor().transport().assert_exhausted();
    }

    #[test]
    fn test_reset_forces_reselect() {
        let mut mock = MockTransport::new();
        select_exchange(&mut mock, &[]);
        mock.expect(vec![0x00, 0x04, 0xDE, 0xAD], vec![0x90, 0x00]);
        select_exchange(&mut mock, &[]);
        mock.expect(vec![0x00, 0xA1, 0x00, 0x00], vec![0x90, 0x00]);

        let mut session = session(mock);
        session.reset().unwrap();
        assert_eq!(session.list().unwrap(), vec![]);
        session.executor().transport().assert_exhausted();
    }
}
