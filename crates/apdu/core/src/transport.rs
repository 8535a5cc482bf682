//! Card transport abstraction
//!
//! A transport carries raw command bytes to an already-connected token and
//! returns the raw response bytes. Connection establishment, power-up and
//! teardown live with the transport implementation, not here.

use std::collections::VecDeque;
use std::fmt;

use bytes::Bytes;

/// Errors raised by a card transport
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The device could not be reached
    #[error("device error: {0}")]
    Device(String),

    /// The connection to the card was lost or reset
    #[error("connection error: {0}")]
    Connection(String),

    /// The command could not be transmitted or the response not received
    #[error("transmission failed: {0}")]
    Transmission(String),

    /// The receive buffer was too small for the response
    #[error("receive buffer too small")]
    BufferTooSmall,

    /// Any other transport failure
    #[error("{0}")]
    Other(String),
}

/// Trait for card transports
///
/// The transport is an exclusively-owned resource for the duration of an
/// operation; implementations are not required to be thread-safe and no
/// transport call is ever retried internally.
pub trait CardTransport: fmt::Debug {
    /// Transmit raw command bytes, returning the raw response bytes
    ///
    /// Blocks until the token responds or the transport fails. There is no
    /// client-side timeout beyond what the transport itself provides.
    fn transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError>;

    /// Reset the transport
    fn reset(&mut self) -> Result<(), TransportError>;
}

/// A scripted transport for tests
///
/// Expectations are consumed in order; each pairs an expected command frame
/// with the canned response to return. A transmitted frame that does not
/// match the next expectation panics with a hex dump, which is the desired
/// behavior inside a test.
#[derive(Debug, Default)]
pub struct MockTransport {
    expectations: VecDeque<(Option<Vec<u8>>, Vec<u8>)>,
    transmitted: Vec<Vec<u8>>,
}

impl MockTransport {
    /// Create a mock with no expectations
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that answers any single command with `response`
    pub fn with_response(response: impl Into<Vec<u8>>) -> Self {
        let mut mock = Self::new();
        mock.expectations.push_back((None, response.into()));
        mock
    }

    /// Expect `command` next and answer it with `response`
    pub fn expect(&mut self, command: impl Into<Vec<u8>>, response: impl Into<Vec<u8>>) -> &mut Self {
        self.expectations
            .push_back((Some(command.into()), response.into()));
        self
    }

    /// All frames transmitted so far
    pub fn transmitted(&self) -> &[Vec<u8>] {
        &self.transmitted
    }

    /// Panic unless every expectation was consumed
    pub fn assert_exhausted(&self) {
        assert!(
            self.expectations.is_empty(),
            "{} expected exchange(s) never happened",
            self.expectations.len()
        );
    }
}

impl CardTransport for MockTransport {
    fn transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        self.transmitted.push(command.to_vec());

        let (expected, response) = self
            .expectations
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected command: {}", hex::encode(command)));

        if let Some(expected) = expected {
            assert_eq!(
                hex::encode(command),
                hex::encode(&expected),
                "command mismatch"
            );
        }

        Ok(Bytes::from(response))
    }

    fn reset(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}
