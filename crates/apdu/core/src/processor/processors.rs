//! Concrete command processors

use bytes::BytesMut;
use tracing::trace;

use crate::processor::CommandProcessor;
use crate::transport::CardTransport;
use crate::{Command, Error, Response};

/// Processor that transmits the command unchanged, one exchange per command
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityProcessor;

impl CommandProcessor for IdentityProcessor {
    fn process_command(
        &self,
        command: &Command,
        transport: &mut dyn CardTransport,
    ) -> Result<Response, Error> {
        let response = transport.transmit_raw(&command.to_bytes())?;
        Response::from_bytes(&response)
    }
}

/// Processor that transparently follows the "more data" (0x61xx) signal
///
/// The state machine is the same for every instruction: transmit the command,
/// and while the status word announces more data, issue the continuation
/// command and append the data octets in arrival order. A 0x9000 terminates
/// the chain with the reassembled payload; any other status word terminates
/// it immediately with that status. Partial chaining state is never resumed
/// across a transport failure.
#[derive(Debug, Clone)]
pub struct GetResponseProcessor {
    continuation: Command,
}

impl GetResponseProcessor {
    /// Create a processor using the given continuation command
    pub const fn new(continuation: Command) -> Self {
        Self { continuation }
    }
}

impl Default for GetResponseProcessor {
    /// ISO/IEC 7816-4 GET RESPONSE
    fn default() -> Self {
        Self::new(Command::new(0x00, 0xC0, 0x00, 0x00))
    }
}

impl CommandProcessor for GetResponseProcessor {
    fn process_command(
        &self,
        command: &Command,
        transport: &mut dyn CardTransport,
    ) -> Result<Response, Error> {
        let mut assembled = BytesMut::new();
        let mut response = Response::from_bytes(&transport.transmit_raw(&command.to_bytes())?)?;

        if let Some(payload) = response.payload() {
            assembled.extend_from_slice(payload);
        }

        while response.status().has_more_data() {
            trace!(
                status = %response.status(),
                assembled = assembled.len(),
                "fetching remaining response data"
            );

            response =
                Response::from_bytes(&transport.transmit_raw(&self.continuation.to_bytes())?)?;
            if let Some(payload) = response.payload() {
                assembled.extend_from_slice(payload);
            }
        }

        let payload = (!assembled.is_empty()).then(|| assembled.freeze());
        Ok(Response::new(payload, response.status()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    const SEND_REMAINING: [u8; 4] = [0x00, 0xA5, 0x00, 0x00];

    fn chaining_processor() -> GetResponseProcessor {
        GetResponseProcessor::new(Command::new(0x00, 0xA5, 0x00, 0x00))
    }

    #[test]
    fn test_single_segment_passthrough() {
        let mut mock = MockTransport::new();
        mock.expect([0x00, 0xA1, 0x00, 0x00], [0x01, 0x02, 0x90, 0x00]);

        let response = chaining_processor()
            .process_command(&Command::new(0x00, 0xA1, 0x00, 0x00), &mut mock)
            .unwrap();

        assert!(response.status().is_success());
        assert_eq!(response.payload().as_deref(), Some(&[0x01, 0x02][..]));
        mock.assert_exhausted();
    }

    #[test]
    fn test_chained_segments_reassemble() {
        // Three segments with arbitrary split points must reassemble to the
        // same buffer a single segment would have produced.
        let mut mock = MockTransport::new();
        mock.expect([0x00, 0xA1, 0x00, 0x00], [0xDE, 0xAD, 0x61, 0x03])
            .expect(SEND_REMAINING, [0xBE, 0x61, 0x00])
            .expect(SEND_REMAINING, [0xEF, 0x01, 0x90, 0x00]);

        let response = chaining_processor()
            .process_command(&Command::new(0x00, 0xA1, 0x00, 0x00), &mut mock)
            .unwrap();

        assert!(response.status().is_success());
        assert_eq!(
            response.payload().as_deref(),
            Some(&[0xDE, 0xAD, 0xBE, 0xEF, 0x01][..])
        );
        mock.assert_exhausted();
    }

    #[test]
    fn test_error_status_terminates_chain() {
        let mut mock = MockTransport::new();
        mock.expect([0x00, 0xA2, 0x00, 0x01], [0x69, 0x84]);

        let response = chaining_processor()
            .process_command(&Command::new(0x00, 0xA2, 0x00, 0x01), &mut mock)
            .unwrap();

        assert_eq!(response.status().to_u16(), 0x6984);
        assert!(response.into_payload().is_err());
        mock.assert_exhausted();
    }
}
