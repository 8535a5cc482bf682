//! Card executor implementation
//!
//! Combines a card transport with a command processor to execute APDU
//! commands, reassembling chained responses along the way.

use std::fmt;

use tracing::debug;

use crate::executor::Executor;
use crate::processor::processors::IdentityProcessor;
use crate::processor::CommandProcessor;
use crate::transport::CardTransport;
use crate::{Command, Error, Response};

/// Card executor driving a transport through a command processor
pub struct CardExecutor<T: CardTransport> {
    transport: T,
    processor: Box<dyn CommandProcessor>,
}

impl<T: CardTransport> fmt::Debug for CardExecutor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardExecutor")
            .field("transport", &self.transport)
            .field("processor", &self.processor)
            .finish()
    }
}

impl<T: CardTransport> CardExecutor<T> {
    /// Create an executor that transmits commands unchanged
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            processor: Box::new(IdentityProcessor),
        }
    }

    /// Create an executor with the given command processor
    pub fn with_processor(transport: T, processor: Box<dyn CommandProcessor>) -> Self {
        Self {
            transport,
            processor,
        }
    }

    /// Replace the command processor
    pub fn set_processor(&mut self, processor: Box<dyn CommandProcessor>) {
        self.processor = processor;
    }

    /// Get a reference to the transport
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Get a mutable reference to the transport
    pub const fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consume the executor, returning the transport
    pub fn into_transport(self) -> T {
        self.transport
    }
}

impl<T: CardTransport> Executor for CardExecutor<T> {
    fn transmit(&mut self, command: &Command) -> Result<Response, Error> {
        debug!(
            ins = command.instruction(),
            lc = command.data().map_or(0, <[u8]>::len),
            "transmitting command"
        );

        let response = self.processor.process_command(command, &mut self.transport)?;

        debug!(status = %response.status(), "received response");
        Ok(response)
    }

    fn reset(&mut self) -> Result<(), Error> {
        self.transport.reset().map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::processors::GetResponseProcessor;
    use crate::transport::MockTransport;

    #[test]
    fn test_executor_basic_transmit() {
        let transport = MockTransport::with_response([0x90, 0x00]);
        let mut executor = CardExecutor::new(transport);

        let response = executor.transmit(&Command::new(0x00, 0xA4, 0x04, 0x00)).unwrap();
        assert!(response.status().is_success());
    }

    #[test]
    fn test_execute_surfaces_status_error() {
        let transport = MockTransport::with_response([0x69, 0x82]);
        let mut executor = CardExecutor::new(transport);

        let result = executor.execute(&Command::new(0x00, 0xA3, 0x00, 0x00));
        assert!(matches!(result, Err(Error::Status(sw)) if sw.to_u16() == 0x6982));
    }

    #[test]
    fn test_executor_with_chaining_processor() {
        let mut transport = MockTransport::new();
        transport
            .expect([0x00, 0xA1, 0x00, 0x00], [0xAA, 0x61, 0x00])
            .expect([0x00, 0xA5, 0x00, 0x00], [0xBB, 0x90, 0x00]);

        let processor = GetResponseProcessor::new(Command::new(0x00, 0xA5, 0x00, 0x00));
        let mut executor = CardExecutor::with_processor(transport, Box::new(processor));

        let payload = executor.execute(&Command::new(0x00, 0xA1, 0x00, 0x00)).unwrap();
        assert_eq!(payload.as_ref(), &[0xAA, 0xBB]);
        executor.transport().assert_exhausted();
    }
}
