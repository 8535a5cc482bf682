//! Executor trait for APDU command execution

use bytes::Bytes;

use crate::{Command, Error, Response};

/// Trait for APDU executors
///
/// An executor turns a [`Command`] into one fully reassembled [`Response`].
/// Implementations run strictly sequential exchanges; callers must not
/// interleave two logical operations on the same executor.
pub trait Executor {
    /// Transmit a command and return the reassembled response
    fn transmit(&mut self, command: &Command) -> Result<Response, Error>;

    /// Transmit a command, returning the payload only on terminal success
    ///
    /// Every non-0x9000 terminal status surfaces uniformly as
    /// [`Error::Status`], so callers never inspect status words themselves.
    fn execute(&mut self, command: &Command) -> Result<Bytes, Error> {
        self.transmit(command)?.into_payload()
    }

    /// Reset the underlying transport
    fn reset(&mut self) -> Result<(), Error>;
}
