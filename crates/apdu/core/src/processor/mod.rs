//! Command processors
//!
//! A processor sits between the executor and the transport. It owns the full
//! exchange for one logical command: serialising the frame, transmitting it,
//! and optionally issuing follow-up frames (response chaining) before handing
//! back one complete [`Response`].

pub mod processors;

use std::fmt;

use crate::transport::CardTransport;
use crate::{Command, Error, Response};

/// Trait for command processors
///
/// The processor may transmit the command as-is, rewrite it, or drive several
/// physical exchanges to produce a single logical response.
pub trait CommandProcessor: Send + Sync + fmt::Debug {
    /// Run one logical command against the transport
    fn process_command(
        &self,
        command: &Command,
        transport: &mut dyn CardTransport,
    ) -> Result<Response, Error>;
}
