//! Core types for APDU (Application Protocol Data Unit) operations
//!
//! This crate provides the foundational types for exchanging APDU commands and
//! responses with a smart-card token:
//!
//! - Building and parsing APDU command and response frames
//! - Status word interpretation, including the "more data" continuation signal
//! - A [`CardTransport`] trait abstracting the physical exchange
//! - A [`CardExecutor`] that drives a transport through a command processor,
//!   transparently reassembling chained responses
//!
//! The executor is strictly synchronous: one command, one (possibly chained)
//! response, no concurrent exchanges on a single transport.
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

// Re-export bytes for convenience
pub use bytes::{Bytes, BytesMut};

pub mod card;
pub mod command;
pub mod error;
pub mod executor;
pub mod processor;
pub mod response;
pub mod transport;

pub use card::CardExecutor;
pub use command::Command;
pub use error::Error;
pub use executor::Executor;
pub use processor::CommandProcessor;
pub use response::status::StatusWord;
pub use response::Response;
pub use transport::{CardTransport, TransportError};

/// Prelude module containing commonly used traits and types
pub mod prelude {
    pub use crate::{Bytes, BytesMut, Error};

    pub use crate::command::Command;

    pub use crate::response::status::{common as status, StatusWord};
    pub use crate::response::Response;

    pub use crate::transport::{CardTransport, TransportError};

    pub use crate::processor::processors::{GetResponseProcessor, IdentityProcessor};
    pub use crate::processor::CommandProcessor;

    pub use crate::card::CardExecutor;
    pub use crate::executor::Executor;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test the basic types are re-exported correctly
    #[test]
    fn test_reexports() {
        let cmd = Command::new(0x00, 0xA4, 0x04, 0x00);
        assert_eq!(cmd.class(), 0x00);
        assert_eq!(cmd.instruction(), 0xA4);
        assert_eq!(cmd.p1(), 0x04);
        assert_eq!(cmd.p2(), 0x00);

        let data = Bytes::from_static(&[0x01, 0x02, 0x03]);
        let resp = Response::success(Some(data.clone()));
        assert!(resp.status().is_success());
        assert_eq!(resp.payload(), &Some(data));
        assert_eq!(resp.status(), StatusWord::new(0x90, 0x00));
    }
}
