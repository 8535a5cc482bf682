//! PC/SC transport for APDU operations
//!
//! This crate implements [`CardTransport`](ykoath_apdu_core::CardTransport)
//! on top of the platform PC/SC stack. The usual flow is:
//!
//! ```no_run
//! use ykoath_apdu_transport_pcsc::PcscDeviceManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = PcscDeviceManager::new()?;
//! let readers = manager.list_readers()?;
//! let reader = readers.iter().find(|r| r.has_card()).ok_or("no card")?;
//! let transport = manager.open_reader(reader.name())?;
//! # Ok(())
//! # }
//! ```
//!
//! Reader hot-plug monitoring is deliberately not provided; callers pick a
//! reader and open it.
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

mod config;
mod error;
mod manager;
mod reader;
mod transport;

pub use config::{PcscConfig, ShareMode, TransactionMode};
pub use error::PcscError;
pub use manager::PcscDeviceManager;
pub use reader::PcscReader;
pub use transport::PcscTransport;
