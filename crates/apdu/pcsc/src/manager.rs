//! PC/SC device manager

use std::ffi::CString;
use std::time::Duration;

use pcsc::{Context, ReaderState, Scope, State};
use tracing::debug;

use crate::config::PcscConfig;
use crate::error::PcscError;
use crate::reader::PcscReader;
use crate::transport::PcscTransport;

/// Manager for PC/SC devices
///
/// Owns the PC/SC context and hands out connected transports. Listing is a
/// one-shot snapshot; there is no hot-plug monitoring.
#[derive(Clone)]
pub struct PcscDeviceManager {
    context: Context,
}

impl std::fmt::Debug for PcscDeviceManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PcscDeviceManager").finish_non_exhaustive()
    }
}

impl PcscDeviceManager {
    /// Establish a new PC/SC context
    pub fn new() -> Result<Self, PcscError> {
        let context = Context::establish(Scope::User)?;
        Ok(Self { context })
    }

    /// List the currently attached readers and their card state
    pub fn list_readers(&self) -> Result<Vec<PcscReader>, PcscError> {
        let len = self.context.list_readers_len()?;
        let mut buffer = vec![0; len];
        let names: Vec<CString> = self
            .context
            .list_readers(&mut buffer)?
            .map(CString::from)
            .collect();

        if names.is_empty() {
            return Ok(Vec::new());
        }

        let mut states: Vec<ReaderState> = names
            .iter()
            .map(|name| ReaderState::new(name.clone(), State::UNAWARE))
            .collect();

        // UNAWARE means the first status query returns immediately
        self.context
            .get_status_change(Duration::from_millis(100), &mut states)?;

        Ok(states.iter().map(PcscReader::from_reader_state).collect())
    }

    /// Connect to a reader by name with the default configuration
    pub fn open_reader(&self, name: &str) -> Result<PcscTransport, PcscError> {
        self.open_reader_with_config(name, PcscConfig::default())
    }

    /// Connect to a reader by name
    pub fn open_reader_with_config(
        &self,
        name: &str,
        config: PcscConfig,
    ) -> Result<PcscTransport, PcscError> {
        let c_name =
            CString::new(name).map_err(|_| PcscError::ReaderNotFound(name.to_string()))?;

        let card = self
            .context
            .connect(&c_name, config.share_mode.into(), config.protocols)
            .map_err(|e| match e {
                pcsc::Error::NoSmartcard => PcscError::NoCard(name.to_string()),
                pcsc::Error::UnknownReader => PcscError::ReaderNotFound(name.to_string()),
                other => PcscError::Pcsc(other),
            })?;

        debug!(reader = name, "connected to reader");
        Ok(PcscTransport::new(card, config))
    }
}
