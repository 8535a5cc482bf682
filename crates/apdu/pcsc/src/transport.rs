//! PC/SC implementation of the card transport

use std::fmt;

use bytes::Bytes;
use tracing::trace;
use ykoath_apdu_core::{CardTransport, TransportError};

use crate::config::{PcscConfig, TransactionMode};
use crate::error::PcscError;

/// Card transport over a connected PC/SC card handle
pub struct PcscTransport {
    card: pcsc::Card,
    config: PcscConfig,
    connected: bool,
}

impl fmt::Debug for PcscTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PcscTransport")
            .field("config", &self.config)
            .field("connected", &self.connected)
            .finish_non_exhaustive()
    }
}

impl PcscTransport {
    pub(crate) const fn new(card: pcsc::Card, config: PcscConfig) -> Self {
        Self {
            card,
            config,
            connected: true,
        }
    }

    /// Whether the card connection is still believed to be live
    pub const fn is_connected(&self) -> bool {
        self.connected
    }

    /// The transport configuration
    pub const fn config(&self) -> &PcscConfig {
        &self.config
    }

    fn transmit_inner(&mut self, command: &[u8]) -> Result<Vec<u8>, pcsc::Error> {
        let mut receive_buffer = vec![0; pcsc::MAX_BUFFER_SIZE];

        match self.config.transaction_mode {
            TransactionMode::PerCommand => {
                let transaction = self.card.transaction()?;
                transaction
                    .transmit(command, &mut receive_buffer)
                    .map(<[u8]>::to_vec)
            }
            TransactionMode::Manual => self
                .card
                .transmit(command, &mut receive_buffer)
                .map(<[u8]>::to_vec),
        }
    }
}

impl CardTransport for PcscTransport {
    fn transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        trace!(command = %hex::encode(command), "pcsc transmit");

        let response = self.transmit_inner(command).map_err(|e| {
            if matches!(e, pcsc::Error::RemovedCard | pcsc::Error::ResetCard) {
                self.connected = false;
            }
            TransportError::from(PcscError::Pcsc(e))
        })?;

        trace!(response = %hex::encode(&response), "pcsc response");
        Ok(Bytes::from(response))
    }

    fn reset(&mut self) -> Result<(), TransportError> {
        self.card
            .reconnect(
                self.config.share_mode.into(),
                self.config.protocols,
                pcsc::Disposition::ResetCard,
            )
            .map_err(|e| {
                self.connected = false;
                TransportError::from(PcscError::Pcsc(e))
            })?;

        self.connected = true;
        Ok(())
    }
}
