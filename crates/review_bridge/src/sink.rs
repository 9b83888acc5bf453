use std::io::Write;
use std::sync::mpsc::Sender;
use std::sync::{Mutex, PoisonError};

use review_logging::review_debug;

use crate::{BridgeError, OutboundMessage};

/// Where outbound messages go. Delivery is fire-and-forget: no reply is awaited.
pub trait HostSink: Send + Sync {
    fn deliver(&self, message: &OutboundMessage) -> Result<(), BridgeError>;
}

/// Writes one JSON object per line.
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> HostSink for WriterSink<W> {
    fn deliver(&self, message: &OutboundMessage) -> Result<(), BridgeError> {
        let line = message.to_json()?;
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{line}")?;
        writer.flush()?;
        review_debug!("Delivered {}", line);
        Ok(())
    }
}

pub struct ChannelSink {
    tx: Sender<OutboundMessage>,
}

impl ChannelSink {
    pub fn new(tx: Sender<OutboundMessage>) -> Self {
        Self { tx }
    }
}

impl HostSink for ChannelSink {
    fn deliver(&self, message: &OutboundMessage) -> Result<(), BridgeError> {
        self.tx
            .send(message.clone())
            .map_err(|_| BridgeError::Disconnected)
    }
}
