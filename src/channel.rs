//! Two connected endpoints standing in for the host and the editing
//! surface. Payloads travel as raw JSON values and are validated on
//! receipt, so nothing reaches a handler without passing [`validate`].
//!
//! [`validate`]: crate::protocol::validate

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ChannelError;
use crate::protocol::EditorMessage;

/// Build a connected pair of endpoints, host side first.
pub fn pair(config: &Config) -> (Endpoint, Endpoint) {
    let (host_tx, surface_rx) = mpsc::channel();
    let (surface_tx, host_rx) = mpsc::channel();
    let host = Endpoint::new("host", host_tx, host_rx, config);
    let surface = Endpoint::new("surface", surface_tx, surface_rx, config);
    (host, surface)
}

/// One side of the channel.
pub struct Endpoint {
    name: &'static str,
    version: String,
    tx: Sender<Value>,
    rx: Receiver<Value>,
    rejected: AtomicUsize,
}

impl Endpoint {
    fn new(name: &'static str, tx: Sender<Value>, rx: Receiver<Value>, config: &Config) -> Self {
        Self {
            name,
            version: config.protocol.version.clone(),
            tx,
            rx,
            rejected: AtomicUsize::new(0),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Version stamped into messages built by this endpoint.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Number of payloads dropped because they failed validation.
    pub fn rejected(&self) -> usize {
        self.rejected.load(Ordering::Relaxed)
    }

    pub fn send(&self, message: &EditorMessage) -> Result<(), ChannelError> {
        debug!(endpoint = self.name, kind = %message.message_type(), "sending message");
        self.send_raw(message.to_value())
    }

    /// Send a payload as-is. The receiving side still validates it.
    pub fn send_raw(&self, payload: Value) -> Result<(), ChannelError> {
        self.tx.send(payload).map_err(|_| ChannelError::Disconnected)
    }

    /// Block until a valid message arrives. Invalid payloads are logged and
    /// dropped.
    pub fn recv(&self) -> Result<EditorMessage, ChannelError> {
        loop {
            let payload = self.rx.recv().map_err(|_| ChannelError::Disconnected)?;
            if let Some(message) = self.admit(payload) {
                return Ok(message);
            }
        }
    }

    /// Non-blocking receive. `Ok(None)` when no valid message is queued.
    pub fn try_recv(&self) -> Result<Option<EditorMessage>, ChannelError> {
        loop {
            match self.rx.try_recv() {
                Ok(payload) => {
                    if let Some(message) = self.admit(payload) {
                        return Ok(Some(message));
                    }
                }
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Disconnected) => return Err(ChannelError::Disconnected),
            }
        }
    }

    fn admit(&self, payload: Value) -> Option<EditorMessage> {
        match EditorMessage::from_value(payload) {
            Ok(message) => Some(message),
            Err(error) => {
                self.rejected.fetch_add(1, Ordering::Relaxed);
                warn!(endpoint = self.name, %error, "discarding invalid message");
                None
            }
        }
    }
}
