use std::{
    collections::VecDeque,
    sync::{Arc, RwLock},
};

use log::warn;

use crate::{sync::error::ChannelError, types::EntityId};

/// A fully encoded envelope waiting to be handed to the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub entity: EntityId,
    pub bytes: Vec<u8>,
}

// SyncChannel

/// The outbound queue an entity's containers push encoded sync messages
/// into. Cloning shares the queue: the `SyncSender` half is cloned into each
/// container at registration, the `SyncReceiver` half is drained by whatever
/// host adapter owns the transport.
#[derive(Clone)]
pub struct SyncChannel {
    data: Arc<RwLock<VecDeque<OutboundMessage>>>,
}

impl SyncChannel {
    pub fn new_channel() -> (SyncSender, SyncReceiver) {
        let channel = Self {
            data: Arc::new(RwLock::new(VecDeque::new())),
        };

        let sender = SyncSender::new(&channel);
        let receiver = SyncReceiver::new(&channel);

        (sender, receiver)
    }

    fn try_push(&self, message: OutboundMessage) -> Result<(), ChannelError> {
        let mut queue = self
            .data
            .as_ref()
            .write()
            .map_err(|_| ChannelError::LockPoisoned)?;
        queue.push_back(message);
        Ok(())
    }

    fn try_drain(&self) -> Result<Vec<OutboundMessage>, ChannelError> {
        let mut queue = self
            .data
            .as_ref()
            .write()
            .map_err(|_| ChannelError::LockPoisoned)?;
        Ok(queue.drain(..).collect())
    }

    fn try_len(&self) -> Result<usize, ChannelError> {
        let queue = self
            .data
            .as_ref()
            .read()
            .map_err(|_| ChannelError::LockPoisoned)?;
        Ok(queue.len())
    }
}

// SyncSender

#[derive(Clone)]
pub struct SyncSender {
    channel: SyncChannel,
}

impl SyncSender {
    fn new(channel: &SyncChannel) -> Self {
        Self {
            channel: channel.clone(),
        }
    }

    /// Enqueue an encoded message, logging instead of failing if the queue
    /// lock was poisoned. Returns whether the message was accepted.
    pub(crate) fn send(&self, message: OutboundMessage) -> bool {
        match self.try_send(message) {
            Ok(()) => true,
            Err(error) => {
                warn!("dropping outbound sync message: {error}");
                false
            }
        }
    }

    pub(crate) fn try_send(&self, message: OutboundMessage) -> Result<(), ChannelError> {
        self.channel.try_push(message)
    }
}

// SyncReceiver

pub struct SyncReceiver {
    channel: SyncChannel,
}

impl SyncReceiver {
    fn new(channel: &SyncChannel) -> Self {
        Self {
            channel: channel.clone(),
        }
    }

    /// Drain all queued messages (panicking version)
    ///
    /// # Panics
    ///
    /// Panics if the queue lock was poisoned.
    /// Consider using `try_drain` for non-panicking error handling.
    pub fn drain(&self) -> Vec<OutboundMessage> {
        self.try_drain().expect("sync channel lock poisoned")
    }

    /// Drain all queued messages (non-panicking version)
    pub fn try_drain(&self) -> Result<Vec<OutboundMessage>, ChannelError> {
        self.channel.try_drain()
    }

    pub fn len(&self) -> usize {
        self.channel.try_len().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
