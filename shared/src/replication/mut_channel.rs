use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::warn;

use crate::{AttributeMutate, AttributeSetSchema, DiffMask};

use super::error::ReplicationError;

// MutChannel
/// Fans the dirty signal of one AttributeSet out to one receiver per remote
/// observer, so each observer tracks what it has not yet been sent
#[derive(Clone)]
pub struct MutChannel {
    receivers: Arc<RwLock<Vec<MutReceiver>>>,
    diff_mask_length: u8,
}

impl MutChannel {
    pub fn new_channel(diff_mask_length: u8) -> (MutSender, MutReceiverBuilder) {
        let channel = Self {
            receivers: Arc::new(RwLock::new(Vec::new())),
            diff_mask_length,
        };

        let sender = channel.new_sender();

        let builder = MutReceiverBuilder::new(&channel);

        (sender, builder)
    }

    /// A channel with one bit per attribute of the schema
    pub fn for_schema(schema: &AttributeSetSchema) -> (MutSender, MutReceiverBuilder) {
        Self::new_channel(DiffMask::byte_length_for(schema.len()))
    }

    pub fn new_sender(&self) -> MutSender {
        MutSender::new(self)
    }

    pub fn new_receiver(&self) -> Option<MutReceiver> {
        if let Ok(mut receivers) = self.receivers.as_ref().write() {
            let receiver = MutReceiver::new(self.diff_mask_length);
            receivers.push(receiver.clone());
            return Some(receiver);
        }
        None
    }

    pub fn send(&self, diff: u8) -> bool {
        if let Ok(receivers) = self.receivers.as_ref().read() {
            for receiver in receivers.iter() {
                if !receiver.mark(diff) {
                    warn!("MutChannel: dropped dirty bit {} for a receiver", diff);
                }
            }
            return true;
        }
        false
    }
}

// MutReceiver
/// One observer's view of which attributes are dirty
#[derive(Clone)]
pub struct MutReceiver {
    mask: Arc<RwLock<DiffMask>>,
}

impl MutReceiver {
    pub fn new(diff_mask_length: u8) -> Self {
        Self {
            mask: Arc::new(RwLock::new(DiffMask::new(diff_mask_length))),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, DiffMask> {
        let Ok(mask) = self.mask.as_ref().read() else {
            panic!("Mask held on current thread");
        };
        mask
    }

    fn write(&self) -> RwLockWriteGuard<'_, DiffMask> {
        let Ok(mask) = self.mask.as_ref().write() else {
            panic!("Mask held on current thread");
        };
        mask
    }

    // Used by the sender: a poisoned mask drops the bit instead of panicking
    fn mark(&self, diff: u8) -> bool {
        let Ok(mut mask) = self.mask.as_ref().write() else {
            return false;
        };
        mask.set_bit(diff, true)
    }

    pub fn mask(&self) -> RwLockReadGuard<'_, DiffMask> {
        self.read()
    }

    pub fn diff_mask_is_clear(&self) -> bool {
        self.read().is_clear()
    }

    pub fn clear_mask(&self) {
        self.write().clear();
    }

    /// Copies the current mask and clears it in one critical section, so a
    /// bit set concurrently is never lost between read and clear
    pub fn take_mask(&self) -> DiffMask {
        let mut mask = self.write();
        let taken = mask.clone();
        mask.clear();
        taken
    }

    // Try versions return Result instead of panicking or blocking.
    // They fail if the mask is currently locked anywhere.

    pub fn try_mask(&self) -> Result<RwLockReadGuard<'_, DiffMask>, ReplicationError> {
        self.mask
            .as_ref()
            .try_read()
            .map_err(|_| ReplicationError::RwLockReentrant)
    }

    pub fn try_mask_mut(&self) -> Result<RwLockWriteGuard<'_, DiffMask>, ReplicationError> {
        self.mask
            .as_ref()
            .try_write()
            .map_err(|_| ReplicationError::RwLockReentrant)
    }

    pub fn try_diff_mask_is_clear(&self) -> Result<bool, ReplicationError> {
        Ok(self.try_mask()?.is_clear())
    }

    pub fn try_mutate(&self, diff: u8) -> Result<(), ReplicationError> {
        self.try_mask_mut()?.set_bit(diff, true);
        Ok(())
    }

    pub fn try_take_mask(&self) -> Result<DiffMask, ReplicationError> {
        let mut mask = self.try_mask_mut()?;
        let taken = mask.clone();
        mask.clear();
        Ok(taken)
    }
}

// MutSender
#[derive(Clone)]
pub struct MutSender {
    channel: MutChannel,
}

impl MutSender {
    pub fn new(channel: &MutChannel) -> Self {
        Self {
            channel: channel.clone(),
        }
    }
}

impl AttributeMutate for MutSender {
    fn mutate(&mut self, attribute_index: u8) -> bool {
        self.channel.send(attribute_index)
    }
}

// MutReceiverBuilder
pub struct MutReceiverBuilder {
    channel: MutChannel,
}

impl MutReceiverBuilder {
    pub fn new(channel: &MutChannel) -> Self {
        Self {
            channel: channel.clone(),
        }
    }

    pub fn build(&self) -> Option<MutReceiver> {
        self.channel.new_receiver()
    }

    pub fn try_build(&self) -> Result<MutReceiver, ReplicationError> {
        self.build().ok_or(ReplicationError::ChannelUnavailable)
    }
}
