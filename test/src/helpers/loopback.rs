use gasplus_shared::{
    AttributeMutator, AttributeSet, AttributeUpdated, MutChannel, MutReceiver, MutReceiverBuilder,
    ReplicatedValue,
};
use log::debug;

/// In-memory stand-in for a network transport: observes one authoritative
/// AttributeSet's dirty signal and ships the dirty values to a replica
pub struct LoopbackTransport {
    builder: MutReceiverBuilder,
    receiver: MutReceiver,
    shipped: usize,
}

impl LoopbackTransport {
    /// Attaches a fresh replication channel to `authority`
    pub fn attach(authority: &mut AttributeSet) -> Self {
        let (sender, builder) = MutChannel::for_schema(authority.schema());
        let receiver = builder.try_build().expect("fresh channel should build a receiver");
        authority.set_mutator(AttributeMutator::new(sender));

        Self {
            builder,
            receiver,
            shipped: 0,
        }
    }

    /// A second observer of the same authority, with its own dirty mask
    pub fn observer(&self) -> MutReceiver {
        self.builder
            .try_build()
            .expect("channel should build another receiver")
    }

    pub fn has_pending(&self) -> bool {
        !self.receiver.diff_mask_is_clear()
    }

    /// Number of values shipped so far
    pub fn shipped(&self) -> usize {
        self.shipped
    }

    /// Ships every dirty attribute and returns the notifications the replica
    /// fired
    pub fn flush(
        &mut self,
        authority: &AttributeSet,
        replica: &mut AttributeSet,
    ) -> Vec<AttributeUpdated> {
        let mask = self.receiver.take_mask();
        let updates = authority.collect_updates(&mask);
        debug!("LoopbackTransport: shipping {} values", updates.len());
        self.deliver(updates, replica)
    }

    /// Ships every replicated attribute regardless of the dirty mask, as when
    /// a replica first comes into scope
    pub fn sync_all(
        &mut self,
        authority: &AttributeSet,
        replica: &mut AttributeSet,
    ) -> Vec<AttributeUpdated> {
        self.receiver.clear_mask();
        self.deliver(authority.collect_all(), replica)
    }

    fn deliver(
        &mut self,
        updates: Vec<ReplicatedValue>,
        replica: &mut AttributeSet,
    ) -> Vec<AttributeUpdated> {
        self.shipped += updates.len();
        updates
            .into_iter()
            .filter_map(|update| {
                replica
                    .try_apply_replicated_at(update.index, update.value)
                    .expect("replica should accept authoritative values")
            })
            .collect()
    }
}
