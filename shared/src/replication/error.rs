use thiserror::Error;

/// Errors that can occur while handing dirty attributes to a transport
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplicationError {
    /// A dirty mask lock was poisoned or is already held on this thread
    #[error("Dirty mask is held on the current thread or its lock was poisoned")]
    RwLockReentrant,

    /// The channel can no longer hand out receivers
    #[error("Replication channel is unavailable, cannot build a receiver")]
    ChannelUnavailable,
}
