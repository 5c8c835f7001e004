use thiserror::Error;

/// Errors that can occur on the outbound sync channel
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// The queue lock was poisoned by a panicking writer
    #[error("sync channel lock poisoned")]
    LockPoisoned,
}
