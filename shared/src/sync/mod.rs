pub mod channel;
pub mod config;
pub mod error;

pub use channel::{OutboundMessage, SyncChannel, SyncReceiver, SyncSender};
pub use config::SyncConfig;
pub use error::ChannelError;
