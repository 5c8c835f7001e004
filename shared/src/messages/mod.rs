pub(crate) mod attribute_update;
mod error;
mod full_state;
mod receiver;
pub(crate) mod skill_state;
mod world;

pub use error::{DecodeError, ProtocolMismatchError, SyncError};
pub use full_state::encode_full_state;
pub use receiver::{Applied, UpdateReceiver};
pub use world::WorldAccess;

use wisp_serde::{BitWriter, Serde};

use crate::types::EntityId;

/// Version stamped onto every envelope; bumped on any wire-format change
pub const PROTOCOL_VERSION: u8 = 1;

/// Discriminates the payload that follows the envelope header
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    AttributeUpdate,
    SkillState,
    FullState,
}

impl MessageKind {
    pub fn ordinal(&self) -> u8 {
        match self {
            MessageKind::AttributeUpdate => 0,
            MessageKind::SkillState => 1,
            MessageKind::FullState => 2,
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(MessageKind::AttributeUpdate),
            1 => Some(MessageKind::SkillState),
            2 => Some(MessageKind::FullState),
            _ => None,
        }
    }
}

/// `[version][kind][entity]`, shared by every envelope
pub(crate) fn write_header(writer: &mut BitWriter, kind: MessageKind, entity: &EntityId) {
    PROTOCOL_VERSION.ser(writer);
    kind.ordinal().ser(writer);
    entity.ser(writer);
}
