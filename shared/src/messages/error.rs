use thiserror::Error;

use wisp_serde::SerdeErr;

use crate::{
    skill::UnknownSkillError,
    types::{AttributeId, EntityId},
};

/// A wire payload that cannot be interpreted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The underlying bit stream was malformed or ran dry
    #[error("malformed sync payload: {0}")]
    Malformed(#[from] SerdeErr),

    /// The envelope was stamped with a version this peer does not speak
    #[error("unsupported protocol version {found} (this peer speaks version {expected})")]
    UnsupportedVersion { expected: u8, found: u8 },

    /// The envelope's message kind is unknown
    #[error("unknown sync message kind {kind}")]
    UnknownKind { kind: u8 },

    /// An enum ordinal does not fit the enumeration it belongs to
    #[error("enum ordinal {ordinal} out of range 0..{len}")]
    OrdinalOutOfRange { ordinal: u32, len: u32 },
}

/// An id in the message does not resolve on this peer — the peers are
/// running different container or protocol revisions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolMismatchError {
    #[error("entity {entity:?} does not resolve on this peer")]
    UnknownEntity { entity: EntityId },

    #[error("attribute id `{attribute}` does not resolve on entity {entity:?}")]
    UnknownAttribute {
        entity: EntityId,
        attribute: AttributeId,
    },
}

/// Everything that can go wrong applying an incoming sync message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    ProtocolMismatch(#[from] ProtocolMismatchError),

    #[error(transparent)]
    UnknownSkill(#[from] UnknownSkillError),
}

impl From<SerdeErr> for SyncError {
    fn from(error: SerdeErr) -> Self {
        SyncError::Decode(DecodeError::Malformed(error))
    }
}
