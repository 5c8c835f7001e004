//! # Wisp Shared
//! Replicated attribute and skill-graph state for companion creatures.
//!
//! One peer per entity holds the [`Authority::Authoritative`] role and
//! originates changes; every replica applies updates arriving from messages.
//! Attributes and skill states encode themselves onto the wire, persist into
//! durable [`Record`]s, and push change notifications to registered
//! callbacks.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use wisp_serde::{
    BitReader, BitWrite, BitWriter, Serde, SerdeErr, UnsignedVariableInteger,
};

pub use uuid::Uuid;

mod authority;
mod record;
mod types;

pub mod attribute;
pub mod messages;
pub mod skill;
pub mod sync;

pub use authority::Authority;
pub use record::{Record, RecordError, RecordPrimitive, RecordValue};
pub use types::{AttributeId, EntityId, SyncMode};

pub use attribute::{
    xp_for_level, Attribute, AttributeError, AttributeHandle, AttributeSet, DisplaySupplier,
    EnumAttribute, EnumTable, Level, LevelProvider, LevelRequirement, LevelSnapshot, LevelTarget,
    SyncedAttribute,
};
pub use messages::{
    encode_full_state, Applied, DecodeError, MessageKind, ProtocolMismatchError, SyncError,
    UpdateReceiver, WorldAccess, PROTOCOL_VERSION,
};
pub use skill::{
    NoHook, PurchaseOutcome, PurchaseRejection, SetFloatOnBuy, SkillCategory, SkillError,
    SkillGraph, SkillGraphBuilder, SkillGraphError, SkillGroup, SkillGroupInfo, SkillHook,
    SkillInfo, SkillSet, SkillState, UnknownSkillError,
};
pub use sync::{ChannelError, OutboundMessage, SyncChannel, SyncConfig, SyncReceiver, SyncSender};
