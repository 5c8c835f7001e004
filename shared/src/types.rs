use std::fmt;

use wisp_serde::{BitReader, BitWrite, Serde, SerdeErr};

/// Identifies a live entity instance; the same value resolves to the same
/// entity on both peers.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct EntityId(u64);

impl EntityId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }
}

impl Serde for EntityId {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.0.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self(u64::de(reader)?))
    }

    fn bit_length(&self) -> u32 {
        self.0.bit_length()
    }
}

/// Stable identity of an attribute. Carried in every live update message and
/// resolved through the receiving container's id map, so peers stay
/// compatible even if registration order drifts between versions.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct AttributeId(String);

impl AttributeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serde for AttributeId {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.0.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self(String::de(reader)?))
    }

    fn bit_length(&self) -> u32 {
        self.0.bit_length()
    }
}

/// Whether a state change should be propagated to the remote peer.
///
/// `LocalOnly` is the apply path for values arriving from the remote peer or
/// from a persisted record; it must never produce an outbound message, which
/// is what breaks the echo loop between the two peers.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SyncMode {
    Propagate,
    LocalOnly,
}

impl SyncMode {
    pub fn propagates(&self) -> bool {
        matches!(self, SyncMode::Propagate)
    }
}
