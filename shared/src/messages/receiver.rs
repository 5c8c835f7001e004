use log::warn;
use uuid::Uuid;

use wisp_serde::{BitReader, Serde};

use crate::{
    messages::{
        DecodeError, MessageKind, ProtocolMismatchError, SyncError, WorldAccess,
    },
    skill::SkillState,
    sync::config::SyncConfig,
    types::{AttributeId, EntityId},
};

/// What an incoming message changed, reported back to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    AttributeUpdate {
        entity: EntityId,
        attribute: AttributeId,
    },
    SkillState {
        entity: EntityId,
        group: Uuid,
        skill: Uuid,
        state: SkillState,
    },
    FullState {
        entity: EntityId,
    },
}

/// The message boundary of the receiving peer. Decodes an envelope, resolves
/// its targets through the injected [`WorldAccess`] collaborator, and applies
/// the carried state without re-propagating, so nothing echoes back.
pub struct UpdateReceiver {
    config: SyncConfig,
}

impl UpdateReceiver {
    pub fn new(config: SyncConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Applies one encoded message, surfacing every failure as a typed error
    pub fn receive(
        &self,
        bytes: &[u8],
        world: &mut dyn WorldAccess,
    ) -> Result<Applied, SyncError> {
        let mut reader = BitReader::new(bytes);

        let version = u8::de(&mut reader)?;
        if version != self.config.protocol_version {
            return Err(DecodeError::UnsupportedVersion {
                expected: self.config.protocol_version,
                found: version,
            }
            .into());
        }

        let kind_raw = u8::de(&mut reader)?;
        let kind = MessageKind::from_ordinal(kind_raw)
            .ok_or(DecodeError::UnknownKind { kind: kind_raw })?;

        let entity = EntityId::de(&mut reader)?;

        match kind {
            MessageKind::AttributeUpdate => {
                let attribute = AttributeId::de(&mut reader)?;
                let attributes = world
                    .attributes_mut(&entity)
                    .ok_or(ProtocolMismatchError::UnknownEntity { entity })?;
                attributes.apply_update(&attribute, &mut reader)?;
                Ok(Applied::AttributeUpdate { entity, attribute })
            }
            MessageKind::SkillState => {
                let skill = Uuid::de(&mut reader)?;
                let group = Uuid::de(&mut reader)?;
                let state_raw = u8::de(&mut reader)?;
                let state = SkillState::from_ordinal(state_raw).ok_or(
                    DecodeError::OrdinalOutOfRange {
                        ordinal: state_raw as u32,
                        len: SkillState::COUNT,
                    },
                )?;

                let skills = world
                    .skills_mut(&entity)
                    .ok_or(ProtocolMismatchError::UnknownEntity { entity })?;
                skills.apply_state(&group, &skill, state)?;
                Ok(Applied::SkillState {
                    entity,
                    group,
                    skill,
                    state,
                })
            }
            MessageKind::FullState => {
                let attributes = world
                    .attributes_mut(&entity)
                    .ok_or(ProtocolMismatchError::UnknownEntity { entity })?;
                attributes.read_full_state(&mut reader)?;

                let skills = world
                    .skills_mut(&entity)
                    .ok_or(ProtocolMismatchError::UnknownEntity { entity })?;
                skills.read_full_state(&mut reader)?;
                Ok(Applied::FullState { entity })
            }
        }
    }

    /// Boundary entry point for the host's message loop: a faulty message is
    /// dropped and logged, never allowed to take down the processing loop.
    /// Resolution failures additionally trip a debug assertion under
    /// `strict`, since they point at version skew between peers.
    pub fn receive_logged(
        &self,
        bytes: &[u8],
        world: &mut dyn WorldAccess,
    ) -> Option<Applied> {
        match self.receive(bytes, world) {
            Ok(applied) => Some(applied),
            Err(error) => {
                warn!("dropping sync message: {error}");
                if self.config.strict {
                    debug_assert!(
                        !matches!(
                            error,
                            SyncError::ProtocolMismatch(_) | SyncError::UnknownSkill(_)
                        ),
                        "sync resolution failure under strict mode: {error}"
                    );
                }
                None
            }
        }
    }
}
