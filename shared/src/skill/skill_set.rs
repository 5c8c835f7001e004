use std::sync::Arc;

use log::warn;
use uuid::Uuid;

use wisp_serde::{BitReader, BitWrite, Serde};

use crate::{
    attribute::{AttributeSet, LevelProvider},
    authority::Authority,
    messages::{skill_state, DecodeError},
    record::{Record, RecordError, RecordValue},
    skill::{SkillError, SkillGraph, SkillState, UnknownSkillError},
    sync::channel::{OutboundMessage, SyncSender},
    types::{EntityId, SyncMode},
};

/// Result of a buy attempt. Rejection is a normal outcome, not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// The node transitioned to `Purchased` and its hook ran
    Purchased,
    /// The node was already `Purchased`; nothing happened
    AlreadyPurchased,
    Rejected(PurchaseRejection),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PurchaseRejection {
    /// The node has not reached `Unlocked` yet
    NotUnlocked,
    /// The node's purchase hook returned false
    HookDeclined,
}

/// One entity's mutable view of the shared [`SkillGraph`]: an arena of
/// per-node states addressed by `(group id, skill id)`, mirroring the
/// attribute sync pattern for propagation and authority.
pub struct SkillSet {
    graph: Arc<SkillGraph>,
    entity: EntityId,
    authority: Authority,
    states: Vec<SkillState>,
    sender: SyncSender,
}

impl SkillSet {
    pub fn new(
        graph: Arc<SkillGraph>,
        entity: EntityId,
        authority: Authority,
        sender: SyncSender,
    ) -> Self {
        let states = graph.default_states();
        Self {
            graph,
            entity,
            authority,
            states,
            sender,
        }
    }

    pub fn graph(&self) -> &Arc<SkillGraph> {
        &self.graph
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn authority(&self) -> Authority {
        self.authority
    }

    pub fn state(&self, group: &Uuid, skill: &Uuid) -> Result<SkillState, UnknownSkillError> {
        let slot = self.resolve(group, skill)?;
        Ok(self.states[slot])
    }

    /// Sets a node's state. With `SyncMode::Propagate` this requires the
    /// authoritative role and enqueues one skill state message.
    pub fn set_state(
        &mut self,
        group: &Uuid,
        skill: &Uuid,
        state: SkillState,
        mode: SyncMode,
    ) -> Result<(), SkillError> {
        let slot = self.resolve(group, skill)?;
        self.set_state_slot(*group, *skill, slot, state, mode)
    }

    /// Whether a `Locked` node currently satisfies its unlock conditions:
    /// every parent has reached the node's required parent state and every
    /// level requirement holds.
    pub fn can_unlock(
        &self,
        group: &Uuid,
        skill: &Uuid,
        levels: &dyn LevelProvider,
    ) -> Result<bool, UnknownSkillError> {
        let slot = self.resolve(group, skill)?;
        if self.states[slot] != SkillState::Locked {
            return Ok(false);
        }
        let group_record = self
            .graph
            .group(group)
            .ok_or(UnknownSkillError::UnknownGroup { group: *group })?;
        let info = group_record
            .skill(skill)
            .ok_or(UnknownSkillError::UnknownSkill {
                group: *group,
                skill: *skill,
            })?;
        Ok(self.meets_unlock_conditions(group_record, info, levels))
    }

    /// Walks every `Locked` node and transitions those whose conditions now
    /// hold, repeating until nothing more unlocks (an unlock can satisfy a
    /// child whose parent policy is `Unlocked`). Returns the
    /// `(group, skill)` pairs that transitioned.
    pub fn refresh_unlocks(
        &mut self,
        levels: &dyn LevelProvider,
        mode: SyncMode,
    ) -> Result<Vec<(Uuid, Uuid)>, SkillError> {
        if mode.propagates() && !self.authority.can_originate() {
            return Err(SkillError::NotAuthoritative {
                entity: self.entity,
            });
        }

        let graph = self.graph.clone();
        let mut newly_unlocked = Vec::new();
        loop {
            let mut changed = false;
            for (group, info, slot) in graph.iter() {
                if self.states[slot] != SkillState::Locked {
                    continue;
                }
                if self.meets_unlock_conditions(group, info, levels) {
                    self.set_state_slot(group.id(), info.id, slot, SkillState::Unlocked, mode)?;
                    newly_unlocked.push((group.id(), info.id));
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        Ok(newly_unlocked)
    }

    /// Attempts to purchase an `Unlocked` node. The hook's side effects run
    /// before the state transition; if the hook declines, nothing changes.
    /// Buying an already purchased node is a no-op.
    pub fn try_buy(
        &mut self,
        group: &Uuid,
        skill: &Uuid,
        attributes: &mut AttributeSet,
        mode: SyncMode,
    ) -> Result<PurchaseOutcome, SkillError> {
        if mode.propagates() && !self.authority.can_originate() {
            return Err(SkillError::NotAuthoritative {
                entity: self.entity,
            });
        }

        let slot = self.resolve(group, skill)?;
        match self.states[slot] {
            SkillState::Purchased => Ok(PurchaseOutcome::AlreadyPurchased),
            SkillState::Locked => Ok(PurchaseOutcome::Rejected(PurchaseRejection::NotUnlocked)),
            SkillState::Unlocked => {
                let graph = self.graph.clone();
                let info = graph
                    .skill(group, skill)
                    .expect("slot resolved, so the skill exists");

                if !info.hook.on_try_buy(info, attributes) {
                    return Ok(PurchaseOutcome::Rejected(PurchaseRejection::HookDeclined));
                }

                self.set_state_slot(*group, *skill, slot, SkillState::Purchased, mode)?;
                Ok(PurchaseOutcome::Purchased)
            }
        }
    }

    /// Receive path: applies a state arriving from the remote peer without
    /// re-propagating
    pub(crate) fn apply_state(
        &mut self,
        group: &Uuid,
        skill: &Uuid,
        state: SkillState,
    ) -> Result<(), UnknownSkillError> {
        let slot = self.resolve(group, skill)?;
        self.states[slot] = state;
        Ok(())
    }

    // Persistence

    /// One sub-record per group, holding each skill's state ordinal keyed by
    /// the skill's id
    pub fn write_record(&self) -> Record {
        let mut record = Record::new();
        for group in self.graph.groups() {
            let mut sub = Record::new();
            for info in group.skills() {
                let slot = group
                    .slot_of(&info.id)
                    .expect("skills are validated at graph build");
                sub.put(
                    info.id.to_string(),
                    RecordValue::I32(self.states[slot].ordinal() as i32),
                );
            }
            record.put(group.id().to_string(), RecordValue::Record(sub));
        }
        record
    }

    /// Restores every persisted state; skills without an entry keep their
    /// default, so graphs can grow without breaking older saves.
    pub fn read_record(&mut self, record: &Record) -> Result<(), RecordError> {
        let graph = self.graph.clone();
        for (group, info, slot) in graph.iter() {
            let Some(RecordValue::Record(sub)) = record.get(&group.id().to_string()) else {
                continue;
            };
            let key = info.id.to_string();
            if !sub.contains(&key) {
                continue;
            }
            let raw = sub.get_i32(&key)?;
            let state = u8::try_from(raw)
                .ok()
                .and_then(SkillState::from_ordinal)
                .ok_or(RecordError::OrdinalOutOfRange {
                    key,
                    ordinal: raw,
                    len: SkillState::COUNT,
                })?;
            self.states[slot] = state;
        }
        Ok(())
    }

    // Full-state snapshot

    /// Writes every node's state ordinal in graph (arena) order
    pub fn write_full_state(&self, writer: &mut dyn BitWrite) {
        for state in &self.states {
            state.ordinal().ser(writer);
        }
    }

    /// Reads every node's state ordinal in graph (arena) order
    pub fn read_full_state(&mut self, reader: &mut BitReader) -> Result<(), DecodeError> {
        for slot in 0..self.states.len() {
            let raw = u8::de(reader)?;
            let state =
                SkillState::from_ordinal(raw).ok_or(DecodeError::OrdinalOutOfRange {
                    ordinal: raw as u32,
                    len: SkillState::COUNT,
                })?;
            self.states[slot] = state;
        }
        Ok(())
    }

    // Internals

    fn resolve(&self, group: &Uuid, skill: &Uuid) -> Result<usize, UnknownSkillError> {
        let group_record = self
            .graph
            .group(group)
            .ok_or(UnknownSkillError::UnknownGroup { group: *group })?;
        group_record
            .slot_of(skill)
            .ok_or(UnknownSkillError::UnknownSkill {
                group: *group,
                skill: *skill,
            })
    }

    fn meets_unlock_conditions(
        &self,
        group: &crate::skill::SkillGroup,
        info: &crate::skill::SkillInfo,
        levels: &dyn LevelProvider,
    ) -> bool {
        for parent in &info.parents {
            let parent_slot = group
                .slot_of(parent)
                .expect("parents are validated at graph build");
            if self.states[parent_slot] < info.parents_must_be {
                return false;
            }
        }
        info.requirements
            .iter()
            .all(|requirement| requirement.holds(levels))
    }

    fn set_state_slot(
        &mut self,
        group: Uuid,
        skill: Uuid,
        slot: usize,
        state: SkillState,
        mode: SyncMode,
    ) -> Result<(), SkillError> {
        if mode.propagates() && !self.authority.can_originate() {
            return Err(SkillError::NotAuthoritative {
                entity: self.entity,
            });
        }

        self.states[slot] = state;

        if mode.propagates() {
            let bytes = skill_state::encode(&self.entity, &skill, &group, state);
            if !self.sender.send(OutboundMessage {
                entity: self.entity,
                bytes,
            }) {
                warn!(
                    "failed to enqueue skill state for entity {:?}, skill {skill}",
                    self.entity
                );
            }
        }
        Ok(())
    }
}
