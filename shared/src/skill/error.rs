use thiserror::Error;
use uuid::Uuid;

use crate::types::EntityId;

/// A group or skill id that is absent from the receiver's static skill graph
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnknownSkillError {
    #[error("skill group {group} is not part of this skill graph")]
    UnknownGroup { group: Uuid },

    #[error("skill {skill} is not part of group {group}")]
    UnknownSkill { group: Uuid, skill: Uuid },
}

/// Errors detected while validating a skill graph at build time
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkillGraphError {
    #[error("skill group {group} is declared more than once")]
    DuplicateGroup { group: Uuid },

    #[error("skill {skill} is declared more than once in group {group}")]
    DuplicateSkill { group: Uuid, skill: Uuid },

    #[error("skill {skill} in group {group} names unknown parent {parent}")]
    UnknownParent {
        group: Uuid,
        skill: Uuid,
        parent: Uuid,
    },

    #[error("skill {skill} in group {group} is part of a parent cycle")]
    ParentCycle { group: Uuid, skill: Uuid },
}

/// Errors that can occur during per-entity skill state operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkillError {
    #[error(transparent)]
    Unknown(#[from] UnknownSkillError),

    /// Attempted to originate a state change from a non-authoritative peer
    #[error("skill state for entity {entity:?} may only propagate from the Authoritative role")]
    NotAuthoritative { entity: EntityId },
}
