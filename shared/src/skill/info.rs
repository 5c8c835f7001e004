use std::sync::Arc;

use log::warn;
use uuid::Uuid;

use crate::{
    attribute::{Attribute, AttributeSet, LevelRequirement},
    skill::SkillState,
    types::{AttributeId, SyncMode},
};

/// Broad grouping of what a skill node grants
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkillCategory {
    /// Permanently changes a stat attribute
    Stat,
    /// Grants a new behavior
    Ability,
    Other,
}

/// Side effects of purchasing a skill node. Runs on the authoritative side
/// during a buy attempt; returning `false` rejects the purchase and the node
/// stays `Unlocked`.
pub trait SkillHook: Send + Sync {
    fn on_try_buy(&self, skill: &SkillInfo, attributes: &mut AttributeSet) -> bool;
}

/// Hook for nodes that are pure unlocks with no immediate effect
pub struct NoHook;

impl SkillHook for NoHook {
    fn on_try_buy(&self, _skill: &SkillInfo, _attributes: &mut AttributeSet) -> bool {
        true
    }
}

/// Writes a float attribute when the node is bought. The write is local
/// only; the skill state message carries the purchase to the remote peer,
/// which keeps one wire message per buy.
pub struct SetFloatOnBuy {
    pub attribute: AttributeId,
    pub value: f32,
}

impl SkillHook for SetFloatOnBuy {
    fn on_try_buy(&self, skill: &SkillInfo, attributes: &mut AttributeSet) -> bool {
        let Some(attribute) = attributes.get_by_id_mut::<Attribute<f32>>(&self.attribute) else {
            warn!(
                "skill `{}` buy hook targets unknown attribute `{}`",
                skill.key, self.attribute
            );
            return false;
        };
        attribute.set(self.value, SyncMode::LocalOnly).is_ok()
    }
}

/// Static description of one node in the skill graph. Defined once,
/// immutable; only the per-entity state in a
/// [`SkillSet`](crate::skill::SkillSet) ever changes.
#[derive(Clone)]
pub struct SkillInfo {
    pub id: Uuid,
    pub key: String,
    pub category: SkillCategory,
    /// State a fresh entity starts the node in
    pub default_state: SkillState,
    /// Ids of prerequisite nodes within the same group
    pub parents: Vec<Uuid>,
    /// Minimum state every parent must have reached before this node can
    /// unlock
    pub parents_must_be: SkillState,
    pub requirements: Vec<LevelRequirement>,
    pub hook: Arc<dyn SkillHook>,
}

impl SkillInfo {
    pub fn new(id: Uuid, key: impl Into<String>, category: SkillCategory) -> Self {
        Self {
            id,
            key: key.into(),
            category,
            default_state: SkillState::Locked,
            parents: Vec::new(),
            parents_must_be: SkillState::Purchased,
            requirements: Vec::new(),
            hook: Arc::new(NoHook),
        }
    }

    pub fn with_default_state(mut self, state: SkillState) -> Self {
        self.default_state = state;
        self
    }

    pub fn with_parent(mut self, parent: Uuid) -> Self {
        self.parents.push(parent);
        self
    }

    pub fn with_parents_must_be(mut self, state: SkillState) -> Self {
        self.parents_must_be = state;
        self
    }

    pub fn with_requirement(mut self, requirement: LevelRequirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    pub fn with_hook(mut self, hook: Arc<dyn SkillHook>) -> Self {
        self.hook = hook;
        self
    }
}
