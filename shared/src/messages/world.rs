use crate::{attribute::AttributeSet, skill::SkillSet, types::EntityId};

/// Injected collaborator resolving entity references to their replicated
/// containers. The host engine implements this over whatever world model it
/// keeps; `None` means the entity does not resolve on this peer.
pub trait WorldAccess {
    fn attributes_mut(&mut self, entity: &EntityId) -> Option<&mut AttributeSet>;
    fn skills_mut(&mut self, entity: &EntityId) -> Option<&mut SkillSet>;
}
