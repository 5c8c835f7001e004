use std::collections::HashMap;

use wisp_shared::{AttributeSet, EntityId, SkillSet, WorldAccess};

use crate::helpers::companion::Companion;

/// Simple HashMap-backed world, standing in for the host engine's entity
/// registry
pub struct TestWorld {
    entities: HashMap<EntityId, Companion>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self {
            entities: HashMap::new(),
        }
    }
}

impl TestWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: EntityId, companion: Companion) {
        self.entities.insert(entity, companion);
    }

    pub fn companion(&self, entity: &EntityId) -> &Companion {
        self.entities.get(entity).expect("entity was spawned")
    }

    pub fn companion_mut(&mut self, entity: &EntityId) -> &mut Companion {
        self.entities.get_mut(entity).expect("entity was spawned")
    }
}

impl WorldAccess for TestWorld {
    fn attributes_mut(&mut self, entity: &EntityId) -> Option<&mut AttributeSet> {
        self.entities
            .get_mut(entity)
            .map(|companion| &mut companion.attributes)
    }

    fn skills_mut(&mut self, entity: &EntityId) -> Option<&mut SkillSet> {
        self.entities
            .get_mut(entity)
            .map(|companion| &mut companion.skills)
    }
}
