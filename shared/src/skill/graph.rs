use std::collections::HashMap;

use uuid::Uuid;

use crate::skill::{SkillGraphError, SkillInfo, SkillState};

/// Input form of a skill group, fed to the graph builder
pub struct SkillGroupInfo {
    pub id: Uuid,
    pub key: String,
    pub skills: Vec<SkillInfo>,
}

impl SkillGroupInfo {
    pub fn new(id: Uuid, key: impl Into<String>) -> Self {
        Self {
            id,
            key: key.into(),
            skills: Vec::new(),
        }
    }

    pub fn with_skill(mut self, skill: SkillInfo) -> Self {
        self.skills.push(skill);
        self
    }
}

/// A validated group inside a [`SkillGraph`]
pub struct SkillGroup {
    id: Uuid,
    key: String,
    skills: Vec<SkillInfo>,
    /// First arena slot of this group; skills occupy `base_slot..base_slot + len`
    base_slot: usize,
    local_slots: HashMap<Uuid, usize>,
}

impl SkillGroup {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn skills(&self) -> &[SkillInfo] {
        &self.skills
    }

    pub fn skill(&self, skill: &Uuid) -> Option<&SkillInfo> {
        self.local_slots.get(skill).map(|slot| &self.skills[*slot])
    }

    pub(crate) fn slot_of(&self, skill: &Uuid) -> Option<usize> {
        self.local_slots.get(skill).map(|slot| self.base_slot + slot)
    }
}

/// The static skill unlock graph, shared by every entity instance. Nodes
/// and their hooks are immutable after `build`; only per-entity
/// [`SkillSet`](crate::skill::SkillSet) state changes at runtime.
pub struct SkillGraph {
    groups: Vec<SkillGroup>,
    group_slots: HashMap<Uuid, usize>,
    skill_count: usize,
}

impl SkillGraph {
    pub fn builder() -> SkillGraphBuilder {
        SkillGraphBuilder { groups: Vec::new() }
    }

    pub fn groups(&self) -> &[SkillGroup] {
        &self.groups
    }

    pub fn group(&self, group: &Uuid) -> Option<&SkillGroup> {
        self.group_slots.get(group).map(|slot| &self.groups[*slot])
    }

    pub fn skill(&self, group: &Uuid, skill: &Uuid) -> Option<&SkillInfo> {
        self.group(group)?.skill(skill)
    }

    /// Arena slot of a skill, unique across all groups
    pub fn slot_of(&self, group: &Uuid, skill: &Uuid) -> Option<usize> {
        self.group(group)?.slot_of(skill)
    }

    pub fn skill_count(&self) -> usize {
        self.skill_count
    }

    /// Every skill in arena order, with its group and slot
    pub fn iter(&self) -> impl Iterator<Item = (&SkillGroup, &SkillInfo, usize)> {
        self.groups.iter().flat_map(|group| {
            group
                .skills
                .iter()
                .enumerate()
                .map(move |(index, info)| (group, info, group.base_slot + index))
        })
    }

    /// Initial per-entity state arena
    pub fn default_states(&self) -> Vec<SkillState> {
        self.iter().map(|(_, info, _)| info.default_state).collect()
    }
}

/// Assembles and validates a [`SkillGraph`]
pub struct SkillGraphBuilder {
    groups: Vec<SkillGroupInfo>,
}

impl SkillGraphBuilder {
    pub fn add_group(mut self, group: SkillGroupInfo) -> Self {
        self.groups.push(group);
        self
    }

    pub fn build(self) -> Result<SkillGraph, SkillGraphError> {
        let mut groups: Vec<SkillGroup> = Vec::with_capacity(self.groups.len());
        let mut group_slots = HashMap::new();
        let mut next_slot = 0;

        for info in self.groups {
            if group_slots.contains_key(&info.id) {
                return Err(SkillGraphError::DuplicateGroup { group: info.id });
            }

            let mut local_slots = HashMap::new();
            for (index, skill) in info.skills.iter().enumerate() {
                if local_slots.insert(skill.id, index).is_some() {
                    return Err(SkillGraphError::DuplicateSkill {
                        group: info.id,
                        skill: skill.id,
                    });
                }
            }

            for skill in &info.skills {
                for parent in &skill.parents {
                    if !local_slots.contains_key(parent) {
                        return Err(SkillGraphError::UnknownParent {
                            group: info.id,
                            skill: skill.id,
                            parent: *parent,
                        });
                    }
                }
            }

            Self::check_cycles(&info, &local_slots)?;

            group_slots.insert(info.id, groups.len());
            let base_slot = next_slot;
            next_slot += info.skills.len();
            groups.push(SkillGroup {
                id: info.id,
                key: info.key,
                skills: info.skills,
                base_slot,
                local_slots,
            });
        }

        Ok(SkillGraph {
            groups,
            group_slots,
            skill_count: next_slot,
        })
    }

    fn check_cycles(
        group: &SkillGroupInfo,
        local_slots: &HashMap<Uuid, usize>,
    ) -> Result<(), SkillGraphError> {
        // Colors: 0 unvisited, 1 on the current path, 2 done
        let mut colors = vec![0u8; group.skills.len()];

        for start in 0..group.skills.len() {
            if colors[start] != 0 {
                continue;
            }
            // Depth-first walk along parent edges with an explicit stack
            let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
            colors[start] = 1;

            while let Some((node, parent_index)) = stack.pop() {
                let parents = &group.skills[node].parents;
                if parent_index >= parents.len() {
                    colors[node] = 2;
                    continue;
                }
                stack.push((node, parent_index + 1));

                let next = local_slots[&parents[parent_index]];
                match colors[next] {
                    0 => {
                        colors[next] = 1;
                        stack.push((next, 0));
                    }
                    1 => {
                        return Err(SkillGraphError::ParentCycle {
                            group: group.id,
                            skill: group.skills[next].id,
                        });
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }
}
