mod error;
mod graph;
mod info;
mod skill_set;

pub use error::{SkillError, SkillGraphError, UnknownSkillError};
pub use graph::{SkillGraph, SkillGraphBuilder, SkillGroup, SkillGroupInfo};
pub use info::{NoHook, SetFloatOnBuy, SkillCategory, SkillHook, SkillInfo};
pub use skill_set::{PurchaseOutcome, PurchaseRejection, SkillSet};

/// Unlock progress of a single skill node. Ordering follows progression, so
/// `>=` reads as "has reached at least".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkillState {
    Locked,
    Unlocked,
    Purchased,
}

impl SkillState {
    pub const COUNT: u32 = 3;

    pub fn ordinal(&self) -> u8 {
        match self {
            SkillState::Locked => 0,
            SkillState::Unlocked => 1,
            SkillState::Purchased => 2,
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(SkillState::Locked),
            1 => Some(SkillState::Unlocked),
            2 => Some(SkillState::Purchased),
            _ => None,
        }
    }
}
