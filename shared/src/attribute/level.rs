use std::collections::HashMap;

/// The disciplines a companion levels up in
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Level {
    Combat,
    Mining,
    Woodcutting,
    Farming,
}

impl Level {
    pub const ALL: [Level; 4] = [
        Level::Combat,
        Level::Mining,
        Level::Woodcutting,
        Level::Farming,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Level::Combat => "combat_level",
            Level::Mining => "mining_level",
            Level::Woodcutting => "woodcutting_level",
            Level::Farming => "farming_level",
        }
    }
}

/// What a level requirement measures against
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum LevelTarget {
    Level(Level),
    /// The sum of all discipline levels
    Total,
}

/// A minimum-level precondition on a skill node
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LevelRequirement {
    pub target: LevelTarget,
    pub minimum: u32,
}

impl LevelRequirement {
    pub fn level(level: Level, minimum: u32) -> Self {
        Self {
            target: LevelTarget::Level(level),
            minimum,
        }
    }

    pub fn total(minimum: u32) -> Self {
        Self {
            target: LevelTarget::Total,
            minimum,
        }
    }

    pub fn holds(&self, levels: &dyn LevelProvider) -> bool {
        let current = match self.target {
            LevelTarget::Level(level) => levels.level(level),
            LevelTarget::Total => levels.total_level(),
        };
        current >= self.minimum
    }
}

/// Supplies current levels to skill unlock evaluation
pub trait LevelProvider {
    fn level(&self, level: Level) -> u32;

    fn total_level(&self) -> u32 {
        Level::ALL.iter().map(|level| self.level(*level)).sum()
    }
}

/// A plain map of levels, handy for assembling a view over level attributes
#[derive(Clone, Debug, Default)]
pub struct LevelSnapshot {
    levels: HashMap<Level, u32>,
}

impl LevelSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, level: Level, value: u32) -> Self {
        self.set(level, value);
        self
    }

    pub fn set(&mut self, level: Level, value: u32) {
        self.levels.insert(level, value);
    }
}

impl LevelProvider for LevelSnapshot {
    fn level(&self, level: Level) -> u32 {
        self.levels.get(&level).copied().unwrap_or(0)
    }
}

const BASE_XP: f64 = 40.0;
const XP_GROWTH: f64 = 1.1;

/// Experience required to advance from `level` to `level + 1`; a geometric
/// curve that roughly adds 10% per level.
pub fn xp_for_level(level: u32) -> u32 {
    let exponent = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    (BASE_XP * XP_GROWTH.powi(exponent)).round() as u32
}
