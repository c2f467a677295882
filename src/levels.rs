//! The built-in levels and the registry that resolves level identifiers.

use crate::error::GameError;
use crate::level::{LevelDescriptor, Objective};
use crate::spawn::SpawnPolicy;

pub const LEVEL_ONE: &str = "level-one";
pub const LEVEL_TWO: &str = "level-two";
pub const LEVEL_THREE: &str = "level-three";

const PLAYER_INITIAL_HEALTH: u32 = 5;
const KILLS_TO_ADVANCE: u32 = 10;

pub fn level_one() -> LevelDescriptor {
    LevelDescriptor {
        id: LEVEL_ONE,
        name: "Level 1",
        spawn: SpawnPolicy::Waves {
            target_enemies: 5,
            probability: 0.20,
        },
        objective: Objective::KillTarget(KILLS_TO_ADVANCE),
        player_health: PLAYER_INITIAL_HEALTH,
        next: Some(LEVEL_TWO),
    }
}

pub fn level_two() -> LevelDescriptor {
    LevelDescriptor {
        id: LEVEL_TWO,
        name: "Level 2",
        spawn: SpawnPolicy::Waves {
            target_enemies: 10,
            probability: 0.40,
        },
        objective: Objective::KillTarget(KILLS_TO_ADVANCE),
        player_health: PLAYER_INITIAL_HEALTH,
        next: Some(LEVEL_THREE),
    }
}

pub fn level_three() -> LevelDescriptor {
    LevelDescriptor {
        id: LEVEL_THREE,
        name: "Level 3: Boss",
        spawn: SpawnPolicy::Boss,
        objective: Objective::DefeatBoss,
        player_health: PLAYER_INITIAL_HEALTH,
        next: None,
    }
}

pub type LevelConstructor = fn() -> LevelDescriptor;

/// Identifier → constructor table.  Lookups of unknown ids are errors.
#[derive(Clone, Debug)]
pub struct LevelRegistry {
    entries: Vec<(&'static str, LevelConstructor)>,
}

impl LevelRegistry {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Level 1 → Level 2 → Level 3.
    pub fn builtin() -> Self {
        Self::empty()
            .with(LEVEL_ONE, level_one)
            .with(LEVEL_TWO, level_two)
            .with(LEVEL_THREE, level_three)
    }

    /// Registers `constructor` under `id`, replacing any previous entry.
    pub fn with(mut self, id: &'static str, constructor: LevelConstructor) -> Self {
        self.entries.retain(|(existing, _)| *existing != id);
        self.entries.push((id, constructor));
        self
    }

    pub fn resolve(&self, id: &str) -> Result<LevelDescriptor, GameError> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, constructor)| constructor())
            .ok_or_else(|| GameError::UnknownLevel(id.to_string()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }
}

impl Default for LevelRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
