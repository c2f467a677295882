//! Session-wide settings.  Defaults give the stock three-level game.

use std::time::Duration;

use crate::entities::Arena;
use crate::levels::LEVEL_ONE;

pub const FRAME_PERIOD: Duration = Duration::from_millis(50);
pub const AUTO_FIRE_PERIOD: Duration = Duration::from_millis(500);

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub arena: Arena,
    /// Cadence of the main frame clock.
    pub frame_period: Duration,
    /// Cadence of the player's auto-fire clock.
    pub auto_fire_period: Duration,
    /// Keep the player's remaining health across levels instead of resetting
    /// it to the next level's starting value.
    pub carry_health: bool,
    pub start_level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena: Arena::default(),
            frame_period: FRAME_PERIOD,
            auto_fire_period: AUTO_FIRE_PERIOD,
            carry_health: false,
            start_level: LEVEL_ONE.to_string(),
        }
    }
}
