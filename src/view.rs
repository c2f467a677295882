//! The boundary between the core and whatever presents it.
//!
//! A level reports everything a front-end needs through [`LevelView`]; all
//! methods default to doing nothing so a collaborator only implements what it
//! shows.

use crate::entities::{EntityId, EntityKind};
use crate::level::LevelDescriptor;

pub trait LevelView {
    fn level_started(&mut self, _level: &LevelDescriptor) {}
    fn entity_added(&mut self, _id: EntityId, _kind: EntityKind) {}
    fn entity_removed(&mut self, _id: EntityId) {}
    fn health_changed(&mut self, _remaining: u32) {}
    /// Kills in the current level.
    fn kills_changed(&mut self, _total: u32) {}
    /// Kills across the whole run.
    fn score_changed(&mut self, _score: u32) {}
    fn difficulty_changed(&mut self, _factor: f64) {}
    fn enemy_count_changed(&mut self, _count: usize) {}
    fn shield_changed(&mut self, _shielded: bool) {}
    fn game_won(&mut self) {}
    fn game_lost(&mut self) {}
}

/// A view that ignores everything.
impl LevelView for () {}

// ── Recording ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum ViewEvent {
    LevelStarted(&'static str),
    EntityAdded(EntityId, EntityKind),
    EntityRemoved(EntityId),
    HealthChanged(u32),
    KillsChanged(u32),
    ScoreChanged(u32),
    DifficultyChanged(f64),
    EnemyCountChanged(usize),
    ShieldChanged(bool),
    GameWon,
    GameLost,
}

/// Keeps every notification in order.  Handy for replays and tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingView {
    pub events: Vec<ViewEvent>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, event: &ViewEvent) -> bool {
        self.events.contains(event)
    }

    /// Ids added and not yet removed, in insertion order.
    pub fn on_surface(&self) -> Vec<EntityId> {
        let mut live = Vec::new();
        for event in &self.events {
            match event {
                ViewEvent::EntityAdded(id, _) => live.push(*id),
                ViewEvent::EntityRemoved(id) => live.retain(|other| other != id),
                _ => {}
            }
        }
        live
    }

    pub fn last_score(&self) -> Option<u32> {
        self.events.iter().rev().find_map(|event| match event {
            ViewEvent::ScoreChanged(score) => Some(*score),
            _ => None,
        })
    }

    pub fn last_health(&self) -> Option<u32> {
        self.events.iter().rev().find_map(|event| match event {
            ViewEvent::HealthChanged(health) => Some(*health),
            _ => None,
        })
    }
}

impl LevelView for RecordingView {
    fn level_started(&mut self, level: &LevelDescriptor) {
        self.events.push(ViewEvent::LevelStarted(level.id));
    }
    fn entity_added(&mut self, id: EntityId, kind: EntityKind) {
        self.events.push(ViewEvent::EntityAdded(id, kind));
    }
    fn entity_removed(&mut self, id: EntityId) {
        self.events.push(ViewEvent::EntityRemoved(id));
    }
    fn health_changed(&mut self, remaining: u32) {
        self.events.push(ViewEvent::HealthChanged(remaining));
    }
    fn kills_changed(&mut self, total: u32) {
        self.events.push(ViewEvent::KillsChanged(total));
    }
    fn score_changed(&mut self, score: u32) {
        self.events.push(ViewEvent::ScoreChanged(score));
    }
    fn difficulty_changed(&mut self, factor: f64) {
        self.events.push(ViewEvent::DifficultyChanged(factor));
    }
    fn enemy_count_changed(&mut self, count: usize) {
        self.events.push(ViewEvent::EnemyCountChanged(count));
    }
    fn shield_changed(&mut self, shielded: bool) {
        self.events.push(ViewEvent::ShieldChanged(shielded));
    }
    fn game_won(&mut self) {
        self.events.push(ViewEvent::GameWon);
    }
    fn game_lost(&mut self) {
        self.events.push(ViewEvent::GameLost);
    }
}
