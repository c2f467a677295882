use rand::seq::SliceRandom;
use rand::Rng;

use super::{Damageable, Entity, FighterPlane, Firing, Movable, Projectile};
use crate::entities::{Arena, Body, EntityId, EntityIds, EntityKind, EntitySnapshot, Size, Vec2};

const INITIAL_POSITION: Vec2 = Vec2 { x: 900.0, y: 400.0 };
pub const BOSS_SIZE: Size = Size::new(300.0, 300.0);
pub const BOSS_HEALTH: u32 = 10;

const VERTICAL_VELOCITY: f64 = 8.0;
const MOVE_FREQUENCY_PER_CYCLE: usize = 5;
const MAX_FRAMES_WITH_SAME_MOVE: u32 = 10;
const Y_UPPER_BOUND: f64 = -100.0;
const Y_LOWER_BOUND: f64 = 475.0;

const FIRE_RATE: f64 = 0.04;
const PROJECTILE_X: f64 = 950.0;
const PROJECTILE_Y_OFFSET: f64 = 75.0;

const SHIELD_PROBABILITY: f64 = 0.002;
pub const MAX_FRAMES_WITH_SHIELD: u32 = 500;

/// The final-level boss: wanders vertically and raises a temporary shield.
#[derive(Clone, Debug, PartialEq)]
pub struct Boss {
    pub plane: FighterPlane,
    /// Per-frame vertical deltas, walked in order and reshuffled as it goes.
    pub move_pattern: Vec<f64>,
    pub move_index: usize,
    pub consecutive_moves: u32,
    pub shielded: bool,
    pub frames_with_shield: u32,
}

impl Boss {
    pub fn new<R: Rng + ?Sized>(id: EntityId, rng: &mut R) -> Self {
        let mut move_pattern = Vec::with_capacity(MOVE_FREQUENCY_PER_CYCLE * 3);
        for _ in 0..MOVE_FREQUENCY_PER_CYCLE {
            move_pattern.push(VERTICAL_VELOCITY);
            move_pattern.push(-VERTICAL_VELOCITY);
            move_pattern.push(0.0);
        }
        move_pattern.shuffle(rng);

        Self {
            plane: FighterPlane::new(Body::new(id, INITIAL_POSITION, BOSS_SIZE), BOSS_HEALTH),
            move_pattern,
            move_index: 0,
            consecutive_moves: 0,
            shielded: false,
            frames_with_shield: 0,
        }
    }

    pub fn health(&self) -> u32 {
        self.plane.health
    }

    pub fn activate_shield(&mut self) {
        self.shielded = true;
    }

    pub fn deactivate_shield(&mut self) {
        self.shielded = false;
        self.frames_with_shield = 0;
    }

    fn next_move<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        let current = self.move_pattern[self.move_index];
        self.consecutive_moves += 1;
        if self.consecutive_moves == MAX_FRAMES_WITH_SAME_MOVE {
            self.move_pattern.shuffle(rng);
            self.consecutive_moves = 0;
            self.move_index += 1;
        }
        if self.move_index == self.move_pattern.len() {
            self.move_index = 0;
        }
        current
    }

    fn update_shield<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.shielded {
            self.frames_with_shield += 1;
        } else if rng.gen::<f64>() < SHIELD_PROBABILITY {
            self.activate_shield();
            tracing::debug!(boss = self.plane.body.id.0, "boss shield raised");
        }
        if self.frames_with_shield >= MAX_FRAMES_WITH_SHIELD {
            self.deactivate_shield();
            tracing::debug!(boss = self.plane.body.id.0, "boss shield exhausted");
        }
    }
}

impl Entity for Boss {
    fn body(&self) -> &Body {
        &self.plane.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.plane.body
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Boss
    }

    fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            id: self.id(),
            kind: EntityKind::Boss,
            hitbox: self.hitbox(),
            shielded: self.shielded,
        }
    }
}

impl Movable for Boss {
    fn update_position<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let dy = self.next_move(rng);
        let body = &mut self.plane.body;
        let previous = body.offset.y;
        body.move_vertically(dy);
        let y = body.position().y;
        if !(Y_UPPER_BOUND..=Y_LOWER_BOUND).contains(&y) {
            body.offset.y = previous;
        }
    }

    fn update_actor<R: Rng + ?Sized>(&mut self, _arena: &Arena, rng: &mut R) {
        self.update_position(rng);
        self.update_shield(rng);
    }
}

impl Damageable for Boss {
    fn take_damage(&mut self) {
        if !self.shielded {
            self.plane.take_hit();
        }
    }
}

impl Firing for Boss {
    fn fire_projectile<R: Rng + ?Sized>(
        &mut self,
        ids: &mut EntityIds,
        rng: &mut R,
    ) -> Option<Projectile> {
        if rng.gen::<f64>() >= FIRE_RATE {
            return None;
        }
        let y = self.plane.body.position().y + PROJECTILE_Y_OFFSET;
        Some(Projectile::boss(ids.next_id(), PROJECTILE_X, y))
    }
}
