use rand::Rng;

use super::{Damageable, Entity, FighterPlane, Firing, Movable, Projectile};
use crate::entities::{Body, EntityId, EntityIds, EntityKind, Size, Vec2};

pub const ENEMY_SIZE: Size = Size::new(150.0, 150.0);

const HORIZONTAL_VELOCITY: f64 = -6.0;
const BASE_HEALTH: f64 = 1.0;
const BASE_FIRE_RATE: f64 = 0.01;

const MUZZLE_X: f64 = -100.0;
const MUZZLE_Y: f64 = 50.0;

/// A regular enemy plane flying right to left.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyPlane {
    pub plane: FighterPlane,
    /// Difficulty at spawn time; scales health and fire rate.
    pub difficulty_factor: f64,
}

impl EnemyPlane {
    pub fn new(id: EntityId, x: f64, y: f64, difficulty_factor: f64) -> Self {
        let health = ((BASE_HEALTH * difficulty_factor).floor() as u32).max(1);
        Self {
            plane: FighterPlane::new(Body::new(id, Vec2::new(x, y), ENEMY_SIZE), health),
            difficulty_factor,
        }
    }

    pub fn fire_rate(&self) -> f64 {
        BASE_FIRE_RATE * self.difficulty_factor
    }
}

impl Entity for EnemyPlane {
    fn body(&self) -> &Body {
        &self.plane.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.plane.body
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Enemy
    }
}

impl Movable for EnemyPlane {
    fn update_position<R: Rng + ?Sized>(&mut self, _rng: &mut R) {
        self.plane.body.move_horizontally(HORIZONTAL_VELOCITY);
    }
}

impl Damageable for EnemyPlane {
    fn take_damage(&mut self) {
        self.plane.take_hit();
    }
}

impl Firing for EnemyPlane {
    fn fire_projectile<R: Rng + ?Sized>(
        &mut self,
        ids: &mut EntityIds,
        rng: &mut R,
    ) -> Option<Projectile> {
        if rng.gen::<f64>() >= self.fire_rate() {
            return None;
        }
        let (x, y) = self.plane.muzzle(MUZZLE_X, MUZZLE_Y);
        Some(Projectile::enemy(ids.next_id(), x, y))
    }
}
