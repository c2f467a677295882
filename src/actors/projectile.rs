use rand::Rng;

use super::{Damageable, Entity, Movable};
use crate::entities::{Arena, Body, EntityId, EntityKind, ProjectileKind, Side, Size, Vec2};

pub const PLAYER_PROJECTILE_SIZE: Size = Size::new(60.0, 125.0);
pub const ENEMY_PROJECTILE_SIZE: Size = Size::new(50.0, 50.0);
pub const BOSS_PROJECTILE_SIZE: Size = Size::new(75.0, 75.0);

const PLAYER_VELOCITY: f64 = 15.0;
const ENEMY_VELOCITY: f64 = -10.0;
const BOSS_VELOCITY: f64 = -15.0;

/// A shot travelling horizontally at constant speed.  Any hit destroys it.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub body: Body,
    pub kind: ProjectileKind,
    pub velocity: f64,
}

impl Projectile {
    pub fn new(id: EntityId, kind: ProjectileKind, x: f64, y: f64) -> Self {
        let (size, velocity) = match kind {
            ProjectileKind::Player => (PLAYER_PROJECTILE_SIZE, PLAYER_VELOCITY),
            ProjectileKind::Enemy => (ENEMY_PROJECTILE_SIZE, ENEMY_VELOCITY),
            ProjectileKind::Boss => (BOSS_PROJECTILE_SIZE, BOSS_VELOCITY),
        };
        Self {
            body: Body::new(id, Vec2::new(x, y), size),
            kind,
            velocity,
        }
    }

    pub fn player(id: EntityId, x: f64, y: f64) -> Self {
        Self::new(id, ProjectileKind::Player, x, y)
    }

    pub fn enemy(id: EntityId, x: f64, y: f64) -> Self {
        Self::new(id, ProjectileKind::Enemy, x, y)
    }

    pub fn boss(id: EntityId, x: f64, y: f64) -> Self {
        Self::new(id, ProjectileKind::Boss, x, y)
    }

    pub fn side(&self) -> Side {
        self.kind.side()
    }

    /// True once the whole shot is past either horizontal edge.
    pub fn is_out_of_bounds(&self, arena: &Arena) -> bool {
        let hitbox = self.body.hitbox();
        hitbox.right() < 0.0 || hitbox.x > arena.width
    }
}

impl Entity for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Projectile(self.kind)
    }
}

impl Movable for Projectile {
    fn update_position<R: Rng + ?Sized>(&mut self, _rng: &mut R) {
        self.body.move_horizontally(self.velocity);
    }

    fn update_actor<R: Rng + ?Sized>(&mut self, arena: &Arena, rng: &mut R) {
        self.update_position(rng);
        if self.is_out_of_bounds(arena) {
            self.body.destroy();
        }
    }
}

impl Damageable for Projectile {
    fn take_damage(&mut self) {
        self.body.destroy();
    }
}
