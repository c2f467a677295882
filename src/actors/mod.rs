//! Actor behaviour: how each kind of entity moves, fires and takes damage.
//!
//! Every concrete actor implements only the capabilities it needs.  The enemy
//! group mixes regular planes and the boss, so it is stored as [`Fighter`].

mod boss;
mod enemy;
mod player;
mod projectile;

pub use boss::{Boss, BOSS_HEALTH, MAX_FRAMES_WITH_SHIELD};
pub use enemy::EnemyPlane;
pub use player::Player;
pub use projectile::Projectile;

use rand::Rng;

use crate::entities::{Arena, Body, EntityId, EntityIds, EntityKind, EntitySnapshot, Rect};

// ── Capabilities ──────────────────────────────────────────────────────────────

/// Anything with a body in the world.
pub trait Entity {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;
    fn kind(&self) -> EntityKind;

    fn id(&self) -> EntityId {
        self.body().id
    }

    fn hitbox(&self) -> Rect {
        self.body().hitbox()
    }

    fn is_destroyed(&self) -> bool {
        self.body().is_destroyed()
    }

    fn destroy(&mut self) {
        self.body_mut().destroy();
    }

    fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            id: self.id(),
            kind: self.kind(),
            hitbox: self.hitbox(),
            shielded: false,
        }
    }
}

pub trait Movable: Entity {
    /// Applies this frame's movement, rejecting any step that leaves the
    /// actor's allowed box.
    fn update_position<R: Rng + ?Sized>(&mut self, rng: &mut R);

    /// Per-frame update: movement plus whatever else the actor tracks.
    fn update_actor<R: Rng + ?Sized>(&mut self, _arena: &Arena, rng: &mut R) {
        self.update_position(rng);
    }
}

pub trait Damageable: Entity {
    /// Applies one hit.  Dead actors ignore it.
    fn take_damage(&mut self);
}

pub trait Firing: Entity {
    fn fire_projectile<R: Rng + ?Sized>(
        &mut self,
        ids: &mut EntityIds,
        rng: &mut R,
    ) -> Option<Projectile>;
}

// ── Fighter planes ────────────────────────────────────────────────────────────

/// A body with a health pool.  `health == 0` always means the body is dead.
#[derive(Clone, Debug, PartialEq)]
pub struct FighterPlane {
    pub body: Body,
    pub health: u32,
}

impl FighterPlane {
    pub fn new(body: Body, health: u32) -> Self {
        let mut plane = Self { body, health };
        if plane.health == 0 {
            plane.body.destroy();
        }
        plane
    }

    pub fn take_hit(&mut self) {
        if self.body.is_destroyed() {
            return;
        }
        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            self.body.destroy();
        }
    }

    /// Where a projectile fired with the given muzzle offset starts.
    pub(crate) fn muzzle(&self, dx: f64, dy: f64) -> (f64, f64) {
        let pos = self.body.position();
        (pos.x + dx, pos.y + dy)
    }
}

/// Members of the enemy group.
#[derive(Clone, Debug)]
pub enum Fighter {
    Enemy(EnemyPlane),
    Boss(Boss),
}

impl Fighter {
    pub fn health(&self) -> u32 {
        match self {
            Fighter::Enemy(enemy) => enemy.plane.health,
            Fighter::Boss(boss) => boss.plane.health,
        }
    }

    pub fn as_boss(&self) -> Option<&Boss> {
        match self {
            Fighter::Boss(boss) => Some(boss),
            Fighter::Enemy(_) => None,
        }
    }
}

impl Entity for Fighter {
    fn body(&self) -> &Body {
        match self {
            Fighter::Enemy(enemy) => enemy.body(),
            Fighter::Boss(boss) => boss.body(),
        }
    }

    fn body_mut(&mut self) -> &mut Body {
        match self {
            Fighter::Enemy(enemy) => enemy.body_mut(),
            Fighter::Boss(boss) => boss.body_mut(),
        }
    }

    fn kind(&self) -> EntityKind {
        match self {
            Fighter::Enemy(enemy) => enemy.kind(),
            Fighter::Boss(boss) => boss.kind(),
        }
    }

    fn snapshot(&self) -> EntitySnapshot {
        match self {
            Fighter::Enemy(enemy) => enemy.snapshot(),
            Fighter::Boss(boss) => boss.snapshot(),
        }
    }
}

impl Movable for Fighter {
    fn update_position<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        match self {
            Fighter::Enemy(enemy) => enemy.update_position(rng),
            Fighter::Boss(boss) => boss.update_position(rng),
        }
    }

    fn update_actor<R: Rng + ?Sized>(&mut self, arena: &Arena, rng: &mut R) {
        match self {
            Fighter::Enemy(enemy) => enemy.update_actor(arena, rng),
            Fighter::Boss(boss) => boss.update_actor(arena, rng),
        }
    }
}

impl Damageable for Fighter {
    fn take_damage(&mut self) {
        match self {
            Fighter::Enemy(enemy) => enemy.take_damage(),
            Fighter::Boss(boss) => boss.take_damage(),
        }
    }
}

impl Firing for Fighter {
    fn fire_projectile<R: Rng + ?Sized>(
        &mut self,
        ids: &mut EntityIds,
        rng: &mut R,
    ) -> Option<Projectile> {
        match self {
            Fighter::Enemy(enemy) => enemy.fire_projectile(ids, rng),
            Fighter::Boss(boss) => boss.fire_projectile(ids, rng),
        }
    }
}
