use rand::Rng;

use super::{Damageable, Entity, FighterPlane, Firing, Movable, Projectile};
use crate::entities::{Body, EntityId, EntityIds, EntityKind, Size, Vec2};
use crate::input::{Direction, InputEvent};

const INITIAL_POSITION: Vec2 = Vec2 { x: 5.0, y: 300.0 };
pub const PLAYER_SIZE: Size = Size::new(150.0, 150.0);

const VERTICAL_VELOCITY: f64 = 8.0;
const HORIZONTAL_VELOCITY: f64 = 8.0;
const Y_UPPER_BOUND: f64 = -40.0;
const Y_LOWER_BOUND: f64 = 600.0;
const X_LEFT_BOUND: f64 = 0.0;
const X_RIGHT_BOUND: f64 = 800.0;

const MUZZLE_X: f64 = 110.0;
const MUZZLE_Y: f64 = 20.0;

/// The user-controlled plane.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub plane: FighterPlane,
    /// -1 up, 0 still, 1 down.
    pub vertical: i8,
    /// -1 left, 0 still, 1 right.
    pub horizontal: i8,
    pub total_kills: u32,
    /// Kills since difficulty last went up.
    pub kills_since_last_reset: u32,
}

impl Player {
    pub fn new(id: EntityId, health: u32) -> Self {
        Self {
            plane: FighterPlane::new(Body::new(id, INITIAL_POSITION, PLAYER_SIZE), health),
            vertical: 0,
            horizontal: 0,
            total_kills: 0,
            kills_since_last_reset: 0,
        }
    }

    pub fn health(&self) -> u32 {
        self.plane.health
    }

    pub fn apply_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::MoveStart(Direction::Up) => self.vertical = -1,
            InputEvent::MoveStart(Direction::Down) => self.vertical = 1,
            InputEvent::MoveStart(Direction::Left) => self.horizontal = -1,
            InputEvent::MoveStart(Direction::Right) => self.horizontal = 1,
            InputEvent::MoveStop(Direction::Up | Direction::Down) => self.vertical = 0,
            InputEvent::MoveStop(Direction::Left | Direction::Right) => self.horizontal = 0,
        }
    }

    pub fn increment_kill_count(&mut self) {
        self.total_kills += 1;
        self.kills_since_last_reset += 1;
    }

    pub fn reset_kills_since_last_reset(&mut self) {
        self.kills_since_last_reset = 0;
    }
}

impl Entity for Player {
    fn body(&self) -> &Body {
        &self.plane.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.plane.body
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Player
    }
}

impl Movable for Player {
    fn update_position<R: Rng + ?Sized>(&mut self, _rng: &mut R) {
        let body = &mut self.plane.body;

        if self.vertical != 0 {
            let previous = body.offset.y;
            body.move_vertically(VERTICAL_VELOCITY * f64::from(self.vertical));
            let y = body.position().y;
            if !(Y_UPPER_BOUND..=Y_LOWER_BOUND).contains(&y) {
                body.offset.y = previous;
            }
        }

        if self.horizontal != 0 {
            let previous = body.offset.x;
            body.move_horizontally(HORIZONTAL_VELOCITY * f64::from(self.horizontal));
            let x = body.position().x;
            if !(X_LEFT_BOUND..=X_RIGHT_BOUND).contains(&x) {
                body.offset.x = previous;
            }
        }
    }
}

impl Damageable for Player {
    fn take_damage(&mut self) {
        self.plane.take_hit();
    }
}

impl Firing for Player {
    /// The player fires on the auto-fire clock, so every call produces a shot.
    fn fire_projectile<R: Rng + ?Sized>(
        &mut self,
        ids: &mut EntityIds,
        _rng: &mut R,
    ) -> Option<Projectile> {
        let (x, y) = self.plane.muzzle(MUZZLE_X, MUZZLE_Y);
        Some(Projectile::player(ids.next_id(), x, y))
    }
}
