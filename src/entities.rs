//! Entity data shared by every actor: geometry, identity and the play area.
//!
//! Nothing in here knows how an actor moves or fights; that lives in
//! `actors`.  Positions follow a layout-anchor model: an entity is placed at a
//! fixed `anchor` and every later movement accumulates into `offset`.

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned bounding box in world coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(origin: Vec2, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Edges that touch count as an intersection.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }
}

// ── Play area ─────────────────────────────────────────────────────────────────

/// Enemies never spawn in the bottom strip of this height.
const ENEMY_SPAWN_MARGIN: f64 = 150.0;

/// The stage every level plays on, in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Arena {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Largest y an enemy may spawn at.
    pub fn enemy_max_y(&self) -> f64 {
        (self.height - ENEMY_SPAWN_MARGIN).max(0.0)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(1300.0, 750.0)
    }
}

// ── Identity ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

/// Hands out level-unique entity ids.
#[derive(Clone, Debug, Default)]
pub struct EntityIds {
    next: u64,
}

impl EntityIds {
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Player,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileKind {
    Player,
    Enemy,
    Boss,
}

impl ProjectileKind {
    pub fn side(&self) -> Side {
        match self {
            ProjectileKind::Player => Side::Player,
            ProjectileKind::Enemy | ProjectileKind::Boss => Side::Enemy,
        }
    }
}

/// What an entity is, for collaborators that draw it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Enemy,
    Boss,
    Projectile(ProjectileKind),
}

// ── Body ──────────────────────────────────────────────────────────────────────

/// Position, size and liveness common to every entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub id: EntityId,
    /// Fixed layout position the entity was created at.
    pub anchor: Vec2,
    /// Accumulated movement relative to `anchor`.
    pub offset: Vec2,
    pub size: Size,
    pub alive: bool,
}

impl Body {
    pub fn new(id: EntityId, anchor: Vec2, size: Size) -> Self {
        Self {
            id,
            anchor,
            offset: Vec2::ZERO,
            size,
            alive: true,
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.anchor.x + self.offset.x, self.anchor.y + self.offset.y)
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.position(), self.size)
    }

    pub fn move_horizontally(&mut self, dx: f64) {
        self.offset.x += dx;
    }

    pub fn move_vertically(&mut self, dy: f64) {
        self.offset.y += dy;
    }

    /// Marks the body dead.  Destroying twice is harmless.
    pub fn destroy(&mut self) {
        self.alive = false;
    }

    pub fn is_destroyed(&self) -> bool {
        !self.alive
    }
}

/// Read-only view of one live entity, handed to renderers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub kind: EntityKind,
    pub hitbox: Rect,
    /// Only ever true for a boss with its shield raised.
    pub shielded: bool,
}
