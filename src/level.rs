//! One level's frame loop.
//!
//! A [`Level`] owns every entity alive in it.  Each call to [`Level::tick`]
//! runs one complete frame; the session decides what happens once the level
//! reports an outcome other than [`FrameOutcome::Continue`].

use rand::Rng;

use crate::actors::{Boss, Damageable, Entity, Fighter, Firing, Movable, Player, Projectile};
use crate::collision::resolve_collisions;
use crate::entities::{Arena, EntityId, EntityIds, EntitySnapshot, Side};
use crate::input::InputEvent;
use crate::spawn::{spawn_enemies, SpawnPolicy};
use crate::view::LevelView;

pub const INITIAL_DIFFICULTY: f64 = 1.0;
const KILLS_PER_DIFFICULTY_STEP: u32 = 10;
const DIFFICULTY_STEP: f64 = 0.1;

// ── Level definitions ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Objective {
    /// Advance once the player's total kills reach this number.
    KillTarget(u32),
    /// Advance once a boss has been destroyed.
    DefeatBoss,
}

/// Static description of a level: what spawns, what wins it, what follows.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub spawn: SpawnPolicy,
    pub objective: Objective,
    pub player_health: u32,
    /// Level to load after this one is won.  `None` means the game is won.
    pub next: Option<&'static str>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelState {
    Initializing,
    Running,
    Won,
    Lost,
}

/// What the session should do after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    /// The level was won and asks for the named level next.
    Advance(&'static str),
    /// The last level was won.
    Won,
    Lost,
}

// ── Level ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Level {
    pub descriptor: LevelDescriptor,
    pub arena: Arena,
    pub player: Player,
    pub enemy_units: Vec<Fighter>,
    pub player_projectiles: Vec<Projectile>,
    pub enemy_projectiles: Vec<Projectile>,
    pub difficulty_factor: f64,
    /// Enemy count taken before this frame's damage, for kill crediting.
    pub enemy_count_snapshot: usize,
    pub frame: u64,
    /// Score banked by earlier levels of the same run.
    pub carried_score: u32,
    state: LevelState,
    ids: EntityIds,
    player_on_surface: bool,
    boss_defeated: bool,
    shield_up: bool,
}

impl Level {
    pub fn new(descriptor: LevelDescriptor, arena: Arena, player_health: u32) -> Self {
        let mut ids = EntityIds::default();
        let player = Player::new(ids.next_id(), player_health);
        Self {
            descriptor,
            arena,
            player,
            enemy_units: Vec::new(),
            player_projectiles: Vec::new(),
            enemy_projectiles: Vec::new(),
            difficulty_factor: INITIAL_DIFFICULTY,
            enemy_count_snapshot: 0,
            frame: 0,
            carried_score: 0,
            state: LevelState::Initializing,
            ids,
            player_on_surface: false,
            boss_defeated: false,
            shield_up: false,
        }
    }

    /// Continues a run: starts at the given difficulty with the earlier
    /// levels' score banked.
    pub fn carry_over(mut self, difficulty_factor: f64, score: u32) -> Self {
        self.difficulty_factor = difficulty_factor;
        self.carried_score = score;
        self
    }

    /// Run score: banked score plus kills in this level.
    pub fn score(&self) -> u32 {
        self.carried_score + self.player.total_kills
    }

    pub fn state(&self) -> LevelState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LevelState::Running
    }

    /// Puts the player on the surface and starts accepting frames.
    pub fn start<V: LevelView>(&mut self, view: &mut V) {
        if self.state != LevelState::Initializing {
            return;
        }
        self.state = LevelState::Running;
        view.level_started(&self.descriptor);
        view.entity_added(self.player.id(), self.player.kind());
        self.player_on_surface = true;
        view.health_changed(self.player.health());
        view.kills_changed(self.player.total_kills);
        view.score_changed(self.score());
        view.difficulty_changed(self.difficulty_factor);
        tracing::info!(
            level = self.descriptor.id,
            health = self.player.health(),
            difficulty = self.difficulty_factor,
            score = self.score(),
            "level started"
        );
    }

    /// Puts a won level back into play after its successor failed to load.
    pub fn resume(&mut self) {
        if self.state == LevelState::Won {
            self.state = LevelState::Running;
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        self.player.apply_input(event);
    }

    pub fn boss(&self) -> Option<&Boss> {
        self.enemy_units.iter().find_map(Fighter::as_boss)
    }

    pub fn boss_defeated(&self) -> bool {
        self.boss_defeated
    }

    /// Everything currently on the render surface.
    pub fn entities(&self) -> Vec<EntitySnapshot> {
        let mut out = Vec::with_capacity(
            1 + self.enemy_units.len()
                + self.player_projectiles.len()
                + self.enemy_projectiles.len(),
        );
        if self.player_on_surface {
            out.push(self.player.snapshot());
        }
        out.extend(self.enemy_units.iter().map(Entity::snapshot));
        out.extend(self.player_projectiles.iter().map(Entity::snapshot));
        out.extend(self.enemy_projectiles.iter().map(Entity::snapshot));
        out
    }

    // ── Adding entities ──────────────────────────────────────────────────────

    pub fn add_enemy<V: LevelView>(&mut self, enemy: Fighter, view: &mut V) -> EntityId {
        let id = enemy.id();
        view.entity_added(id, enemy.kind());
        self.enemy_units.push(enemy);
        id
    }

    pub fn add_projectile<V: LevelView>(
        &mut self,
        projectile: Projectile,
        view: &mut V,
    ) -> EntityId {
        let id = projectile.id();
        view.entity_added(id, projectile.kind());
        match projectile.side() {
            Side::Player => self.player_projectiles.push(projectile),
            Side::Enemy => self.enemy_projectiles.push(projectile),
        }
        id
    }

    /// Fresh id from this level's allocator, for entities built outside it.
    pub fn next_id(&mut self) -> EntityId {
        self.ids.next_id()
    }

    /// Auto-fire clock handler: the player shoots if the level is live.
    pub fn fire_player_projectile<R, V>(&mut self, rng: &mut R, view: &mut V) -> Option<EntityId>
    where
        R: Rng + ?Sized,
        V: LevelView,
    {
        if !self.is_running() || self.player.is_destroyed() {
            return None;
        }
        let projectile = self.player.fire_projectile(&mut self.ids, rng)?;
        Some(self.add_projectile(projectile, view))
    }

    // ── Frame ────────────────────────────────────────────────────────────────

    /// Runs one frame.  Does nothing unless the level is running.
    pub fn tick<R, V>(&mut self, rng: &mut R, view: &mut V) -> FrameOutcome
    where
        R: Rng + ?Sized,
        V: LevelView,
    {
        if !self.is_running() {
            return FrameOutcome::Continue;
        }
        self.frame += 1;

        self.increase_difficulty(view);
        self.spawn_enemy_units(rng, view);
        self.update_actors(rng);
        self.generate_enemy_fire(rng, view);
        self.enemy_count_snapshot = self.enemy_units.len();
        self.handle_enemy_penetration();
        self.handle_collisions();
        self.remove_destroyed_actors(view);
        self.update_kill_count();
        self.update_level_view(view);
        self.check_objective(view)
    }

    fn increase_difficulty<V: LevelView>(&mut self, view: &mut V) {
        if self.player.kills_since_last_reset >= KILLS_PER_DIFFICULTY_STEP {
            self.difficulty_factor += DIFFICULTY_STEP;
            self.player.reset_kills_since_last_reset();
            view.difficulty_changed(self.difficulty_factor);
            tracing::info!(
                level = self.descriptor.id,
                difficulty = self.difficulty_factor,
                "difficulty increased"
            );
        }
    }

    fn spawn_enemy_units<R: Rng + ?Sized, V: LevelView>(&mut self, rng: &mut R, view: &mut V) {
        let spawned = spawn_enemies(
            &self.descriptor.spawn,
            &self.enemy_units,
            self.difficulty_factor,
            &self.arena,
            &mut self.ids,
            rng,
        );
        for enemy in spawned {
            tracing::debug!(id = enemy.id().0, kind = ?enemy.kind(), "enemy spawned");
            self.add_enemy(enemy, view);
        }
    }

    fn update_actors<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let arena = self.arena;
        self.player.update_actor(&arena, rng);
        for enemy in &mut self.enemy_units {
            enemy.update_actor(&arena, rng);
        }
        for projectile in &mut self.player_projectiles {
            projectile.update_actor(&arena, rng);
        }
        for projectile in &mut self.enemy_projectiles {
            projectile.update_actor(&arena, rng);
        }
    }

    fn generate_enemy_fire<R: Rng + ?Sized, V: LevelView>(&mut self, rng: &mut R, view: &mut V) {
        let mut fired = Vec::new();
        for enemy in &mut self.enemy_units {
            if let Some(projectile) = enemy.fire_projectile(&mut self.ids, rng) {
                fired.push(projectile);
            }
        }
        for projectile in fired {
            self.add_projectile(projectile, view);
        }
    }

    /// Enemies that fly past the left edge cost the player one health.
    fn handle_enemy_penetration(&mut self) {
        let limit = self.arena.width;
        for enemy in &mut self.enemy_units {
            if enemy.body().offset.x.abs() > limit {
                self.player.take_damage();
                enemy.destroy();
            }
        }
    }

    fn handle_collisions(&mut self) {
        resolve_collisions(std::slice::from_mut(&mut self.player), &mut self.enemy_units);
        resolve_collisions(&mut self.player_projectiles, &mut self.enemy_units);
        resolve_collisions(&mut self.enemy_projectiles, std::slice::from_mut(&mut self.player));
    }

    fn remove_destroyed_actors<V: LevelView>(&mut self, view: &mut V) {
        if self
            .enemy_units
            .iter()
            .any(|enemy| enemy.as_boss().is_some() && enemy.is_destroyed())
        {
            self.boss_defeated = true;
        }
        if self.player_on_surface && self.player.is_destroyed() {
            view.entity_removed(self.player.id());
            self.player_on_surface = false;
        }
        purge(&mut self.enemy_units, view);
        purge(&mut self.player_projectiles, view);
        purge(&mut self.enemy_projectiles, view);
    }

    fn update_kill_count(&mut self) {
        let kills = self.enemy_count_snapshot.saturating_sub(self.enemy_units.len());
        for _ in 0..kills {
            self.player.increment_kill_count();
        }
    }

    fn update_level_view<V: LevelView>(&mut self, view: &mut V) {
        view.health_changed(self.player.health());
        view.kills_changed(self.player.total_kills);
        view.score_changed(self.score());
        view.enemy_count_changed(self.enemy_units.len());

        let shielded = self.boss().map_or(false, |boss| boss.shielded);
        if shielded != self.shield_up {
            self.shield_up = shielded;
            view.shield_changed(shielded);
        }
    }

    fn check_objective<V: LevelView>(&mut self, view: &mut V) -> FrameOutcome {
        if self.player.is_destroyed() {
            self.state = LevelState::Lost;
            tracing::info!(level = self.descriptor.id, frame = self.frame, "level lost");
            view.game_lost();
            return FrameOutcome::Lost;
        }

        let reached = match self.descriptor.objective {
            Objective::KillTarget(target) => self.player.total_kills >= target,
            Objective::DefeatBoss => self.boss_defeated,
        };
        if !reached {
            return FrameOutcome::Continue;
        }

        self.state = LevelState::Won;
        match self.descriptor.next {
            Some(next) => {
                tracing::info!(level = self.descriptor.id, next, "level cleared");
                FrameOutcome::Advance(next)
            }
            None => {
                tracing::info!(level = self.descriptor.id, "final level cleared");
                view.game_won();
                FrameOutcome::Won
            }
        }
    }

    // ── Teardown ─────────────────────────────────────────────────────────────

    /// Clears every collection and destroys the player.  The level accepts no
    /// further frames afterwards.
    pub fn teardown<V: LevelView>(&mut self, view: &mut V) {
        self.player.destroy();
        if self.player_on_surface {
            view.entity_removed(self.player.id());
            self.player_on_surface = false;
        }
        for enemy in self.enemy_units.drain(..) {
            view.entity_removed(enemy.id());
        }
        for projectile in self
            .player_projectiles
            .drain(..)
            .chain(self.enemy_projectiles.drain(..))
        {
            view.entity_removed(projectile.id());
        }
        if self.state == LevelState::Running || self.state == LevelState::Initializing {
            self.state = LevelState::Lost;
        }
    }
}

/// Drops destroyed actors and takes them off the render surface.
fn purge<T: Entity, V: LevelView>(actors: &mut Vec<T>, view: &mut V) {
    actors.retain(|actor| {
        if actor.is_destroyed() {
            view.entity_removed(actor.id());
            false
        } else {
            true
        }
    });
}
