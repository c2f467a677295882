//! Sequences levels and carries state across transitions.

use std::time::Duration;

use rand::Rng;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::input::InputEvent;
use crate::level::{FrameOutcome, Level, LevelState, INITIAL_DIFFICULTY};
use crate::levels::LevelRegistry;
use crate::schedule::{Scheduler, Tick};
use crate::view::LevelView;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Created, no level loaded yet.
    Idle,
    Playing,
    Won,
    Lost,
}

pub struct GameSession {
    registry: LevelRegistry,
    config: GameConfig,
    scheduler: Scheduler,
    level: Option<Level>,
    state: SessionState,
    levels_cleared: u32,
}

impl GameSession {
    pub fn new(registry: LevelRegistry, config: GameConfig) -> Self {
        let scheduler = Scheduler::new(config.frame_period, config.auto_fire_period);
        Self {
            registry,
            config,
            scheduler,
            level: None,
            state: SessionState::Idle,
            levels_cleared: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, SessionState::Won | SessionState::Lost)
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    pub fn level_mut(&mut self) -> Option<&mut Level> {
        self.level.as_mut()
    }

    pub fn levels_cleared(&self) -> u32 {
        self.levels_cleared
    }

    /// Kills across every level of the current run.
    pub fn score(&self) -> u32 {
        self.level.as_ref().map_or(0, Level::score)
    }

    /// Loads the configured start level.
    pub fn start<V: LevelView>(&mut self, view: &mut V) -> Result<(), GameError> {
        let start = self.config.start_level.clone();
        self.start_at(&start, view)
    }

    /// Starts a fresh run at `id`, discarding any level in progress.
    pub fn start_at<V: LevelView>(&mut self, id: &str, view: &mut V) -> Result<(), GameError> {
        let descriptor = self.registry.resolve(id)?;
        self.scheduler.stop();
        if let Some(mut old) = self.level.take() {
            old.teardown(view);
        }
        self.levels_cleared = 0;
        let health = descriptor.player_health;
        self.load(Level::new(descriptor, self.config.arena, health), view);
        Ok(())
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        if let Some(level) = self.level.as_mut() {
            level.handle_input(event);
        }
    }

    /// Replays `elapsed` wall time through both clocks.
    ///
    /// A level that ends mid-batch drops the rest of that batch's ticks.  A
    /// failed transition is returned after the remaining ticks have run
    /// against the level that requested it.
    pub fn advance<R, V>(
        &mut self,
        elapsed: Duration,
        rng: &mut R,
        view: &mut V,
    ) -> Result<SessionState, GameError>
    where
        R: Rng + ?Sized,
        V: LevelView,
    {
        let mut failure = None;
        for tick in self.scheduler.advance(elapsed) {
            match tick {
                Tick::AutoFire => self.fire(rng, view),
                Tick::Frame => match self.step_frame(rng, view) {
                    Ok(FrameOutcome::Continue) => {}
                    Ok(_) => break,
                    Err(err) => failure = Some(err),
                },
            }
        }
        match failure {
            Some(err) => Err(err),
            None => Ok(self.state),
        }
    }

    /// Auto-fire clock handler.
    pub fn fire<R, V>(&mut self, rng: &mut R, view: &mut V)
    where
        R: Rng + ?Sized,
        V: LevelView,
    {
        if let Some(level) = self.level.as_mut() {
            if let Some(id) = level.fire_player_projectile(rng, view) {
                tracing::trace!(id = id.0, "player fired");
            }
        }
    }

    /// Runs one frame of the current level and reacts to its outcome.
    pub fn step_frame<R, V>(
        &mut self,
        rng: &mut R,
        view: &mut V,
    ) -> Result<FrameOutcome, GameError>
    where
        R: Rng + ?Sized,
        V: LevelView,
    {
        if self.is_over() {
            return Err(GameError::SessionFinished);
        }
        let level = self.level.as_mut().ok_or(GameError::NoActiveLevel)?;
        let outcome = level.tick(rng, view);
        match outcome {
            FrameOutcome::Continue => {}
            FrameOutcome::Advance(next) => {
                self.request_level_transition(next, view)?;
            }
            FrameOutcome::Won => {
                self.levels_cleared += 1;
                self.scheduler.stop();
                self.state = SessionState::Won;
                tracing::info!(levels = self.levels_cleared, score = self.score(), "game won");
            }
            FrameOutcome::Lost => {
                self.scheduler.stop();
                self.state = SessionState::Lost;
                tracing::info!(levels = self.levels_cleared, score = self.score(), "game over");
            }
        }
        Ok(outcome)
    }

    /// Replaces the current level with `id`.
    ///
    /// An unknown id leaves the current level in play and is returned as an
    /// error.  Otherwise both clocks stop, the old level is flushed and
    /// dropped, and only then is the new level built and started.  The new
    /// level inherits the run's score and difficulty.
    pub fn request_level_transition<V: LevelView>(
        &mut self,
        id: &str,
        view: &mut V,
    ) -> Result<(), GameError> {
        let descriptor = match self.registry.resolve(id) {
            Ok(descriptor) => descriptor,
            Err(err) => {
                tracing::error!(level = id, error = %err, "level transition failed");
                if let Some(level) = self.level.as_mut() {
                    level.resume();
                }
                return Err(err);
            }
        };

        self.scheduler.stop();
        let mut carried_health = None;
        let mut difficulty = INITIAL_DIFFICULTY;
        let mut score = 0;
        if let Some(mut old) = self.level.take() {
            if old.state() == LevelState::Won {
                self.levels_cleared += 1;
            }
            carried_health = Some(old.player.health());
            difficulty = old.difficulty_factor;
            score = old.score();
            old.teardown(view);
        }

        let health = match carried_health {
            Some(health) if self.config.carry_health && health > 0 => health,
            _ => descriptor.player_health,
        };
        tracing::info!(level = id, health, difficulty, score, "loading level");
        let level =
            Level::new(descriptor, self.config.arena, health).carry_over(difficulty, score);
        self.load(level, view);
        Ok(())
    }

    fn load<V: LevelView>(&mut self, mut level: Level, view: &mut V) {
        level.start(view);
        self.level = Some(level);
        self.state = SessionState::Playing;
        self.scheduler.start();
    }
}
