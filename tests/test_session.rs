use std::time::Duration;

use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;

use sky_battle::actors::{Entity, Projectile};
use sky_battle::levels::{level_one, LEVEL_ONE, LEVEL_THREE, LEVEL_TWO};
use sky_battle::view::{RecordingView, ViewEvent};
use sky_battle::{
    FrameOutcome, GameConfig, GameError, GameSession, LevelDescriptor, LevelRegistry, LevelState,
    SessionState,
};

/// Every probability roll fails: nothing spawns and nobody fires.
fn never() -> StepRng {
    StepRng::new(u64::MAX, 0)
}

fn session_with(config: GameConfig) -> (GameSession, RecordingView) {
    let mut view = RecordingView::new();
    let mut session = GameSession::new(LevelRegistry::builtin(), config);
    session.start(&mut view).unwrap();
    (session, view)
}

fn current_id(session: &GameSession) -> &'static str {
    session.level().unwrap().descriptor.id
}

/// Makes the next frame meet the kill objective.
fn meet_kill_target(session: &mut GameSession) {
    session.level_mut().unwrap().player.total_kills = 10;
}

fn broken_level() -> LevelDescriptor {
    LevelDescriptor {
        id: "broken",
        name: "Broken",
        next: Some("level-nine"),
        ..level_one()
    }
}

// ── Start ─────────────────────────────────────────────────────────────────────

#[test]
fn new_session_is_idle() {
    let session = GameSession::new(LevelRegistry::builtin(), GameConfig::default());
    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.level().is_none());
}

#[test]
fn start_loads_the_first_level() {
    let (session, view) = session_with(GameConfig::default());
    assert_eq!(session.state(), SessionState::Playing);
    assert_eq!(current_id(&session), LEVEL_ONE);
    assert!(session.level().unwrap().is_running());
    assert!(view.contains(&ViewEvent::LevelStarted(LEVEL_ONE)));
}

#[test]
fn frame_without_a_level_is_an_error() {
    let mut session = GameSession::new(LevelRegistry::builtin(), GameConfig::default());
    assert_eq!(
        session.step_frame(&mut never(), &mut ()),
        Err(GameError::NoActiveLevel)
    );
}

#[test]
fn starting_at_an_unknown_level_fails_cleanly() {
    let mut session = GameSession::new(LevelRegistry::builtin(), GameConfig::default());
    assert_eq!(
        session.start_at("level-nine", &mut ()),
        Err(GameError::UnknownLevel("level-nine".to_string()))
    );
    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.level().is_none());
}

#[test]
fn configured_start_level_is_used() {
    let config = GameConfig {
        start_level: LEVEL_THREE.to_string(),
        ..GameConfig::default()
    };
    let (session, _) = session_with(config);
    assert_eq!(current_id(&session), LEVEL_THREE);
}

// ── Transitions ───────────────────────────────────────────────────────────────

#[test]
fn meeting_the_kill_target_moves_to_the_next_level() {
    let (mut session, mut view) = session_with(GameConfig::default());
    let old_player = session.level().unwrap().player.id();
    session.level_mut().unwrap().player.plane.health = 2;
    meet_kill_target(&mut session);

    let outcome = session.step_frame(&mut never(), &mut view).unwrap();

    assert_eq!(outcome, FrameOutcome::Advance(LEVEL_TWO));
    assert_eq!(current_id(&session), LEVEL_TWO);
    assert_eq!(session.state(), SessionState::Playing);
    assert_eq!(session.levels_cleared(), 1);
    assert!(view.contains(&ViewEvent::EntityRemoved(old_player)));
    assert!(view.contains(&ViewEvent::LevelStarted(LEVEL_TWO)));

    let level = session.level().unwrap();
    assert_eq!(level.state(), LevelState::Running);
    assert_eq!(level.player.health(), 5);
    assert_eq!(level.player.total_kills, 0);
    assert_eq!(view.on_surface(), vec![level.player.id()]);
}

#[test]
fn score_and_difficulty_carry_into_the_next_level() {
    let (mut session, mut view) = session_with(GameConfig::default());
    session.level_mut().unwrap().difficulty_factor = 1.1;
    meet_kill_target(&mut session);
    assert_eq!(session.score(), 10);

    session.step_frame(&mut never(), &mut view).unwrap();

    assert_eq!(current_id(&session), LEVEL_TWO);
    let level = session.level().unwrap();
    assert_eq!(level.player.total_kills, 0);
    assert!((level.difficulty_factor - 1.1).abs() < 1e-9);
    assert_eq!(session.score(), 10);
    assert_eq!(view.last_score(), Some(10));
}

#[test]
fn carried_health_survives_the_transition() {
    let config = GameConfig {
        carry_health: true,
        ..GameConfig::default()
    };
    let (mut session, mut view) = session_with(config);
    session.level_mut().unwrap().player.plane.health = 2;
    meet_kill_target(&mut session);

    session.step_frame(&mut never(), &mut view).unwrap();

    assert_eq!(current_id(&session), LEVEL_TWO);
    assert_eq!(session.level().unwrap().player.health(), 2);
}

#[test]
fn unknown_successor_keeps_the_current_level() {
    let registry = LevelRegistry::builtin().with("broken", broken_level);
    let config = GameConfig {
        start_level: "broken".to_string(),
        ..GameConfig::default()
    };
    let mut view = RecordingView::new();
    let mut session = GameSession::new(registry, config);
    session.start(&mut view).unwrap();
    meet_kill_target(&mut session);

    let result = session.step_frame(&mut never(), &mut view);

    assert_eq!(result, Err(GameError::UnknownLevel("level-nine".to_string())));
    assert_eq!(current_id(&session), "broken");
    assert_eq!(session.state(), SessionState::Playing);
    assert!(session.level().unwrap().is_running());
    assert_eq!(session.levels_cleared(), 0);
}

#[test]
fn direct_transition_to_an_unknown_level_is_refused() {
    let (mut session, mut view) = session_with(GameConfig::default());
    assert!(session
        .request_level_transition("level-nine", &mut view)
        .is_err());
    assert_eq!(current_id(&session), LEVEL_ONE);
    assert!(session.level().unwrap().is_running());
}

// ── End of game ───────────────────────────────────────────────────────────────

#[test]
fn beating_the_boss_wins_the_session() {
    let config = GameConfig {
        start_level: LEVEL_THREE.to_string(),
        ..GameConfig::default()
    };
    let (mut session, mut view) = session_with(config);
    let mut rng = StdRng::seed_from_u64(42);
    session.step_frame(&mut rng, &mut view).unwrap();
    assert!(session.level().unwrap().boss().is_some());

    session.level_mut().unwrap().enemy_units[0].destroy();
    let outcome = session.step_frame(&mut rng, &mut view).unwrap();

    assert_eq!(outcome, FrameOutcome::Won);
    assert_eq!(session.state(), SessionState::Won);
    assert!(session.is_over());
    assert_eq!(session.levels_cleared(), 1);
    assert!(view.contains(&ViewEvent::GameWon));
    assert_eq!(
        session.step_frame(&mut rng, &mut view),
        Err(GameError::SessionFinished)
    );
}

#[test]
fn losing_all_health_ends_the_session() {
    let (mut session, mut view) = session_with(GameConfig::default());
    let level = session.level_mut().unwrap();
    level.player.plane.health = 1;
    let id = level.next_id();
    level.add_projectile(Projectile::enemy(id, 60.0, 320.0), &mut view);

    let outcome = session.step_frame(&mut never(), &mut view).unwrap();

    assert_eq!(outcome, FrameOutcome::Lost);
    assert_eq!(session.state(), SessionState::Lost);
    assert!(view.contains(&ViewEvent::GameLost));
    assert_eq!(
        session.advance(Duration::from_secs(1), &mut never(), &mut view),
        Ok(SessionState::Lost)
    );
    assert_eq!(session.level().unwrap().frame, 1);
}

#[test]
fn restart_after_game_over_begins_again() {
    let (mut session, mut view) = session_with(GameConfig::default());
    meet_kill_target(&mut session);
    session.step_frame(&mut never(), &mut view).unwrap();
    assert_eq!(session.levels_cleared(), 1);

    session.start(&mut view).unwrap();

    assert_eq!(current_id(&session), LEVEL_ONE);
    assert_eq!(session.state(), SessionState::Playing);
    assert_eq!(session.levels_cleared(), 0);
    assert_eq!(session.score(), 0);
    assert_eq!(session.level().unwrap().difficulty_factor, 1.0);
}

// ── Clocks ────────────────────────────────────────────────────────────────────

#[test]
fn half_a_second_runs_ten_frames_then_one_shot() {
    let (mut session, mut view) = session_with(GameConfig::default());

    let state = session
        .advance(Duration::from_millis(500), &mut never(), &mut view)
        .unwrap();

    assert_eq!(state, SessionState::Playing);
    let level = session.level().unwrap();
    assert_eq!(level.frame, 10);
    assert_eq!(level.player_projectiles.len(), 1);
}

#[test]
fn transition_drops_the_rest_of_the_batch() {
    let (mut session, mut view) = session_with(GameConfig::default());
    meet_kill_target(&mut session);

    let state = session
        .advance(Duration::from_millis(500), &mut never(), &mut view)
        .unwrap();

    assert_eq!(state, SessionState::Playing);
    assert_eq!(current_id(&session), LEVEL_TWO);
    let level = session.level().unwrap();
    assert_eq!(level.frame, 0);
    assert!(level.player_projectiles.is_empty());
}
