mod controls;
mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use sky_battle::levels::LEVEL_ONE;
use sky_battle::{GameConfig, GameSession, LevelRegistry};

use controls::{HeldKeys, KeyBindings, KeyScheme};
use display::{Hud, Screen};

const RENDER_FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

#[derive(Parser, Debug)]
#[command(name = "sky_battle", about = "Side-scrolling plane shooter for the terminal")]
struct Args {
    /// Movement keys.
    #[arg(long, value_enum, default_value_t = KeyScheme::Arrows)]
    keys: KeyScheme,

    /// Level to start from.
    #[arg(long, default_value = LEVEL_ONE)]
    level: String,

    /// Seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Keep remaining health between levels.
    #[arg(long)]
    carry_health: bool,

    /// Write logs to this file.  Logging is off without it, since the
    /// terminal belongs to the game.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the known level ids and exit.
    #[arg(long)]
    list_levels: bool,
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Rendering runs at its own cadence; the session replays the wall time
/// between render frames through its frame and auto-fire clocks.  Held keys
/// are turned into move-start / move-stop events once per render frame.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut GameSession,
    rng: &mut StdRng,
    bindings: KeyBindings,
    rx: &mpsc::Receiver<Event>,
) -> anyhow::Result<()> {
    let mut hud = Hud::default();
    let mut held = HeldKeys::default();
    let mut frame: u64 = 0;

    session.start(&mut hud)?;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') if session.is_over() => {
                            tracing::info!("restarting");
                            held = HeldKeys::default();
                            session.start(&mut hud)?;
                            last = Instant::now();
                            continue;
                        }
                        _ => {}
                    }
                    if let Some(direction) = bindings.direction_for(&code) {
                        held.press(direction, frame);
                    }
                }
                // Release: keyboard-enhancement path
                KeyEventKind::Release => {
                    if let Some(direction) = bindings.direction_for(&code) {
                        held.release(direction);
                    }
                }
            }
        }

        for input in held.transitions(frame) {
            session.handle_input(input);
        }

        let now = Instant::now();
        if let Err(err) = session.advance(now - last, rng, &mut hud) {
            tracing::warn!(error = %err, "frame failed");
        }
        last = now;

        let (width, height) = terminal::size()?;
        display::render(
            out,
            Screen { width, height },
            session.level(),
            &hud,
            bindings.hint(),
        )?;

        let elapsed = frame_start.elapsed();
        if elapsed < RENDER_FRAME {
            thread::sleep(RENDER_FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let registry = LevelRegistry::builtin();

    if args.list_levels {
        for id in registry.ids() {
            println!("{id}");
        }
        return Ok(());
    }

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    // Reject a bad --level before the terminal is taken over.
    registry.resolve(&args.level)?;

    let config = GameConfig {
        carry_health: args.carry_health,
        start_level: args.level.clone(),
        ..GameConfig::default()
    };
    let mut session = GameSession::new(registry, config);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tracing::info!(level = %args.level, seed = ?args.seed, "starting");

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to held-key expiry.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = game_loop(
        &mut out,
        &mut session,
        &mut rng,
        KeyBindings::new(args.keys),
        &rx,
    );

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    tracing::info!(
        state = ?session.state(),
        levels_cleared = session.levels_cleared(),
        score = session.score(),
        "session ended"
    );
    result
}
