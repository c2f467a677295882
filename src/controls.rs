//! Key bindings and held-key tracking for the terminal front-end.
//!
//! Classic terminals only report presses (OS key-repeat shows up as repeated
//! presses), so a key stays "held" while its last press is recent enough.
//! Terminals with keyboard enhancement also report releases, which end the
//! hold immediately.

use std::collections::{HashMap, HashSet};

use clap::ValueEnum;
use crossterm::event::KeyCode;
use sky_battle::input::{Direction, InputEvent};

/// A key counts as held if its last press/repeat arrived within this many
/// render frames.  The OS repeat rate is at least 15 Hz, so 4 frames at
/// 30 FPS is always refreshed before it expires.
pub const HOLD_WINDOW: u64 = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum KeyScheme {
    /// Arrow keys.
    #[default]
    Arrows,
    /// W A S D.
    Wasd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyBindings {
    scheme: KeyScheme,
}

impl KeyBindings {
    pub fn new(scheme: KeyScheme) -> Self {
        Self { scheme }
    }

    pub fn direction_for(&self, code: &KeyCode) -> Option<Direction> {
        match self.scheme {
            KeyScheme::Arrows => match code {
                KeyCode::Up => Some(Direction::Up),
                KeyCode::Down => Some(Direction::Down),
                KeyCode::Left => Some(Direction::Left),
                KeyCode::Right => Some(Direction::Right),
                _ => None,
            },
            KeyScheme::Wasd => match code {
                KeyCode::Char(c) => match c.to_ascii_lowercase() {
                    'w' => Some(Direction::Up),
                    's' => Some(Direction::Down),
                    'a' => Some(Direction::Left),
                    'd' => Some(Direction::Right),
                    _ => None,
                },
                _ => None,
            },
        }
    }

    pub fn hint(&self) -> &'static str {
        match self.scheme {
            KeyScheme::Arrows => "↑ ↓ ← → : Move   Q : Quit",
            KeyScheme::Wasd => "W A S D : Move   Q : Quit",
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new(KeyScheme::default())
    }
}

fn vertical(direction: Direction) -> bool {
    matches!(direction, Direction::Up | Direction::Down)
}

/// Turns raw key activity into move-start / move-stop events.
#[derive(Debug, Default)]
pub struct HeldKeys {
    last_seen: HashMap<Direction, u64>,
    active: HashSet<Direction>,
}

impl HeldKeys {
    pub fn press(&mut self, direction: Direction, frame: u64) {
        self.last_seen.insert(direction, frame);
    }

    pub fn release(&mut self, direction: Direction) {
        self.last_seen.remove(&direction);
    }

    fn is_held(&self, direction: Direction, frame: u64) -> bool {
        self.last_seen
            .get(&direction)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    /// Events needed to bring the player in line with the keys held at
    /// `frame`.  Stops come first; a stop on an axis re-issues the start of
    /// the opposite key if that one is still down.
    pub fn transitions(&mut self, frame: u64) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let mut stopped_vertical = false;
        let mut stopped_horizontal = false;

        for direction in Direction::ALL {
            if !self.is_held(direction, frame) && self.active.remove(&direction) {
                events.push(InputEvent::MoveStop(direction));
                if vertical(direction) {
                    stopped_vertical = true;
                } else {
                    stopped_horizontal = true;
                }
            }
        }

        for direction in Direction::ALL {
            if !self.is_held(direction, frame) {
                continue;
            }
            let axis_stopped = if vertical(direction) {
                stopped_vertical
            } else {
                stopped_horizontal
            };
            if self.active.insert(direction) || axis_stopped {
                events.push(InputEvent::MoveStart(direction));
            }
        }

        events
    }
}
