//! Game core for a side-scrolling plane shooter.
//!
//! The player's plane fights waves of enemy planes and finally a boss across
//! three levels.  Everything here is synchronous and deterministic apart from
//! the injected random number generator; drawing and key handling belong to
//! the front-end, which talks to the core through [`view::LevelView`] and
//! [`input::InputEvent`].

pub mod actors;
pub mod collision;
pub mod config;
pub mod entities;
pub mod error;
pub mod input;
pub mod level;
pub mod levels;
pub mod schedule;
pub mod session;
pub mod spawn;
pub mod view;

pub use config::GameConfig;
pub use error::GameError;
pub use level::{FrameOutcome, Level, LevelDescriptor, LevelState};
pub use levels::LevelRegistry;
pub use session::{GameSession, SessionState};
