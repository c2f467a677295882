//! Errors surfaced by the session.  Everything else in a frame is a no-op
//! rather than a failure.

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("unknown level `{0}`")]
    UnknownLevel(String),

    #[error("no level is active")]
    NoActiveLevel,

    #[error("the session is already over")]
    SessionFinished,
}
