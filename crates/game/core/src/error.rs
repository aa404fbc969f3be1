//! Error taxonomy for fable-core.
//!
//! The taxonomy is deliberately shallow: every mutating operation either
//! fully applies or fully no-ops, so the
//! variants describe *why* an operation was a no-op rather than carrying
//! partial-failure state.

use thiserror::Error;

use crate::session::TurnPhase;
use crate::topology::LocationId;

pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Errors surfaced by core game operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// An unknown location id was looked up. The topology is fixed at
    /// startup, so this indicates a corrupted session and is treated as
    /// fatal by the runtime.
    #[error("unknown location {location:?}")]
    NotFound { location: LocationId },

    /// Not enough mana or gold to perform the action. Non-fatal; the
    /// action is a no-op and is reported to the player.
    #[error("insufficient resource: needed {needed}, have {available}")]
    InsufficientResource { needed: u32, available: u32 },

    /// A command arrived in a session phase where it is not valid, e.g. a
    /// combat action while exploring. The controller drops these silently.
    #[error("{attempted} is not valid while {phase}")]
    InvalidTransition {
        attempted: &'static str,
        phase: PhaseName,
    },
}

impl CoreError {
    /// True for errors the controller swallows without surfacing.
    pub const fn is_silent(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }

    /// True for errors that indicate a corrupted session.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Human-readable session phase used in error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseName {
    Exploring,
    AwaitingPlayerAction,
    AwaitingOpponentResolution,
}

impl std::fmt::Display for PhaseName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Exploring => "exploring",
            Self::AwaitingPlayerAction => "awaiting the player's action",
            Self::AwaitingOpponentResolution => "awaiting the opponent's turn",
        };
        f.write_str(text)
    }
}

impl From<TurnPhase> for PhaseName {
    fn from(turn: TurnPhase) -> Self {
        match turn {
            TurnPhase::AwaitingPlayerAction => Self::AwaitingPlayerAction,
            TurnPhase::AwaitingOpponentResolution => Self::AwaitingOpponentResolution,
        }
    }
}
