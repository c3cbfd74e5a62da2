// Domain-level errors surfaced to callers.

use std::fmt;

/// Reasons a join handshake is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinError {
    InvalidName,
    InvalidPlayerId,
    ArenaClosed,
}

/// Reasons a fire request is refused. The store is untouched in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireRejection {
    UnknownPlayer,
    Dead,
    CoolingDown,
    InsufficientScore,
}

impl fmt::Display for JoinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            JoinError::InvalidName => "name must be 3-15 characters of letters, digits or _",
            JoinError::InvalidPlayerId => "player id is required",
            JoinError::ArenaClosed => "arena is not accepting players",
        };
        f.write_str(msg)
    }
}

impl fmt::Display for FireRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            FireRejection::UnknownPlayer => "unknown player",
            FireRejection::Dead => "player is dead",
            FireRejection::CoolingDown => "cooling down",
            FireRejection::InsufficientScore => "insufficient score",
        };
        f.write_str(msg)
    }
}
