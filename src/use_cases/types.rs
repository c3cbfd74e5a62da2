// Use-case level inputs/outputs for the game loop.

use crate::domain::{FireRejection, PlayerId, PlayerInput, WorldSnapshot};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum GameEvent {
    /// `player_id` and `name` were validated at the boundary.
    Join { player_id: PlayerId, name: String },
    Leave { player_id: PlayerId },
    Input { player_id: PlayerId, input: PlayerInput },
    Fire { player_id: PlayerId },
}

/// Committed per-tick snapshot shared by every subscriber.
pub type WorldUpdate = Arc<WorldSnapshot>;

/// Per-player feedback produced by the world task.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerNotice {
    FireRejected {
        player_id: PlayerId,
        reason: FireRejection,
    },
}

impl PlayerNotice {
    pub fn player_id(&self) -> &str {
        match self {
            PlayerNotice::FireRejected { player_id, .. } => player_id,
        }
    }
}
