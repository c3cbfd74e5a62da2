/// Gameplay tuning for player avatars.
///
/// Distances are in map units and speeds in map units per tick.
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Starting speed scalar for new players.
    pub base_speed: f32,

    /// Side length of the avatar square; positions stay within `map_size - entity_size`.
    pub entity_size: f32,

    /// Health ceiling and the value players spawn and level up with.
    pub max_health: i32,

    /// Hard ceiling on displacement per tick, whatever the speed, level and boost.
    pub max_speed: f32,

    /// Seconds a dead player waits before respawning.
    pub respawn_seconds: f32,

    pub boost: BoostTuning,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            base_speed: 1.0,
            entity_size: 30.0,
            max_health: 100,
            max_speed: 40.0,
            respawn_seconds: 3.0,
            boost: BoostTuning::default(),
        }
    }
}

/// Boost ramp: starts at `base` on press and grows by `increment` per full second held.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct BoostTuning {
    pub base: f32,
    pub increment: f32,
    pub max: f32,
}

impl Default for BoostTuning {
    fn default() -> Self {
        Self {
            base: 4.0,
            increment: 0.3,
            max: 6.0,
        }
    }
}
