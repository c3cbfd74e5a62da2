// Gameplay tuning, kept separate from runtime/server configuration.

pub mod player;
pub mod progression;
pub mod projectile;
pub mod world;

use serde::Deserialize;

pub use player::{BoostTuning, PlayerTuning};
pub use progression::ProgressionTuning;
pub use projectile::ProjectileTuning;
pub use world::WorldTuning;

/// All gameplay knobs for one arena.
///
/// Every field has a default, so a tuning file only needs the values it overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub projectile: ProjectileTuning,
    pub world: WorldTuning,
    pub progression: ProgressionTuning,
}

impl Tuning {
    /// Largest coordinate an entity may occupy on either axis.
    pub fn max_coord(&self) -> f32 {
        (self.world.map_size - self.player.entity_size).max(0.0)
    }
}
