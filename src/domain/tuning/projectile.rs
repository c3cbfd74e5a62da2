/// Gameplay tuning for projectiles and fire control.
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    /// Distance travelled per tick.
    pub speed: f32,

    /// A projectile hits a player closer than this. Defaults to the avatar radius
    /// (half of the default `entity_size`); tuned independently of it.
    pub hit_radius: f32,

    /// Health removed from the victim on hit.
    pub damage: i32,

    /// Score awarded to the shooter on hit.
    pub hit_bonus: u32,

    /// Score deducted per shot; fire is refused below this.
    pub cost: u32,

    /// Minimum time between two accepted shots of one player.
    pub cooldown_ms: u64,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: 8.0,
            hit_radius: 15.0,
            damage: 10,
            hit_bonus: 20,
            cost: 5,
            cooldown_ms: 200,
        }
    }
}
