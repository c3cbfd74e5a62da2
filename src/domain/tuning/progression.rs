/// XP and leveling rules.
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ProgressionTuning {
    pub xp_per_level: u32,

    /// Applied to `speed` once per level gained.
    pub level_speed_multiplier: f32,
}

impl Default for ProgressionTuning {
    fn default() -> Self {
        Self {
            xp_per_level: 100,
            level_speed_multiplier: 1.1,
        }
    }
}
