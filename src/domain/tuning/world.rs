/// Map geometry, spawner cadence and zone ranges.
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    /// Square map side length.
    pub map_size: f32,

    /// Movement grid; spawns snap to it and it scales movement speed.
    pub grid_size: f32,

    /// Items closer than this to a player are collected.
    pub collect_distance: f32,

    pub max_items: usize,
    pub item_spawn_interval_ms: u64,

    pub zone_regen_interval_ms: u64,
    pub zone_damage_interval_ms: u64,
    pub zone_count_min: u32,
    pub zone_count_max: u32,
    /// Zone width/height range, upper bound exclusive.
    pub zone_size_min: f32,
    pub zone_size_max: f32,
    /// Damage per cadence range, upper bound exclusive.
    pub zone_damage_min: i32,
    pub zone_damage_max: i32,

    pub leaderboard_size: usize,

    /// Drop a leaving player's in-flight projectiles instead of letting them resolve.
    pub purge_projectiles_on_leave: bool,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            map_size: 2000.0,
            grid_size: 50.0,
            collect_distance: 30.0,
            max_items: 10,
            item_spawn_interval_ms: 5_000,
            zone_regen_interval_ms: 30_000,
            zone_damage_interval_ms: 1_000,
            zone_count_min: 2,
            zone_count_max: 3,
            zone_size_min: 200.0,
            zone_size_max: 500.0,
            zone_damage_min: 5,
            zone_damage_max: 10,
            leaderboard_size: 10,
            purge_projectiles_on_leave: false,
        }
    }
}
