use crate::domain::state::Player;
use crate::domain::store::{EntityStore, Mutation};
use crate::domain::tuning::ProgressionTuning;

pub fn level_for_xp(xp: u32, xp_per_level: u32) -> u32 {
    xp / xp_per_level.max(1) + 1
}

/// Level-up for a player whose XP crossed one or more thresholds since the last update.
///
/// Speed is multiplied once per level gained; the store heals to full once.
pub fn plan_level_up(p: &Player, cfg: &ProgressionTuning) -> Option<Mutation> {
    let level = level_for_xp(p.xp, cfg.xp_per_level);
    if level <= p.level {
        return None;
    }
    let gained = (level - p.level) as i32;
    Some(Mutation::LevelUp {
        player_id: p.id.clone(),
        level,
        speed: p.speed * cfg.level_speed_multiplier.powi(gained),
    })
}

pub fn plan_progression(store: &EntityStore, cfg: &ProgressionTuning) -> Vec<Mutation> {
    store
        .players()
        .filter_map(|p| plan_level_up(p, cfg))
        .collect()
}
