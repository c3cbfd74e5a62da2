use crate::domain::state::{Player, PlayerInput};
use crate::domain::store::{EntityStore, Mutation};
use crate::domain::tuning::{BoostTuning, Tuning};
use crate::domain::vec2::Vec2;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct MovementConfig {
    /// `grid_size / 10`, the map-scale factor applied to player speed.
    pub speed_scale: f32,
    pub max_speed: f32, // units/tick
    pub max_coord: f32,
    pub boost: BoostTuning,
}

impl MovementConfig {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            speed_scale: tuning.world.grid_size / 10.0,
            max_speed: tuning.player.max_speed,
            max_coord: tuning.max_coord(),
            boost: tuning.player.boost,
        }
    }
}

/// Displacement for one tick: input clamped to unit length, scaled by speed and boost,
/// then capped at `max_speed`.
pub fn displacement(input: Vec2, speed: f32, boost_multiplier: f32, cfg: &MovementConfig) -> Vec2 {
    let dir = if input.length_sq() > 1.0 {
        input.normalize()
    } else {
        input
    };
    let effective_speed = speed * cfg.speed_scale * boost_multiplier;
    (dir * effective_speed).clamp_length(cfg.max_speed)
}

/// Mutations moving one player for this tick; empty for an idle player.
pub fn step_player(p: &Player, now: Duration, cfg: &MovementConfig) -> Vec<Mutation> {
    let mut out = Vec::new();
    if !p.is_alive() {
        return out;
    }

    let PlayerInput { move_dir, boost, .. } = p.last_input;
    // The ramp only counts while the player is actually moving.
    let held = boost && !move_dir.is_zero();
    let next_boost = p.boost.next(held, now);
    if next_boost != p.boost {
        out.push(Mutation::SetBoost {
            player_id: p.id.clone(),
            boost: next_boost,
        });
    }

    if move_dir.is_zero() {
        return out;
    }

    let delta = displacement(move_dir, p.speed, next_boost.multiplier(now, &cfg.boost), cfg);
    if delta.is_zero() {
        return out;
    }

    // Hard walls: clamp, no bounce.
    let position = (p.position + delta).clamp_axes(0.0, cfg.max_coord);
    out.push(Mutation::Move {
        player_id: p.id.clone(),
        position,
        direction: delta.normalize(),
    });
    out
}

pub fn plan_movement(store: &EntityStore, now: Duration, cfg: &MovementConfig) -> Vec<Mutation> {
    store
        .players()
        .flat_map(|p| step_player(p, now, cfg))
        .collect()
}
