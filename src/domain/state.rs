// Domain-level simulation entities and input/snapshot types.

use super::items::ItemKind;
use super::tuning::BoostTuning;
use super::vec2::Vec2;
use std::collections::BTreeMap;
use std::time::Duration;

pub type PlayerId = String;
pub type ItemId = u64;
pub type ZoneId = u64;
pub type ProjectileId = u64;

/// Latest intent received for a player; `move_dir` is already sanitized to `[-1, 1]^2`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    pub move_dir: Vec2,
    pub boost: bool,
    pub fire: bool,
}

/// Boost ramp state machine.
///
/// `Idle -> Ramping` on press, `Ramping -> Idle` on release. The multiplier is derived
/// from how long the boost has been held, so it never decreases while held.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoostState {
    Idle,
    Ramping { since: Duration },
}

impl BoostState {
    pub fn next(self, held: bool, now: Duration) -> BoostState {
        match (self, held) {
            (BoostState::Idle, true) => BoostState::Ramping { since: now },
            (BoostState::Ramping { .. }, false) => BoostState::Idle,
            (state, _) => state,
        }
    }

    /// Speed multiplier at `now`; 1.0 while idle.
    pub fn multiplier(self, now: Duration, tuning: &BoostTuning) -> f32 {
        match self {
            BoostState::Idle => 1.0,
            BoostState::Ramping { since } => {
                let held_secs = now.saturating_sub(since).as_secs() as f32;
                (tuning.base + tuning.increment * held_secs).min(tuning.max)
            }
        }
    }

    pub fn is_boosting(self) -> bool {
        matches!(self, BoostState::Ramping { .. })
    }
}

/// Alive/dead state machine; dead players wait for `respawn_at`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LifeState {
    Alive,
    Dead { respawn_at: Duration },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: String,
    pub position: Vec2,
    /// Last nonzero movement direction; zero until the player first moves.
    pub direction: Vec2,
    pub speed: f32,
    pub health: i32,
    pub score: u32,
    pub level: u32,
    pub xp: u32,

    // Simulation-only state (not exposed in snapshots).
    pub boost: BoostState,
    pub life: LifeState,
    pub last_fire_at: Option<Duration>,
    pub last_input: PlayerInput,
}

impl Player {
    pub fn is_alive(&self) -> bool {
        matches!(self.life, LifeState::Alive)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub position: Vec2,
    pub kind: ItemKind,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DangerZone {
    pub id: ZoneId,
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    pub damage_per_tick: i32,
}

impl DangerZone {
    /// Inclusive rectangle containment.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.position.x
            && point.x <= self.position.x + self.width
            && point.y >= self.position.y
            && point.y <= self.position.y + self.height
    }

    pub fn same_bounds(&self, other: &DangerZone) -> bool {
        self.position == other.position && self.width == other.width && self.height == other.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: ProjectileId,
    pub owner_id: PlayerId,
    pub position: Vec2,
    /// Unit vector.
    pub direction: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub color: String,
    pub position: Vec2,
    pub direction: Vec2,
    pub speed: f32,
    pub health: i32,
    pub score: u32,
    pub level: u32,
    pub xp: u32,
    pub xp_into_level: u32,
    pub alive: bool,
    pub boosting: bool,
}

impl PlayerSnapshot {
    pub fn from_player(p: &Player, xp_per_level: u32) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            color: p.color.clone(),
            position: p.position,
            direction: p.direction,
            speed: p.speed,
            health: p.health,
            score: p.score,
            level: p.level,
            xp: p.xp,
            xp_into_level: p.xp % xp_per_level.max(1),
            alive: p.is_alive(),
            boosting: p.boost.is_boosting(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub player_id: PlayerId,
    pub name: String,
    pub score: u32,
}

/// Immutable authoritative view of the world after one committed tick.
#[derive(Debug, Clone, Default)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub players: BTreeMap<PlayerId, PlayerSnapshot>,
    pub items: BTreeMap<ItemId, Item>,
    pub zones: Vec<DangerZone>,
    pub projectiles: Vec<Projectile>,
    pub leaderboard: Vec<LeaderboardEntry>,
}
