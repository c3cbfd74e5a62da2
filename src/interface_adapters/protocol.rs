// Wire protocol DTOs and conversions for public arena messages.

use crate::domain::state::{DangerZone, Item, LeaderboardEntry, PlayerSnapshot, Projectile};
use crate::domain::{PlayerInput, Vec2, WorldSnapshot};
use serde::{Deserialize, Serialize};

/// Messages the server sends to connected clients over the WebSocket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    // Assigned identity for the connection after Join is accepted.
    Identity { player_id: String },
    // Snapshot of the world for a given tick.
    WorldUpdate(WorldUpdateDto),
    // A fire request from this player was refused.
    FireRejected { reason: String },
    // The join handshake was refused; the socket closes right after.
    JoinRejected { reason: String },
}

/// Messages the client sends to the server over the WebSocket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    // Initial handshake message with identity metadata.
    Join(JoinPayload),
    // Latest intent; replaces the previous one.
    Input(PlayerInputDto),
    // One explicit shot attempt.
    Fire,
}

/// Identity handed over by the upstream identity layer.
#[derive(Debug, Clone, Deserialize)]
pub struct JoinPayload {
    pub player_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerInputDto {
    #[serde(default)]
    pub move_x: f32,
    #[serde(default)]
    pub move_y: f32,
    #[serde(default)]
    pub boost: bool,
    #[serde(default)]
    pub fire: bool,
}

impl From<PlayerInputDto> for PlayerInput {
    fn from(input: PlayerInputDto) -> Self {
        Self {
            move_dir: Vec2::new(input.move_x, input.move_y),
            boost: input.boost,
            fire: input.fire,
        }
    }
}

/// Snapshot of the world sent to clients on each tick and served over HTTP.
#[derive(Debug, Clone, Serialize)]
pub struct WorldUpdateDto {
    pub tick: u64,
    pub players: Vec<PlayerStateDto>,
    pub items: Vec<ItemStateDto>,
    pub zones: Vec<ZoneStateDto>,
    pub projectiles: Vec<ProjectileStateDto>,
    pub leaderboard: Vec<LeaderboardEntryDto>,
}

impl From<&WorldSnapshot> for WorldUpdateDto {
    fn from(update: &WorldSnapshot) -> Self {
        Self {
            tick: update.tick,
            players: update.players.values().map(PlayerStateDto::from).collect(),
            items: update.items.values().map(ItemStateDto::from).collect(),
            zones: update.zones.iter().map(ZoneStateDto::from).collect(),
            projectiles: update
                .projectiles
                .iter()
                .map(ProjectileStateDto::from)
                .collect(),
            leaderboard: update
                .leaderboard
                .iter()
                .map(LeaderboardEntryDto::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerStateDto {
    pub id: String,
    pub name: String,
    pub color: String,
    pub x: f32,
    pub y: f32,
    pub dir_x: f32,
    pub dir_y: f32,
    pub speed: f32,
    pub health: i32,
    pub score: u32,
    pub level: u32,
    pub xp: u32,
    pub xp_into_level: u32,
    pub alive: bool,
    pub boosting: bool,
}

impl From<&PlayerSnapshot> for PlayerStateDto {
    fn from(p: &PlayerSnapshot) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            color: p.color.clone(),
            x: p.position.x,
            y: p.position.y,
            dir_x: p.direction.x,
            dir_y: p.direction.y,
            speed: p.speed,
            health: p.health,
            score: p.score,
            level: p.level,
            xp: p.xp,
            xp_into_level: p.xp_into_level,
            alive: p.alive,
            boosting: p.boosting,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemStateDto {
    pub id: u64,
    pub kind: &'static str,
    pub x: f32,
    pub y: f32,
    pub value: u32,
}

impl From<&Item> for ItemStateDto {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            kind: item.kind.as_str(),
            x: item.position.x,
            y: item.position.y,
            value: item.value,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ZoneStateDto {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub damage: i32,
}

impl From<&DangerZone> for ZoneStateDto {
    fn from(zone: &DangerZone) -> Self {
        Self {
            id: zone.id,
            x: zone.position.x,
            y: zone.position.y,
            width: zone.width,
            height: zone.height,
            damage: zone.damage_per_tick,
        }
    }
}

/// Flattened projectile state for wire transmission in world updates.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectileStateDto {
    pub id: u64,
    pub owner_id: String,
    pub x: f32,
    pub y: f32,
    pub dir_x: f32,
    pub dir_y: f32,
}

impl From<&Projectile> for ProjectileStateDto {
    fn from(projectile: &Projectile) -> Self {
        Self {
            id: projectile.id,
            owner_id: projectile.owner_id.clone(),
            x: projectile.position.x,
            y: projectile.position.y,
            dir_x: projectile.direction.x,
            dir_y: projectile.direction.y,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntryDto {
    pub rank: usize,
    pub player_id: String,
    pub name: String,
    pub score: u32,
}

impl From<&LeaderboardEntry> for LeaderboardEntryDto {
    fn from(entry: &LeaderboardEntry) -> Self {
        Self {
            rank: entry.rank,
            player_id: entry.player_id.clone(),
            name: entry.name.clone(),
            score: entry.score,
        }
    }
}
