// Authoritative entity registry. Engines read it and propose `Mutation`s; only
// `EntityStore::apply` writes.

use super::items::ItemKind;
use super::state::{
    BoostState, DangerZone, Item, ItemId, LeaderboardEntry, LifeState, Player, PlayerId,
    PlayerInput, PlayerSnapshot, Projectile, ProjectileId, WorldSnapshot, ZoneId,
};
use super::vec2::Vec2;
use std::collections::BTreeMap;
use std::time::Duration;

/// Zone geometry proposed by the spawner; the store assigns ids.
#[derive(Debug, Clone, PartialEq)]
pub struct NewZone {
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    pub damage_per_tick: i32,
}

/// A proposed change to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    InsertPlayer(Player),
    RemovePlayer {
        player_id: PlayerId,
        purge_projectiles: bool,
    },
    SetInput {
        player_id: PlayerId,
        input: PlayerInput,
    },
    SetBoost {
        player_id: PlayerId,
        boost: BoostState,
    },
    Move {
        player_id: PlayerId,
        position: Vec2,
        direction: Vec2,
    },
    Respawn {
        player_id: PlayerId,
        position: Vec2,
    },
    /// Remove-then-credit: the item is taken out before any stat changes.
    CollectItem {
        item_id: ItemId,
        player_id: PlayerId,
    },
    Damage {
        player_id: PlayerId,
        amount: i32,
        respawn_at: Duration,
    },
    Fire {
        owner_id: PlayerId,
        position: Vec2,
        direction: Vec2,
        cost: u32,
        at: Duration,
    },
    MoveProjectile {
        projectile_id: ProjectileId,
        position: Vec2,
    },
    RemoveProjectile {
        projectile_id: ProjectileId,
    },
    /// Remove-then-credit for projectile hits.
    ResolveHit {
        projectile_id: ProjectileId,
        victim_id: PlayerId,
        damage: i32,
        bonus: u32,
        respawn_at: Duration,
    },
    LevelUp {
        player_id: PlayerId,
        level: u32,
        speed: f32,
    },
    SpawnItem {
        position: Vec2,
        kind: ItemKind,
    },
    ReplaceZones(Vec<NewZone>),
}

#[derive(Debug)]
pub struct EntityStore {
    max_health: i32,
    players: BTreeMap<PlayerId, Player>,
    items: BTreeMap<ItemId, Item>,
    zones: Vec<DangerZone>,
    projectiles: BTreeMap<ProjectileId, Projectile>,
    next_item_id: ItemId,
    next_zone_id: ZoneId,
    next_projectile_id: ProjectileId,
}

impl EntityStore {
    pub fn new(max_health: i32) -> Self {
        Self {
            max_health,
            players: BTreeMap::new(),
            items: BTreeMap::new(),
            zones: Vec::new(),
            projectiles: BTreeMap::new(),
            next_item_id: 1,
            next_zone_id: 1,
            next_projectile_id: 1,
        }
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    /// Players in ascending id order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.get(id)
    }

    /// Items in ascending id order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn zones(&self) -> &[DangerZone] {
        &self.zones
    }

    /// Projectiles in ascending id order.
    pub fn projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.values()
    }

    pub fn projectile(&self, id: ProjectileId) -> Option<&Projectile> {
        self.projectiles.get(&id)
    }

    /// Applies one mutation. Returns false when it no longer applies (entity gone, item
    /// already taken) and the store is unchanged.
    pub fn apply(&mut self, mutation: Mutation) -> bool {
        match mutation {
            Mutation::InsertPlayer(player) => {
                if self.players.contains_key(&player.id) {
                    return false;
                }
                self.players.insert(player.id.clone(), player);
                true
            }
            Mutation::RemovePlayer {
                player_id,
                purge_projectiles,
            } => {
                let removed = self.players.remove(&player_id).is_some();
                if removed && purge_projectiles {
                    self.projectiles.retain(|_, p| p.owner_id != player_id);
                }
                removed
            }
            Mutation::SetInput { player_id, input } => match self.players.get_mut(&player_id) {
                Some(p) => {
                    p.last_input = input;
                    true
                }
                None => false,
            },
            Mutation::SetBoost { player_id, boost } => match self.players.get_mut(&player_id) {
                Some(p) => {
                    p.boost = boost;
                    true
                }
                None => false,
            },
            Mutation::Move {
                player_id,
                position,
                direction,
            } => match self.players.get_mut(&player_id) {
                Some(p) if p.is_alive() => {
                    p.position = position;
                    p.direction = direction;
                    true
                }
                _ => false,
            },
            Mutation::Respawn {
                player_id,
                position,
            } => match self.players.get_mut(&player_id) {
                Some(p) if !p.is_alive() => {
                    p.position = position;
                    p.health = self.max_health;
                    p.life = LifeState::Alive;
                    p.boost = BoostState::Idle;
                    p.last_fire_at = None;
                    true
                }
                _ => false,
            },
            Mutation::CollectItem { item_id, player_id } => {
                let Some(player) = self.players.get_mut(&player_id) else {
                    return false;
                };
                if !player.is_alive() {
                    return false;
                }
                let Some(item) = self.items.remove(&item_id) else {
                    return false;
                };
                let rewards = item.kind.rewards();
                player.score = player.score.saturating_add(item.value);
                player.xp = player.xp.saturating_add(rewards.xp);
                player.health = (player.health + rewards.heal).clamp(0, self.max_health);
                true
            }
            Mutation::Damage {
                player_id,
                amount,
                respawn_at,
            } => match self.players.get_mut(&player_id) {
                Some(p) if p.is_alive() => {
                    damage_player(p, amount, respawn_at);
                    true
                }
                _ => false,
            },
            Mutation::Fire {
                owner_id,
                position,
                direction,
                cost,
                at,
            } => {
                let Some(owner) = self.players.get_mut(&owner_id) else {
                    return false;
                };
                if !owner.is_alive() || owner.score < cost {
                    return false;
                }
                owner.score -= cost;
                owner.last_fire_at = Some(at);

                let id = self.next_projectile_id;
                self.next_projectile_id = self.next_projectile_id.wrapping_add(1);
                self.projectiles.insert(
                    id,
                    Projectile {
                        id,
                        owner_id,
                        position,
                        direction,
                    },
                );
                true
            }
            Mutation::MoveProjectile {
                projectile_id,
                position,
            } => match self.projectiles.get_mut(&projectile_id) {
                Some(p) => {
                    p.position = position;
                    true
                }
                None => false,
            },
            Mutation::RemoveProjectile { projectile_id } => {
                self.projectiles.remove(&projectile_id).is_some()
            }
            Mutation::ResolveHit {
                projectile_id,
                victim_id,
                damage,
                bonus,
                respawn_at,
            } => {
                let Some(projectile) = self.projectiles.remove(&projectile_id) else {
                    return false;
                };
                match self.players.get_mut(&victim_id) {
                    Some(victim) if victim.is_alive() => {
                        damage_player(victim, damage, respawn_at);
                    }
                    _ => return true,
                }
                // The shooter may have left; the hit still lands.
                if let Some(owner) = self.players.get_mut(&projectile.owner_id) {
                    owner.score = owner.score.saturating_add(bonus);
                }
                true
            }
            Mutation::LevelUp {
                player_id,
                level,
                speed,
            } => match self.players.get_mut(&player_id) {
                Some(p) if level > p.level => {
                    p.level = level;
                    p.speed = speed;
                    if p.is_alive() {
                        p.health = self.max_health;
                    }
                    true
                }
                _ => false,
            },
            Mutation::SpawnItem { position, kind } => {
                let id = self.next_item_id;
                self.next_item_id = self.next_item_id.wrapping_add(1);
                self.items.insert(
                    id,
                    Item {
                        id,
                        position,
                        kind,
                        value: kind.rewards().value,
                    },
                );
                true
            }
            Mutation::ReplaceZones(zones) => {
                self.zones = zones
                    .into_iter()
                    .map(|z| {
                        let id = self.next_zone_id;
                        self.next_zone_id = self.next_zone_id.wrapping_add(1);
                        DangerZone {
                            id,
                            position: z.position,
                            width: z.width,
                            height: z.height,
                            damage_per_tick: z.damage_per_tick,
                        }
                    })
                    .collect();
                true
            }
        }
    }

    /// Top players by score, ties broken by ascending id.
    pub fn leaderboard(&self, size: usize) -> Vec<LeaderboardEntry> {
        let mut ranked: Vec<&Player> = self.players.values().collect();
        // Stable sort keeps ascending id order among equal scores.
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
            .into_iter()
            .take(size)
            .enumerate()
            .map(|(i, p)| LeaderboardEntry {
                rank: i + 1,
                player_id: p.id.clone(),
                name: p.name.clone(),
                score: p.score,
            })
            .collect()
    }

    pub fn snapshot(&self, tick: u64, xp_per_level: u32, leaderboard_size: usize) -> WorldSnapshot {
        WorldSnapshot {
            tick,
            players: self
                .players
                .iter()
                .map(|(id, p)| (id.clone(), PlayerSnapshot::from_player(p, xp_per_level)))
                .collect(),
            items: self.items.clone(),
            zones: self.zones.clone(),
            projectiles: self.projectiles.values().cloned().collect(),
            leaderboard: self.leaderboard(leaderboard_size),
        }
    }
}

fn damage_player(p: &mut Player, amount: i32, respawn_at: Duration) {
    p.health = (p.health - amount).max(0);
    if p.health == 0 {
        p.life = LifeState::Dead { respawn_at };
        p.boost = BoostState::Idle;
    }
}
