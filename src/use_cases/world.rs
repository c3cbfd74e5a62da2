// Tick scheduler: buffers events between ticks and runs the engines in a fixed order.

use super::types::{GameEvent, PlayerNotice, WorldUpdate};
use crate::domain::state::{BoostState, LifeState};
use crate::domain::store::{EntityStore, Mutation};
use crate::domain::systems::movement::{self, MovementConfig};
use crate::domain::systems::projectiles::{self, ProjectileConfig};
use crate::domain::systems::{collision, progression, spawner};
use crate::domain::{Player, PlayerId, PlayerInput, Tuning, Vec2};
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};
use std::mem;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Result of one committed tick.
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub snapshot: WorldUpdate,
    pub notices: Vec<PlayerNotice>,
    /// Intents dropped this tick (unknown player, rejected held fire).
    pub dropped: u32,
}

pub struct World<R> {
    tuning: Tuning,
    tick_interval: Duration,
    tick: u64,
    elapsed: Duration,
    store: EntityStore,
    rng: R,
    movement: MovementConfig,
    projectile: ProjectileConfig,
    respawn_delay: Duration,

    // Buffered between ticks. Joins and leaves keep arrival order; inputs coalesce.
    membership: Vec<GameEvent>,
    inputs: BTreeMap<PlayerId, PlayerInput>,
    fire_requests: BTreeSet<PlayerId>,

    next_item_spawn_at: Duration,
    next_zone_regen_at: Duration,
    next_zone_damage_at: Duration,
}

impl<R: Rng> World<R> {
    pub fn new(tuning: Tuning, tick_interval: Duration, rng: R) -> Self {
        let next_item_spawn_at = Duration::from_millis(tuning.world.item_spawn_interval_ms);
        let next_zone_damage_at = Duration::from_millis(tuning.world.zone_damage_interval_ms);
        Self {
            store: EntityStore::new(tuning.player.max_health),
            movement: MovementConfig::from_tuning(&tuning),
            projectile: ProjectileConfig::from_tuning(&tuning),
            respawn_delay: Duration::try_from_secs_f32(tuning.player.respawn_seconds)
                .unwrap_or(Duration::ZERO),
            tuning,
            tick_interval,
            tick: 0,
            elapsed: Duration::ZERO,
            rng,
            membership: Vec::new(),
            inputs: BTreeMap::new(),
            fire_requests: BTreeSet::new(),
            next_item_spawn_at,
            // Zones exist from the first tick.
            next_zone_regen_at: Duration::ZERO,
            next_zone_damage_at,
        }
    }

    /// Simulation time of the last committed tick.
    pub fn now(&self) -> Duration {
        self.elapsed
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Queues an event for the next tick. Nothing touches the store until `step`.
    pub fn handle(&mut self, event: GameEvent) {
        match event {
            GameEvent::Input { player_id, input } => {
                self.inputs.insert(player_id, input);
            }
            GameEvent::Fire { player_id } => {
                self.fire_requests.insert(player_id);
            }
            ev @ (GameEvent::Join { .. } | GameEvent::Leave { .. }) => self.membership.push(ev),
        }
    }

    /// Runs one tick: membership, inputs, respawns, movement, projectiles, fire, item
    /// collection, zone damage (on its cadence), progression, spawner, snapshot.
    pub fn step(&mut self) -> TickOutcome {
        self.tick += 1;
        self.elapsed += self.tick_interval;
        let now = self.elapsed;
        let respawn_at = now + self.respawn_delay;
        let mut dropped = 0;
        let mut notices = Vec::new();

        self.apply_membership();

        for (player_id, input) in mem::take(&mut self.inputs) {
            if !self.store.apply(Mutation::SetInput {
                player_id: player_id.clone(),
                input,
            }) {
                debug!(%player_id, "input for unknown player dropped");
                dropped += 1;
            }
        }

        self.apply_respawns(now);

        for m in movement::plan_movement(&self.store, now, &self.movement) {
            self.store.apply(m);
        }

        for m in projectiles::plan_projectiles(&self.store, &self.projectile, respawn_at) {
            let hit = match &m {
                Mutation::ResolveHit {
                    projectile_id,
                    victim_id,
                    ..
                } => Some((*projectile_id, victim_id.clone())),
                _ => None,
            };
            if !self.store.apply(m) {
                continue;
            }
            if let Some((projectile_id, victim_id)) = hit {
                let victim_hp = self.store.player(&victim_id).map(|p| p.health);
                info!(%victim_id, projectile_id, ?victim_hp, "player hit");
            }
        }

        dropped += self.apply_fire(now, &mut notices);

        for m in collision::plan_item_collection(&self.store, self.tuning.world.collect_distance) {
            if let Mutation::CollectItem { item_id, player_id } = &m {
                debug!(item_id, %player_id, "item claimed");
            }
            self.store.apply(m);
        }

        if due(
            &mut self.next_zone_damage_at,
            now,
            self.tuning.world.zone_damage_interval_ms,
        ) {
            for m in collision::plan_zone_damage(&self.store, respawn_at) {
                self.store.apply(m);
            }
        }

        for m in progression::plan_progression(&self.store, &self.tuning.progression) {
            if let Mutation::LevelUp {
                player_id, level, ..
            } = &m
            {
                info!(%player_id, level, "level up");
            }
            self.store.apply(m);
        }

        self.run_spawner(now);

        let snapshot = Arc::new(self.store.snapshot(
            self.tick,
            self.tuning.progression.xp_per_level,
            self.tuning.world.leaderboard_size,
        ));

        TickOutcome {
            snapshot,
            notices,
            dropped,
        }
    }

    fn apply_membership(&mut self) {
        for ev in mem::take(&mut self.membership) {
            match ev {
                GameEvent::Join { player_id, name } => {
                    let player = self.new_player(player_id.clone(), name);
                    if self.store.apply(Mutation::InsertPlayer(player)) {
                        info!(%player_id, "player joined");
                    } else {
                        debug!(%player_id, "duplicate join ignored");
                    }
                }
                GameEvent::Leave { player_id } => {
                    let purge = self.tuning.world.purge_projectiles_on_leave;
                    if self.store.apply(Mutation::RemovePlayer {
                        player_id: player_id.clone(),
                        purge_projectiles: purge,
                    }) {
                        info!(%player_id, "player left");
                    }
                }
                GameEvent::Input { .. } | GameEvent::Fire { .. } => {}
            }
        }
    }

    fn apply_respawns(&mut self, now: Duration) {
        let due: Vec<PlayerId> = self
            .store
            .players()
            .filter(|p| matches!(p.life, LifeState::Dead { respawn_at } if respawn_at <= now))
            .map(|p| p.id.clone())
            .collect();
        for player_id in due {
            let position = self.spawn_position();
            if self.store.apply(Mutation::Respawn {
                player_id: player_id.clone(),
                position,
            }) {
                info!(%player_id, "player respawned");
            }
        }
    }

    // Explicit fire requests report rejections; a held fire flag fails silently.
    fn apply_fire(&mut self, now: Duration, notices: &mut Vec<PlayerNotice>) -> u32 {
        let requested = mem::take(&mut self.fire_requests);
        let mut shooters: BTreeSet<PlayerId> = self
            .store
            .players()
            .filter(|p| p.last_input.fire)
            .map(|p| p.id.clone())
            .collect();
        shooters.extend(requested.iter().cloned());

        let mut dropped = 0;
        for player_id in shooters {
            match projectiles::plan_fire(self.store.player(&player_id), now, &self.projectile) {
                Ok(m) => {
                    self.store.apply(m);
                }
                Err(reason) => {
                    dropped += 1;
                    if requested.contains(&player_id) {
                        debug!(%player_id, %reason, "fire rejected");
                        notices.push(PlayerNotice::FireRejected { player_id, reason });
                    }
                }
            }
        }
        dropped
    }

    fn run_spawner(&mut self, now: Duration) {
        if due(
            &mut self.next_item_spawn_at,
            now,
            self.tuning.world.item_spawn_interval_ms,
        ) {
            // No-op at capacity.
            if let Some(m) = spawner::plan_item_spawn(&self.store, &self.tuning.world, &mut self.rng) {
                self.store.apply(m);
            }
        }

        if due(
            &mut self.next_zone_regen_at,
            now,
            self.tuning.world.zone_regen_interval_ms,
        ) {
            let m = spawner::plan_zone_regen(&self.tuning.world, &mut self.rng);
            self.store.apply(m);
            debug!(zones = self.store.zones().len(), "danger zones regenerated");
        }
    }

    fn spawn_position(&mut self) -> Vec2 {
        let world = &self.tuning.world;
        spawner::grid_position(
            &mut self.rng,
            world.map_size,
            self.tuning.player.entity_size,
            world.grid_size,
        )
    }

    fn new_player(&mut self, id: PlayerId, name: String) -> Player {
        let position = self.spawn_position();
        let color = spawner::random_color(&mut self.rng);
        Player {
            id,
            name,
            color,
            position,
            direction: Vec2::ZERO,
            speed: self.tuning.player.base_speed,
            health: self.tuning.player.max_health,
            score: 0,
            level: 1,
            xp: 0,
            boost: BoostState::Idle,
            life: LifeState::Alive,
            last_fire_at: None,
            last_input: PlayerInput::default(),
        }
    }
}

/// True when a periodic job is due at `now`; schedules the next run.
fn due(next: &mut Duration, now: Duration, interval_ms: u64) -> bool {
    if now < *next {
        return false;
    }
    let interval = Duration::from_millis(interval_ms.max(1));
    *next += interval;
    if *next <= now {
        *next = now + interval;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FireRejection, ItemKind};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const TICK: Duration = Duration::from_millis(100);

    fn world() -> World<StdRng> {
        World::new(Tuning::default(), TICK, StdRng::seed_from_u64(42))
    }

    // Quiet world: no zones, no random items.
    fn calm_world(tick: Duration) -> World<StdRng> {
        let mut tuning = Tuning::default();
        tuning.world.zone_count_min = 0;
        tuning.world.zone_count_max = 0;
        tuning.world.max_items = 0;
        World::new(tuning, tick, StdRng::seed_from_u64(42))
    }

    fn join(world: &mut World<StdRng>, id: &str) {
        world.handle(GameEvent::Join {
            player_id: id.to_string(),
            name: format!("pilot_{id}"),
        });
    }

    fn input(world: &mut World<StdRng>, id: &str, x: f32, y: f32, boost: bool) {
        world.handle(GameEvent::Input {
            player_id: id.to_string(),
            input: PlayerInput {
                move_dir: Vec2::new(x, y),
                boost,
                fire: false,
            },
        });
    }

    #[test]
    fn when_player_joins_then_next_snapshot_contains_default_stats() {
        let mut world = world();
        join(&mut world, "a");

        let out = world.step();

        let p = out.snapshot.players.get("a").expect("player should be in snapshot");
        assert_eq!(p.health, 100);
        assert_eq!(p.level, 1);
        assert_eq!(p.score, 0);
        assert!(p.alive);
        let max = world.tuning().max_coord();
        assert!((0.0..=max).contains(&p.position.x));
        assert!((0.0..=max).contains(&p.position.y));
    }

    #[test]
    fn when_first_tick_runs_then_zones_are_generated() {
        let mut world = world();
        let out = world.step();
        assert!((2..=3).contains(&out.snapshot.zones.len()));
    }

    #[test]
    fn when_input_targets_unknown_player_then_it_is_dropped() {
        let mut world = world();
        input(&mut world, "ghost", 1.0, 0.0, false);

        let out = world.step();

        assert_eq!(out.dropped, 1);
        assert!(out.snapshot.players.is_empty());
    }

    #[test]
    fn when_player_leaves_then_it_is_removed_on_the_next_tick() {
        let mut world = world();
        join(&mut world, "a");
        world.step();

        world.handle(GameEvent::Leave {
            player_id: "a".to_string(),
        });
        let out = world.step();

        assert!(!out.snapshot.players.contains_key("a"));
    }

    #[test]
    fn when_boost_is_held_across_seconds_then_per_tick_distance_ramps_and_resets() {
        let mut world = calm_world(Duration::from_secs(1));
        join(&mut world, "a");
        world.step();
        let start = world.store().player("a").map(|p| p.position).unwrap_or_default();
        // Head away from the nearer wall.
        let dir = if start.x > 1000.0 { -1.0 } else { 1.0 };

        let mut deltas = Vec::new();
        let mut last_x = start.x;
        for _ in 0..3 {
            input(&mut world, "a", dir, 0.0, true);
            let out = world.step();
            let x = out.snapshot.players["a"].position.x;
            deltas.push((x - last_x).abs());
            last_x = x;
        }
        input(&mut world, "a", dir, 0.0, false);
        let out = world.step();
        let released = (out.snapshot.players["a"].position.x - last_x).abs();

        // speed 1.0 * grid scale 5.0 * boost 4.0 / 4.3 / 4.6, then back to 1.0.
        assert!((deltas[0] - 20.0).abs() < 1e-3);
        assert!((deltas[1] - 21.5).abs() < 1e-3);
        assert!((deltas[2] - 23.0).abs() < 1e-3);
        assert!((released - 5.0).abs() < 1e-3);
        assert!(!out.snapshot.players["a"].boosting);
    }

    #[test]
    fn when_boost_is_held_while_standing_still_then_first_move_uses_base_multiplier() {
        let mut world = calm_world(Duration::from_secs(1));
        join(&mut world, "a");
        world.step();

        for _ in 0..3 {
            input(&mut world, "a", 0.0, 0.0, true);
            world.step();
        }
        assert_eq!(
            world.store().player("a").map(|p| p.boost),
            Some(BoostState::Idle)
        );

        let start = world.store().player("a").map(|p| p.position).unwrap_or_default();
        let dir = if start.x > 1000.0 { -1.0 } else { 1.0 };
        input(&mut world, "a", dir, 0.0, true);
        let out = world.step();

        let moved = (out.snapshot.players["a"].position.x - start.x).abs();
        assert!((moved - 20.0).abs() < 1e-3);
    }

    #[test]
    fn when_dead_player_waits_out_the_delay_then_it_respawns_with_progress_kept() {
        let mut world = calm_world(TICK);
        join(&mut world, "a");
        world.step();

        // Progress worth keeping, plus boost and cooldown that must reset.
        world.store.apply(Mutation::RemovePlayer {
            player_id: "a".to_string(),
            purge_projectiles: true,
        });
        let mut veteran = world.new_player("a".to_string(), "veteran".to_string());
        veteran.score = 40;
        veteran.xp = 150;
        veteran.level = 2;
        veteran.speed = 1.1;
        veteran.boost = BoostState::Ramping { since: world.now() };
        veteran.last_fire_at = Some(world.now());
        world.store.apply(Mutation::InsertPlayer(veteran));

        let died_at = world.now();
        assert!(world.store.apply(Mutation::Damage {
            player_id: "a".to_string(),
            amount: 100,
            respawn_at: died_at + world.respawn_delay,
        }));

        let mut revived_at = None;
        for _ in 0..40 {
            let out = world.step();
            if out.snapshot.players["a"].alive {
                revived_at = Some(world.now());
                break;
            }
            assert_eq!(out.snapshot.players["a"].health, 0);
        }

        assert_eq!(revived_at, Some(died_at + Duration::from_secs(3)));
        let p = world.store().player("a").expect("player should still exist");
        assert_eq!(p.health, 100);
        assert_eq!(p.score, 40);
        assert_eq!(p.xp, 150);
        assert_eq!(p.level, 2);
        assert!((p.speed - 1.1).abs() < 1e-6);
        assert_eq!(p.boost, BoostState::Idle);
        assert_eq!(p.last_fire_at, None);
        let max = world.tuning().max_coord();
        assert!((0.0..=max).contains(&p.position.x));
        assert!((0.0..=max).contains(&p.position.y));
    }

    #[test]
    fn when_fire_is_requested_without_score_then_rejection_is_reported() {
        let mut world = calm_world(TICK);
        join(&mut world, "a");
        world.step();

        world.handle(GameEvent::Fire {
            player_id: "a".to_string(),
        });
        let out = world.step();

        assert_eq!(
            out.notices,
            vec![PlayerNotice::FireRejected {
                player_id: "a".to_string(),
                reason: FireRejection::InsufficientScore,
            }]
        );
        assert!(out.snapshot.projectiles.is_empty());
        assert_eq!(out.snapshot.players["a"].score, 0);
    }

    #[test]
    fn when_fire_is_requested_for_unknown_player_then_rejection_is_reported() {
        let mut world = calm_world(TICK);
        world.handle(GameEvent::Fire {
            player_id: "ghost".to_string(),
        });

        let out = world.step();

        assert_eq!(
            out.notices,
            vec![PlayerNotice::FireRejected {
                player_id: "ghost".to_string(),
                reason: FireRejection::UnknownPlayer,
            }]
        );
    }

    #[test]
    fn when_item_spawn_interval_elapses_then_one_item_appears() {
        let mut tuning = Tuning::default();
        tuning.world.item_spawn_interval_ms = 500;
        let mut world = World::new(tuning, TICK, StdRng::seed_from_u64(9));

        for _ in 0..4 {
            assert!(world.step().snapshot.items.is_empty());
        }
        let out = world.step();

        assert_eq!(out.snapshot.items.len(), 1);
        let item = out.snapshot.items.values().next().expect("item should exist");
        assert_eq!(item.value, item.kind.rewards().value);
        assert!(ItemKind::ALL.contains(&item.kind));
    }

    #[test]
    fn when_zone_regen_interval_elapses_then_zone_set_is_replaced() {
        let mut tuning = Tuning::default();
        tuning.world.zone_regen_interval_ms = 300;
        let mut world = World::new(tuning, TICK, StdRng::seed_from_u64(4));

        let first = world.step().snapshot.zones.clone();
        world.step();
        world.step();
        let second = world.step().snapshot.zones.clone();

        assert!(!second.is_empty());
        for old in &first {
            assert!(second.iter().all(|z| z.id != old.id));
        }
    }

    #[test]
    fn when_world_runs_for_a_minute_then_health_and_positions_stay_in_range() {
        let mut world = world();
        let mut pilot = StdRng::seed_from_u64(7);
        join(&mut world, "a");
        join(&mut world, "b");
        for _ in 0..600 {
            for id in ["a", "b"] {
                let x = pilot.random_range(-1.0..=1.0);
                let y = pilot.random_range(-1.0..=1.0);
                let boost = pilot.random_bool(0.5);
                input(&mut world, id, x, y, boost);
            }
            let out = world.step();
            for p in out.snapshot.players.values() {
                assert!((0..=100).contains(&p.health));
                let max = world.tuning().max_coord();
                assert!((0.0..=max).contains(&p.position.x));
                assert!((0.0..=max).contains(&p.position.y));
            }
        }
    }

    #[test]
    fn when_due_is_checked_before_and_after_deadline_then_it_fires_once_per_interval() {
        let mut next = Duration::from_millis(1000);
        assert!(!due(&mut next, Duration::from_millis(900), 1000));
        assert!(due(&mut next, Duration::from_millis(1000), 1000));
        assert_eq!(next, Duration::from_millis(2000));
        assert!(!due(&mut next, Duration::from_millis(1100), 1000));
    }
}
