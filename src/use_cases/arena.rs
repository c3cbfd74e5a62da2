// Arena orchestration: spawns the world task and owns its channels.

use crate::domain::{PlayerId, Tuning};
use crate::use_cases::game::{WorldOutputs, world_task};
use crate::use_cases::world::World;
use crate::use_cases::{GameEvent, PlayerNotice, WorldUpdate};
use axum::extract::ws::Utf8Bytes;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, RwLock, broadcast, mpsc, watch};
use tracing::info;

/// Shared configuration for spawning an arena world.
#[derive(Debug, Clone)]
pub struct ArenaSettings {
    /// Capacity for inbound player events.
    pub input_channel_capacity: usize,
    /// Capacity for broadcast world updates.
    pub world_broadcast_capacity: usize,
    /// Capacity for per-player notices (fire rejections).
    pub notice_channel_capacity: usize,
    /// Fixed tick interval for the game loop.
    pub tick_interval: Duration,
    pub tuning: Tuning,
    /// Fixed RNG seed for reproducible runs; `None` seeds from the OS.
    pub seed: Option<u64>,
}

#[derive(Debug)]
struct PlayerConnection {
    token: u64,
    shutdown: Arc<Notify>,
}

/// Channels into and out of one arena world task.
#[derive(Clone)]
pub struct ArenaHandle {
    /// Sender for game events into the world task.
    pub input_tx: mpsc::Sender<GameEvent>,
    /// Broadcast sender for raw world updates.
    pub world_tx: broadcast::Sender<WorldUpdate>,
    /// Broadcast sender for serialized world updates.
    pub world_bytes_tx: broadcast::Sender<Utf8Bytes>,
    /// Watch sender holding the latest serialized world update.
    pub world_latest_tx: watch::Sender<Utf8Bytes>,
    /// Watch sender holding the latest committed snapshot.
    pub snapshot_tx: watch::Sender<WorldUpdate>,
    /// Broadcast sender for per-player notices.
    pub notice_tx: broadcast::Sender<PlayerNotice>,
    shutdown: Arc<Notify>,
    /// One live socket per player id; a newer connection replaces the older one.
    connections: Arc<RwLock<HashMap<PlayerId, PlayerConnection>>>,
}

impl ArenaHandle {
    /// Latest committed snapshot. Never a partial tick.
    pub fn latest_snapshot(&self) -> WorldUpdate {
        self.snapshot_tx.borrow().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.input_tx.is_closed()
    }

    /// Claims the player slot for `token`, signalling any previous owner to disconnect.
    pub async fn register_or_replace_player_connection(
        &self,
        player_id: &str,
        token: u64,
    ) -> Arc<Notify> {
        let shutdown = Arc::new(Notify::new());
        let mut connections = self.connections.write().await;
        let previous = connections.insert(
            player_id.to_string(),
            PlayerConnection {
                token,
                shutdown: shutdown.clone(),
            },
        );
        if let Some(previous) = previous {
            // notify_one keeps a permit if the old socket is not waiting yet.
            previous.shutdown.notify_one();
        }
        shutdown
    }

    /// Releases the slot only if `token` still owns it. Returns whether it did.
    pub async fn unregister_player_connection_if_owner(&self, player_id: &str, token: u64) -> bool {
        let mut connections = self.connections.write().await;
        match connections.get(player_id) {
            Some(conn) if conn.token == token => {
                connections.remove(player_id);
                true
            }
            _ => false,
        }
    }

    /// Stops the world task after its current tick.
    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }
}

/// Creates the arena channels and spawns its authoritative world loop.
pub fn spawn_arena(settings: ArenaSettings) -> ArenaHandle {
    let (input_tx, input_rx) = mpsc::channel::<GameEvent>(settings.input_channel_capacity);
    let (world_tx, _world_rx) =
        broadcast::channel::<WorldUpdate>(settings.world_broadcast_capacity);
    let (world_bytes_tx, _world_bytes_rx) =
        broadcast::channel::<Utf8Bytes>(settings.world_broadcast_capacity);
    let (world_latest_tx, _world_latest_rx) = watch::channel::<Utf8Bytes>(Utf8Bytes::from(""));
    let (snapshot_tx, _snapshot_rx) = watch::channel::<WorldUpdate>(WorldUpdate::default());
    let (notice_tx, _notice_rx) =
        broadcast::channel::<PlayerNotice>(settings.notice_channel_capacity);
    let shutdown = Arc::new(Notify::new());

    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let world = World::new(settings.tuning, settings.tick_interval, rng);

    tokio::spawn(world_task(
        world,
        input_rx,
        WorldOutputs {
            world_tx: world_tx.clone(),
            snapshot_tx: snapshot_tx.clone(),
            notice_tx: notice_tx.clone(),
        },
        settings.tick_interval,
        shutdown.clone(),
    ));
    info!(
        tick_ms = settings.tick_interval.as_millis() as u64,
        seeded = settings.seed.is_some(),
        "arena started"
    );

    ArenaHandle {
        input_tx,
        world_tx,
        world_bytes_tx,
        world_latest_tx,
        snapshot_tx,
        notice_tx,
        shutdown,
        connections: Arc::new(RwLock::new(HashMap::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ArenaSettings {
        ArenaSettings {
            input_channel_capacity: 16,
            world_broadcast_capacity: 16,
            notice_channel_capacity: 16,
            tick_interval: Duration::from_millis(5),
            tuning: Tuning::default(),
            seed: Some(7),
        }
    }

    #[tokio::test]
    async fn when_a_second_connection_claims_the_player_then_the_first_is_signalled() {
        let arena = spawn_arena(settings());

        let first = arena.register_or_replace_player_connection("a", 1).await;
        let _second = arena.register_or_replace_player_connection("a", 2).await;

        tokio::time::timeout(Duration::from_secs(1), first.notified())
            .await
            .expect("first connection should be told to close");

        // The stale connection must not release the slot the new one owns.
        assert!(!arena.unregister_player_connection_if_owner("a", 1).await);
        assert!(arena.unregister_player_connection_if_owner("a", 2).await);
        arena.shutdown();
    }

    #[tokio::test]
    async fn when_arena_runs_then_latest_snapshot_advances() {
        let arena = spawn_arena(settings());
        let mut rx = arena.snapshot_tx.subscribe();

        tokio::time::timeout(Duration::from_secs(2), rx.changed())
            .await
            .expect("a tick should be published")
            .expect("snapshot channel should stay open");

        assert!(arena.latest_snapshot().tick >= 1);
        arena.shutdown();
    }
}
