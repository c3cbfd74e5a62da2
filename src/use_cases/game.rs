use super::types::{GameEvent, PlayerNotice, WorldUpdate};
use super::world::World;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, broadcast, mpsc, watch};
use tracing::{debug, info};

/// Outbound channels fed once per committed tick.
pub struct WorldOutputs {
    pub world_tx: broadcast::Sender<WorldUpdate>,
    pub snapshot_tx: watch::Sender<WorldUpdate>,
    pub notice_tx: broadcast::Sender<PlayerNotice>,
}

pub async fn world_task<R: Rng + Send>(
    mut world: World<R>,
    mut input_rx: mpsc::Receiver<GameEvent>,
    outputs: WorldOutputs,
    tick_interval: Duration,
    shutdown: Arc<Notify>,
) {
    // Drive the fixed-step game loop at the configured tick rate.
    let mut interval = tokio::time::interval(tick_interval);

    loop {
        tokio::select! {
            _ = shutdown.notified() => {
                info!(tick = world.tick(), "world task stopping");
                break;
            }
            _ = interval.tick() => {}
        }

        // Everything queued before this point lands in this tick.
        while let Ok(ev) = input_rx.try_recv() {
            world.handle(ev);
        }

        let outcome = world.step();
        if outcome.dropped > 0 {
            debug!(
                tick = outcome.snapshot.tick,
                dropped = outcome.dropped,
                "intents dropped"
            );
        }

        // Publish only after the tick is committed; the watch holds it even with no subscribers.
        outputs.snapshot_tx.send_replace(outcome.snapshot.clone());
        let _ = outputs.world_tx.send(outcome.snapshot);
        for notice in outcome.notices {
            let _ = outputs.notice_tx.send(notice);
        }
    }
}
