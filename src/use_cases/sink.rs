use super::types::WorldUpdate;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::warn;

// Port for downstream snapshot persistence. Written to, never read back.
#[async_trait]
pub trait SnapshotSink: Send + Sync {
    async fn persist(&self, snapshot: WorldUpdate) -> Result<(), String>;
}

/// Feeds committed snapshots to `sink` off the tick path.
pub async fn sink_task(mut world_rx: broadcast::Receiver<WorldUpdate>, sink: Arc<dyn SnapshotSink>) {
    loop {
        match world_rx.recv().await {
            Ok(snapshot) => {
                let tick = snapshot.tick;
                if let Err(error) = sink.persist(snapshot).await {
                    warn!(tick, %error, "snapshot sink failed");
                }
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!(missed = n, "snapshot sink lagged; skipping to latest update");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
