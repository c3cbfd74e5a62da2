use crate::use_cases::{SnapshotSink, WorldUpdate};
use async_trait::async_trait;
use tracing::info;

/// Default snapshot sink: logs a world summary every `every_ticks` ticks.
pub struct TracingSnapshotSink {
    every_ticks: u64,
}

impl TracingSnapshotSink {
    pub fn new(every_ticks: u64) -> Self {
        Self {
            every_ticks: every_ticks.max(1),
        }
    }

    fn is_due(&self, tick: u64) -> bool {
        tick % self.every_ticks == 0
    }
}

#[async_trait]
impl SnapshotSink for TracingSnapshotSink {
    async fn persist(&self, snapshot: WorldUpdate) -> Result<(), String> {
        if !self.is_due(snapshot.tick) {
            return Ok(());
        }
        let leader = snapshot.leaderboard.first();
        info!(
            tick = snapshot.tick,
            players = snapshot.players.len(),
            items = snapshot.items.len(),
            zones = snapshot.zones.len(),
            projectiles = snapshot.projectiles.len(),
            leader = leader.map(|e| e.player_id.as_str()),
            leader_score = leader.map(|e| e.score),
            "world summary"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_interval_is_zero_then_every_tick_is_due() {
        let sink = TracingSnapshotSink::new(0);
        assert!(sink.is_due(1));
        assert!(sink.is_due(7));
    }

    #[test]
    fn when_interval_is_set_then_only_multiples_are_due() {
        let sink = TracingSnapshotSink::new(600);
        assert!(!sink.is_due(599));
        assert!(sink.is_due(600));
    }
}
