// Item collection and danger-zone damage.

use crate::domain::store::{EntityStore, Mutation};
use std::time::Duration;

/// One claim per item: items in ascending id order, first living player (ascending id)
/// within `collect_distance` wins.
pub fn plan_item_collection(store: &EntityStore, collect_distance: f32) -> Vec<Mutation> {
    let mut claims = Vec::new();
    for item in store.items() {
        let claimant = store
            .players()
            .filter(|p| p.is_alive())
            .find(|p| p.position.distance(item.position) < collect_distance);
        if let Some(p) = claimant {
            claims.push(Mutation::CollectItem {
                item_id: item.id,
                player_id: p.id.clone(),
            });
        }
    }
    claims
}

/// Damage from the first zone containing each living player.
pub fn plan_zone_damage(store: &EntityStore, respawn_at: Duration) -> Vec<Mutation> {
    store
        .players()
        .filter(|p| p.is_alive())
        .filter_map(|p| {
            let zone = store.zones().iter().find(|z| z.contains(p.position))?;
            Some(Mutation::Damage {
                player_id: p.id.clone(),
                amount: zone.damage_per_tick,
                respawn_at,
            })
        })
        .collect()
}
