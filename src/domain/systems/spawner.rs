// Randomized item spawns and wholesale danger-zone regeneration.

use crate::domain::items::ItemKind;
use crate::domain::store::{EntityStore, Mutation, NewZone};
use crate::domain::tuning::WorldTuning;
use crate::domain::vec2::Vec2;
use rand::Rng;

/// Random coordinate in `[0, map_size - extent)` snapped down to the grid.
pub fn grid_coord<R: Rng>(rng: &mut R, map_size: f32, extent: f32, grid: f32) -> f32 {
    let span = (map_size - extent).max(0.0);
    let cells = (span / grid).floor() as u32;
    if cells == 0 {
        return 0.0;
    }
    rng.random_range(0..cells) as f32 * grid
}

pub fn grid_position<R: Rng>(rng: &mut R, map_size: f32, extent: f32, grid: f32) -> Vec2 {
    Vec2::new(
        grid_coord(rng, map_size, extent, grid),
        grid_coord(rng, map_size, extent, grid),
    )
}

/// One item if the population is under the cap; `None` at capacity.
pub fn plan_item_spawn<R: Rng>(
    store: &EntityStore,
    cfg: &WorldTuning,
    rng: &mut R,
) -> Option<Mutation> {
    if store.item_count() >= cfg.max_items {
        return None;
    }
    let kind = ItemKind::from_roll(rng.random_range(0..ItemKind::total_weight()));
    let position = grid_position(rng, cfg.map_size, cfg.grid_size, cfg.grid_size);
    Some(Mutation::SpawnItem { position, kind })
}

/// A fresh zone batch that replaces every existing zone.
pub fn plan_zone_regen<R: Rng>(cfg: &WorldTuning, rng: &mut R) -> Mutation {
    let count = rng.random_range(cfg.zone_count_min..=cfg.zone_count_max.max(cfg.zone_count_min));
    let zones = (0..count)
        .map(|_| {
            let width = random_size(rng, cfg);
            let height = random_size(rng, cfg);
            NewZone {
                position: Vec2::new(
                    grid_coord(rng, cfg.map_size, width, cfg.grid_size),
                    grid_coord(rng, cfg.map_size, height, cfg.grid_size),
                ),
                width,
                height,
                damage_per_tick: if cfg.zone_damage_max > cfg.zone_damage_min {
                    rng.random_range(cfg.zone_damage_min..cfg.zone_damage_max)
                } else {
                    cfg.zone_damage_min
                },
            }
        })
        .collect();
    Mutation::ReplaceZones(zones)
}

fn random_size<R: Rng>(rng: &mut R, cfg: &WorldTuning) -> f32 {
    if cfg.zone_size_max > cfg.zone_size_min {
        rng.random_range(cfg.zone_size_min..cfg.zone_size_max).floor()
    } else {
        cfg.zone_size_min
    }
}

/// `#rrggbb` display color.
pub fn random_color<R: Rng>(rng: &mut R) -> String {
    format!("#{:06x}", rng.random_range(0..0x0100_0000u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::store::test_support::{spawn_item, store_with};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn when_items_are_at_capacity_then_spawner_no_ops() {
        let cfg = WorldTuning {
            max_items: 2,
            ..WorldTuning::default()
        };
        let mut store = store_with(vec![]);
        spawn_item(&mut store, Vec2::ZERO, ItemKind::Coin);
        spawn_item(&mut store, Vec2::ZERO, ItemKind::Coin);
        let mut rng = StdRng::seed_from_u64(7);

        assert!(plan_item_spawn(&store, &cfg, &mut rng).is_none());
    }

    #[test]
    fn when_item_spawns_then_position_is_grid_snapped_inside_map() {
        let cfg = WorldTuning::default();
        let store = store_with(vec![]);
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..50 {
            match plan_item_spawn(&store, &cfg, &mut rng) {
                Some(Mutation::SpawnItem { position, .. }) => {
                    assert_eq!(position.x % cfg.grid_size, 0.0);
                    assert_eq!(position.y % cfg.grid_size, 0.0);
                    assert!(position.x >= 0.0 && position.x < cfg.map_size - cfg.grid_size);
                    assert!(position.y >= 0.0 && position.y < cfg.map_size - cfg.grid_size);
                }
                other => panic!("unexpected spawn {other:?}"),
            }
        }
    }

    #[test]
    fn when_zones_regenerate_then_batch_has_two_or_three_zones_within_ranges() {
        let cfg = WorldTuning::default();
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..50 {
            let Mutation::ReplaceZones(zones) = plan_zone_regen(&cfg, &mut rng) else {
                panic!("expected zone replacement");
            };
            assert!((2..=3).contains(&zones.len()));
            for z in zones {
                assert!(z.width >= cfg.zone_size_min && z.width < cfg.zone_size_max);
                assert!(z.height >= cfg.zone_size_min && z.height < cfg.zone_size_max);
                assert!(z.position.x + z.width <= cfg.map_size);
                assert!(z.position.y + z.height <= cfg.map_size);
                assert!((cfg.zone_damage_min..cfg.zone_damage_max).contains(&z.damage_per_tick));
            }
        }
    }

    #[test]
    fn when_zones_regenerate_then_previous_batch_is_fully_replaced() {
        let cfg = WorldTuning::default();
        let mut rng = StdRng::seed_from_u64(5);
        let mut store = store_with(vec![]);

        store.apply(plan_zone_regen(&cfg, &mut rng));
        let before = store.zones().to_vec();
        store.apply(plan_zone_regen(&cfg, &mut rng));

        for old in &before {
            assert!(store.zones().iter().all(|z| z.id != old.id));
            assert!(!store.zones().iter().any(|z| z.same_bounds(old)));
        }
    }

    #[test]
    fn when_color_is_drawn_then_it_is_a_hex_triplet() {
        let mut rng = StdRng::seed_from_u64(1);
        let color = random_color(&mut rng);
        assert_eq!(color.len(), 7);
        assert!(color.starts_with('#'));
    }
}
