use crate::domain::errors::FireRejection;
use crate::domain::state::Player;
use crate::domain::store::{EntityStore, Mutation};
use crate::domain::tuning::Tuning;
use crate::domain::vec2::Vec2;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct ProjectileConfig {
    pub speed: f32, // units/tick
    pub hit_radius: f32,
    pub damage: i32,
    pub hit_bonus: u32,
    pub cost: u32,
    pub cooldown: Duration,
    pub map_size: f32,
}

impl ProjectileConfig {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        let p = &tuning.projectile;
        Self {
            speed: p.speed,
            hit_radius: p.hit_radius,
            damage: p.damage,
            hit_bonus: p.hit_bonus,
            cost: p.cost,
            cooldown: Duration::from_millis(p.cooldown_ms),
            map_size: tuning.world.map_size,
        }
    }
}

/// Validates a fire request and returns the mutation that spawns the projectile.
pub fn plan_fire(
    player: Option<&Player>,
    now: Duration,
    cfg: &ProjectileConfig,
) -> Result<Mutation, FireRejection> {
    let p = player.ok_or(FireRejection::UnknownPlayer)?;
    if !p.is_alive() {
        return Err(FireRejection::Dead);
    }
    if p
        .last_fire_at
        .is_some_and(|last| now.saturating_sub(last) < cfg.cooldown)
    {
        return Err(FireRejection::CoolingDown);
    }
    if p.score < cfg.cost {
        return Err(FireRejection::InsufficientScore);
    }

    // Players that never moved shoot along +x.
    let direction = if p.direction.is_zero() {
        Vec2::RIGHT
    } else {
        p.direction.normalize()
    };

    Ok(Mutation::Fire {
        owner_id: p.id.clone(),
        position: p.position,
        direction,
        cost: cfg.cost,
        at: now,
    })
}

/// Advances every projectile one tick and resolves at most one hit per projectile.
pub fn plan_projectiles(
    store: &EntityStore,
    cfg: &ProjectileConfig,
    respawn_at: Duration,
) -> Vec<Mutation> {
    let mut out = Vec::new();
    for proj in store.projectiles() {
        let position = proj.position + proj.direction * cfg.speed;

        let in_bounds = (0.0..=cfg.map_size).contains(&position.x)
            && (0.0..=cfg.map_size).contains(&position.y);
        if !in_bounds {
            out.push(Mutation::RemoveProjectile {
                projectile_id: proj.id,
            });
            continue;
        }

        // Naive O(P*E); first match in ascending player id wins.
        let victim = store
            .players()
            .filter(|p| p.is_alive() && p.id != proj.owner_id)
            .find(|p| p.position.distance(position) < cfg.hit_radius);

        match victim {
            Some(v) => out.push(Mutation::ResolveHit {
                projectile_id: proj.id,
                victim_id: v.id.clone(),
                damage: cfg.damage,
                bonus: cfg.hit_bonus,
                respawn_at,
            }),
            None => out.push(Mutation::MoveProjectile {
                projectile_id: proj.id,
                position,
            }),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::state::LifeState;
    use crate::domain::store::test_support::{player, store_with};

    fn cfg() -> ProjectileConfig {
        ProjectileConfig::from_tuning(&Tuning::default())
    }

    fn armed(id: &str, position: Vec2, score: u32) -> Player {
        let mut p = player(id, position);
        p.score = score;
        p
    }

    fn tick(store: &mut EntityStore, cfg: &ProjectileConfig) {
        for m in plan_projectiles(store, cfg, Duration::from_secs(3)) {
            store.apply(m);
        }
    }

    #[test]
    fn when_score_is_below_cost_then_fire_is_rejected() {
        let p = armed("a", Vec2::ZERO, 4);
        assert_eq!(
            plan_fire(Some(&p), Duration::ZERO, &cfg()),
            Err(FireRejection::InsufficientScore)
        );
    }

    #[test]
    fn when_player_is_unknown_or_dead_then_fire_is_rejected() {
        assert_eq!(
            plan_fire(None, Duration::ZERO, &cfg()),
            Err(FireRejection::UnknownPlayer)
        );

        let mut p = armed("a", Vec2::ZERO, 50);
        p.life = LifeState::Dead {
            respawn_at: Duration::from_secs(3),
        };
        assert_eq!(
            plan_fire(Some(&p), Duration::ZERO, &cfg()),
            Err(FireRejection::Dead)
        );
    }

    #[test]
    fn when_fired_within_cooldown_then_second_shot_is_rejected() {
        let mut p = armed("a", Vec2::ZERO, 50);
        p.last_fire_at = Some(Duration::from_millis(1000));

        assert_eq!(
            plan_fire(Some(&p), Duration::from_millis(1150), &cfg()),
            Err(FireRejection::CoolingDown)
        );
        assert!(plan_fire(Some(&p), Duration::from_millis(1200), &cfg()).is_ok());
    }

    #[test]
    fn when_fire_is_accepted_then_exactly_cost_is_deducted() {
        let mut store = store_with(vec![armed("a", Vec2::new(500.0, 500.0), 12)]);

        let m = plan_fire(store.player("a"), Duration::ZERO, &cfg()).expect("fire should pass");
        assert!(store.apply(m));

        assert_eq!(store.player("a").map(|p| p.score), Some(7));
        assert_eq!(store.projectiles().count(), 1);
    }

    #[test]
    fn when_player_never_moved_then_projectile_travels_along_positive_x() {
        let p = armed("a", Vec2::new(500.0, 500.0), 10);
        let m = plan_fire(Some(&p), Duration::ZERO, &cfg()).expect("fire should pass");
        match m {
            Mutation::Fire { direction, .. } => assert_eq!(direction, Vec2::RIGHT),
            other => panic!("unexpected mutation {other:?}"),
        }
    }

    #[test]
    fn when_projectile_flies_five_ticks_then_it_moves_forty_units() {
        let cfg = cfg();
        let mut store = store_with(vec![armed("a", Vec2::new(500.0, 500.0), 10)]);
        let m = plan_fire(store.player("a"), Duration::ZERO, &cfg).expect("fire should pass");
        store.apply(m);

        for _ in 0..5 {
            tick(&mut store, &cfg);
        }

        let proj = store.projectiles().next().expect("projectile should survive");
        assert_eq!(proj.position, Vec2::new(540.0, 500.0));
    }

    #[test]
    fn when_projectile_reaches_another_player_then_it_damages_credits_and_despawns() {
        let cfg = cfg();
        let mut store = store_with(vec![
            armed("a", Vec2::new(500.0, 500.0), 10),
            player("b", Vec2::new(520.0, 500.0)),
        ]);
        let m = plan_fire(store.player("a"), Duration::ZERO, &cfg).expect("fire should pass");
        store.apply(m);

        tick(&mut store, &cfg);

        assert_eq!(store.projectiles().count(), 0);
        assert_eq!(store.player("b").map(|p| p.health), Some(90));
        assert_eq!(store.player("a").map(|p| p.score), Some(5 + 20));
    }

    #[test]
    fn when_two_players_are_in_range_then_only_the_lowest_id_is_hit() {
        let cfg = cfg();
        let mut store = store_with(vec![
            armed("a", Vec2::new(500.0, 500.0), 10),
            player("c", Vec2::new(510.0, 495.0)),
            player("b", Vec2::new(510.0, 505.0)),
        ]);
        let m = plan_fire(store.player("a"), Duration::ZERO, &cfg).expect("fire should pass");
        store.apply(m);

        tick(&mut store, &cfg);

        assert_eq!(store.player("b").map(|p| p.health), Some(90));
        assert_eq!(store.player("c").map(|p| p.health), Some(100));
        assert_eq!(store.projectiles().count(), 0);
        assert_eq!(store.player("a").map(|p| p.score), Some(5 + 20));
    }

    #[test]
    fn when_shooter_has_left_then_projectile_still_hits_and_credits_nobody() {
        let cfg = cfg();
        let mut store = store_with(vec![
            armed("a", Vec2::new(500.0, 500.0), 10),
            player("b", Vec2::new(530.0, 500.0)),
        ]);
        let m = plan_fire(store.player("a"), Duration::ZERO, &cfg).expect("fire should pass");
        store.apply(m);
        store.apply(Mutation::RemovePlayer {
            player_id: "a".to_string(),
            purge_projectiles: false,
        });

        // 508 is out of reach, 516 is within the hit radius of b.
        tick(&mut store, &cfg);
        assert_eq!(store.projectiles().count(), 1);
        tick(&mut store, &cfg);

        assert_eq!(store.projectiles().count(), 0);
        let b = store.player("b").expect("victim should remain");
        assert_eq!(b.health, 90);
        assert_eq!(b.score, 0);
        assert!(store.player("a").is_none());
    }

    #[test]
    fn when_projectile_overlaps_its_owner_then_owner_is_not_hit() {
        let cfg = cfg();
        let mut store = store_with(vec![armed("a", Vec2::new(500.0, 500.0), 10)]);
        let m = plan_fire(store.player("a"), Duration::ZERO, &cfg).expect("fire should pass");
        store.apply(m);

        tick(&mut store, &cfg);

        assert_eq!(store.player("a").map(|p| p.health), Some(100));
        assert_eq!(store.projectiles().count(), 1);
    }

    #[test]
    fn when_projectile_leaves_the_map_then_it_is_removed_without_effect() {
        let cfg = cfg();
        let mut store = store_with(vec![armed("a", Vec2::new(cfg.map_size - 2.0, 500.0), 10)]);
        let m = plan_fire(store.player("a"), Duration::ZERO, &cfg).expect("fire should pass");
        store.apply(m);

        tick(&mut store, &cfg);

        assert_eq!(store.projectiles().count(), 0);
        assert_eq!(store.player("a").map(|p| p.score), Some(5));
    }
}
