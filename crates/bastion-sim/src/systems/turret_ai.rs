//! Turret AI: target acquisition and fire cooldowns.

use std::collections::HashSet;

use glam::Vec2;
use hecs::Entity;
use log::debug;

use bastion_core::components::*;
use bastion_core::constants::{TURRET_MUZZLE_HEIGHT, TURRET_PROJECTILE_SPEED};
use bastion_core::enums::ProjectileOrigin;

use crate::store::EntityStore;

/// Nearest candidate strictly within `range` of `from`. The first one
/// encountered wins ties.
pub fn nearest_in_range(
    from: Vec2,
    range: f32,
    candidates: &[(Entity, Vec2, f32)],
) -> Option<(Entity, Vec2)> {
    let mut best: Option<(Entity, Vec2, f32)> = None;
    for &(entity, pos, _) in candidates {
        let d = from.distance(pos);
        if d >= range {
            continue;
        }
        if best.map_or(true, |(_, _, bd)| d < bd) {
            best = Some((entity, pos, d));
        }
    }
    best.map(|(e, p, _)| (e, p))
}

struct FireOrder {
    from: Vec2,
    at: Vec2,
    damage: f32,
    slow: Option<SlowEffect>,
    splash_radius: f32,
}

/// Run turret AI for one tick.
pub fn run(store: &mut EntityStore, dt: f32) {
    let candidates = store.live_enemies();
    let live: HashSet<EntityId> = candidates
        .iter()
        .map(|(e, _, _)| EntityStore::id_of(*e))
        .collect();
    let mut orders = Vec::new();

    for (_entity, (turret, pos)) in store.world_mut().query_mut::<(&mut Turret, &Position)>() {
        // Drop stale or dead targets.
        if let Some(target) = turret.target {
            if !live.contains(&target) {
                turret.target = None;
            }
        }

        turret.cooldown = (turret.cooldown - dt).max(0.0);
        if turret.cooldown > 0.0 {
            continue;
        }

        match nearest_in_range(pos.ground, turret.range, &candidates) {
            Some((target, at)) => {
                turret.target = Some(EntityStore::id_of(target));
                turret.cooldown = turret.fire_interval;
                orders.push(FireOrder {
                    from: pos.ground,
                    at,
                    damage: turret.damage,
                    slow: turret.slow,
                    splash_radius: turret.splash_radius,
                });
            }
            None => {
                turret.cooldown = 0.0;
            }
        }
    }

    for order in orders {
        let dir = (order.at - order.from).normalize_or_zero();
        let projectile = Projectile {
            origin: ProjectileOrigin::Turret,
            damage: order.damage,
            pierce: 0,
            splash_radius: order.splash_radius,
            slow: order.slow,
            lifetime: 0.0,
            arc: None,
            hit_set: HashSet::new(),
        };
        let shot = store.spawn_projectile(
            projectile,
            Position::new(order.from, TURRET_MUZZLE_HEIGHT),
            dir * TURRET_PROJECTILE_SPEED,
        );
        debug!("turret fired {} toward {:?}", EntityStore::id_of(shot), order.at);
    }
}
