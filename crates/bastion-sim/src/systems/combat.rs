//! Combat resolution: projectile flight, collision, damage, splash, pierce,
//! slow, airstrike detonation and enemy death.

use std::collections::HashSet;

use glam::Vec2;
use hecs::Entity;
use log::debug;
use rand_chacha::ChaCha8Rng;

use bastion_core::components::*;
use bastion_core::constants::*;
use bastion_core::enums::ProjectileOrigin;
use bastion_core::events::GameEvent;

use crate::run_state::RunState;
use crate::store::EntityStore;

/// Linear splash falloff: full `damage` at the center, zero at `radius`.
pub fn splash_falloff(damage: f32, distance: f32, radius: f32) -> f32 {
    if radius <= 0.0 || distance >= radius {
        return 0.0;
    }
    damage * (1.0 - distance / radius)
}

/// Height and forward pitch of an arcing shell at progress `p`.
pub fn arc_height_and_pitch(p: f32, ground_distance: f32) -> (f32, f32) {
    let height = ARC_PEAK_HEIGHT * 4.0 * p * (1.0 - p);
    let slope = ARC_PEAK_HEIGHT * 4.0 * (1.0 - 2.0 * p);
    (height, slope.atan2(ground_distance.max(1e-3)))
}

/// Apply a slow. Slows never stack multiplicatively: the strongest factor
/// and the longest remaining time win.
pub fn apply_slow(enemy: &mut Enemy, slow: SlowEffect) {
    enemy.slow_multiplier = enemy.slow_multiplier.min(slow.factor);
    enemy.slow_remaining = enemy.slow_remaining.max(slow.duration);
}

/// Deal damage to a live enemy. Marks it dead at zero health.
/// Returns true if this call killed it.
fn damage_enemy(store: &mut EntityStore, entity: Entity, amount: f32, kills: &mut Vec<Entity>) -> bool {
    let Ok(mut enemy) = store.world_mut().get::<&mut Enemy>(entity) else {
        return false;
    };
    if enemy.dead || amount <= 0.0 {
        return false;
    }
    enemy.health = (enemy.health - amount).max(0.0);
    if enemy.health <= 0.0 {
        enemy.dead = true;
        kills.push(entity);
        return true;
    }
    false
}

/// Splash every live enemy other than `exclude` around `center`.
/// Returns the number of kills.
fn splash(
    store: &mut EntityStore,
    center: Vec2,
    damage: f32,
    radius: f32,
    exclude: Option<Entity>,
    kills: &mut Vec<Entity>,
) -> u32 {
    let mut killed = 0;
    for (entity, pos, _) in store.live_enemies() {
        if Some(entity) == exclude {
            continue;
        }
        let amount = splash_falloff(damage, pos.distance(center), radius);
        if damage_enemy(store, entity, amount, kills) {
            killed += 1;
        }
    }
    killed
}

/// Where along `from..to` (0 to 1) the path comes closest to `point`, if
/// that closest approach is within `radius`.
pub fn segment_contact(from: Vec2, to: Vec2, point: Vec2, radius: f32) -> Option<f32> {
    let seg = to - from;
    let len_sq = seg.length_squared();
    let t = if len_sq > 0.0 {
        ((point - from).dot(seg) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    ((from + seg * t).distance(point) <= radius).then_some(t)
}

/// Live enemies touched by the path a projectile covered this tick, nearest
/// along the path first. Enemies already in its hit-set are skipped.
fn swept_hits(store: &EntityStore, proj: &Projectile, from: Vec2, to: Vec2) -> Vec<(Entity, Vec2)> {
    let mut hits: Vec<(f32, Entity, Vec2)> = store
        .live_enemies()
        .into_iter()
        .filter(|(entity, _, _)| !proj.hit_set.contains(&EntityStore::id_of(*entity)))
        .filter_map(|(entity, epos, scale)| {
            segment_contact(from, to, epos, CONTACT_RADIUS * scale).map(|t| (t, entity, epos))
        })
        .collect();
    // Stable sort keeps store order on ties.
    hits.sort_by(|a, b| a.0.total_cmp(&b.0));
    hits.into_iter().map(|(_, entity, epos)| (entity, epos)).collect()
}

/// Advance and collide every projectile of one origin.
fn resolve_projectiles(
    store: &mut EntityStore,
    origin: ProjectileOrigin,
    dt: f32,
    kills: &mut Vec<Entity>,
    removals: &mut Vec<Entity>,
    events: &mut Vec<GameEvent>,
) {
    for handle in store.projectile_handles(origin) {
        let state = {
            let world = store.world();
            let pos = world.get::<&Position>(handle).ok().map(|p| *p);
            let vel = world.get::<&Velocity>(handle).ok().map(|v| *v);
            let proj = world.get::<&Projectile>(handle).ok().map(|p| (*p).clone());
            pos.zip(vel).zip(proj)
        };
        let Some(((mut pos, vel), mut proj)) = state else {
            continue;
        };

        proj.lifetime += dt;
        let prev = pos.ground;
        let mut remove = false;
        let mut explode_at: Option<Vec2> = None;

        if let Some(arc) = proj.arc.as_mut() {
            arc.progress = (arc.progress + dt / arc.duration.max(1e-3)).min(1.0);
            pos.ground = arc.start.lerp(arc.target, arc.progress);
            let (height, pitch) = arc_height_and_pitch(arc.progress, arc.start.distance(arc.target));
            pos.height = height;
            arc.pitch = pitch;
            if arc.progress >= 1.0 {
                explode_at = Some(arc.target);
            }
        } else {
            pos.ground += vel.0 * dt;
        }

        let can_collide = proj.arc.is_none() || pos.height < ARC_HIT_HEIGHT;
        if can_collide {
            for (target, target_pos) in swept_hits(store, &proj, prev, pos.ground) {
                let live = store
                    .world()
                    .get::<&Enemy>(target)
                    .map(|e| !e.dead)
                    .unwrap_or(false);
                if !live {
                    continue;
                }
                let target_id = EntityStore::id_of(target);
                proj.hit_set.insert(target_id);
                damage_enemy(store, target, proj.damage, kills);
                if let Some(slow) = proj.slow {
                    if let Ok(mut enemy) = store.world_mut().get::<&mut Enemy>(target) {
                        apply_slow(&mut enemy, slow);
                    }
                }
                if proj.splash_radius > 0.0 {
                    splash(
                        store,
                        target_pos,
                        proj.damage * SPLASH_INDIRECT_RATIO,
                        proj.splash_radius,
                        Some(target),
                        kills,
                    );
                }
                if origin == ProjectileOrigin::Player {
                    events.push(GameEvent::HitMarker {
                        target: target_id,
                        damage: proj.damage,
                    });
                }
                debug!("{:?} projectile hit {} for {:.1}", origin, target_id, proj.damage);

                if proj.arc.is_some() || proj.hit_set.len() as u32 > proj.pierce {
                    remove = true;
                    explode_at = None;
                    break;
                }
            }
        }

        if let Some(at) = explode_at {
            if proj.splash_radius > 0.0 {
                splash(
                    store,
                    at,
                    proj.damage * SPLASH_INDIRECT_RATIO,
                    proj.splash_radius,
                    None,
                    kills,
                );
            }
            remove = true;
        }

        if proj.lifetime >= PROJECTILE_MAX_LIFETIME {
            remove = true;
        }

        if remove {
            removals.push(handle);
        } else {
            let world = store.world_mut();
            if let Ok(mut p) = world.get::<&mut Position>(handle) {
                *p = pos;
            }
            if let Ok(mut p) = world.get::<&mut Projectile>(handle) {
                *p = proj;
            }
        }
    }
}

/// Count down pending airstrikes and detonate the ones that are due.
fn resolve_airstrikes(
    store: &mut EntityStore,
    run: &mut RunState,
    dt: f32,
    kills: &mut Vec<Entity>,
    events: &mut Vec<GameEvent>,
) {
    let mut landed = Vec::new();
    run.pending_airstrikes.retain_mut(|strike| {
        strike.delay -= dt;
        if strike.delay <= 0.0 {
            landed.push(strike.position);
            false
        } else {
            true
        }
    });

    for at in landed {
        let mut killed = 0;
        for (entity, pos, _) in store.live_enemies() {
            let amount = splash_falloff(AIRSTRIKE_DAMAGE, pos.distance(at), AIRSTRIKE_RADIUS);
            if damage_enemy(store, entity, amount, kills) {
                killed += 1;
            }
        }
        debug!("airstrike landed at {:?}, {} kills", at, killed);
        events.push(GameEvent::AirstrikeImpact {
            position: at,
            kills: killed,
        });
    }
}

/// Remove dead enemies exactly once and pay out their rewards.
pub fn reap(
    store: &mut EntityStore,
    run: &mut RunState,
    rng: &mut ChaCha8Rng,
    kills: Vec<Entity>,
    events: &mut Vec<GameEvent>,
) {
    let mut seen = HashSet::new();
    for entity in kills {
        if !seen.insert(entity) {
            continue;
        }
        let Some(removed) = store.remove_enemy(entity, rng) else {
            continue;
        };
        let value = removed.enemy.value;
        run.score += u64::from(value) * u64::from(SCORE_PER_VALUE);
        run.currency += value;
        events.push(GameEvent::Kill {
            target: removed.id,
            kind: removed.enemy.kind,
            value,
            position: removed.position,
        });
        if !removed.children.is_empty() {
            events.push(GameEvent::EnemySplit {
                parent: removed.id,
                children: removed.children,
            });
        }
    }
}

/// Run combat resolution for one tick.
pub fn run(
    store: &mut EntityStore,
    run: &mut RunState,
    rng: &mut ChaCha8Rng,
    dt: f32,
    events: &mut Vec<GameEvent>,
) {
    let mut kills = Vec::new();
    let mut removals = Vec::new();

    resolve_projectiles(store, ProjectileOrigin::Player, dt, &mut kills, &mut removals, events);
    resolve_projectiles(store, ProjectileOrigin::Turret, dt, &mut kills, &mut removals, events);
    resolve_airstrikes(store, run, dt, &mut kills, events);

    removals.sort_by_key(|e| e.to_bits());
    removals.dedup();
    for handle in removals {
        store.remove_projectile(handle);
    }

    reap(store, run, rng, kills, events);
}
