//! Player and enemy movement.
//!
//! Player motion is relative to facing. Enemies run the behavior step from
//! bastion-enemy-ai, then attack the structure or the player.

use hecs::Entity;
use log::debug;

use bastion_core::components::*;
use bastion_core::constants::*;
use bastion_core::enums::EnemyKind;
use bastion_core::events::GameEvent;
use bastion_core::types::{facing_forward, facing_right};

use bastion_enemy_ai::behavior::{aura_heal, step, EnemyContext};

use crate::run_state::RunState;
use crate::store::EntityStore;

/// Move the player from its move intent. Facing is set by the caller.
pub fn player(run: &mut RunState, dt: f32) {
    let p = &mut run.player;
    if !p.alive() {
        return;
    }
    let mut dir = facing_forward(p.facing) * p.move_intent.y + facing_right(p.facing) * p.move_intent.x;
    if dir.length_squared() > 1.0 {
        dir = dir.normalize();
    }
    p.position += dir * PLAYER_SPEED * dt;
    if p.position.length() > ARENA_RADIUS {
        p.position = p.position.normalize() * ARENA_RADIUS;
    }
    p.inside = p.position.length() <= STRUCTURE_INTERIOR_RADIUS;
}

/// Run enemy behavior for one tick: movement, attacks, healing, slow decay.
pub fn enemies(store: &mut EntityStore, run: &mut RunState, dt: f32, events: &mut Vec<GameEvent>) {
    let freeze_factor = run.freeze_factor();
    let player_target = if run.player.alive() && !run.player.inside {
        Some(run.player.position)
    } else {
        None
    };

    let mut structure_damage = 0.0;
    let mut player_damage = 0.0;
    let mut healers = Vec::new();

    for (entity, (enemy, pos, vel)) in store
        .world_mut()
        .query_mut::<(&mut Enemy, &mut Position, &mut Velocity)>()
    {
        if enemy.dead {
            continue;
        }

        let ctx = EnemyContext {
            kind: enemy.kind,
            position: pos.ground,
            health: enemy.health,
            max_health: enemy.max_health,
            base_speed: enemy.base_speed,
            scale: enemy.scale,
            contact_damage: enemy.contact_damage,
            slow_multiplier: enemy.slow_multiplier,
            freeze_factor,
            boss_phase: enemy.boss_phase,
            attack_cooldown: enemy.attack_cooldown,
            player: player_target,
        };
        let update = step(&ctx, dt);

        vel.0 = update.velocity;
        pos.ground += update.velocity * dt;
        enemy.attack_cooldown = update.attack_cooldown;
        structure_damage += update.structure_damage;
        player_damage += update.player_damage;

        if let Some(phase) = update.new_boss_phase {
            enemy.boss_phase = phase;
            debug!("boss {} entered phase {}", EntityStore::id_of(entity), phase);
            events.push(GameEvent::BossPhaseChanged {
                target: EntityStore::id_of(entity),
                phase,
            });
        }

        if enemy.slow_remaining > 0.0 {
            enemy.slow_remaining -= dt;
            if enemy.slow_remaining <= 0.0 {
                enemy.slow_remaining = 0.0;
                enemy.slow_multiplier = 1.0;
            }
        }

        if enemy.kind == EnemyKind::Healer {
            healers.push((entity, pos.ground));
        }
    }

    heal_neighbors(store, &healers, dt);

    if structure_damage > 0.0 {
        let taken = run
            .structure
            .take_damage(structure_damage, run.upgrades.armor_factor());
        if taken > 0.0 {
            if let Some(wave) = run.active_wave.as_mut() {
                wave.damage_taken = true;
            }
        }
        run.check_low_health(events);
    }
    if player_damage > 0.0 {
        run.player.health = (run.player.health - player_damage).max(0.0);
    }
}

/// Healers restore health to other live enemies in range, capped at max.
fn heal_neighbors(store: &mut EntityStore, healers: &[(Entity, glam::Vec2)], dt: f32) {
    if healers.is_empty() {
        return;
    }
    for (entity, (enemy, pos)) in store.world_mut().query_mut::<(&mut Enemy, &Position)>() {
        if enemy.dead {
            continue;
        }
        let amount: f32 = healers
            .iter()
            .filter(|(h, _)| *h != entity)
            .map(|(_, at)| aura_heal(*at, pos.ground, dt))
            .sum();
        if amount > 0.0 {
            enemy.health = (enemy.health + amount).min(enemy.max_health);
        }
    }
}
