//! Per-enemy behavior step.
//!
//! Pure functions that compute an enemy's movement, attacks and boss phase
//! from its current state and situation.

use glam::Vec2;

use bastion_core::constants::*;
use bastion_core::enums::EnemyKind;

use crate::profiles::engage_radius;

/// Input to the behavior step for a single enemy.
pub struct EnemyContext {
    pub kind: EnemyKind,
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub base_speed: f32,
    pub scale: f32,
    pub contact_damage: f32,
    /// Current slow multiplier, 1.0 when not slowed.
    pub slow_multiplier: f32,
    /// Global freeze multiplier, 1.0 when no freeze is active.
    pub freeze_factor: f32,
    pub boss_phase: u32,
    pub attack_cooldown: f32,
    /// Player position, or `None` if the player cannot be struck
    /// (dead or sheltering inside the structure).
    pub player: Option<Vec2>,
}

/// Output of the behavior step.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyStep {
    pub velocity: Vec2,
    pub attack_cooldown: f32,
    /// Damage dealt to the structure this step, before armor.
    pub structure_damage: f32,
    pub player_damage: f32,
    /// Set when the boss crossed into a new phase.
    pub new_boss_phase: Option<u32>,
}

/// Boss phase implied by the current health fraction.
/// Phase 1 at two thirds, phase 2 at one third.
pub fn boss_phase_for(health: f32, max_health: f32) -> u32 {
    if max_health <= 0.0 {
        return 0;
    }
    let frac = health / max_health;
    let passed = ((1.0 - frac) * (BOSS_PHASES + 1) as f32).floor() as u32;
    passed.min(BOSS_PHASES)
}

/// Effective ground speed after boss phase, slow and freeze modifiers.
pub fn effective_speed(ctx: &EnemyContext, boss_phase: u32) -> f32 {
    let phase_bonus = 1.0 + BOSS_PHASE_SPEED_BONUS * boss_phase as f32;
    ctx.base_speed * phase_bonus * ctx.slow_multiplier * ctx.freeze_factor
}

/// Evaluate one enemy for a step of `dt` seconds.
pub fn step(ctx: &EnemyContext, dt: f32) -> EnemyStep {
    let mut phase = ctx.boss_phase;
    let mut new_boss_phase = None;
    if ctx.kind == EnemyKind::Boss {
        let implied = boss_phase_for(ctx.health, ctx.max_health);
        if implied > phase {
            phase = implied;
            new_boss_phase = Some(implied);
        }
    }

    let speed = effective_speed(ctx, phase);
    // Frozen enemies also attack more slowly.
    let cooldown = (ctx.attack_cooldown - dt * ctx.freeze_factor).max(0.0);

    let dist = ctx.position.length();
    let stop = engage_radius(ctx.scale);

    if dist <= stop {
        let (structure_damage, attack_cooldown) = if cooldown <= 0.0 {
            (ctx.contact_damage, ENEMY_ATTACK_INTERVAL)
        } else {
            (0.0, cooldown)
        };
        return EnemyStep {
            velocity: Vec2::ZERO,
            attack_cooldown,
            structure_damage,
            player_damage: 0.0,
            new_boss_phase,
        };
    }

    // Head for the structure without overshooting the engage ring.
    let dir = -ctx.position / dist;
    let remaining = dist - stop;
    let step_speed = if dt > 0.0 {
        speed.min(remaining / dt)
    } else {
        speed
    };
    let velocity = dir * step_speed;

    let in_player_reach = ctx
        .player
        .map(|p| p.distance(ctx.position) <= PLAYER_CONTACT_RADIUS + 0.5 * ctx.scale)
        .unwrap_or(false);

    let (player_damage, attack_cooldown) = if in_player_reach && cooldown <= 0.0 {
        (ctx.contact_damage * PLAYER_DAMAGE_RATIO, ENEMY_ATTACK_INTERVAL)
    } else {
        (0.0, cooldown)
    };

    EnemyStep {
        velocity,
        attack_cooldown,
        structure_damage: 0.0,
        player_damage,
        new_boss_phase,
    }
}

/// Health restored this step by a healer at `healer` to an enemy at `target`.
pub fn aura_heal(healer: Vec2, target: Vec2, dt: f32) -> f32 {
    if healer.distance(target) <= HEALER_RADIUS {
        HEALER_RATE * dt
    } else {
        0.0
    }
}
