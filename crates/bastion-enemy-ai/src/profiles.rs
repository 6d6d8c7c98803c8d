//! Archetype-specific enemy profiles.
//!
//! Consolidates per-archetype parameters and builds fresh enemy components.

use bastion_core::components::Enemy;
use bastion_core::constants::*;
use bastion_core::enums::EnemyKind;

/// Baseline stats for an enemy archetype at wave 1.
pub struct EnemyProfile {
    pub health: f32,
    /// Ground speed (units/s).
    pub speed: f32,
    /// Damage per attack against the structure.
    pub contact_damage: f32,
    /// Currency granted on kill.
    pub value: u32,
    pub scale: f32,
    /// Relative weight when picking which type spawns next.
    pub spawn_weight: f32,
}

/// Get the profile for a given archetype.
pub fn get_profile(kind: EnemyKind) -> EnemyProfile {
    match kind {
        EnemyKind::Standard => EnemyProfile {
            health: 30.0,
            speed: 3.0,
            contact_damage: 5.0,
            value: 5,
            scale: 1.0,
            spawn_weight: 1.0,
        },
        EnemyKind::Runner => EnemyProfile {
            health: 18.0,
            speed: 5.5,
            contact_damage: 3.0,
            value: 6,
            scale: 0.8,
            spawn_weight: 1.0,
        },
        EnemyKind::Tank => EnemyProfile {
            health: 120.0,
            speed: 1.6,
            contact_damage: 15.0,
            value: 15,
            scale: 1.5,
            spawn_weight: 0.6,
        },
        EnemyKind::Healer => EnemyProfile {
            health: 45.0,
            speed: 2.5,
            contact_damage: 4.0,
            value: 12,
            scale: 1.0,
            spawn_weight: 0.5,
        },
        EnemyKind::Splitter => EnemyProfile {
            health: 60.0,
            speed: 2.4,
            contact_damage: 6.0,
            value: 10,
            scale: 1.3,
            spawn_weight: 0.7,
        },
        EnemyKind::Boss => EnemyProfile {
            health: 800.0,
            speed: 1.2,
            contact_damage: 40.0,
            value: 100,
            scale: 2.5,
            spawn_weight: 0.3,
        },
    }
}

/// Health multiplier for enemies spawned in `wave` (1-based).
pub fn health_multiplier(wave: u32) -> f32 {
    1.0 + ENEMY_HEALTH_PER_WAVE * wave.saturating_sub(1) as f32
}

/// Build a fresh enemy component for the given wave.
pub fn build_enemy(kind: EnemyKind, wave: u32) -> Enemy {
    let p = get_profile(kind);
    let max_health = p.health * health_multiplier(wave);
    Enemy {
        kind,
        health: max_health,
        max_health,
        base_speed: p.speed,
        contact_damage: p.contact_damage,
        value: p.value,
        scale: p.scale,
        slow_multiplier: 1.0,
        slow_remaining: 0.0,
        already_split: false,
        boss_phase: 0,
        attack_cooldown: 0.0,
        dead: false,
    }
}

/// Whether removing this enemy should produce split children.
pub fn can_split(enemy: &Enemy) -> bool {
    enemy.kind == EnemyKind::Splitter && !enemy.already_split && enemy.scale > SPLIT_MIN_SCALE
}

/// Template for one split child. Two are spawned per split.
///
/// Children are half scale, never split again, and are each worth
/// `floor(value * SPLIT_CHILD_VALUE_RATIO)` so the pair is worth no more
/// than the parent.
pub fn split_child(parent: &Enemy) -> Enemy {
    let max_health = (parent.max_health * SPLIT_CHILD_HEALTH_RATIO).max(1.0);
    Enemy {
        kind: parent.kind,
        health: max_health,
        max_health,
        base_speed: parent.base_speed * 1.25,
        contact_damage: parent.contact_damage * 0.5,
        value: (parent.value as f32 * SPLIT_CHILD_VALUE_RATIO).floor() as u32,
        scale: parent.scale * 0.5,
        slow_multiplier: 1.0,
        slow_remaining: 0.0,
        already_split: true,
        boss_phase: 0,
        attack_cooldown: 0.0,
        dead: false,
    }
}

/// Radius from the structure center at which an enemy stops and attacks.
pub fn engage_radius(scale: f32) -> f32 {
    STRUCTURE_RADIUS + 0.5 * scale
}
