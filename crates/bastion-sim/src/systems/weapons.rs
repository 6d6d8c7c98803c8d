//! Player weapon fire.

use std::collections::HashSet;

use log::debug;

use bastion_core::components::{ArcFlight, Position, Projectile};
use bastion_core::constants::*;
use bastion_core::enums::ProjectileOrigin;
use bastion_core::types::facing_forward;

use crate::loadout::weapon_spec;
use crate::run_state::RunState;
use crate::store::EntityStore;

/// Player damage per shot with upgrades and rage applied.
pub fn player_damage(run: &RunState) -> f32 {
    weapon_spec(run.player.weapon).damage * run.upgrades.damage_multiplier() * run.rage_multiplier()
}

/// Seconds between player shots with upgrades and rage applied.
pub fn player_fire_interval(run: &RunState) -> f32 {
    weapon_spec(run.player.weapon).fire_interval
        / (run.upgrades.fire_rate_multiplier() * run.rage_multiplier())
}

/// Fire the selected weapon while the trigger is held.
pub fn run(store: &mut EntityStore, run: &mut RunState, dt: f32) {
    run.player.fire_cooldown = (run.player.fire_cooldown - dt).max(0.0);
    if !run.player.fire_held || !run.player.alive() || run.player.fire_cooldown > 0.0 {
        return;
    }

    let spec = weapon_spec(run.player.weapon);
    let from = run.player.position;
    let aim = run.player.aim_point;
    let damage = player_damage(run);

    let mut projectile = Projectile {
        origin: ProjectileOrigin::Player,
        damage,
        pierce: spec.pierce,
        splash_radius: spec.splash_radius,
        slow: spec.slow,
        lifetime: 0.0,
        arc: None,
        hit_set: HashSet::new(),
    };

    let (position, velocity) = if spec.arcing {
        let target = from + (aim - from).clamp_length_max(ARC_MAX_RANGE);
        let distance = from.distance(target);
        projectile.arc = Some(ArcFlight {
            start: from,
            target,
            duration: (distance / ARC_SPEED).max(ARC_MIN_DURATION),
            progress: 0.0,
            pitch: 0.0,
        });
        (Position::new(from, 0.0), glam::Vec2::ZERO)
    } else {
        let dir = (aim - from)
            .try_normalize()
            .unwrap_or_else(|| facing_forward(run.player.facing));
        (
            Position::new(from, PLAYER_MUZZLE_HEIGHT),
            dir * spec.projectile_speed,
        )
    };

    let shot = store.spawn_projectile(projectile, position, velocity);
    debug!("player fired {:?} {}", run.player.weapon, EntityStore::id_of(shot));
    run.player.fire_cooldown = player_fire_interval(run);
}
