//! Snapshot system: builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the store or run state.

use bastion_core::components::*;
use bastion_core::enums::*;
use bastion_core::state::*;
use bastion_core::types::SimTime;

use crate::loadout::turret_spec;
use crate::run_state::RunState;
use crate::store::EntityStore;
use crate::systems::camera::CameraController;
use crate::systems::placement::placement_feedback;

/// Build a complete GameStateSnapshot from the current state.
pub fn build_snapshot(
    store: &EntityStore,
    run: &RunState,
    camera: &CameraController,
    phase: GamePhase,
    time: &SimTime,
) -> GameStateSnapshot {
    let p = &run.player;
    GameStateSnapshot {
        time: *time,
        phase,
        endless: run.endless,
        health_pct: pct(p.health, p.max_health),
        currency: run.currency,
        active_wave: run.active_wave.as_ref().map(|w| w.index),
        upcoming_wave: run.upcoming_wave,
        live_enemies: store.enemy_count() as u32,
        score: run.score,
        structure_integrity_pct: pct(run.structure.health, run.structure.max_health),
        inside: p.inside,
        can_start_wave: phase == GamePhase::Active && run.can_start_wave(),
        start_wave_label: run.start_wave_label(),
        intermission_remaining: run.intermission,
        placement: build_placement(store, run),
        player: PlayerView {
            position: p.position,
            facing: p.facing,
            health: p.health,
            max_health: p.max_health,
            weapon: p.weapon,
            aim_point: p.aim_point,
            raging: run.rage_multiplier() > 1.0,
        },
        structure: StructureView {
            health: run.structure.health,
            max_health: run.structure.max_health,
            tier: run.upgrades.structure_tier,
            armor_factor: run.upgrades.armor_factor(),
        },
        enemies: build_enemies(store),
        projectiles: build_projectiles(store),
        turrets: build_turrets(store),
        abilities: run
            .abilities
            .iter()
            .map(|a| AbilityView {
                kind: a.kind,
                state: a.state(),
                cooldown: a.cooldown,
                cooldown_remaining: a.cooldown_remaining,
                duration_remaining: a.duration_remaining,
                cost: a.cost,
            })
            .collect(),
        upgrades: run.upgrades,
        camera: camera.view(),
    }
}

fn pct(value: f32, max: f32) -> f32 {
    if max <= 0.0 {
        0.0
    } else {
        (value / max * 100.0).clamp(0.0, 100.0)
    }
}

fn build_placement(store: &EntityStore, run: &RunState) -> Option<PlacementView> {
    run.placement.map(|pl| {
        let cost = turret_spec(pl.kind).cost;
        PlacementView {
            kind: pl.kind,
            cursor: pl.cursor,
            feedback: placement_feedback(store, pl.cursor, run.currency, cost),
            cost,
        }
    })
}

fn build_enemies(store: &EntityStore) -> Vec<EnemyView> {
    store
        .world()
        .query::<(&Enemy, &Position)>()
        .iter()
        .filter(|(_, (enemy, _))| !enemy.dead)
        .map(|(entity, (enemy, pos))| EnemyView {
            id: EntityStore::id_of(entity),
            kind: enemy.kind,
            position: pos.ground,
            height: pos.height,
            health: enemy.health,
            max_health: enemy.max_health,
            scale: enemy.scale,
            slowed: enemy.slow_remaining > 0.0,
            boss_phase: enemy.boss_phase,
        })
        .collect()
}

fn build_projectiles(store: &EntityStore) -> Vec<ProjectileView> {
    store
        .world()
        .query::<(&Projectile, &Position)>()
        .iter()
        .map(|(entity, (proj, pos))| ProjectileView {
            id: EntityStore::id_of(entity),
            origin: proj.origin,
            position: pos.ground,
            height: pos.height,
            pitch: proj.arc.map(|a| a.pitch).unwrap_or(0.0),
        })
        .collect()
}

fn build_turrets(store: &EntityStore) -> Vec<TurretView> {
    store
        .world()
        .query::<(&Turret, &Position)>()
        .iter()
        .map(|(entity, (turret, pos))| TurretView {
            id: EntityStore::id_of(entity),
            kind: turret.kind,
            position: pos.ground,
            range: turret.range,
            target: turret.target,
        })
        .collect()
}
