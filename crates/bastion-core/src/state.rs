//! Game state snapshot: the complete visible state published after each tick.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::components::EntityId;
use crate::enums::*;
use crate::types::SimTime;
use crate::upgrades::Upgrades;

/// Complete read-only state handed to presentation after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub endless: bool,
    /// Player health as a percentage of max (0-100).
    pub health_pct: f32,
    pub currency: u32,
    /// Wave currently in progress, if any.
    pub active_wave: Option<u32>,
    /// Wave that `StartWave` would begin.
    pub upcoming_wave: u32,
    pub live_enemies: u32,
    pub score: u64,
    /// Structure health as a percentage of max (0-100).
    pub structure_integrity_pct: f32,
    /// Player is inside the structure.
    pub inside: bool,
    pub can_start_wave: bool,
    pub start_wave_label: String,
    /// Seconds until the next wave starts itself (endless mode only).
    pub intermission_remaining: Option<f32>,
    pub placement: Option<PlacementView>,
    pub player: PlayerView,
    pub structure: StructureView,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub turrets: Vec<TurretView>,
    pub abilities: Vec<AbilityView>,
    pub upgrades: Upgrades,
    pub camera: CameraView,
}

/// Turret placement preview.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlacementView {
    pub kind: TurretKind,
    pub cursor: Vec2,
    pub feedback: PlacementFeedback,
    pub cost: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec2,
    /// Facing angle (radians, 0 = +Z).
    pub facing: f32,
    pub health: f32,
    pub max_health: f32,
    pub weapon: WeaponKind,
    pub aim_point: Vec2,
    pub raging: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructureView {
    pub health: f32,
    pub max_health: f32,
    pub tier: u32,
    /// Fraction of incoming damage that gets through armor.
    pub armor_factor: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub position: Vec2,
    pub height: f32,
    pub health: f32,
    pub max_health: f32,
    pub scale: f32,
    pub slowed: bool,
    pub boss_phase: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: EntityId,
    pub origin: ProjectileOrigin,
    pub position: Vec2,
    pub height: f32,
    /// Forward pitch for arcing shells, 0 otherwise.
    pub pitch: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurretView {
    pub id: EntityId,
    pub kind: TurretKind,
    pub position: Vec2,
    pub range: f32,
    pub target: Option<EntityId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityView {
    pub kind: AbilityKind,
    pub state: AbilityState,
    pub cooldown: f32,
    pub cooldown_remaining: f32,
    pub duration_remaining: f32,
    pub cost: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CameraView {
    pub mode: CameraMode,
    pub eye: Vec3,
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub pointer_locked: bool,
}
