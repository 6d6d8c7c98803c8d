//! Discrete events emitted by the simulation for audio, HUD and host feedback.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::EntityId;
use crate::enums::*;

/// A discrete simulation event. Delivered to subscribers in emission order
/// at the end of each tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    WaveStarted {
        wave: u32,
        boss: bool,
        enemy_count: u32,
    },
    WaveCompleted {
        wave: u32,
        bonus: u32,
        perfect: bool,
        clutch: bool,
    },
    /// The run ended, either by losing the structure or player, or by
    /// clearing the final wave.
    GameOver { score: u64, wave: u32, victory: bool },
    WeaponChanged { weapon: WeaponKind },
    /// Short HUD banner text.
    BannerChanged { text: String },
    /// Structure health crossed the low-health threshold in either direction.
    LowHealth { crossed_below: bool },
    /// A player projectile damaged an enemy.
    HitMarker { target: EntityId, damage: f32 },
    Kill {
        target: EntityId,
        kind: EnemyKind,
        value: u32,
        position: Vec2,
    },
    BossPhaseChanged { target: EntityId, phase: u32 },
    EnemySplit {
        parent: EntityId,
        children: Vec<EntityId>,
    },
    AbilityUsed { ability: AbilityKind },
    AbilityEnded { ability: AbilityKind },
    AirstrikeImpact { position: Vec2, kills: u32 },
    TurretPlaced { kind: TurretKind, position: Vec2 },
    UpgradePurchased {
        category: UpgradeCategory,
        level: u32,
        cost: u32,
    },
    AchievementUnlocked { id: AchievementId },
    /// The engine left first-person mode; the input layer should release
    /// exclusive pointer capture.
    PointerCaptureReleased,
    /// An internal fault halted the simulation.
    RuntimeError { message: String, context: String },
    PauseChanged { paused: bool },
    PerformanceSample {
        ticks_per_sec: f32,
        entity_count: u32,
    },
}
