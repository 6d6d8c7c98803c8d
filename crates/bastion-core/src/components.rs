//! ECS components for entities held in the simulation's entity store.
//!
//! Components are plain data structs with no game logic.
//! Game logic lives in systems, not components.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Stable, generation-tagged identity of a stored entity.
///
/// Wraps the store's packed handle bits so views and events can refer to an
/// entity without holding the handle type itself. A stale id never resolves
/// to a newer entity that reused the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{:x}", self.0)
    }
}

/// Ground-plane position plus height above the ground.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub ground: Vec2,
    pub height: f32,
}

impl Position {
    pub fn new(ground: Vec2, height: f32) -> Self {
        Self { ground, height }
    }
}

/// Ground-plane velocity (units per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec2);

/// A slow applied on hit: speed multiplier and how long it lasts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlowEffect {
    /// Speed multiplier in (0, 1].
    pub factor: f32,
    pub duration: f32,
}

/// An enemy converging on the structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub health: f32,
    pub max_health: f32,
    pub base_speed: f32,
    /// Damage per attack against the structure.
    pub contact_damage: f32,
    /// Currency granted on kill.
    pub value: u32,
    /// Body scale. Drives collision radius and height.
    pub scale: f32,
    /// 1.0 when not slowed.
    pub slow_multiplier: f32,
    pub slow_remaining: f32,
    /// Set on splitter children; they never split again.
    pub already_split: bool,
    /// Number of boss phase transitions so far.
    pub boss_phase: u32,
    /// Seconds until the next attack while in contact.
    pub attack_cooldown: f32,
    /// Marked during combat resolution; removed once after the pass.
    pub dead: bool,
}

/// Lobbed flight state for arcing projectiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcFlight {
    pub start: Vec2,
    pub target: Vec2,
    /// Total flight time in seconds.
    pub duration: f32,
    /// 0.0 at launch, 1.0 at impact.
    pub progress: f32,
    /// Forward pitch (radians, positive nose-up).
    pub pitch: f32,
}

/// A projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub origin: ProjectileOrigin,
    pub damage: f32,
    /// Additional enemies this projectile may pass through.
    pub pierce: u32,
    /// 0.0 means no splash.
    pub splash_radius: f32,
    pub slow: Option<SlowEffect>,
    /// Seconds since launch.
    pub lifetime: f32,
    pub arc: Option<ArcFlight>,
    /// Enemies already damaged by this projectile.
    pub hit_set: HashSet<EntityId>,
}

/// An automated turret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turret {
    pub kind: TurretKind,
    pub damage: f32,
    /// Seconds between shots.
    pub fire_interval: f32,
    pub range: f32,
    pub slow: Option<SlowEffect>,
    pub splash_radius: f32,
    pub cooldown: f32,
    /// Weak reference to the last acquired target. May be stale.
    pub target: Option<EntityId>,
}

/// Marks a projectile fired by the player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerShot;

/// Marks a projectile fired by a turret.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TurretShot;
