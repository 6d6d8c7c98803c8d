//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary. Commands with
//! a boolean outcome are also available as direct engine methods.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::SettingsPatch;
use crate::enums::*;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Run control ---
    /// Reset all per-run state and begin a run.
    StartGame { endless: bool },
    /// Begin the upcoming wave.
    StartWave,
    TogglePause,
    /// Reinitialize per-run state after a fault or from any phase.
    Reset,

    // --- Loadout and economy ---
    SetWeapon { key: String },
    /// Buy one level of an upgrade at the quoted cost.
    BuyUpgrade { category: UpgradeCategory, cost: u32 },
    RepairStructure,
    UpgradeStructureTier,

    // --- Turrets ---
    StartTurretPlacement { key: String },
    CancelTurretPlacement,
    ConfirmTurretPlacement { position: Vec2 },

    // --- Abilities ---
    UseAbility { key: String },

    // --- Camera and settings ---
    SetCameraMode { mode: CameraMode },
    CycleCamera,
    UpdateSettings { patch: SettingsPatch },

    // --- Per-frame input ---
    /// Movement intent relative to player facing, each axis in [-1, 1].
    MoveIntent { forward: f32, strafe: f32 },
    /// Pointer position in normalized device coordinates.
    PointerMoved { ndc: Vec2 },
    /// Raw pointer motion while captured.
    PointerDelta { dx: f32, dy: f32 },
    /// Whether the input layer holds exclusive pointer capture.
    SetPointerLock { locked: bool },
    Fire { held: bool },
    /// Explicit ground aim point, bypassing the camera.
    AimAt { point: Vec2 },
}
