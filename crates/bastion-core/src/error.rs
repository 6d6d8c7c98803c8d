//! Error types shared across the engine boundary.

use thiserror::Error;

use crate::enums::{AbilityKind, GamePhase, PlacementFeedback, UpgradeCategory};

/// Why a player command was rejected. Rejections never alter state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandRejection {
    #[error("insufficient currency: have {have}, need {need}")]
    InsufficientFunds { have: u32, need: u32 },
    #[error("{} already at max level", .0.as_str())]
    MaxLevel(UpgradeCategory),
    #[error("invalid placement: {}", .0.as_str())]
    InvalidPlacement(PlacementFeedback),
    #[error("{} is on cooldown ({remaining:.1}s left)", .ability.as_str())]
    OnCooldown { ability: AbilityKind, remaining: f32 },
    #[error("not allowed during {0:?}")]
    WrongPhase(GamePhase),
    #[error("unknown key {0:?}")]
    UnknownKey(String),
    #[error("no turret placement in progress")]
    NoPlacementActive,
    #[error("a wave is already in progress")]
    WaveInProgress,
    #[error("structure already at full health")]
    NothingToRepair,
}

/// Unexpected internal fault detected during a tick.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("non-finite {what} on {entity}")]
    NonFinite { what: &'static str, entity: String },
    #[error("health invariant violated on {entity}: {health} > {max}")]
    HealthAboveMax { entity: String, health: f32, max: f32 },
    #[error("structure health {0} outside [0, max]")]
    StructureHealth(f32),
}

/// Failure reported by the profile persistence collaborator.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile io: {0}")]
    Io(#[from] std::io::Error),
    #[error("profile format: {0}")]
    Format(#[from] serde_json::Error),
    #[error("profile store unavailable: {0}")]
    Unavailable(String),
}
