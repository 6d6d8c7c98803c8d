//! Run statistics, lifetime statistics and the persisted player profile.

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::constants::PROFILE_SCHEMA_VERSION;
use crate::enums::AchievementId;
use crate::upgrades::Upgrades;

/// Counters for the current run. Reset when a run starts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub kills: u64,
    pub boss_kills: u64,
    pub highest_wave: u32,
    pub currency_peak: u32,
    pub turrets_placed: u64,
    pub abilities_used: u64,
    pub clutch_wins: u64,
    pub perfect_waves: u64,
    /// Highest wave reached in an endless run.
    pub endless_high_wave: u32,
}

/// Counters accumulated across all runs. Never decrease.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifetimeStats {
    pub total_kills: u64,
    pub boss_kills: u64,
    pub highest_wave: u32,
    pub currency_peak: u32,
    pub turrets_placed: u64,
    pub abilities_used: u64,
    pub clutch_wins: u64,
    pub perfect_waves: u64,
    pub endless_high_wave: u32,
    pub runs_started: u64,
}

/// Everything the persistence collaborator stores for a player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerProfile {
    pub schema_version: u32,
    pub lifetime: LifetimeStats,
    pub unlocked_achievements: Vec<AchievementId>,
    pub settings: Settings,
    /// Upgrade levels every run starts with.
    pub upgrade_defaults: Upgrades,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            schema_version: PROFILE_SCHEMA_VERSION,
            lifetime: LifetimeStats::default(),
            unlocked_achievements: Vec::new(),
            settings: Settings::default(),
            upgrade_defaults: Upgrades::default(),
        }
    }
}
