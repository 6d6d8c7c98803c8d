//! Progression tracker: run and lifetime statistics, achievements, and
//! persistence through an optional profile store.

use std::sync::{Arc, Mutex};

use log::{info, warn};

use bastion_core::config::{Settings, SettingsPatch};
use bastion_core::constants::*;
use bastion_core::enums::{AchievementId, EnemyKind};
use bastion_core::error::ProfileError;
use bastion_core::events::GameEvent;
use bastion_core::profile::{LifetimeStats, PlayerProfile, RunStats};

/// Durable storage for the player profile.
pub trait ProfileStore {
    /// Load the stored profile. `Ok(None)` when nothing has been saved yet.
    fn load(&mut self) -> Result<Option<PlayerProfile>, ProfileError>;
    fn save(&mut self, profile: &PlayerProfile) -> Result<(), ProfileError>;
}

/// In-memory store. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    slot: Arc<Mutex<Option<PlayerProfile>>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: PlayerProfile) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(profile))),
        }
    }

    /// Last saved profile.
    pub fn saved(&self) -> Option<PlayerProfile> {
        self.slot.lock().ok().and_then(|s| s.clone())
    }
}

impl ProfileStore for MemoryProfileStore {
    fn load(&mut self) -> Result<Option<PlayerProfile>, ProfileError> {
        let slot = self
            .slot
            .lock()
            .map_err(|e| ProfileError::Unavailable(e.to_string()))?;
        Ok(slot.clone())
    }

    fn save(&mut self, profile: &PlayerProfile) -> Result<(), ProfileError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| ProfileError::Unavailable(e.to_string()))?;
        *slot = Some(profile.clone());
        Ok(())
    }
}

/// Whether an achievement's condition holds. Monotonic in `LifetimeStats`.
pub fn achieved(id: AchievementId, stats: &LifetimeStats) -> bool {
    match id {
        AchievementId::FirstBlood => stats.total_kills >= 1,
        AchievementId::Centurion => stats.total_kills >= CENTURION_KILLS,
        AchievementId::Exterminator => stats.total_kills >= EXTERMINATOR_KILLS,
        AchievementId::BossSlayer => stats.boss_kills >= 1,
        AchievementId::Survivor => stats.highest_wave >= SURVIVOR_WAVE,
        AchievementId::Veteran => stats.highest_wave >= VETERAN_WAVE,
        AchievementId::Tycoon => stats.currency_peak >= TYCOON_CURRENCY,
        AchievementId::Architect => stats.turrets_placed >= ARCHITECT_TURRETS,
        AchievementId::Tactician => stats.abilities_used >= TACTICIAN_ABILITIES,
        AchievementId::Clutch => stats.clutch_wins >= 1,
        AchievementId::Flawless => stats.perfect_waves >= FLAWLESS_PERFECT_WAVES,
        AchievementId::Endless => stats.endless_high_wave >= ENDLESS_WAVE,
    }
}

/// Owns run and lifetime stats. The only writer of either.
pub struct ProgressionTracker {
    run: RunStats,
    profile: PlayerProfile,
    store: Option<Box<dyn ProfileStore>>,
    endless: bool,
    dirty: bool,
}

impl ProgressionTracker {
    /// Create a tracker, loading the profile once if a store is present.
    pub fn new(mut store: Option<Box<dyn ProfileStore>>) -> Self {
        let profile = match store.as_mut().map(|s| s.load()) {
            Some(Ok(Some(profile))) => profile,
            Some(Ok(None)) | None => PlayerProfile::default(),
            Some(Err(e)) => {
                warn!("failed to load profile, using defaults: {e}");
                PlayerProfile::default()
            }
        };
        Self {
            run: RunStats::default(),
            profile,
            store,
            endless: false,
            dirty: false,
        }
    }

    pub fn run_stats(&self) -> &RunStats {
        &self.run
    }

    pub fn lifetime(&self) -> &LifetimeStats {
        &self.profile.lifetime
    }

    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    pub fn settings(&self) -> &Settings {
        &self.profile.settings
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.profile.unlocked_achievements.contains(&id)
    }

    /// Reset per-run counters. Lifetime stats are untouched.
    pub fn start_run(&mut self, endless: bool) {
        self.run = RunStats::default();
        self.endless = endless;
        self.profile.lifetime.runs_started += 1;
        self.dirty = true;
    }

    /// Apply a settings patch. Persists if anything changed.
    pub fn update_settings(&mut self, patch: &SettingsPatch) -> bool {
        let changed = self.profile.settings.apply(patch);
        if changed {
            self.dirty = true;
            self.flush();
        }
        changed
    }

    /// Fold this tick's events and currency into the stats, unlock newly
    /// earned achievements, and persist if anything changed.
    pub fn observe(&mut self, events: &[GameEvent], currency: u32, out: &mut Vec<GameEvent>) {
        self.note_currency(currency);
        self.check_achievements(out);
        for event in events {
            if self.record(event) {
                self.check_achievements(out);
            }
        }
        self.flush();
    }

    fn note_currency(&mut self, currency: u32) {
        if currency > self.run.currency_peak {
            self.run.currency_peak = currency;
        }
        if currency > self.profile.lifetime.currency_peak {
            self.profile.lifetime.currency_peak = currency;
            self.dirty = true;
        }
    }

    /// Update stats for one event. Returns true if any stat changed.
    fn record(&mut self, event: &GameEvent) -> bool {
        let life = &mut self.profile.lifetime;
        let run = &mut self.run;
        let changed = match event {
            GameEvent::Kill { kind, .. } => {
                run.kills += 1;
                life.total_kills += 1;
                if *kind == EnemyKind::Boss {
                    run.boss_kills += 1;
                    life.boss_kills += 1;
                }
                true
            }
            GameEvent::WaveStarted { wave, .. } => {
                run.highest_wave = run.highest_wave.max(*wave);
                life.highest_wave = life.highest_wave.max(*wave);
                if self.endless {
                    run.endless_high_wave = run.endless_high_wave.max(*wave);
                    life.endless_high_wave = life.endless_high_wave.max(*wave);
                }
                true
            }
            GameEvent::WaveCompleted { perfect, clutch, .. } => {
                if *perfect {
                    run.perfect_waves += 1;
                    life.perfect_waves += 1;
                }
                if *clutch {
                    run.clutch_wins += 1;
                    life.clutch_wins += 1;
                }
                *perfect || *clutch
            }
            GameEvent::TurretPlaced { .. } => {
                run.turrets_placed += 1;
                life.turrets_placed += 1;
                true
            }
            GameEvent::AbilityUsed { .. } => {
                run.abilities_used += 1;
                life.abilities_used += 1;
                true
            }
            _ => false,
        };
        if changed {
            self.dirty = true;
        }
        changed
    }

    fn check_achievements(&mut self, out: &mut Vec<GameEvent>) {
        for id in AchievementId::ALL {
            if !self.is_unlocked(id) && achieved(id, &self.profile.lifetime) {
                info!("achievement unlocked: {id:?}");
                self.profile.unlocked_achievements.push(id);
                self.dirty = true;
                out.push(GameEvent::AchievementUnlocked { id });
            }
        }
    }

    /// Write the profile if it changed. Failures are logged and swallowed.
    pub fn flush(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;
        if let Some(store) = self.store.as_mut() {
            if let Err(e) = store.save(&self.profile) {
                warn!("failed to save profile: {e}");
            }
        }
    }
}
