//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the entity store and all per-run state, processes
//! player commands, runs all systems, delivers events and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use glam::Vec2;
use log::{error, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use bastion_core::commands::PlayerCommand;
use bastion_core::config::{Settings, SettingsPatch};
use bastion_core::constants::*;
use bastion_core::enums::*;
use bastion_core::error::{CommandRejection, SimError};
use bastion_core::events::GameEvent;
use bastion_core::profile::{PlayerProfile, RunStats};
use bastion_core::state::GameStateSnapshot;
use bastion_core::types::{facing_toward, SimTime};
use bastion_core::upgrades::{upgrade_cost, Upgrades};

use crate::events::{EventBus, SubscriptionId};
use crate::loadout::{build_turret, turret_spec};
use crate::run_state::{Placement, RunState};
use crate::store::EntityStore;
use crate::systems;
use crate::systems::camera::CameraController;
use crate::systems::progression::{ProfileStore, ProgressionTracker};
use crate::systems::wave_director::WaveProgress;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed. Same seed and inputs give the same simulation.
    pub seed: u64,
    /// Upper bound on a single frame's delta time.
    pub max_frame_dt: f32,
    /// Seconds between `PerformanceSample` events.
    pub performance_sample_interval: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_frame_dt: MAX_FRAME_DT,
            performance_sample_interval: PERFORMANCE_SAMPLE_INTERVAL,
        }
    }
}

#[derive(Default)]
struct PerfCounter {
    elapsed: f32,
    ticks: u32,
}

/// The simulation engine. Owns the entity store and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    store: EntityStore,
    run: RunState,
    camera: CameraController,
    progression: ProgressionTracker,
    rng: ChaCha8Rng,
    time: SimTime,
    phase: GamePhase,
    command_queue: VecDeque<PlayerCommand>,
    /// Events raised since the last delivery.
    pending_events: Vec<GameEvent>,
    /// Events delivered at the end of the last tick.
    last_events: Vec<GameEvent>,
    bus: EventBus,
    /// Explicit aim point overriding the camera until the pointer moves.
    explicit_aim: Option<Vec2>,
    perf: PerfCounter,
}

impl SimulationEngine {
    /// Create a new engine without persistence.
    pub fn new(config: SimConfig) -> Self {
        Self::build(config, None)
    }

    /// Create a new engine backed by a profile store. The profile is loaded once.
    pub fn with_profile_store(config: SimConfig, store: Box<dyn ProfileStore>) -> Self {
        Self::build(config, Some(store))
    }

    fn build(config: SimConfig, store: Option<Box<dyn ProfileStore>>) -> Self {
        let progression = ProgressionTracker::new(store);
        let camera = CameraController::new(progression.settings());
        let run = RunState::new(false, progression.profile().upgrade_defaults);
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            store: EntityStore::new(),
            run,
            camera,
            progression,
            time: SimTime::default(),
            phase: GamePhase::default(),
            command_queue: VecDeque::new(),
            pending_events: Vec::new(),
            last_events: Vec::new(),
            bus: EventBus::new(),
            explicit_aim: None,
            perf: PerfCounter::default(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.bus.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Advance the simulation by one frame and return the resulting snapshot.
    pub fn tick(&mut self, frame_dt: f32) -> GameStateSnapshot {
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, self.config.max_frame_dt)
        } else {
            0.0
        };

        self.process_commands();

        if self.phase == GamePhase::Active {
            if let Err(e) = self.run_systems(dt) {
                self.fault(e);
            } else {
                self.time.advance(dt);
                self.sample_performance(dt);
            }
        }

        self.camera.update(self.run.player.position, dt);

        let mut unlocked = Vec::new();
        self.progression
            .observe(&self.pending_events, self.run.currency, &mut unlocked);
        self.pending_events.extend(unlocked);

        self.last_events = std::mem::take(&mut self.pending_events);
        self.bus.publish(&self.last_events);

        self.snapshot()
    }

    /// Current snapshot without advancing.
    pub fn snapshot(&self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            &self.store,
            &self.run,
            &self.camera,
            self.phase,
            &self.time,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn run_state(&self) -> &RunState {
        &self.run
    }

    pub fn upgrades(&self) -> Upgrades {
        self.run.upgrades
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn settings(&self) -> &Settings {
        self.progression.settings()
    }

    pub fn profile(&self) -> &PlayerProfile {
        self.progression.profile()
    }

    pub fn run_stats(&self) -> &RunStats {
        self.progression.run_stats()
    }

    /// Events delivered at the end of the last tick.
    pub fn last_events(&self) -> &[GameEvent] {
        &self.last_events
    }

    // --- Run control ---

    /// Reset all per-run state and begin a run.
    pub fn start_game(&mut self, endless: bool) {
        self.reinitialize(endless);
        self.progression.start_run(endless);
        self.phase = GamePhase::Active;
        info!("run started (endless={endless})");
        let banner = format!("Wave {} ready", self.run.upcoming_wave);
        self.run.set_banner(banner, &mut self.pending_events);
    }

    /// Drop the run and return to the menu. Clears a fault.
    pub fn reset(&mut self) {
        self.reinitialize(false);
        self.phase = GamePhase::MainMenu;
        info!("engine reset");
    }

    fn reinitialize(&mut self, endless: bool) {
        self.store.clear();
        self.run = RunState::new(endless, self.progression.profile().upgrade_defaults);
        self.time = SimTime::default();
        self.explicit_aim = None;
        self.perf = PerfCounter::default();
        if self.camera.pointer_locked() {
            self.pending_events.push(GameEvent::PointerCaptureReleased);
        }
        self.camera = CameraController::new(self.progression.settings());
    }

    /// Begin the upcoming wave.
    pub fn start_wave(&mut self) -> Result<(), CommandRejection> {
        if self.phase != GamePhase::Active {
            return Err(CommandRejection::WrongPhase(self.phase));
        }
        if !self.run.can_start_wave() {
            return Err(CommandRejection::WaveInProgress);
        }
        systems::wave_director::start_wave(&mut self.run, &mut self.pending_events);
        Ok(())
    }

    pub fn toggle_pause(&mut self) {
        let paused = match self.phase {
            GamePhase::Active => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Active,
            _ => return,
        };
        self.phase = paused;
        self.pending_events.push(GameEvent::PauseChanged {
            paused: paused == GamePhase::Paused,
        });
    }

    fn require_run(&self) -> Result<(), CommandRejection> {
        match self.phase {
            GamePhase::Active | GamePhase::Paused => Ok(()),
            other => Err(CommandRejection::WrongPhase(other)),
        }
    }

    // --- Loadout and economy ---

    pub fn set_weapon(&mut self, key: &str) -> Result<(), CommandRejection> {
        let weapon =
            WeaponKind::from_key(key).ok_or_else(|| CommandRejection::UnknownKey(key.to_string()))?;
        if weapon != self.run.player.weapon {
            self.run.player.weapon = weapon;
            self.run.player.fire_cooldown = 0.0;
            self.pending_events.push(GameEvent::WeaponChanged { weapon });
        }
        Ok(())
    }

    /// Buy one level of `category` at the quoted `cost`.
    pub fn buy_upgrade(&mut self, category: UpgradeCategory, cost: u32) -> Result<(), CommandRejection> {
        self.require_run()?;
        if self.run.upgrades.is_maxed(category) {
            return Err(CommandRejection::MaxLevel(category));
        }
        if !self.run.try_spend(cost) {
            return Err(CommandRejection::InsufficientFunds {
                have: self.run.currency,
                need: cost,
            });
        }
        let level = self.run.upgrades.level_for(category) + 1;
        self.run.upgrades.set_level(category, level);
        if matches!(category, UpgradeCategory::MaxHealth | UpgradeCategory::StructureTier) {
            let max = self.run.upgrades.structure_max_health();
            self.run.structure.set_max_health(max);
            self.run.check_low_health(&mut self.pending_events);
        }
        info!("upgrade {} -> level {} for {}", category.as_str(), level, cost);
        self.pending_events.push(GameEvent::UpgradePurchased {
            category,
            level,
            cost,
        });
        Ok(())
    }

    /// Repair the structure to full health at `REPAIR_COST_PER_HP`.
    pub fn repair_structure(&mut self) -> Result<(), CommandRejection> {
        self.require_run()?;
        let missing = self.run.structure.missing();
        if missing <= 0.0 {
            return Err(CommandRejection::NothingToRepair);
        }
        let cost = (missing * REPAIR_COST_PER_HP).ceil() as u32;
        if !self.run.try_spend(cost) {
            return Err(CommandRejection::InsufficientFunds {
                have: self.run.currency,
                need: cost,
            });
        }
        self.run.structure.heal(missing);
        self.run.check_low_health(&mut self.pending_events);
        info!("structure repaired for {cost}");
        Ok(())
    }

    /// Raise the structure tier at its listed price.
    pub fn upgrade_structure_tier(&mut self) -> Result<(), CommandRejection> {
        let tier = self.run.upgrades.structure_tier;
        let cost = upgrade_cost(UpgradeCategory::StructureTier, tier)
            .ok_or(CommandRejection::MaxLevel(UpgradeCategory::StructureTier))?;
        self.buy_upgrade(UpgradeCategory::StructureTier, cost)
    }

    // --- Turrets ---

    pub fn start_turret_placement(&mut self, key: &str) -> Result<(), CommandRejection> {
        self.require_run()?;
        let kind =
            TurretKind::from_key(key).ok_or_else(|| CommandRejection::UnknownKey(key.to_string()))?;
        self.run.placement = Some(Placement {
            kind,
            cursor: self.run.player.aim_point,
        });
        Ok(())
    }

    pub fn cancel_turret_placement(&mut self) {
        self.run.placement = None;
    }

    /// Placement feedback for the active placement at `position`.
    pub fn placement_feedback(&self, position: Vec2) -> Option<PlacementFeedback> {
        self.run.placement.map(|pl| {
            systems::placement::placement_feedback(
                &self.store,
                position,
                self.run.currency,
                turret_spec(pl.kind).cost,
            )
        })
    }

    pub fn confirm_turret_placement(&mut self, position: Vec2) -> Result<(), CommandRejection> {
        self.require_run()?;
        let placement = self.run.placement.ok_or(CommandRejection::NoPlacementActive)?;
        let cost = turret_spec(placement.kind).cost;
        let feedback =
            systems::placement::placement_feedback(&self.store, position, self.run.currency, cost);
        if !feedback.is_valid() {
            return Err(CommandRejection::InvalidPlacement(feedback));
        }
        if !self.run.try_spend(cost) {
            return Err(CommandRejection::InvalidPlacement(PlacementFeedback::InsufficientFunds));
        }
        self.store.spawn_turret(build_turret(placement.kind), position);
        self.run.placement = None;
        info!("{} turret placed at {:?}", placement.kind.as_str(), position);
        self.pending_events.push(GameEvent::TurretPlaced {
            kind: placement.kind,
            position,
        });
        Ok(())
    }

    // --- Abilities ---

    pub fn use_ability(&mut self, key: &str) -> Result<(), CommandRejection> {
        let kind =
            AbilityKind::from_key(key).ok_or_else(|| CommandRejection::UnknownKey(key.to_string()))?;
        if self.phase != GamePhase::Active {
            return Err(CommandRejection::WrongPhase(self.phase));
        }
        let aim = self.run.player.aim_point;
        systems::abilities::use_ability(&mut self.run, kind, aim, &mut self.pending_events)
    }

    // --- Camera and settings ---

    pub fn set_camera_mode(&mut self, mode: CameraMode) {
        let p = &self.run.player;
        self.camera
            .set_mode(mode, p.position, p.facing, &mut self.pending_events);
    }

    pub fn cycle_camera(&mut self) {
        let p = &self.run.player;
        self.camera
            .cycle(p.position, p.facing, &mut self.pending_events);
    }

    pub fn update_settings(&mut self, patch: &SettingsPatch) -> bool {
        let changed = self.progression.update_settings(patch);
        if changed {
            self.camera.apply_settings(self.progression.settings());
        }
        changed
    }

    // --- Command processing ---

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            let label = format!("{command:?}");
            if let Err(e) = self.handle_command(command) {
                warn!("command rejected: {label}: {e}");
            }
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) -> Result<(), CommandRejection> {
        match command {
            PlayerCommand::StartGame { endless } => self.start_game(endless),
            PlayerCommand::StartWave => return self.start_wave(),
            PlayerCommand::TogglePause => self.toggle_pause(),
            PlayerCommand::Reset => self.reset(),
            PlayerCommand::SetWeapon { key } => return self.set_weapon(&key),
            PlayerCommand::BuyUpgrade { category, cost } => return self.buy_upgrade(category, cost),
            PlayerCommand::RepairStructure => return self.repair_structure(),
            PlayerCommand::UpgradeStructureTier => return self.upgrade_structure_tier(),
            PlayerCommand::StartTurretPlacement { key } => return self.start_turret_placement(&key),
            PlayerCommand::CancelTurretPlacement => self.cancel_turret_placement(),
            PlayerCommand::ConfirmTurretPlacement { position } => {
                return self.confirm_turret_placement(position)
            }
            PlayerCommand::UseAbility { key } => return self.use_ability(&key),
            PlayerCommand::SetCameraMode { mode } => self.set_camera_mode(mode),
            PlayerCommand::CycleCamera => self.cycle_camera(),
            PlayerCommand::UpdateSettings { patch } => {
                self.update_settings(&patch);
            }
            PlayerCommand::MoveIntent { forward, strafe } => {
                let clamp = |v: f32| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
                self.run.player.move_intent = Vec2::new(clamp(strafe), clamp(forward));
            }
            PlayerCommand::PointerMoved { ndc } => {
                if ndc.is_finite() {
                    self.camera.pointer_moved(ndc);
                    self.explicit_aim = None;
                }
            }
            PlayerCommand::PointerDelta { dx, dy } => {
                if dx.is_finite() && dy.is_finite() {
                    self.camera.pointer_delta(dx, dy);
                }
            }
            PlayerCommand::SetPointerLock { locked } => {
                self.camera.set_pointer_lock(locked, &mut self.pending_events);
            }
            PlayerCommand::Fire { held } => self.run.player.fire_held = held,
            PlayerCommand::AimAt { point } => {
                if point.is_finite() {
                    self.explicit_aim = Some(point);
                    self.run.player.aim_point = point;
                }
            }
        }
        Ok(())
    }

    // --- Tick ---

    /// Update aim and facing from the camera or an explicit aim point.
    fn update_aim(&mut self) {
        let player = self.run.player.position;
        let aim = self
            .explicit_aim
            .or_else(|| self.camera.aim_point(player))
            .unwrap_or(self.run.player.aim_point);
        self.run.player.aim_point = aim;

        if self.camera.mode() == CameraMode::FirstPerson {
            self.run.player.facing = self.camera.yaw();
        } else if let Some(facing) = facing_toward(player, aim) {
            self.run.player.facing = facing;
        }

        if let Some(placement) = self.run.placement.as_mut() {
            placement.cursor = aim;
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) -> Result<(), SimError> {
        // 1. Player aim, facing and movement
        self.update_aim();
        systems::movement::player(&mut self.run, dt);
        // 2. Wave spawning
        systems::wave_director::run(&mut self.store, &mut self.run, &mut self.rng, dt);
        // 3. Enemy behavior and attacks
        systems::movement::enemies(&mut self.store, &mut self.run, dt, &mut self.pending_events);
        // 4. Player fire, projectiles, airstrikes, deaths
        systems::weapons::run(&mut self.store, &mut self.run, dt);
        systems::combat::run(
            &mut self.store,
            &mut self.run,
            &mut self.rng,
            dt,
            &mut self.pending_events,
        );
        // 5. Turret targeting and fire
        systems::turret_ai::run(&mut self.store, dt);
        // 6. Ability timers
        systems::abilities::run(&mut self.run, dt, &mut self.pending_events);
        // 7. Wave completion, intermission, end of run
        self.advance_waves(dt);
        self.check_run_over();
        // 8. Invariants
        self.validate()
    }

    fn advance_waves(&mut self, dt: f32) {
        match systems::wave_director::check_completion(&self.store, &mut self.run, &mut self.pending_events) {
            WaveProgress::Victory => {
                self.end_run(true);
                return;
            }
            WaveProgress::Completed | WaveProgress::InProgress => {}
        }
        if systems::wave_director::tick_intermission(&mut self.run, dt) {
            systems::wave_director::start_wave(&mut self.run, &mut self.pending_events);
        }
    }

    fn check_run_over(&mut self) {
        if self.phase != GamePhase::Active {
            return;
        }
        if self.run.structure.health <= 0.0 || !self.run.player.alive() {
            self.end_run(false);
        }
    }

    fn end_run(&mut self, victory: bool) {
        let wave = self
            .run
            .active_wave
            .as_ref()
            .map(|w| w.index)
            .unwrap_or(self.run.upcoming_wave.saturating_sub(1));
        self.phase = if victory {
            GamePhase::Victory
        } else {
            GamePhase::GameOver
        };
        self.run.player.fire_held = false;
        info!(
            "run over: victory={} wave={} score={}",
            victory, wave, self.run.score
        );
        self.run.set_banner(
            if victory { "Victory" } else { "Game Over" },
            &mut self.pending_events,
        );
        self.pending_events.push(GameEvent::GameOver {
            score: self.run.score,
            wave,
            victory,
        });
    }

    fn validate(&self) -> Result<(), SimError> {
        self.store.validate()?;
        let s = &self.run.structure;
        if !s.health.is_finite() || s.health < 0.0 || s.health > s.max_health + 1e-3 {
            return Err(SimError::StructureHealth(s.health));
        }
        let p = &self.run.player;
        if !p.position.is_finite() || !p.aim_point.is_finite() {
            return Err(SimError::NonFinite {
                what: "player position",
                entity: "player".to_string(),
            });
        }
        Ok(())
    }

    /// Halt on an internal fault until the next reset or run start.
    ///
    /// Only `SimError`s found by the post-tick invariant check land here. A
    /// panic inside a system is not caught and unwinds out of `tick`.
    fn fault(&mut self, err: SimError) {
        error!("simulation fault at tick {}: {err}", self.time.tick);
        self.pending_events.push(GameEvent::RuntimeError {
            message: err.to_string(),
            context: format!("tick {}", self.time.tick),
        });
        self.phase = GamePhase::Faulted;
    }

    fn sample_performance(&mut self, dt: f32) {
        self.perf.elapsed += dt;
        self.perf.ticks += 1;
        if self.perf.elapsed >= self.config.performance_sample_interval {
            let ticks_per_sec = self.perf.ticks as f32 / self.perf.elapsed;
            self.pending_events.push(GameEvent::PerformanceSample {
                ticks_per_sec,
                entity_count: self.store.entity_count() as u32,
            });
            self.perf = PerfCounter::default();
        }
    }

    // --- Test hooks ---

    /// Mutable store access for tests that stage entities directly.
    #[cfg(test)]
    pub(crate) fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    #[cfg(test)]
    pub(crate) fn run_state_mut(&mut self) -> &mut RunState {
        &mut self.run
    }
}
