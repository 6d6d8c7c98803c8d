//! Game loop thread: runs the simulation engine at `TICK_RATE` and publishes
//! snapshots and events into shared state.
//!
//! The engine is created inside this thread; its listeners and profile store
//! are not `Send`. Commands arrive via an `mpsc` channel.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{info, warn};

use bastion_core::constants::{DT, TICK_RATE};
use bastion_core::events::GameEvent;
use bastion_core::state::GameStateSnapshot;
use bastion_sim::{SimConfig, SimulationEngine};

use crate::error::AppError;
use crate::profile_store::FileProfileStore;
use crate::state::{buffer_events, GameLoopCommand};

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// How the loop builds its engine.
#[derive(Debug, Clone, Default)]
pub struct LoopConfig {
    pub sim: SimConfig,
    /// Profile file. `None` runs without persistence.
    pub profile_path: Option<PathBuf>,
}

/// Handles into the shared state the loop writes to.
#[derive(Clone)]
pub struct LoopOutputs {
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    pub events: Arc<Mutex<VecDeque<GameEvent>>>,
}

/// Build the engine described by `config`.
pub fn build_engine(config: &LoopConfig) -> SimulationEngine {
    match &config.profile_path {
        Some(path) => SimulationEngine::with_profile_store(
            config.sim.clone(),
            Box::new(FileProfileStore::new(path.clone())),
        ),
        None => SimulationEngine::new(config.sim.clone()),
    }
}

/// Spawn the game loop on a new thread. Returns the command sender and the
/// thread handle.
pub fn spawn_game_loop(
    config: LoopConfig,
    outputs: LoopOutputs,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>), AppError> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("bastion-game-loop".into())
        .spawn(move || {
            let engine = build_engine(&config);
            run_game_loop(engine, cmd_rx, &outputs);
        })
        .map_err(AppError::Thread)?;

    Ok((cmd_tx, handle))
}

/// Drain pending commands into the engine. Returns false when the loop
/// should stop.
fn drain_commands(engine: &mut SimulationEngine, cmd_rx: &mpsc::Receiver<GameLoopCommand>) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::Player(cmd)) => engine.queue_command(cmd),
            Ok(GameLoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}

/// Advance one tick and publish its results.
pub fn step(engine: &mut SimulationEngine, outputs: &LoopOutputs) {
    let snapshot = engine.tick(DT);
    buffer_events(&outputs.events, engine.last_events());
    match outputs.latest_snapshot.lock() {
        Ok(mut lock) => *lock = Some(snapshot),
        Err(e) => warn!("snapshot lock poisoned: {e}"),
    }
}

/// The game loop. Runs until `Shutdown` or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    outputs: &LoopOutputs,
) {
    info!("game loop started at {TICK_RATE} Hz");
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        if !drain_commands(&mut engine, &cmd_rx) {
            break;
        }

        // 2. Advance one tick; the engine handles pause internally
        step(&mut engine, outputs);

        // 3. Sleep until the next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind; reset instead of spiralling into catch-up
            next_tick_time = now;
        }
    }
    info!("game loop stopped after {} ticks", engine.time().tick);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bastion_core::commands::PlayerCommand;
    use bastion_core::enums::GamePhase;

    fn outputs() -> LoopOutputs {
        LoopOutputs {
            latest_snapshot: Arc::new(Mutex::new(None)),
            events: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();
        tx.send(GameLoopCommand::Player(PlayerCommand::StartGame { endless: false }))
            .unwrap();
        tx.send(GameLoopCommand::Player(PlayerCommand::TogglePause))
            .unwrap();

        let mut engine = SimulationEngine::new(SimConfig::default());
        assert!(drain_commands(&mut engine, &rx));
        let snap = engine.tick(DT);
        assert_eq!(snap.phase, GamePhase::Paused);

        tx.send(GameLoopCommand::Shutdown).unwrap();
        assert!(!drain_commands(&mut engine, &rx));
        drop(tx);
        assert!(!drain_commands(&mut engine, &rx));
    }

    #[test]
    fn test_step_publishes_snapshot_and_events() {
        let out = outputs();
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.queue_command(PlayerCommand::StartGame { endless: false });
        step(&mut engine, &out);

        let snap = out.latest_snapshot.lock().unwrap().clone().unwrap();
        assert_eq!(snap.phase, GamePhase::Active);
        assert!(!out.events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.queue_command(PlayerCommand::StartGame { endless: false });
        engine.queue_command(PlayerCommand::StartWave);
        for _ in 0..600 {
            engine.tick(DT);
        }

        let snapshot = engine.tick(DT);
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();
        assert!(
            elapsed < Duration::from_millis(3),
            "snapshot serialization took {:?}",
            elapsed
        );
        assert!(!json.is_empty());
    }

    #[test]
    fn test_tick_duration_constant() {
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}
