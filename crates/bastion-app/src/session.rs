//! Scripted headless sessions: feed a command script to an engine, start
//! waves as they become available and summarize the outcome.

use std::path::Path;
use std::time::{Duration, Instant};

use glam::Vec2;
use log::{debug, info};
use serde::Serialize;

use bastion_core::commands::PlayerCommand;
use bastion_core::constants::{DT, TICK_RATE};
use bastion_core::enums::GamePhase;
use bastion_core::events::GameEvent;
use bastion_core::state::GameStateSnapshot;

use crate::control;
use crate::error::AppError;
use crate::game_loop::{build_engine, LoopConfig};
use crate::state::AppState;

/// Final state of a session, printed by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub phase: GamePhase,
    pub waves_cleared: u32,
    pub score: u64,
    pub currency: u32,
    pub structure_integrity_pct: f32,
    pub elapsed_secs: f64,
    pub turrets: usize,
}

impl SessionSummary {
    pub fn from_snapshot(snap: &GameStateSnapshot) -> Self {
        Self {
            phase: snap.phase,
            waves_cleared: snap.upcoming_wave.saturating_sub(1),
            score: snap.score,
            currency: snap.currency,
            structure_integrity_pct: snap.structure_integrity_pct,
            elapsed_secs: snap.time.elapsed_secs,
            turrets: snap.turrets.len(),
        }
    }
}

/// Start a run, ring the structure with basic turrets and call the first wave.
pub fn default_script(endless: bool) -> Vec<PlayerCommand> {
    let mut script = vec![PlayerCommand::StartGame { endless }];
    for at in [Vec2::new(7.0, 0.0), Vec2::new(-7.0, 0.0)] {
        script.push(PlayerCommand::StartTurretPlacement { key: "t".into() });
        script.push(PlayerCommand::ConfirmTurretPlacement { position: at });
    }
    script.push(PlayerCommand::StartWave);
    script
}

/// Read a JSON array of commands.
pub fn load_script(path: &Path) -> Result<Vec<PlayerCommand>, AppError> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

fn finished(phase: GamePhase) -> bool {
    matches!(
        phase,
        GamePhase::GameOver | GamePhase::Victory | GamePhase::Faulted
    )
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::WaveStarted { .. }
        | GameEvent::WaveCompleted { .. }
        | GameEvent::GameOver { .. }
        | GameEvent::AchievementUnlocked { .. }
        | GameEvent::RuntimeError { .. } => info!("{event:?}"),
        _ => debug!("{event:?}"),
    }
}

/// Run a session on the calling thread as fast as possible.
pub fn run_fast(config: &LoopConfig, script: Vec<PlayerCommand>, seconds: f32) -> SessionSummary {
    let mut engine = build_engine(config);
    engine.subscribe(log_event);
    engine.queue_commands(script);

    let ticks = (seconds.max(0.0) * TICK_RATE as f32).ceil() as u64;
    let mut snap = engine.snapshot();
    for _ in 0..ticks {
        snap = engine.tick(DT);
        if finished(snap.phase) {
            break;
        }
        if snap.can_start_wave && !snap.endless {
            engine.queue_command(PlayerCommand::StartWave);
        }
    }
    SessionSummary::from_snapshot(&snap)
}

/// Run a session on the game loop thread in real time.
pub fn run_realtime(
    config: LoopConfig,
    script: Vec<PlayerCommand>,
    seconds: f32,
) -> Result<SessionSummary, AppError> {
    let state = AppState::new();
    control::start_simulation(&state, config)?;
    for command in script {
        control::send_command(&state, command)?;
    }

    let deadline = Instant::now() + Duration::from_secs_f32(seconds.max(0.0));
    let mut last = None;
    while Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(100));
        for event in control::drain_events(&state)? {
            log_event(&event);
        }
        if let Some(snap) = control::get_snapshot(&state)? {
            if finished(snap.phase) {
                last = Some(snap);
                break;
            }
            if snap.can_start_wave && !snap.endless {
                control::send_command(&state, PlayerCommand::StartWave)?;
            }
            last = Some(snap);
        }
    }

    control::stop_simulation(&state)?;
    let snap = match control::get_snapshot(&state)? {
        Some(snap) => snap,
        None => last.unwrap_or_default(),
    };
    Ok(SessionSummary::from_snapshot(&snap))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_script_places_two_turrets() {
        let script = default_script(false);
        assert!(matches!(script[0], PlayerCommand::StartGame { endless: false }));
        assert!(matches!(script.last(), Some(PlayerCommand::StartWave)));
        let confirms = script
            .iter()
            .filter(|c| matches!(c, PlayerCommand::ConfirmTurretPlacement { .. }))
            .count();
        assert_eq!(confirms, 2);
    }

    #[test]
    fn test_fast_session_clears_first_wave() {
        let summary = run_fast(&LoopConfig::default(), default_script(false), 90.0);
        assert_eq!(summary.turrets, 2);
        assert!(summary.waves_cleared >= 1, "{summary:?}");
        assert!(summary.score > 0);
    }

    #[test]
    fn test_empty_session_stays_in_menu() {
        let summary = run_fast(&LoopConfig::default(), Vec::new(), 1.0);
        assert_eq!(summary.phase, GamePhase::MainMenu);
        assert_eq!(summary.elapsed_secs, 0.0);
    }

    #[test]
    fn test_load_script_rejects_bad_json() {
        let dir = std::env::temp_dir().join("bastion_script_tests");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("bad.json");
        std::fs::write(&path, "[{\"type\": \"Nope\"}]").unwrap();
        assert!(matches!(load_script(&path), Err(AppError::Json(_))));
        assert!(matches!(
            load_script(&dir.join("absent.json")),
            Err(AppError::Io(_))
        ));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
