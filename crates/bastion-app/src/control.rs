//! Control surface for a host front end.
//!
//! These functions bridge host requests to the game loop thread via the
//! command channel and read back the shared snapshot and event buffer.

use log::info;

use bastion_core::commands::PlayerCommand;
use bastion_core::events::GameEvent;
use bastion_core::state::GameStateSnapshot;

use crate::error::AppError;
use crate::game_loop::{self, LoopConfig, LoopOutputs};
use crate::state::{AppState, GameLoopCommand};

/// Start the simulation thread. Fails if one is already running.
pub fn start_simulation(state: &AppState, config: LoopConfig) -> Result<(), AppError> {
    let mut tx_lock = state.command_tx.lock()?;
    if tx_lock.is_some() {
        return Err(AppError::AlreadyRunning);
    }

    let outputs = LoopOutputs {
        latest_snapshot: state.latest_snapshot.clone(),
        events: state.events.clone(),
    };
    let (cmd_tx, handle) = game_loop::spawn_game_loop(config, outputs)?;

    *tx_lock = Some(cmd_tx);
    *state.loop_thread.lock()? = Some(handle);
    info!("simulation started");
    Ok(())
}

/// Send a player command to the simulation.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), AppError> {
    let tx_lock = state.command_tx.lock()?;
    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(GameLoopCommand::Player(command))
            .map_err(|_| AppError::ChannelClosed),
        None => Err(AppError::NotRunning),
    }
}

/// Latest snapshot, if the loop has ticked at least once.
pub fn get_snapshot(state: &AppState) -> Result<Option<GameStateSnapshot>, AppError> {
    Ok(state.latest_snapshot.lock()?.clone())
}

/// Take all events buffered since the last call.
pub fn drain_events(state: &AppState) -> Result<Vec<GameEvent>, AppError> {
    Ok(state.events.lock()?.drain(..).collect())
}

/// Stop the loop thread and wait for it to exit.
pub fn stop_simulation(state: &AppState) -> Result<(), AppError> {
    let tx = state.command_tx.lock()?.take().ok_or(AppError::NotRunning)?;
    // The loop also stops on disconnect, so a failed send is fine.
    let _ = tx.send(GameLoopCommand::Shutdown);
    drop(tx);

    if let Some(handle) = state.loop_thread.lock()?.take() {
        handle.join().map_err(|_| AppError::LoopPanicked)?;
    }
    info!("simulation stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bastion_core::enums::GamePhase;
    use std::time::{Duration, Instant};

    /// Poll until the snapshot satisfies `pred` or two seconds pass.
    fn wait_for(state: &AppState, pred: impl Fn(&GameStateSnapshot) -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if let Ok(Some(snap)) = get_snapshot(state) {
                if pred(&snap) {
                    return true;
                }
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        false
    }

    #[test]
    fn test_send_before_start_fails() {
        let state = AppState::new();
        assert!(matches!(
            send_command(&state, PlayerCommand::StartWave),
            Err(AppError::NotRunning)
        ));
        assert!(matches!(stop_simulation(&state), Err(AppError::NotRunning)));
        assert!(get_snapshot(&state).unwrap().is_none());
    }

    #[test]
    fn test_start_send_stop_cycle() {
        let state = AppState::new();
        start_simulation(&state, LoopConfig::default()).unwrap();
        assert!(state.is_running());
        assert!(matches!(
            start_simulation(&state, LoopConfig::default()),
            Err(AppError::AlreadyRunning)
        ));

        send_command(&state, PlayerCommand::StartGame { endless: false }).unwrap();
        assert!(wait_for(&state, |s| s.phase == GamePhase::Active));

        let events = drain_events(&state).unwrap();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::BannerChanged { .. })));

        stop_simulation(&state).unwrap();
        assert!(!state.is_running());
        assert!(matches!(
            send_command(&state, PlayerCommand::StartWave),
            Err(AppError::NotRunning)
        ));
    }
}
