//! Application state shared between the control layer and the game loop thread.

use std::collections::VecDeque;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use bastion_core::commands::PlayerCommand;
use bastion_core::events::GameEvent;
use bastion_core::state::GameStateSnapshot;

/// Events kept for polling before the oldest are dropped.
pub const MAX_BUFFERED_EVENTS: usize = 1024;

/// Messages from the control layer to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the engine.
    Player(PlayerCommand),
    /// Stop the loop and let the thread exit.
    Shutdown,
}

/// Shared application state.
///
/// `mpsc::Sender` is Send but not Sync, so it sits behind a `Mutex`. The
/// latest snapshot and the event buffer are shared with the loop thread.
pub struct AppState {
    /// `None` until `start_simulation`.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the loop thread after every tick.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    /// Events delivered since the last `drain_events`.
    pub events: Arc<Mutex<VecDeque<GameEvent>>>,
    pub loop_thread: Mutex<Option<JoinHandle<()>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            events: Arc::new(Mutex::new(VecDeque::new())),
            loop_thread: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a game loop thread is attached.
    pub fn is_running(&self) -> bool {
        self.command_tx
            .lock()
            .map(|tx| tx.is_some())
            .unwrap_or(false)
    }
}

/// Append events to a bounded buffer, dropping the oldest on overflow.
pub fn buffer_events(buffer: &Mutex<VecDeque<GameEvent>>, events: &[GameEvent]) {
    if events.is_empty() {
        return;
    }
    if let Ok(mut buf) = buffer.lock() {
        buf.extend(events.iter().cloned());
        while buf.len() > MAX_BUFFERED_EVENTS {
            buf.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
        assert!(state.events.lock().unwrap().is_empty());
        assert!(!state.is_running());
    }

    #[test]
    fn test_event_buffer_is_bounded() {
        let buffer = Mutex::new(VecDeque::new());
        let events: Vec<GameEvent> = (0..MAX_BUFFERED_EVENTS + 10)
            .map(|i| GameEvent::BannerChanged {
                text: format!("{i}"),
            })
            .collect();
        buffer_events(&buffer, &events);
        let buf = buffer.lock().unwrap();
        assert_eq!(buf.len(), MAX_BUFFERED_EVENTS);
        assert_eq!(
            buf.front(),
            Some(&GameEvent::BannerChanged {
                text: "10".to_string()
            })
        );
    }
}
