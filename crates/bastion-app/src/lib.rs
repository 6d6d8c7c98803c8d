//! BASTION headless host.
//!
//! Runs the simulation engine on a dedicated game-loop thread, exposes a
//! channel-based control surface, persists the player profile as JSON and
//! drives scripted sessions for the `bastion` binary.

pub mod control;
pub mod error;
pub mod game_loop;
pub mod logging;
pub mod profile_store;
pub mod session;
pub mod state;

pub use bastion_core as core;
pub use error::AppError;
pub use logging::init as init_logging;
