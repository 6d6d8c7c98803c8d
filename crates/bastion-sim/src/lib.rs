//! Simulation engine for BASTION.
//!
//! Owns the entity store (a hecs world), runs the per-tick systems at a
//! caller-driven frame rate, delivers game events and produces
//! GameStateSnapshots for presentation.

pub mod engine;
pub mod events;
pub mod loadout;
pub mod run_state;
pub mod store;
pub mod systems;

pub use bastion_core as core;
pub use engine::{SimConfig, SimulationEngine};
pub use events::{EventBus, SubscriptionId};
pub use store::EntityStore;
pub use systems::progression::{MemoryProfileStore, ProfileStore};
