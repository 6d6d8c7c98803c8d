//! Systems that operate on the entity store and run state each tick.
//!
//! Systems are plain functions. They do not own state; entities live in the
//! `EntityStore` and everything else in `RunState`.

pub mod abilities;
pub mod camera;
pub mod combat;
pub mod movement;
pub mod placement;
pub mod progression;
pub mod snapshot;
pub mod turret_ai;
pub mod wave_director;
pub mod weapons;
