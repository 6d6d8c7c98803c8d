//! Enemy AI for BASTION.
//!
//! Archetype profiles and the per-enemy behavior step: seek the structure,
//! attack on a fixed cadence, heal neighbors, change boss phase.
//! No ECS dependency; operates on plain data.

pub mod behavior;
pub mod profiles;

pub use bastion_core as core;

#[cfg(test)]
mod tests;
