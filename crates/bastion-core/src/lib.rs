//! Core types and definitions for the BASTION simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, state snapshots, events, settings, the persisted
//! profile and tuning constants. It has no dependency on any runtime host.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod profile;
pub mod state;
pub mod types;
pub mod upgrades;

#[cfg(test)]
mod tests;
