//! Turret placement validation.

use glam::Vec2;

use bastion_core::constants::*;
use bastion_core::enums::PlacementFeedback;

use crate::store::EntityStore;

/// Check whether a turret costing `cost` can be placed at `at`.
pub fn placement_feedback(store: &EntityStore, at: Vec2, currency: u32, cost: u32) -> PlacementFeedback {
    if store.turret_count() >= MAX_TURRETS {
        return PlacementFeedback::LimitReached;
    }
    let d = at.length();
    if !d.is_finite() {
        return PlacementFeedback::TooFar;
    }
    if d < PLACEMENT_MIN_RADIUS {
        return PlacementFeedback::TooClose;
    }
    if d > PLACEMENT_MAX_RADIUS {
        return PlacementFeedback::TooFar;
    }
    if store
        .turret_positions()
        .iter()
        .any(|p| p.distance(at) < TURRET_SPACING)
    {
        return PlacementFeedback::Occupied;
    }
    if currency < cost {
        return PlacementFeedback::InsufficientFunds;
    }
    PlacementFeedback::Valid
}
