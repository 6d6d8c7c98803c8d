//! Fundamental geometric and simulation types.
//!
//! The ground plane is XZ. Ground positions are `glam::Vec2` holding `(x, z)`;
//! height is the world Y axis.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Lift a ground-plane point into world space at the given height.
pub fn to_world(ground: Vec2, height: f32) -> Vec3 {
    Vec3::new(ground.x, height, ground.y)
}

/// Drop a world-space point onto the ground plane.
pub fn to_ground(world: Vec3) -> Vec2 {
    Vec2::new(world.x, world.z)
}

/// Unit forward vector on the ground plane for a facing angle (radians).
/// Facing 0 looks down +Z; positive angles turn toward +X.
pub fn facing_forward(facing: f32) -> Vec2 {
    Vec2::new(facing.sin(), facing.cos())
}

/// Unit right vector on the ground plane for a facing angle (radians).
pub fn facing_right(facing: f32) -> Vec2 {
    Vec2::new(facing.cos(), -facing.sin())
}

/// Facing angle that looks from `from` toward `to`. Returns `None` when the
/// points coincide.
pub fn facing_toward(from: Vec2, to: Vec2) -> Option<f32> {
    let d = to - from;
    if d.length_squared() < 1e-8 {
        return None;
    }
    Some(d.x.atan2(d.y))
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of simulated (unpaused) ticks.
    pub tick: u64,
    /// Elapsed simulated time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += f64::from(dt);
    }
}
