//! User-facing settings and partial updates to them.

use serde::{Deserialize, Serialize};

use crate::constants::CAMERA_FOV_DEGREES;
use crate::enums::CameraMode;

/// User settings. Persisted as part of the player profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pointer sensitivity multiplier for first-person look.
    pub mouse_sensitivity: f32,
    /// Invert vertical look in first-person mode.
    pub invert_y: bool,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Camera mode used when a run starts.
    pub default_camera: CameraMode,
    /// Viewport aspect ratio (width / height) used for pointer unprojection.
    pub aspect_ratio: f32,
    /// Forwarded to the audio collaborator; the engine does not use it.
    pub master_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 1.0,
            invert_y: false,
            fov_degrees: CAMERA_FOV_DEGREES,
            default_camera: CameraMode::default(),
            aspect_ratio: 16.0 / 9.0,
            master_volume: 0.8,
        }
    }
}

/// A partial settings update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    pub mouse_sensitivity: Option<f32>,
    pub invert_y: Option<bool>,
    pub fov_degrees: Option<f32>,
    pub default_camera: Option<CameraMode>,
    pub aspect_ratio: Option<f32>,
    pub master_volume: Option<f32>,
}

impl Settings {
    /// Apply a patch, clamping numeric fields to sane ranges.
    /// Returns true if anything changed.
    pub fn apply(&mut self, patch: &SettingsPatch) -> bool {
        let before = self.clone();
        if let Some(v) = patch.mouse_sensitivity {
            self.mouse_sensitivity = v.clamp(0.05, 10.0);
        }
        if let Some(v) = patch.invert_y {
            self.invert_y = v;
        }
        if let Some(v) = patch.fov_degrees {
            self.fov_degrees = v.clamp(30.0, 120.0);
        }
        if let Some(v) = patch.default_camera {
            self.default_camera = v;
        }
        if let Some(v) = patch.aspect_ratio {
            self.aspect_ratio = v.clamp(0.25, 4.0);
        }
        if let Some(v) = patch.master_volume {
            self.master_volume = v.clamp(0.0, 1.0);
        }
        *self != before
    }
}
