//! Camera controller: camera modes, smoothing and aim-ray computation.
//!
//! Each mode has one rig implementing `AimRig`. Third-person and top-down
//! rigs unproject the pointer onto the ground; the first-person rig aims
//! along its yaw/pitch view ray.

use glam::{Mat4, Vec2, Vec3};

use bastion_core::config::Settings;
use bastion_core::constants::*;
use bastion_core::enums::CameraMode;
use bastion_core::events::GameEvent;
use bastion_core::state::CameraView;
use bastion_core::types::{facing_forward, to_ground, to_world};

/// Eye, look target and up vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

/// Inputs a rig needs to place the camera and aim.
#[derive(Debug, Clone, Copy)]
pub struct RigContext {
    pub player: Vec2,
    pub yaw: f32,
    pub pitch: f32,
    pub pointer_ndc: Vec2,
    pub fov_degrees: f32,
    pub aspect: f32,
}

/// Placement and aim for one camera mode.
pub trait AimRig {
    /// Where the camera wants to be for the current player pose.
    fn desired_pose(&self, ctx: &RigContext) -> CameraPose;

    /// Ground aim point as seen through `pose`, if the aim ray hits anything.
    fn aim_point(&self, ctx: &RigContext, pose: &CameraPose) -> Option<Vec2>;
}

pub struct ThirdPersonRig;
pub struct TopDownRig;
pub struct FirstPersonRig;

impl AimRig for ThirdPersonRig {
    fn desired_pose(&self, ctx: &RigContext) -> CameraPose {
        CameraPose {
            eye: to_world(ctx.player - Vec2::new(0.0, FOLLOW_DISTANCE), FOLLOW_HEIGHT),
            target: to_world(ctx.player, 1.0),
            up: Vec3::Y,
        }
    }

    fn aim_point(&self, ctx: &RigContext, pose: &CameraPose) -> Option<Vec2> {
        unproject_to_ground(pose, ctx)
    }
}

impl AimRig for TopDownRig {
    fn desired_pose(&self, ctx: &RigContext) -> CameraPose {
        CameraPose {
            eye: to_world(ctx.player, TOP_DOWN_HEIGHT),
            target: to_world(ctx.player, 0.0),
            // Looking straight down; +Z is screen-up.
            up: Vec3::Z,
        }
    }

    fn aim_point(&self, ctx: &RigContext, pose: &CameraPose) -> Option<Vec2> {
        unproject_to_ground(pose, ctx)
    }
}

impl AimRig for FirstPersonRig {
    fn desired_pose(&self, ctx: &RigContext) -> CameraPose {
        let eye = to_world(ctx.player, PLAYER_EYE_HEIGHT);
        CameraPose {
            eye,
            target: eye + view_direction(ctx.yaw, ctx.pitch),
            up: Vec3::Y,
        }
    }

    fn aim_point(&self, ctx: &RigContext, pose: &CameraPose) -> Option<Vec2> {
        let dir = view_direction(ctx.yaw, ctx.pitch);
        match ground_hit(pose.eye, dir) {
            Some(hit) => Some(hit),
            None => Some(ctx.player + facing_forward(ctx.yaw) * FIRST_PERSON_AIM_DISTANCE),
        }
    }
}

/// Unit view direction for a yaw (0 = +Z) and pitch (positive up).
pub fn view_direction(yaw: f32, pitch: f32) -> Vec3 {
    Vec3::new(yaw.sin() * pitch.cos(), pitch.sin(), yaw.cos() * pitch.cos())
}

/// Left-handed, so that screen-right is +X when looking down +Z.
pub fn view_projection(pose: &CameraPose, fov_degrees: f32, aspect: f32) -> Mat4 {
    let proj = Mat4::perspective_lh(fov_degrees.to_radians(), aspect, CAMERA_NEAR, CAMERA_FAR);
    proj * Mat4::look_at_lh(pose.eye, pose.target, pose.up)
}

/// Intersect a ray with the ground plane (y = 0). Misses if it points up.
fn ground_hit(origin: Vec3, dir: Vec3) -> Option<Vec2> {
    if dir.y >= -1e-6 {
        return None;
    }
    let t = -origin.y / dir.y;
    if t < 0.0 {
        return None;
    }
    Some(to_ground(origin + dir * t))
}

/// Unproject an NDC pointer through the camera and intersect with the ground.
fn unproject_to_ground(pose: &CameraPose, ctx: &RigContext) -> Option<Vec2> {
    let inv = view_projection(pose, ctx.fov_degrees, ctx.aspect).inverse();
    let near = inv.project_point3(Vec3::new(ctx.pointer_ndc.x, ctx.pointer_ndc.y, 0.0));
    let far = inv.project_point3(Vec3::new(ctx.pointer_ndc.x, ctx.pointer_ndc.y, 1.0));
    let dir = far - near;
    if !dir.is_finite() {
        return None;
    }
    ground_hit(near, dir)
}

fn rig_for(mode: CameraMode) -> &'static dyn AimRig {
    match mode {
        CameraMode::ThirdPersonFollow => &ThirdPersonRig,
        CameraMode::TopDown => &TopDownRig,
        CameraMode::FirstPerson => &FirstPersonRig,
    }
}

/// Camera state for one engine.
#[derive(Debug, Clone)]
pub struct CameraController {
    mode: CameraMode,
    pose: CameraPose,
    yaw: f32,
    pitch: f32,
    pointer_ndc: Vec2,
    pointer_locked: bool,
    fov_degrees: f32,
    aspect: f32,
    sensitivity: f32,
    invert_y: bool,
}

impl CameraController {
    pub fn new(settings: &Settings) -> Self {
        let mut camera = Self {
            mode: settings.default_camera,
            pose: CameraPose {
                eye: Vec3::new(0.0, FOLLOW_HEIGHT, -FOLLOW_DISTANCE),
                target: Vec3::ZERO,
                up: Vec3::Y,
            },
            yaw: 0.0,
            pitch: 0.0,
            pointer_ndc: Vec2::ZERO,
            pointer_locked: false,
            fov_degrees: settings.fov_degrees,
            aspect: settings.aspect_ratio,
            sensitivity: settings.mouse_sensitivity,
            invert_y: settings.invert_y,
        };
        camera.snap(Vec2::new(0.0, PLAYER_START_Z));
        camera
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.fov_degrees = settings.fov_degrees;
        self.aspect = settings.aspect_ratio;
        self.sensitivity = settings.mouse_sensitivity;
        self.invert_y = settings.invert_y;
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    fn context(&self, player: Vec2) -> RigContext {
        RigContext {
            player,
            yaw: self.yaw,
            pitch: self.pitch,
            pointer_ndc: self.pointer_ndc,
            fov_degrees: self.fov_degrees,
            aspect: self.aspect,
        }
    }

    /// Switch mode. Leaving first-person releases pointer capture.
    pub fn set_mode(
        &mut self,
        mode: CameraMode,
        player: Vec2,
        facing: f32,
        events: &mut Vec<GameEvent>,
    ) {
        if mode == self.mode {
            return;
        }
        if self.mode == CameraMode::FirstPerson {
            self.pointer_locked = false;
            events.push(GameEvent::PointerCaptureReleased);
        }
        if mode == CameraMode::FirstPerson {
            self.yaw = facing;
            self.pitch = 0.0;
        }
        self.mode = mode;
        self.snap(player);
    }

    pub fn cycle(&mut self, player: Vec2, facing: f32, events: &mut Vec<GameEvent>) {
        self.set_mode(self.mode.next(), player, facing, events);
    }

    pub fn pointer_moved(&mut self, ndc: Vec2) {
        self.pointer_ndc = ndc.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
    }

    /// Pointer lock is only held in first-person mode.
    pub fn set_pointer_lock(&mut self, locked: bool, events: &mut Vec<GameEvent>) {
        let locked = locked && self.mode == CameraMode::FirstPerson;
        if self.pointer_locked && !locked {
            events.push(GameEvent::PointerCaptureReleased);
        }
        self.pointer_locked = locked;
    }

    /// Accumulate look from raw pointer motion while captured.
    pub fn pointer_delta(&mut self, dx: f32, dy: f32) {
        if self.mode != CameraMode::FirstPerson || !self.pointer_locked {
            return;
        }
        let k = POINTER_RADIANS_PER_UNIT * self.sensitivity;
        let dy = if self.invert_y { -dy } else { dy };
        self.yaw = (self.yaw + dx * k).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch - dy * k).clamp(-FIRST_PERSON_PITCH_LIMIT, FIRST_PERSON_PITCH_LIMIT);
    }

    /// Jump straight to the desired pose.
    pub fn snap(&mut self, player: Vec2) {
        let ctx = self.context(player);
        self.pose = rig_for(self.mode).desired_pose(&ctx);
    }

    /// Smoothly move toward the desired pose. Runs even while paused.
    pub fn update(&mut self, player: Vec2, dt: f32) {
        let ctx = self.context(player);
        let desired = rig_for(self.mode).desired_pose(&ctx);
        if self.mode == CameraMode::FirstPerson {
            self.pose = desired;
            return;
        }
        let alpha = 1.0 - (-CAMERA_SMOOTHING * dt).exp();
        self.pose.eye = self.pose.eye.lerp(desired.eye, alpha);
        self.pose.target = self.pose.target.lerp(desired.target, alpha);
        self.pose.up = desired.up;
    }

    /// Ground aim point for the current pointer and view.
    pub fn aim_point(&self, player: Vec2) -> Option<Vec2> {
        let ctx = self.context(player);
        rig_for(self.mode).aim_point(&ctx, &self.pose)
    }

    pub fn view(&self) -> CameraView {
        CameraView {
            mode: self.mode,
            eye: self.pose.eye,
            target: self.pose.target,
            yaw: self.yaw,
            pitch: self.pitch,
            pointer_locked: self.pointer_locked,
        }
    }
}
