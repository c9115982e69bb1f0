use std::sync::{Arc, Mutex, PoisonError};

use eframe::egui::{Pos2, Rect, pos2};
use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::controls::{CameraControl, HeadPose};

const NEAR_PLANE: f32 = 0.1;
const MAX_PITCH: f32 = 1.45;

/// Stand-in for head tracking: a yaw/pitch camera at an absolute position.
#[derive(Clone, Debug)]
pub(super) struct CameraRig {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    horiz_fov: f32,
}

impl CameraRig {
    pub(super) fn new(position: Vec3, horiz_fov_degrees: f32) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            horiz_fov: horiz_fov_degrees.clamp(20.0, 160.0),
        }
    }

    pub(super) fn position(&self) -> Vec3 {
        self.position
    }

    pub(super) fn look(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw = (self.yaw + yaw_delta).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + pitch_delta).clamp(-MAX_PITCH, MAX_PITCH);
    }

    pub(super) fn reset_look(&mut self) {
        self.yaw = 0.0;
        self.pitch = 0.0;
    }

    pub(super) fn yaw_pitch_degrees(&self) -> (f32, f32) {
        (self.yaw.to_degrees(), self.pitch.to_degrees())
    }

    fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub(super) fn head_pose(&self, aspect: f32) -> HeadPose {
        let half_h = self.horiz_fov.to_radians() * 0.5;
        let vert_fov = (2.0 * (half_h.tan() / aspect.max(0.01)).atan()).to_degrees();
        HeadPose::from_rotation_translation(self.rotation(), self.position, self.horiz_fov, vert_fov)
    }

    pub(super) fn projector(&self, rect: Rect) -> ScreenProjector {
        let view = Mat4::from_rotation_translation(self.rotation(), self.position).inverse();
        let focal = (rect.width() * 0.5) / (self.horiz_fov.to_radians() * 0.5).tan();
        ScreenProjector {
            view,
            focal,
            center: rect.center(),
        }
    }
}

/// Perspective projection of world points onto the canvas for one frame.
#[derive(Clone, Copy, Debug)]
pub(super) struct ScreenProjector {
    view: Mat4,
    focal: f32,
    center: Pos2,
}

impl ScreenProjector {
    /// Screen position and view depth, or `None` behind the near plane.
    pub(super) fn project(&self, world: Vec3) -> Option<(Pos2, f32)> {
        let local = self.view.transform_point3(world);
        let depth = -local.z;
        if depth <= NEAR_PLANE {
            return None;
        }

        let scale = self.focal / depth;
        Some((
            pos2(self.center.x + local.x * scale, self.center.y - local.y * scale),
            depth,
        ))
    }

    pub(super) fn screen_radius(&self, radius: f32, depth: f32) -> f32 {
        radius * self.focal / depth.max(NEAR_PLANE)
    }
}

/// Camera handle the navigation controller teleports.
#[derive(Clone, Debug)]
pub(super) struct SharedCamera(pub(super) Arc<Mutex<CameraRig>>);

impl SharedCamera {
    pub(super) fn lock(&self) -> std::sync::MutexGuard<'_, CameraRig> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CameraControl for SharedCamera {
    fn teleport(&self, x: f32, y: f32, z: f32) {
        self.lock().position = Vec3::new(x, y, z);
    }
}
