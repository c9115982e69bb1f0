use std::sync::{Arc, Mutex, PoisonError};

use glam::Vec3;

use crate::error::InputError;

use super::head::HeadPose;

pub const DEFAULT_SPEED: f32 = 50.0;

/// Absolute camera relocation, implemented by whatever owns the camera.
pub trait CameraControl: Send + Sync {
    fn teleport(&self, x: f32, y: f32, z: f32);
}

impl<T: CameraControl + ?Sized> CameraControl for Arc<T> {
    fn teleport(&self, x: f32, y: f32, z: f32) {
        (**self).teleport(x, y, z);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalogAxis {
    Horizontal,
    Vertical,
}

impl TryFrom<i64> for AnalogAxis {
    type Error = InputError;

    fn try_from(axis: i64) -> Result<Self, Self::Error> {
        match axis {
            0 => Ok(Self::Horizontal),
            1 => Ok(Self::Vertical),
            other => Err(InputError::InvalidAxis(other)),
        }
    }
}

/// Checks an analog event's axis and value before any hand acts on it.
pub(super) fn validate_analog(axis: i64, value: f32) -> Result<AnalogAxis, InputError> {
    let axis = AnalogAxis::try_from(axis)?;
    if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
        return Err(InputError::InvalidValue(value));
    }
    Ok(axis)
}

/// Accumulates the world offset from analog pushes. The offset moves
/// opposite to the head-relative push.
pub struct NavigationController {
    offset: Mutex<Vec3>,
    speed: f32,
    camera: Box<dyn CameraControl>,
}

impl NavigationController {
    pub fn new(camera: Box<dyn CameraControl>, speed: f32) -> Self {
        Self {
            offset: Mutex::new(Vec3::ZERO),
            speed,
            camera,
        }
    }

    pub fn apply_analog(&self, axis: i64, value: f32, head: &HeadPose) -> Result<Vec3, InputError> {
        let axis = validate_analog(axis, value)?;

        let unit = match axis {
            AnalogAxis::Horizontal => head.unit_x(),
            AnalogAxis::Vertical => head.unit_z(),
        };
        let delta = unit * (self.speed * value);
        if !delta.is_finite() {
            return Err(InputError::InvalidHeadPose);
        }

        let mut offset = self.offset.lock().unwrap_or_else(PoisonError::into_inner);
        *offset -= delta;
        Ok(*offset)
    }

    pub fn teleport(&self, x: f32, y: f32, z: f32) {
        tracing::info!(x, y, z, "teleporting camera");
        self.camera.teleport(x, y, z);
    }

    pub fn offset(&self) -> Vec3 {
        *self.offset.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }
}

impl std::fmt::Debug for NavigationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationController")
            .field("offset", &self.offset())
            .field("speed", &self.speed)
            .finish_non_exhaustive()
    }
}
