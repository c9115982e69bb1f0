use glam::{Mat4, Quat, Vec3};

/// Head pose sampled once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeadPose {
    pub position: Vec3,
    pub rotation: Quat,
    pub horiz_fov: f32,
    pub vert_fov: f32,
    /// Column-major head matrix.
    pub matrix: [f32; 16],
}

impl HeadPose {
    pub fn from_rotation_translation(
        rotation: Quat,
        position: Vec3,
        horiz_fov: f32,
        vert_fov: f32,
    ) -> Self {
        Self {
            position,
            rotation,
            horiz_fov,
            vert_fov,
            matrix: Mat4::from_rotation_translation(rotation, position).to_cols_array(),
        }
    }

    /// Column 0 of the rotation part.
    pub fn unit_x(&self) -> Vec3 {
        Vec3::new(self.matrix[0], self.matrix[1], self.matrix[2])
    }

    /// Column 2 of the rotation part.
    pub fn unit_z(&self) -> Vec3 {
        Vec3::new(self.matrix[8], self.matrix[9], self.matrix[10])
    }
}

#[cfg(test)]
impl HeadPose {
    pub fn identity() -> Self {
        Self::from_rotation_translation(Quat::IDENTITY, Vec3::ZERO, 90.0, 90.0)
    }
}
