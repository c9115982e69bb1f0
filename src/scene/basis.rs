use glam::{Mat4, Vec3};

use crate::error::Degeneracy;

const SINGULAR_EPSILON: f32 = 1e-6;

/// Orthonormal frame whose y axis runs from a link's source to its target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkFrame {
    pub x_basis: Vec3,
    pub y_basis: Vec3,
    pub z_basis: Vec3,
    pub height: f32,
    pub midpoint: Vec3,
    /// Set when the primary reference axis was parallel to the link and the
    /// secondary one was used instead.
    pub used_fallback_axis: bool,
}

impl LinkFrame {
    pub fn transform(&self, offset: Vec3) -> Mat4 {
        Mat4::from_cols(
            self.x_basis.extend(0.0),
            self.y_basis.extend(0.0),
            self.z_basis.extend(0.0),
            (self.midpoint - offset).extend(1.0),
        )
    }
}

/// Fails for links whose length is zero or overflows `f32`.
pub fn link_frame(
    source: Vec3,
    target: Vec3,
    reference_axis: Vec3,
    fallback_axis: Vec3,
) -> Result<LinkFrame, Degeneracy> {
    let direction = target - source;
    let height = direction.length();
    if !height.is_finite() {
        return Err(Degeneracy::NonFiniteLength);
    }
    if height <= SINGULAR_EPSILON {
        return Err(Degeneracy::ZeroLength);
    }

    let y_basis = direction / height;
    let mut used_fallback_axis = false;
    let mut x_raw = y_basis.cross(reference_axis);
    if x_raw.length() <= SINGULAR_EPSILON {
        used_fallback_axis = true;
        x_raw = y_basis.cross(fallback_axis);
        if x_raw.length() <= SINGULAR_EPSILON {
            x_raw = y_basis.any_orthonormal_vector();
        }
    }

    let x_basis = x_raw.normalize();
    let z_basis = x_basis.cross(y_basis);

    Ok(LinkFrame {
        x_basis,
        y_basis,
        z_basis,
        height,
        midpoint: (source + target) * 0.5,
        used_fallback_axis,
    })
}
