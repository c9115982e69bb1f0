use glam::Vec3;

use crate::error::SceneError;
use crate::graph::{CommunityId, LinkId, VertexId};

use super::color::RenderColor;

#[derive(Clone, Debug, PartialEq)]
pub struct SpherePrimitive {
    pub id: VertexId,
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub position: Vec3,
    pub color: RenderColor,
    /// Community highlighted while this sphere is gazed at.
    pub community: CommunityId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CylinderPrimitive {
    pub id: LinkId,
    pub radius_top: f32,
    pub radius_bottom: f32,
    pub height: f32,
    pub segments: u32,
    /// Column-major model matrix; the cylinder's long axis is its local y.
    pub transform: [f32; 16],
    pub color: RenderColor,
    pub community: CommunityId,
}

impl CylinderPrimitive {
    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.transform[12], self.transform[13], self.transform[14])
    }

    pub fn axis(&self) -> Vec3 {
        Vec3::new(self.transform[4], self.transform[5], self.transform[6])
    }

    /// World-space endpoints of the long axis.
    pub fn endpoints(&self) -> (Vec3, Vec3) {
        let half = self.axis() * (self.height * 0.5);
        let center = self.translation();
        (center - half, center + half)
    }
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub spheres: Vec<SpherePrimitive>,
    pub cylinders: Vec<CylinderPrimitive>,
    pub diagnostics: Vec<SceneError>,
}

impl Scene {
    pub fn skipped_links(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.skipped_link())
            .count()
    }

    pub fn primitive_count(&self) -> usize {
        self.spheres.len() + self.cylinders.len()
    }
}
