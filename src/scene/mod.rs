use std::collections::HashMap;

use glam::Vec3;
use serde::Deserialize;

use crate::controls::HighlightState;
use crate::error::{Degeneracy, SceneError};
use crate::graph::{GraphSnapshot, Link, Vertex, VertexId};

mod basis;
mod color;
mod primitives;

pub use color::RenderColor;
pub use primitives::{CylinderPrimitive, Scene, SpherePrimitive};

use self::basis::link_frame;
use self::color::shade;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub darken_factor: f32,
    pub link_radius_divisor: f32,
    pub sphere_segments: u32,
    pub cylinder_segments: u32,
    pub reference_axis: [f32; 3],
    pub fallback_axis: [f32; 3],
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            darken_factor: 0.9,
            link_radius_divisor: 5.0,
            sphere_segments: 10,
            cylinder_segments: 6,
            reference_axis: [1.0, 0.0, 0.0],
            fallback_axis: [0.0, 1.0, 0.0],
        }
    }
}

/// Turns a graph snapshot into per-frame render primitives.
#[derive(Clone, Debug, Default)]
pub struct SceneProjector {
    config: ProjectionConfig,
}

impl SceneProjector {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    pub fn project(
        &self,
        snapshot: &GraphSnapshot,
        offset: Vec3,
        highlight: &HighlightState,
    ) -> Scene {
        let mut scene = Scene {
            spheres: Vec::with_capacity(snapshot.vertices.len()),
            cylinders: Vec::with_capacity(snapshot.links.len()),
            diagnostics: Vec::new(),
        };

        for vertex in &snapshot.vertices {
            scene.spheres.push(self.project_vertex(vertex, offset, highlight));
        }

        let mut index_by_id = HashMap::with_capacity(snapshot.vertices.len());
        for vertex in &snapshot.vertices {
            index_by_id.entry(&vertex.id).or_insert(vertex);
        }

        for link in &snapshot.links {
            match self.project_link(link, &index_by_id, offset, highlight) {
                Ok((cylinder, warning)) => {
                    scene.diagnostics.extend(warning);
                    scene.cylinders.push(cylinder);
                }
                Err(error) => scene.diagnostics.push(error),
            }
        }

        scene
    }

    /// Builds the cylinder for one link. A fallback-axis warning travels with
    /// the cylinder; any error means the link is skipped.
    fn project_link(
        &self,
        link: &Link,
        index_by_id: &HashMap<&VertexId, &Vertex>,
        offset: Vec3,
        highlight: &HighlightState,
    ) -> Result<(CylinderPrimitive, Option<SceneError>), SceneError> {
        let lookup = |id: &VertexId| {
            index_by_id
                .get(id)
                .copied()
                .ok_or_else(|| SceneError::DanglingReference {
                    link: link.id.clone(),
                    vertex: id.clone(),
                })
        };
        let source = lookup(&link.source)?;
        let target = lookup(&link.target)?;

        let degenerate = |reason| SceneError::DegenerateGeometry {
            link: link.id.clone(),
            reason,
        };

        if !(link.weight.is_finite() && link.weight > 0.0) {
            return Err(degenerate(Degeneracy::NonPositiveWeight));
        }
        if source.id == target.id {
            return Err(degenerate(Degeneracy::ZeroLength));
        }

        let frame = link_frame(
            source.position(),
            target.position(),
            Vec3::from_array(self.config.reference_axis),
            Vec3::from_array(self.config.fallback_axis),
        )
        .map_err(degenerate)?;
        let warning = frame
            .used_fallback_axis
            .then(|| degenerate(Degeneracy::ParallelToReferenceAxis));

        let divisor = if self.config.link_radius_divisor.abs() > f32::EPSILON {
            self.config.link_radius_divisor
        } else {
            1.0
        };
        let radius = link.weight / divisor;
        let darkened = highlight.should_darken(&source.community);
        let cylinder = CylinderPrimitive {
            id: link.id.clone(),
            radius_top: radius,
            radius_bottom: radius,
            height: frame.height,
            segments: self.config.cylinder_segments,
            transform: frame.transform(offset).to_cols_array(),
            color: shade(link.source_color, darkened, self.config.darken_factor),
            community: source.community.clone(),
        };
        Ok((cylinder, warning))
    }

    fn project_vertex(
        &self,
        vertex: &Vertex,
        offset: Vec3,
        highlight: &HighlightState,
    ) -> SpherePrimitive {
        let darkened = highlight.should_darken(&vertex.community);
        SpherePrimitive {
            id: vertex.id.clone(),
            radius: vertex.r,
            width_segments: self.config.sphere_segments,
            height_segments: self.config.sphere_segments,
            position: vertex.position() - offset,
            color: shade(vertex.color, darkened, self.config.darken_factor),
            community: vertex.community.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::color::to_render_color;
    use super::*;
    use crate::graph::{CommunityId, LinkId, Rgba};

    const EPS: f32 = 1e-4;

    fn vertex(id: &str, position: [f32; 3], community: &str) -> Vertex {
        Vertex {
            id: VertexId::new(id),
            x: position[0],
            y: position[1],
            z: position[2],
            r: 1.0,
            color: Rgba::new(0.4, 0.6, 0.8, 1.0),
            community: CommunityId::new(community),
        }
    }

    fn link(id: &str, source: &str, target: &str, weight: f32) -> Link {
        Link {
            id: LinkId::new(id),
            source: VertexId::new(source),
            target: VertexId::new(target),
            weight,
            source_color: Rgba::new(0.9, 0.3, 0.1, 1.0),
        }
    }

    fn pair_snapshot() -> GraphSnapshot {
        GraphSnapshot::new(
            vec![vertex("a", [0.0, 0.0, 0.0], "1"), vertex("b", [10.0, 0.0, 0.0], "2")],
            vec![link("ab", "a", "b", 5.0)],
        )
    }

    fn highlighted(community: &str) -> HighlightState {
        HighlightState::Highlighted(CommunityId::new(community))
    }

    #[test]
    fn two_vertex_scenario_produces_expected_cylinder() {
        let scene =
            SceneProjector::default().project(&pair_snapshot(), Vec3::ZERO, &HighlightState::Idle);

        assert_eq!(scene.spheres.len(), 2);
        assert_eq!(scene.cylinders.len(), 1);
        let cylinder = &scene.cylinders[0];
        assert!((cylinder.height - 10.0).abs() < EPS);
        assert_eq!(cylinder.radius_top, 1.0);
        assert_eq!(cylinder.radius_bottom, 1.0);
        assert_eq!(cylinder.segments, 6);
        assert!(cylinder.translation().distance(Vec3::new(5.0, 0.0, 0.0)) < EPS);
        assert_eq!(cylinder.community, CommunityId::new("1"));
    }

    #[test]
    fn offset_is_subtracted_from_every_position() {
        let offset = Vec3::new(-50.0, 2.0, 3.0);
        let scene =
            SceneProjector::default().project(&pair_snapshot(), offset, &HighlightState::Idle);

        assert_eq!(scene.spheres[0].position, Vec3::new(50.0, -2.0, -3.0));
        assert_eq!(scene.spheres[1].position, Vec3::new(60.0, -2.0, -3.0));
        assert!(
            scene.cylinders[0]
                .translation()
                .distance(Vec3::new(55.0, -2.0, -3.0))
                < EPS
        );
        assert!((scene.cylinders[0].height - 10.0).abs() < EPS);
    }

    #[test]
    fn darken_follows_active_community() {
        let projector = SceneProjector::default();
        let snapshot = pair_snapshot();
        let base = to_render_color(snapshot.vertices[0].color);

        let scene = projector.project(&snapshot, Vec3::ZERO, &highlighted("1"));
        assert_eq!(scene.spheres[0].color, base);
        assert_ne!(scene.spheres[1].color, base);
        assert_eq!(
            scene.cylinders[0].color,
            to_render_color(snapshot.links[0].source_color)
        );

        let scene = projector.project(&snapshot, Vec3::ZERO, &highlighted("2"));
        assert_ne!(scene.spheres[0].color, base);
        assert_eq!(scene.spheres[1].color, base);
        assert_ne!(
            scene.cylinders[0].color,
            to_render_color(snapshot.links[0].source_color)
        );

        let scene = projector.project(&snapshot, Vec3::ZERO, &HighlightState::Idle);
        assert!(scene.spheres.iter().all(|sphere| sphere.color == base));
    }

    #[test]
    fn cylinder_transform_is_orthonormal_and_spans_the_link() {
        let snapshot = GraphSnapshot::new(
            vec![
                vertex("a", [1.0, -2.0, 3.0], "1"),
                vertex("b", [-4.0, 7.0, 0.5], "1"),
            ],
            vec![link("ab", "a", "b", 2.5)],
        );
        let scene = SceneProjector::default().project(&snapshot, Vec3::ZERO, &HighlightState::Idle);
        let cylinder = &scene.cylinders[0];
        let columns = glam::Mat4::from_cols_array(&cylinder.transform);
        let x = columns.x_axis.truncate();
        let y = columns.y_axis.truncate();
        let z = columns.z_axis.truncate();

        for axis in [x, y, z] {
            assert!((axis.length() - 1.0).abs() < EPS);
        }
        assert!(x.dot(y).abs() < EPS);
        assert!(y.dot(z).abs() < EPS);
        assert!(z.dot(x).abs() < EPS);

        let (start, end) = cylinder.endpoints();
        assert!(start.distance(snapshot.vertices[0].position()) < 1e-3);
        assert!(end.distance(snapshot.vertices[1].position()) < 1e-3);
        assert!((cylinder.radius_top - 0.5).abs() < EPS);
    }

    #[test]
    fn dangling_links_are_skipped_without_aborting() {
        let mut snapshot = pair_snapshot();
        snapshot.links.insert(0, link("ghost", "a", "missing", 1.0));

        let scene = SceneProjector::default().project(&snapshot, Vec3::ZERO, &HighlightState::Idle);
        assert_eq!(scene.cylinders.len(), 1);
        assert_eq!(scene.cylinders[0].id, LinkId::new("ab"));
        assert_eq!(
            scene.diagnostics,
            vec![SceneError::DanglingReference {
                link: LinkId::new("ghost"),
                vertex: VertexId::new("missing"),
            }]
        );
        assert_eq!(scene.skipped_links(), 1);
    }

    #[test]
    fn self_links_and_coincident_vertices_emit_nothing() {
        let snapshot = GraphSnapshot::new(
            vec![vertex("a", [1.0, 1.0, 1.0], "1"), vertex("b", [1.0, 1.0, 1.0], "1")],
            vec![link("aa", "a", "a", 1.0), link("ab", "a", "b", 1.0)],
        );
        let scene = SceneProjector::default().project(&snapshot, Vec3::ZERO, &HighlightState::Idle);

        assert!(scene.cylinders.is_empty());
        assert_eq!(scene.diagnostics.len(), 2);
        assert!(scene.diagnostics.iter().all(|diagnostic| matches!(
            diagnostic,
            SceneError::DegenerateGeometry {
                reason: Degeneracy::ZeroLength,
                ..
            }
        )));
    }

    #[test]
    fn non_positive_weight_is_skipped() {
        let mut snapshot = pair_snapshot();
        snapshot.links[0].weight = 0.0;
        let scene = SceneProjector::default().project(&snapshot, Vec3::ZERO, &HighlightState::Idle);
        assert!(scene.cylinders.is_empty());
        assert_eq!(scene.skipped_links(), 1);
    }

    #[test]
    fn axis_parallel_link_is_still_emitted() {
        let snapshot = pair_snapshot();
        let scene = SceneProjector::default().project(&snapshot, Vec3::ZERO, &HighlightState::Idle);

        assert_eq!(scene.cylinders.len(), 1);
        assert!(scene.cylinders[0].transform.iter().all(|value| value.is_finite()));
        assert_eq!(scene.skipped_links(), 0);
        assert!(matches!(
            scene.diagnostics.as_slice(),
            [SceneError::DegenerateGeometry {
                reason: Degeneracy::ParallelToReferenceAxis,
                ..
            }]
        ));
    }

    #[test]
    fn projection_is_deterministic() {
        let projector = SceneProjector::default();
        let snapshot = pair_snapshot();
        let offset = Vec3::new(3.0, 4.0, 5.0);
        let first = projector.project(&snapshot, offset, &highlighted("2"));
        let second = projector.project(&snapshot, offset, &highlighted("2"));
        assert_eq!(first, second);
    }

    #[test]
    fn first_vertex_wins_on_duplicate_ids() {
        let snapshot = GraphSnapshot::new(
            vec![
                vertex("a", [0.0, 0.0, 0.0], "1"),
                vertex("b", [10.0, 0.0, 0.0], "2"),
                vertex("a", [0.0, 0.0, 40.0], "3"),
            ],
            vec![link("ab", "a", "b", 5.0)],
        );
        let scene = SceneProjector::default().project(&snapshot, Vec3::ZERO, &HighlightState::Idle);

        assert_eq!(scene.spheres.len(), 3);
        let cylinder = &scene.cylinders[0];
        assert!((cylinder.height - 10.0).abs() < EPS);
        assert!(cylinder.translation().distance(Vec3::new(5.0, 0.0, 0.0)) < EPS);
        assert_eq!(cylinder.community, CommunityId::new("1"));
    }

    #[test]
    fn overflowing_link_is_skipped_as_non_finite() {
        let snapshot = GraphSnapshot::new(
            vec![vertex("a", [0.0, 0.0, 0.0], "1"), vertex("b", [2e38, 2e38, 0.0], "1")],
            vec![link("ab", "a", "b", 1.0)],
        );
        let scene = SceneProjector::default().project(&snapshot, Vec3::ZERO, &HighlightState::Idle);

        assert!(scene.cylinders.is_empty());
        assert_eq!(
            scene.diagnostics,
            vec![SceneError::DegenerateGeometry {
                link: LinkId::new("ab"),
                reason: Degeneracy::NonFiniteLength,
            }]
        );
        assert_eq!(scene.skipped_links(), 1);
    }
}
