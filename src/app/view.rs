use eframe::egui::{Color32, Pos2, Sense, Stroke, Ui};

use crate::session::Frame;

use super::GraphWalkApp;
use super::gaze::GazeTarget;
use super::render_utils::{
    circle_visible, depth_fade, distance_to_segment, draw_background, draw_reticle, edge_visible,
    to_color32,
};

const LINK_HIT_SLOP: f32 = 2.0;

enum Shape {
    Sphere { index: usize, center: Pos2, radius: f32 },
    Cylinder { index: usize, start: Pos2, end: Pos2, width: f32 },
}

struct Projected {
    depth: f32,
    shape: Shape,
}

impl Projected {
    fn contains(&self, point: Pos2) -> bool {
        match self.shape {
            Shape::Sphere { center, radius, .. } => point.distance(center) <= radius,
            Shape::Cylinder {
                start, end, width, ..
            } => distance_to_segment(point, start, end) <= width * 0.5 + LINK_HIT_SLOP,
        }
    }
}

impl GraphWalkApp {
    pub(super) fn draw_scene(&mut self, ui: &mut Ui, frame: &Frame) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
        let painter = ui.painter_at(rect);
        self.aspect = rect.width() / rect.height().max(1.0);

        let projector = self.camera.lock().projector(rect);
        draw_background(&painter, rect, rect.center().y);

        let scene = &frame.scene;
        let mut projected = Vec::with_capacity(scene.primitive_count());

        for (index, sphere) in scene.spheres.iter().enumerate() {
            let Some((center, depth)) = projector.project(sphere.position) else {
                continue;
            };
            let radius = projector.screen_radius(sphere.radius, depth).max(1.0);
            if circle_visible(rect, center, radius) {
                projected.push(Projected {
                    depth,
                    shape: Shape::Sphere {
                        index,
                        center,
                        radius,
                    },
                });
            }
        }

        for (index, cylinder) in scene.cylinders.iter().enumerate() {
            let (start_world, end_world) = cylinder.endpoints();
            let (Some((start, start_depth)), Some((end, end_depth))) =
                (projector.project(start_world), projector.project(end_world))
            else {
                continue;
            };
            let depth = (start_depth + end_depth) * 0.5;
            let width = (projector.screen_radius(cylinder.radius_top, depth) * 2.0).clamp(1.0, 40.0);
            if edge_visible(rect, start, end, width) {
                projected.push(Projected {
                    depth,
                    shape: Shape::Cylinder {
                        index,
                        start,
                        end,
                        width,
                    },
                });
            }
        }

        projected.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        let far = projected.first().map_or(1.0, |item| item.depth);

        let gaze_point = if self.gaze_from_pointer {
            response.hover_pos()
        } else {
            Some(rect.center())
        };
        let hit = gaze_point
            .and_then(|point| projected.iter().rev().find(|item| item.contains(point)))
            .map(|item| match item.shape {
                Shape::Sphere { index, .. } => (
                    GazeTarget::Sphere(scene.spheres[index].id.clone()),
                    scene.spheres[index].community.clone(),
                ),
                Shape::Cylinder { index, .. } => (
                    GazeTarget::Cylinder(scene.cylinders[index].id.clone()),
                    scene.cylinders[index].community.clone(),
                ),
            });
        self.gaze.update(hit, &self.session);

        for item in &projected {
            match item.shape {
                Shape::Cylinder {
                    index,
                    start,
                    end,
                    width,
                } => {
                    let color = depth_fade(to_color32(scene.cylinders[index].color), item.depth, far);
                    painter.line_segment([start, end], Stroke::new(width, color));
                }
                Shape::Sphere {
                    index,
                    center,
                    radius,
                } => {
                    let sphere = &scene.spheres[index];
                    let color = depth_fade(to_color32(sphere.color), item.depth, far);
                    painter.circle_filled(center, radius, color);

                    let gazed = matches!(
                        self.gaze.current(),
                        Some(GazeTarget::Sphere(id)) if *id == sphere.id
                    );
                    if gazed {
                        painter.circle_stroke(center, radius + 1.5, Stroke::new(1.5, Color32::WHITE));
                    }
                }
            }
        }

        if !self.gaze_from_pointer {
            draw_reticle(&painter, rect.center(), self.gaze.current().is_some());
        }
        self.stats.visible = projected.len();
    }
}
