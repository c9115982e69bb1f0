use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use eframe::egui::{self, Context};
use glam::Vec3;

use crate::config::ViewerConfig;
use crate::error::SceneError;
use crate::feed::SnapshotFeed;
use crate::scene::SceneProjector;
use crate::session::{Frame, Session};

mod camera;
mod fps;
mod gaze;
mod keyboard;
mod panels;
mod render_utils;
mod view;

use self::camera::{CameraRig, SharedCamera};
use self::fps::FpsCounter;
use self::gaze::GazeTracker;

/// Desktop stand-in for the head-mounted renderer.
pub struct GraphWalkApp {
    session: Arc<Session>,
    projector: SceneProjector,
    camera: SharedCamera,
    _feed: SnapshotFeed,
    snapshot_path: PathBuf,
    gaze: GazeTracker,
    gaze_from_pointer: bool,
    fps: FpsCounter,
    look_speed: f32,
    aspect: f32,
    teleport_target: [f32; 3],
    last_diagnostics: Vec<SceneError>,
    last_input_error: Option<String>,
    stats: FrameStats,
}

#[derive(Clone, Copy, Debug, Default)]
struct FrameStats {
    revision: u64,
    vertices: usize,
    links: usize,
    communities: usize,
    spheres: usize,
    cylinders: usize,
    skipped_links: usize,
    visible: usize,
}

impl GraphWalkApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: ViewerConfig, snapshot_path: PathBuf) -> Self {
        let start = Vec3::from_array(config.camera_start);
        let camera = SharedCamera(Arc::new(Mutex::new(CameraRig::new(
            start,
            config.horizontal_fov_degrees,
        ))));
        let session = Arc::new(Session::new(
            Box::new(camera.clone()),
            config.navigation_speed,
        ));
        let feed = SnapshotFeed::from_file(
            Arc::clone(&session),
            snapshot_path.clone(),
            Duration::from_millis(config.feed_interval_ms.max(1)),
        );

        Self {
            session,
            projector: SceneProjector::new(config.projection),
            camera,
            _feed: feed,
            snapshot_path,
            gaze: GazeTracker::default(),
            gaze_from_pointer: false,
            fps: FpsCounter::default(),
            look_speed: config.look_speed_degrees.to_radians(),
            aspect: 16.0 / 9.0,
            teleport_target: config.camera_start,
            last_diagnostics: Vec::new(),
            last_input_error: None,
            stats: FrameStats::default(),
        }
    }

    /// Logs data errors when they change rather than on every frame.
    fn report_diagnostics(&mut self, frame: &Frame) {
        if frame.scene.diagnostics == self.last_diagnostics {
            return;
        }

        for diagnostic in frame.scene.diagnostics.iter().take(16) {
            tracing::warn!(revision = frame.revision, "{diagnostic}");
        }
        if frame.scene.diagnostics.len() > 16 {
            tracing::warn!(
                revision = frame.revision,
                remaining = frame.scene.diagnostics.len() - 16,
                "further scene diagnostics suppressed"
            );
        }
        self.last_diagnostics = frame.scene.diagnostics.clone();
    }

    fn record_stats(&mut self, frame: &Frame) {
        self.stats = FrameStats {
            revision: frame.revision,
            vertices: frame.vertex_count,
            links: frame.link_count,
            communities: frame.community_count,
            spheres: frame.scene.spheres.len(),
            cylinders: frame.scene.cylinders.len(),
            skipped_links: frame.scene.skipped_links(),
            visible: self.stats.visible,
        };
    }
}

impl eframe::App for GraphWalkApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.fps.update(ctx);
        self.handle_keyboard(ctx);

        let frame = self.session.project(&self.projector);
        self.report_diagnostics(&frame);
        self.record_stats(&frame);

        self.show_top_bar(ctx);
        self.show_side_panel(ctx);
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_scene(ui, &frame));

        ctx.request_repaint();
    }
}
