use eframe::egui::{self, Align, Context, DragValue, Layout, RichText};

use super::GraphWalkApp;

impl GraphWalkApp {
    pub(super) fn show_top_bar(&self, ctx: &Context) {
        let stats = self.stats;
        let highlight = self.session.highlight().state();
        let offset = self.session.navigation().offset();

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("graph-walk");
                    ui.separator();
                    ui.label(format!("snapshot #{}", stats.revision));
                    ui.label(format!("vertices: {}", stats.vertices));
                    ui.label(format!("links: {}", stats.links));
                    ui.label(format!("communities: {}", stats.communities));
                    if stats.skipped_links > 0 {
                        ui.label(
                            RichText::new(format!("skipped: {}", stats.skipped_links))
                                .color(egui::Color32::from_rgb(230, 160, 60)),
                        );
                    }
                    ui.label(match highlight.active_community() {
                        Some(community) => format!("community: {community}"),
                        None => "community: none".to_owned(),
                    });
                    ui.label(format!(
                        "offset: ({:.1}, {:.1}, {:.1})",
                        offset.x, offset.y, offset.z
                    ));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!(
                            "visible: {} / {}",
                            stats.visible,
                            stats.spheres + stats.cylinders
                        ));
                        ui.label(self.fps.display_text());
                    });
                });
            });
    }

    pub(super) fn show_side_panel(&mut self, ctx: &Context) {
        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("Camera");
                let (position, (yaw, pitch)) = {
                    let rig = self.camera.lock();
                    (rig.position(), rig.yaw_pitch_degrees())
                };
                ui.label(format!(
                    "position: ({:.1}, {:.1}, {:.1})",
                    position.x, position.y, position.z
                ));
                ui.label(format!("yaw {yaw:.0}°  pitch {pitch:.0}°"));
                ui.label(format!("speed: {:.0} / push", self.session.navigation().speed()));

                ui.add_space(8.0);
                ui.label("Teleport to");
                ui.horizontal(|ui| {
                    for value in &mut self.teleport_target {
                        ui.add(DragValue::new(value).speed(1.0));
                    }
                });
                if ui.button("Teleport").clicked() {
                    let [x, y, z] = self.teleport_target;
                    self.session.navigation().teleport(x, y, z);
                }
                if ui.button("Reset look").clicked() {
                    self.camera.lock().reset_look();
                }

                ui.separator();
                ui.heading("Gaze");
                ui.checkbox(&mut self.gaze_from_pointer, "Gaze follows mouse pointer");
                if ui.button("Clear highlight").clicked() {
                    self.session.gaze_exit();
                }

                ui.separator();
                ui.heading("Feed");
                ui.label(self.snapshot_path.display().to_string());
                ui.label(format!(
                    "darken factor: {:.2}",
                    self.projector.config().darken_factor
                ));
                if let Some(error) = &self.last_input_error {
                    ui.label(RichText::new(format!("last input: {error}")).weak());
                }

                ui.separator();
                ui.label(RichText::new("W/S A/D  right stick (move)").small());
                ui.label(RichText::new("Q/E  left stick (unassigned)").small());
                ui.label(RichText::new("arrows  look   R  reset look").small());
                ui.label(RichText::new("1/2  right buttons, Shift for left").small());
            });
    }
}
