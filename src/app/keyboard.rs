use eframe::egui::{Context, Key};

use crate::controls::{HeadPose, InputEvent};

use super::GraphWalkApp;

/// Full stick deflection reached after this many seconds of holding a key.
const KEY_PUSH_RATE: f32 = 3.0;

const RIGHT_GAMEPAD: i64 = 1;
const LEFT_GAMEPAD: i64 = 0;

fn axis_value(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

impl GraphWalkApp {
    /// Keyboard stand-in for head tracking and both controllers. A positive
    /// push drags the world along the head axis, so strafing right is a
    /// negative x push.
    pub(super) fn handle_keyboard(&mut self, ctx: &Context) {
        if ctx.wants_keyboard_input() {
            return;
        }

        let (dt, strafe, forward, left_stick, yaw, pitch, buttons) = ctx.input(|input| {
            let dt = input.stable_dt.clamp(0.0, 0.1);
            let strafe = axis_value(input.key_down(Key::A), input.key_down(Key::D));
            let forward = axis_value(input.key_down(Key::W), input.key_down(Key::S));
            let left_stick = axis_value(input.key_down(Key::E), input.key_down(Key::Q));
            let yaw = axis_value(input.key_down(Key::ArrowLeft), input.key_down(Key::ArrowRight));
            let pitch = axis_value(input.key_down(Key::ArrowUp), input.key_down(Key::ArrowDown));
            let gamepad = if input.modifiers.shift {
                LEFT_GAMEPAD
            } else {
                RIGHT_GAMEPAD
            };
            let mut buttons = Vec::new();
            if input.key_pressed(Key::Num1) {
                buttons.push((gamepad, 1));
            }
            if input.key_pressed(Key::Num2) {
                buttons.push((gamepad, 2));
            }
            (dt, strafe, forward, left_stick, yaw, pitch, buttons)
        });

        if yaw != 0.0 || pitch != 0.0 {
            self.camera
                .lock()
                .look(yaw * self.look_speed * dt, pitch * self.look_speed * dt);
        }
        if ctx.input(|input| input.key_pressed(Key::R)) {
            self.camera.lock().reset_look();
        }

        let head = self.camera.lock().head_pose(self.aspect);
        let push = (KEY_PUSH_RATE * dt).min(1.0);

        if strafe != 0.0 {
            self.dispatch(&InputEvent::axis_move(RIGHT_GAMEPAD, 0, strafe * push), &head);
        }
        if forward != 0.0 {
            self.dispatch(&InputEvent::axis_move(RIGHT_GAMEPAD, 1, forward * push), &head);
        }
        if left_stick != 0.0 {
            self.dispatch(&InputEvent::axis_move(LEFT_GAMEPAD, 0, left_stick * push), &head);
        }
        for (gamepad, button) in buttons {
            self.dispatch(&InputEvent::key_down(gamepad, button), &head);
        }
    }

    fn dispatch(&mut self, event: &InputEvent, head: &HeadPose) {
        match self.session.route_input(event, head) {
            Ok(routed) => {
                tracing::trace!(?routed, "input routed");
                self.last_input_error = None;
            }
            Err(error) => {
                tracing::debug!(%error, ?event, "input ignored");
                self.last_input_error = Some(error.to_string());
            }
        }
    }
}
