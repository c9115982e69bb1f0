use std::sync::Arc;

use serde::Deserialize;

use crate::error::InputError;

use super::head::HeadPose;
use super::navigation::{NavigationController, validate_analog};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputEventType {
    AxisMove,
    KeyDown,
    #[serde(other)]
    Other,
}

impl InputEventType {
    fn label(self) -> &'static str {
        match self {
            Self::AxisMove => "axismove",
            Self::KeyDown => "keydown",
            Self::Other => "other",
        }
    }
}

/// Raw controller event as delivered by the input source.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputEvent {
    pub event_type: InputEventType,
    pub gamepad: i64,
    #[serde(default)]
    pub axis: Option<i64>,
    #[serde(default)]
    pub value: Option<f32>,
    #[serde(default)]
    pub button: Option<i64>,
}

impl InputEvent {
    pub fn axis_move(gamepad: i64, axis: i64, value: f32) -> Self {
        Self {
            event_type: InputEventType::AxisMove,
            gamepad,
            axis: Some(axis),
            value: Some(value),
            button: None,
        }
    }

    pub fn key_down(gamepad: i64, button: i64) -> Self {
        Self {
            event_type: InputEventType::KeyDown,
            gamepad,
            axis: None,
            value: None,
            button: Some(button),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hand {
    Left,
    Right,
}

impl TryFrom<i64> for Hand {
    type Error = InputError;

    fn try_from(gamepad: i64) -> Result<Self, Self::Error> {
        match gamepad {
            0 => Ok(Self::Left),
            1 => Ok(Self::Right),
            other => Err(InputError::UnknownGamepad(other)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Routed {
    Analog(Hand),
    ButtonOne(Hand),
    ButtonTwo(Hand),
    Ignored,
}

/// Per-hand actions. Every hook defaults to doing nothing.
pub trait GamepadHandler: Send + Sync {
    fn analog(&self, _axis: i64, _value: f32, _head: &HeadPose) -> Result<(), InputError> {
        Ok(())
    }

    fn button_one(&self) {}

    fn button_two(&self) {}
}

/// Hand with no actions assigned yet.
#[derive(Debug, Default)]
pub struct Unassigned;

impl GamepadHandler for Unassigned {}

/// Wires a hand's analog stick to locomotion.
#[derive(Debug)]
pub struct Locomotion {
    navigation: Arc<NavigationController>,
}

impl Locomotion {
    pub fn new(navigation: Arc<NavigationController>) -> Self {
        Self { navigation }
    }
}

impl GamepadHandler for Locomotion {
    fn analog(&self, axis: i64, value: f32, head: &HeadPose) -> Result<(), InputError> {
        self.navigation.apply_analog(axis, value, head).map(|_| ())
    }
}

pub struct InputRouter {
    left: Box<dyn GamepadHandler>,
    right: Box<dyn GamepadHandler>,
}

impl InputRouter {
    pub fn new(left: Box<dyn GamepadHandler>, right: Box<dyn GamepadHandler>) -> Self {
        Self { left, right }
    }

    /// Right stick drives navigation; the left hand is reserved.
    pub fn with_navigation(navigation: Arc<NavigationController>) -> Self {
        Self::new(Box::new(Unassigned), Box::new(Locomotion::new(navigation)))
    }

    fn handler(&self, hand: Hand) -> &dyn GamepadHandler {
        match hand {
            Hand::Left => self.left.as_ref(),
            Hand::Right => self.right.as_ref(),
        }
    }

    pub fn route(&self, event: &InputEvent, head: &HeadPose) -> Result<Routed, InputError> {
        let label = event.event_type.label();
        match event.event_type {
            InputEventType::AxisMove => {
                let hand = Hand::try_from(event.gamepad)?;
                let axis = event.axis.ok_or(InputError::MissingField {
                    event: label,
                    field: "axis",
                })?;
                let value = event.value.ok_or(InputError::MissingField {
                    event: label,
                    field: "value",
                })?;
                validate_analog(axis, value)?;
                self.handler(hand).analog(axis, value, head)?;
                Ok(Routed::Analog(hand))
            }
            InputEventType::KeyDown => {
                let hand = Hand::try_from(event.gamepad)?;
                let button = event.button.ok_or(InputError::MissingField {
                    event: label,
                    field: "button",
                })?;
                match button {
                    1 => {
                        self.handler(hand).button_one();
                        Ok(Routed::ButtonOne(hand))
                    }
                    2 => {
                        self.handler(hand).button_two();
                        Ok(Routed::ButtonTwo(hand))
                    }
                    _ => Ok(Routed::Ignored),
                }
            }
            InputEventType::Other => Ok(Routed::Ignored),
        }
    }
}

impl std::fmt::Debug for InputRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputRouter").finish_non_exhaustive()
    }
}
