mod head;
mod highlight;
mod input;
mod navigation;

pub use head::HeadPose;
pub use highlight::{HighlightController, HighlightState};
pub use input::{InputEvent, InputRouter, Routed};
pub use navigation::{CameraControl, DEFAULT_SPEED, NavigationController};
