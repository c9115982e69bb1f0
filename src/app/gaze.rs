use crate::graph::{CommunityId, LinkId, VertexId};
use crate::session::Session;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum GazeTarget {
    Sphere(VertexId),
    Cylinder(LinkId),
}

/// Turns per-frame hit-test results into enter/exit events, the way a
/// renderer reports gaze crossing primitive boundaries.
#[derive(Debug, Default)]
pub(super) struct GazeTracker {
    current: Option<GazeTarget>,
}

impl GazeTracker {
    pub(super) fn current(&self) -> Option<&GazeTarget> {
        self.current.as_ref()
    }

    pub(super) fn update(&mut self, hit: Option<(GazeTarget, CommunityId)>, session: &Session) {
        let next_target = hit.as_ref().map(|(target, _)| target);
        if self.current.as_ref() == next_target {
            return;
        }

        if self.current.take().is_some() {
            session.gaze_exit();
        }

        if let Some((target, community)) = hit {
            session.gaze_enter(community);
            self.current = Some(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::{CameraControl, DEFAULT_SPEED, HighlightState};

    struct NoCamera;

    impl CameraControl for NoCamera {
        fn teleport(&self, _x: f32, _y: f32, _z: f32) {}
    }

    #[test]
    fn moving_between_primitives_highlights_the_latest() {
        let session = Session::new(Box::new(NoCamera), DEFAULT_SPEED);
        let mut tracker = GazeTracker::default();

        tracker.update(
            Some((GazeTarget::Sphere("a".into()), CommunityId::new("1"))),
            &session,
        );
        assert_eq!(
            session.highlight().state(),
            HighlightState::Highlighted(CommunityId::new("1"))
        );

        tracker.update(
            Some((GazeTarget::Cylinder("ab".into()), CommunityId::new("2"))),
            &session,
        );
        assert_eq!(
            session.highlight().state(),
            HighlightState::Highlighted(CommunityId::new("2"))
        );
        assert_eq!(tracker.current(), Some(&GazeTarget::Cylinder("ab".into())));

        tracker.update(None, &session);
        assert_eq!(session.highlight().state(), HighlightState::Idle);
        assert_eq!(tracker.current(), None);
    }

    #[test]
    fn staying_on_a_primitive_raises_nothing() {
        let session = Session::new(Box::new(NoCamera), DEFAULT_SPEED);
        let mut tracker = GazeTracker::default();
        let hit = || Some((GazeTarget::Sphere("a".into()), CommunityId::new("1")));

        tracker.update(hit(), &session);
        session.gaze_exit();
        tracker.update(hit(), &session);

        assert_eq!(session.highlight().state(), HighlightState::Idle);
    }
}
