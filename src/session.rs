use std::sync::Arc;

use crate::controls::{
    CameraControl, HeadPose, HighlightController, InputEvent, InputRouter, NavigationController,
    Routed,
};
use crate::error::InputError;
use crate::graph::{CommunityId, GraphSnapshot, SnapshotStore};
use crate::scene::{Scene, SceneProjector};

/// Projection result tagged with the snapshot revision it came from.
#[derive(Clone, Debug)]
pub struct Frame {
    pub scene: Scene,
    pub revision: u64,
    pub vertex_count: usize,
    pub link_count: usize,
    pub community_count: usize,
}

/// Externally owned state shared by the feed, the input source and the
/// render loop.
#[derive(Debug)]
pub struct Session {
    snapshots: SnapshotStore,
    highlight: HighlightController,
    navigation: Arc<NavigationController>,
    router: InputRouter,
}

impl Session {
    pub fn new(camera: Box<dyn CameraControl>, speed: f32) -> Self {
        let navigation = Arc::new(NavigationController::new(camera, speed));
        Self {
            snapshots: SnapshotStore::default(),
            highlight: HighlightController::default(),
            router: InputRouter::with_navigation(Arc::clone(&navigation)),
            navigation,
        }
    }

    pub fn update_snapshot(&self, snapshot: GraphSnapshot) -> u64 {
        self.snapshots.replace(snapshot)
    }

    pub fn project(&self, projector: &SceneProjector) -> Frame {
        let current = self.snapshots.current();
        let offset = self.navigation.offset();
        let highlight = self.highlight.state();

        Frame {
            scene: projector.project(&current.snapshot, offset, &highlight),
            revision: current.revision,
            vertex_count: current.snapshot.vertex_count(),
            link_count: current.snapshot.link_count(),
            community_count: current.community_count,
        }
    }

    pub fn route_input(&self, event: &InputEvent, head: &HeadPose) -> Result<Routed, InputError> {
        self.router.route(event, head)
    }

    pub fn gaze_enter(&self, community: CommunityId) {
        self.highlight.gaze_enter(community);
    }

    pub fn gaze_exit(&self) {
        self.highlight.gaze_exit();
    }

    pub fn highlight(&self) -> &HighlightController {
        &self.highlight
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::controls::DEFAULT_SPEED;
    use crate::graph::{Link, LinkId, Rgba, Vertex, VertexId};

    struct NoCamera;

    impl CameraControl for NoCamera {
        fn teleport(&self, _x: f32, _y: f32, _z: f32) {}
    }

    fn vertex(id: &str, x: f32, community: &str) -> Vertex {
        Vertex {
            id: VertexId::new(id),
            x,
            y: 0.0,
            z: 0.0,
            r: 1.0,
            color: Rgba::new(0.5, 0.5, 0.5, 1.0),
            community: CommunityId::new(community),
        }
    }

    fn session() -> Session {
        let session = Session::new(Box::new(NoCamera), DEFAULT_SPEED);
        session.update_snapshot(GraphSnapshot::new(
            vec![vertex("a", 0.0, "1"), vertex("b", 10.0, "2")],
            vec![Link {
                id: LinkId::new("ab"),
                source: VertexId::new("a"),
                target: VertexId::new("b"),
                weight: 5.0,
                source_color: Rgba::new(0.5, 0.5, 0.5, 1.0),
            }],
        ));
        session
    }

    #[test]
    fn gaze_changes_the_next_frame() {
        let session = session();
        let projector = SceneProjector::default();
        let idle = session.project(&projector);
        let base = idle.scene.spheres[0].color;
        assert_eq!(idle.scene.spheres[1].color, base);
        assert_eq!(idle.community_count, 2);

        session.gaze_enter(CommunityId::new("1"));
        let frame = session.project(&projector);
        assert_eq!(frame.scene.spheres[0].color, base);
        assert_ne!(frame.scene.spheres[1].color, base);

        session.gaze_exit();
        let frame = session.project(&projector);
        assert!(frame.scene.spheres.iter().all(|sphere| sphere.color == base));
    }

    #[test]
    fn routed_input_moves_the_next_frame() {
        let session = session();
        let projector = SceneProjector::default();

        session
            .route_input(&InputEvent::axis_move(1, 0, 1.0), &HeadPose::identity())
            .expect("routed");
        let frame = session.project(&projector);

        assert_eq!(frame.revision, 1);
        assert_eq!(frame.scene.spheres[0].position, Vec3::new(50.0, 0.0, 0.0));
        assert_eq!(frame.scene.spheres[1].position, Vec3::new(60.0, 0.0, 0.0));
    }
}
