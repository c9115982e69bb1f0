mod model;
mod parse;
mod store;

pub use model::{CommunityId, GraphSnapshot, Link, LinkId, Rgba, Vertex, VertexId};
pub use parse::load_snapshot;
pub use store::SnapshotStore;
