use std::sync::{Arc, PoisonError, RwLock};

use super::model::GraphSnapshot;

/// The snapshot currently in the store together with the facts computed once
/// when it was swapped in.
#[derive(Clone, Debug, Default)]
pub struct StoredSnapshot {
    pub snapshot: Arc<GraphSnapshot>,
    pub revision: u64,
    pub community_count: usize,
}

/// Holds the current snapshot behind a single `Arc`. Replacing swaps the
/// pointer, so readers always get vertices and links from the same frame,
/// labelled with the revision they were stored under.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: RwLock<StoredSnapshot>,
}

impl SnapshotStore {
    pub fn replace(&self, snapshot: GraphSnapshot) -> u64 {
        let community_count = snapshot.community_count();
        let snapshot = Arc::new(snapshot);

        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let revision = guard.revision + 1;
        *guard = StoredSnapshot {
            snapshot,
            revision,
            community_count,
        };
        revision
    }

    pub fn current(&self) -> StoredSnapshot {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
