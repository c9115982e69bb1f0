use std::sync::{PoisonError, RwLock};

use crate::graph::CommunityId;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum HighlightState {
    #[default]
    Idle,
    Highlighted(CommunityId),
}

impl HighlightState {
    pub fn active_community(&self) -> Option<&CommunityId> {
        match self {
            Self::Idle => None,
            Self::Highlighted(community) => Some(community),
        }
    }

    /// Elements outside the active community are darkened; nothing is
    /// darkened while idle.
    pub fn should_darken(&self, community: &CommunityId) -> bool {
        self.active_community()
            .is_some_and(|active| active != community)
    }
}

/// Gaze-driven highlight. The last event wins.
#[derive(Debug, Default)]
pub struct HighlightController {
    state: RwLock<HighlightState>,
}

impl HighlightController {
    pub fn gaze_enter(&self, community: CommunityId) {
        tracing::debug!(community = %community, "gazing");
        *self.state.write().unwrap_or_else(PoisonError::into_inner) =
            HighlightState::Highlighted(community);
    }

    pub fn gaze_exit(&self) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = HighlightState::Idle;
    }

    pub fn state(&self) -> HighlightState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
