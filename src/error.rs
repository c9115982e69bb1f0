use thiserror::Error;

use crate::graph::{LinkId, VertexId};

/// Recoverable problems found while projecting a snapshot. The projector
/// collects these instead of aborting the frame.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SceneError {
    #[error("link {link} references unknown vertex {vertex}")]
    DanglingReference { link: LinkId, vertex: VertexId },

    #[error("link {link} has degenerate geometry: {reason}")]
    DegenerateGeometry { link: LinkId, reason: Degeneracy },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Degeneracy {
    ZeroLength,
    NonFiniteLength,
    NonPositiveWeight,
    ParallelToReferenceAxis,
}

impl std::fmt::Display for Degeneracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::ZeroLength => "source and target coincide",
            Self::NonFiniteLength => "link length is not finite",
            Self::NonPositiveWeight => "weight is not positive",
            Self::ParallelToReferenceAxis => "direction parallel to reference axis",
        })
    }
}

impl SceneError {
    /// Whether the link was dropped from the frame, as opposed to emitted with
    /// a fallback.
    pub fn skipped_link(&self) -> bool {
        !matches!(
            self,
            Self::DegenerateGeometry {
                reason: Degeneracy::ParallelToReferenceAxis,
                ..
            }
        )
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum InputError {
    #[error("analog axis {0} is outside 0..=1")]
    InvalidAxis(i64),

    #[error("analog value {0} is outside -1..=1")]
    InvalidValue(f32),

    #[error("head pose does not produce a finite movement")]
    InvalidHeadPose,

    #[error("gamepad {0} is not wired")]
    UnknownGamepad(i64),

    #[error("{event} event is missing its {field} field")]
    MissingField {
        event: &'static str,
        field: &'static str,
    },
}
