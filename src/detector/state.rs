use crate::floor::FloorEstimate;
use crate::projector::AnchorPoint;

/// Last committed estimate.
///
/// Starts as `NoEstimate`; the first anchored frame moves it to
/// `HasEstimate` and every later anchored frame overwrites it. Skipped frames
/// never touch it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum EstimatorState {
    #[default]
    NoEstimate,
    HasEstimate {
        anchor: AnchorPoint,
        estimate: FloorEstimate,
    },
}

impl EstimatorState {
    pub fn anchor(&self) -> Option<AnchorPoint> {
        match self {
            EstimatorState::NoEstimate => None,
            EstimatorState::HasEstimate { anchor, .. } => Some(*anchor),
        }
    }

    pub fn estimate(&self) -> Option<FloorEstimate> {
        match self {
            EstimatorState::NoEstimate => None,
            EstimatorState::HasEstimate { estimate, .. } => Some(*estimate),
        }
    }

    pub fn has_estimate(&self) -> bool {
        matches!(self, EstimatorState::HasEstimate { .. })
    }
}
