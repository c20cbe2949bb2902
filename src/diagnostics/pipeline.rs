use super::TimingBreakdown;
use crate::classify::ClassifiedLineSet;
use crate::error::SkipReason;
use crate::floor::FloorEstimate;
use crate::image::{FrameView, PixelFormat};
use crate::projector::AnchorPoint;
use crate::segments::LineSegment;
use serde::Serialize;

/// Result of one `FloorDetector::process*` call.
#[derive(Debug)]
pub struct FrameReport {
    pub outcome: FrameOutcome,
    pub trace: PipelineTrace,
}

impl FrameReport {
    /// Anchor produced for this frame, if any.
    pub fn anchor(&self) -> Option<AnchorPoint> {
        self.outcome.anchor()
    }
}

/// What happened to a frame.
#[derive(Debug)]
pub enum FrameOutcome {
    /// Both boundary lines were found and projected.
    Anchored(AnchorPoint),
    /// No anchor; the stored estimate was left untouched.
    Skipped(SkipReason),
}

impl FrameOutcome {
    pub fn anchor(&self) -> Option<AnchorPoint> {
        match self {
            FrameOutcome::Anchored(anchor) => Some(*anchor),
            FrameOutcome::Skipped(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            FrameOutcome::Anchored(_) => None,
            FrameOutcome::Skipped(reason) => Some(reason),
        }
    }
}

/// Stage-by-stage record of one frame.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    /// Pixels set in the closed edge map.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_pixels: Option<usize>,
    /// Segments handed to the classifier.
    pub raw_segments: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<ClassificationStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<SelectedSegments>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<FloorEstimate>,
}

impl PipelineTrace {
    pub fn new(input: InputDescriptor) -> Self {
        Self {
            input,
            ..Default::default()
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    /// `None` when the caller supplied segments instead of pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<PixelFormat>,
}

impl InputDescriptor {
    pub fn from_frame(frame: &FrameView<'_>) -> Self {
        Self {
            width: frame.w,
            height: frame.h,
            format: Some(frame.format),
        }
    }

    pub fn segments_only(height: usize) -> Self {
        Self {
            width: 0,
            height,
            format: None,
        }
    }
}

/// Classifier counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationStage {
    pub negative: usize,
    pub positive: usize,
    pub rejected_short: usize,
    pub rejected_shallow: usize,
    pub rejected_steep: usize,
}

impl From<&ClassifiedLineSet> for ClassificationStage {
    fn from(set: &ClassifiedLineSet) -> Self {
        Self {
            negative: set.negative.len(),
            positive: set.positive.len(),
            rejected_short: set.rejected_short,
            rejected_shallow: set.rejected_shallow,
            rejected_steep: set.rejected_steep,
        }
    }
}

/// Longest segment chosen from each slope group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedSegments {
    pub negative: Option<LineSegment>,
    pub positive: Option<LineSegment>,
}
