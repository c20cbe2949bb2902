//! Per-frame diagnostics returned by the detector.
//!
//! [`FrameReport`] is what every `FloorDetector::process*` call returns: the
//! frame's [`FrameOutcome`] plus a serializable [`PipelineTrace`] describing
//! what each stage saw and how long it took.

pub mod pipeline;
pub mod timing;

pub use pipeline::{
    ClassificationStage, FrameOutcome, FrameReport, InputDescriptor, PipelineTrace,
    SelectedSegments,
};
pub use timing::{StageTiming, TimingBreakdown};
