//! Floor-line anchor estimation from single colour frames.
//!
//! Each frame goes through grayscale conversion, Canny edges, a morphological
//! closing and a probabilistic Hough transform. The longest left-leaning and
//! right-leaning segments are taken as the floor's side boundaries; their
//! bottom rows give a floor row, which is mapped to a vertical offset and
//! placed a fixed distance along the camera's forward direction.
//!
//! [`FloorDetector`] keeps the last successful anchor and leaves it untouched
//! whenever a frame fails or shows no floor. [`output::FrameEndpoint`] wraps a
//! detector for hosts that only want successful anchors, one line each.

// Public modules (stable-ish surface)
pub mod config;
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod output;
pub mod projector;

// Stage modules – public for tools and tests that drive single stages.
pub mod classify;
pub mod edges;
pub mod floor;
pub mod segments;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector + parameters.
pub use crate::detector::{EstimatorState, FloorDetector, FloorParams};

// Per-frame results.
pub use crate::diagnostics::{FrameOutcome, FrameReport, PipelineTrace};
pub use crate::error::{FrameError, SkipReason};
pub use crate::projector::{AnchorPoint, CameraPose};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use floor_anchor::prelude::*;
/// use nalgebra::Vector3;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let (w, h) = (640usize, 480usize);
/// let rgb = vec![0u8; w * h * 3];
/// let frame = FrameView::packed(w, h, PixelFormat::Rgb8, &rgb);
///
/// let mut det = FloorDetector::new(FloorParams::default())?;
/// let report = det.process(frame, &Vector3::new(0.0, 0.0, -1.0));
/// println!("anchor={:?} total_ms={:.3}", report.anchor(), report.trace.timings.total_ms);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{FrameView, PixelFormat};
    pub use crate::{AnchorPoint, FloorDetector, FloorParams, FrameOutcome, FrameReport};
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    pub use crate::classify::{classify_segments, select_longest, ClassifiedLineSet};
    pub use crate::edges::{extract_edges, EdgeMap, EdgeOptions, EdgeResult};
    pub use crate::floor::{estimate_floor, FloorEstimate};
    pub use crate::projector::{ProjectionParams, Projector};
    pub use crate::segments::{extract_segments, probabilistic_hough, HoughOptions, LineSegment};

    pub use crate::diagnostics::{
        ClassificationStage, InputDescriptor, SelectedSegments, StageTiming, TimingBreakdown,
    };
}
