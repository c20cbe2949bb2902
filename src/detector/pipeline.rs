//! Detector pipeline orchestrating one frame end to end.
//!
//! The [`FloorDetector`] exposes a small API: feed a colour frame and the
//! current camera pose, get back a [`FrameReport`]. On success the anchor is
//! also committed to the detector's [`EstimatorState`].
//!
//! Typical usage:
//! ```no_run
//! use floor_anchor::{FloorDetector, FloorParams};
//! use floor_anchor::image::{FrameView, PixelFormat};
//! use nalgebra::Vector3;
//!
//! # fn example(rgb: &[u8]) -> Result<(), floor_anchor::error::ConfigError> {
//! let mut detector = FloorDetector::new(FloorParams::default())?;
//! let frame = FrameView::packed(640, 480, PixelFormat::Rgb8, rgb);
//! let report = detector.process(frame, &Vector3::new(0.0, 0.0, -1.0));
//! if let Some(anchor) = report.anchor() {
//!     println!("{}", anchor.to_csv());
//! }
//! # Ok(())
//! # }
//! ```

// Stages
// - Decode (encoded input only): bytes → owned RGB(A) frame.
// - Edges: grayscale → Canny → closing (`edges::extract_edges`).
// - Segments: probabilistic Hough (`segments::extract_segments`).
// - Classify: length/slope gates, sign buckets, longest per bucket.
// - Estimate: floor row → projection offset (`floor::estimate_floor`).
// - Project: offset + camera forward → anchor (`projector::Projector`).
// - Commit: store the anchor, or leave state untouched on any skip.

use super::params::FloorParams;
use super::state::EstimatorState;
use crate::classify::{classify_segments, select_longest};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{
    ClassificationStage, FrameOutcome, FrameReport, InputDescriptor, PipelineTrace,
    SelectedSegments, StageTiming,
};
use crate::edges::{extract_edges, EdgeResult};
use crate::error::{ConfigError, FrameError, SkipReason};
use crate::floor::{estimate_floor, FloorEstimate};
use crate::image::io::decode_frame;
use crate::image::FrameView;
use crate::projector::{AnchorPoint, CameraPose, Projector};
use crate::segments::{extract_segments, LineResult, LineSegment};
use log::{debug, warn};
use std::time::Instant;

/// Floor-line detector holding the last committed anchor.
///
/// Calls take `&mut self`, so at most one frame is processed at a time per
/// detector and readers of [`FloorDetector::last_anchor`] always see a whole
/// value.
#[derive(Debug)]
pub struct FloorDetector {
    params: FloorParams,
    projector: Projector,
    state: EstimatorState,
}

impl FloorDetector {
    /// Create a detector with validated parameters.
    pub fn new(params: FloorParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            projector: Projector::from(&params.projection),
            params,
            state: EstimatorState::NoEstimate,
        })
    }

    /// Run the full pipeline on a raw colour frame.
    pub fn process(&mut self, frame: FrameView<'_>, pose: &impl CameraPose) -> FrameReport {
        let total_start = Instant::now();
        debug!("FloorDetector::process start w={} h={}", frame.w, frame.h);
        let mut trace = PipelineTrace::new(InputDescriptor::from_frame(&frame));
        let result = self.run_frame(&frame, pose, &mut trace);
        trace.timings.total_ms = elapsed_ms(total_start);
        self.commit(result, trace)
    }

    /// Decode an encoded image (PNG, JPEG, ...) and run the pipeline on it.
    pub fn process_encoded(&mut self, bytes: &[u8], pose: &impl CameraPose) -> FrameReport {
        let decode_start = Instant::now();
        let owned = match decode_frame(bytes) {
            Ok(frame) => frame,
            Err(err) => {
                let mut trace = PipelineTrace::default();
                trace.timings.total_ms = elapsed_ms(decode_start);
                trace.timings.push("decode", trace.timings.total_ms);
                return self.commit(Err(err.into()), trace);
            }
        };
        let decode_ms = elapsed_ms(decode_start);
        debug!(
            "FloorDetector::process_encoded decoded {} bytes -> {}x{} in {:.3} ms",
            bytes.len(),
            owned.width(),
            owned.height(),
            decode_ms
        );

        let mut report = self.process(owned.as_view(), pose);
        report
            .trace
            .timings
            .stages
            .insert(0, StageTiming::new("decode", decode_ms));
        report.trace.timings.total_ms += decode_ms;
        report
    }

    /// Run classification onwards on segments produced elsewhere.
    ///
    /// `frame_height` is the height of the frame the segments were found in.
    pub fn process_segments(
        &mut self,
        segments: &[LineSegment],
        frame_height: usize,
        pose: &impl CameraPose,
    ) -> FrameReport {
        let total_start = Instant::now();
        debug!(
            "FloorDetector::process_segments start n={} h={}",
            segments.len(),
            frame_height
        );
        let mut trace = PipelineTrace::new(InputDescriptor::segments_only(frame_height));
        let result = if frame_height == 0 {
            Err(FrameError::InvalidBuffer {
                reason: "frame height is zero".to_string(),
            }
            .into())
        } else {
            self.estimate_from_segments(segments, frame_height, pose, &mut trace)
        };
        trace.timings.total_ms = elapsed_ms(total_start);
        self.commit(result, trace)
    }

    /// Last committed anchor, `None` until a frame has succeeded.
    pub fn last_anchor(&self) -> Option<AnchorPoint> {
        self.state.anchor()
    }

    pub fn state(&self) -> &EstimatorState {
        &self.state
    }

    /// Forget the stored estimate.
    pub fn reset(&mut self) {
        self.state = EstimatorState::NoEstimate;
    }

    pub fn params(&self) -> &FloorParams {
        &self.params
    }

    /// Replace all parameters. The stored estimate is kept.
    pub fn set_params(&mut self, params: FloorParams) -> Result<(), ConfigError> {
        params.validate()?;
        self.projector = Projector::from(&params.projection);
        self.params = params;
        Ok(())
    }

    fn run_frame(
        &self,
        frame: &FrameView<'_>,
        pose: &impl CameraPose,
        trace: &mut PipelineTrace,
    ) -> Result<(AnchorPoint, FloorEstimate), SkipReason> {
        let EdgeResult {
            edges,
            grayscale_ms,
            canny_ms,
            morphology_ms,
        } = extract_edges(frame, &self.params.edges)?;
        trace.timings.push("grayscale", grayscale_ms);
        trace.timings.push("canny", canny_ms);
        trace.timings.push("morphology", morphology_ms);
        let edge_pixels = edges.count();
        trace.edge_pixels = Some(edge_pixels);
        debug!(
            "FloorDetector::edges pixels={} canny_ms={:.3} morph_ms={:.3}",
            edge_pixels, canny_ms, morphology_ms
        );

        let LineResult {
            segments,
            elapsed_ms: hough_ms,
        } = extract_segments(edges, &self.params.hough);
        trace.timings.push("hough", hough_ms);
        debug!(
            "FloorDetector::hough segments={} elapsed_ms={:.3}",
            segments.len(),
            hough_ms
        );

        self.estimate_from_segments(&segments, frame.h, pose, trace)
    }

    fn estimate_from_segments(
        &self,
        segments: &[LineSegment],
        frame_height: usize,
        pose: &impl CameraPose,
        trace: &mut PipelineTrace,
    ) -> Result<(AnchorPoint, FloorEstimate), SkipReason> {
        trace.raw_segments = segments.len();

        let classify_start = Instant::now();
        let classified = classify_segments(segments, &self.params.classifier);
        let negative = select_longest(&classified.negative);
        let positive = select_longest(&classified.positive);
        trace.timings.push("classify", elapsed_ms(classify_start));
        trace.classification = Some(ClassificationStage::from(&classified));
        trace.selected = Some(SelectedSegments {
            negative: negative.copied(),
            positive: positive.copied(),
        });
        debug!(
            "FloorDetector::classify negative={} positive={} short={} shallow={} steep={}",
            classified.negative.len(),
            classified.positive.len(),
            classified.rejected_short,
            classified.rejected_shallow,
            classified.rejected_steep
        );

        let estimate = estimate_floor(negative, positive, frame_height, &self.params.projection)
            .ok_or(SkipReason::InsufficientEvidence {
                negative: classified.negative.len(),
                positive: classified.positive.len(),
            })?;
        trace.estimate = Some(estimate);
        debug!(
            "FloorDetector::estimate floor_y={:.2} y_norm={:.4} y_proj={:.4}",
            estimate.floor_bottom_y, estimate.y_norm, estimate.y_proj
        );

        let project_start = Instant::now();
        let anchor = self
            .projector
            .project_with_pose(estimate.y_proj, pose)
            .ok_or(FrameError::MissingCameraPose)?;
        trace.timings.push("project", elapsed_ms(project_start));
        Ok((anchor, estimate))
    }

    fn commit(
        &mut self,
        result: Result<(AnchorPoint, FloorEstimate), SkipReason>,
        trace: PipelineTrace,
    ) -> FrameReport {
        let outcome = match result {
            Ok((anchor, estimate)) => {
                debug!(
                    "FloorDetector::commit anchor=({:.3}, {:.3}, {:.3}) total_ms={:.3}",
                    anchor.x, anchor.y, anchor.z, trace.timings.total_ms
                );
                self.state = EstimatorState::HasEstimate { anchor, estimate };
                FrameOutcome::Anchored(anchor)
            }
            Err(reason) => {
                if reason.is_failure() {
                    warn!("FloorDetector: frame skipped: {reason}");
                } else {
                    debug!("FloorDetector: frame skipped: {reason}");
                }
                FrameOutcome::Skipped(reason)
            }
        };
        FrameReport { outcome, trace }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::PixelFormat;
    use approx::assert_abs_diff_eq;
    use nalgebra::Vector3;

    fn forward() -> Vector3<f32> {
        Vector3::new(0.0, 0.0, -1.0)
    }

    fn detector() -> FloorDetector {
        FloorDetector::new(FloorParams::default()).unwrap()
    }

    fn scenario() -> [LineSegment; 2] {
        [
            LineSegment::new(50.0, 400.0, 200.0, 300.0),
            LineSegment::new(450.0, 310.0, 600.0, 400.0),
        ]
    }

    #[test]
    fn starts_without_estimate() {
        let det = detector();
        assert_eq!(*det.state(), EstimatorState::NoEstimate);
        assert!(det.last_anchor().is_none());
    }

    #[test]
    fn scenario_segments_anchor_and_commit() {
        let mut det = detector();
        let report = det.process_segments(&scenario(), 480, &forward());
        let anchor = report.anchor().unwrap();
        assert_abs_diff_eq!(anchor.x, 0.0);
        assert_abs_diff_eq!(anchor.y, -1.0 / 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(anchor.z, -2.0);
        assert_eq!(det.last_anchor(), Some(anchor));
        let estimate = det.state().estimate().unwrap();
        assert_abs_diff_eq!(estimate.floor_bottom_y, 400.0);
        assert_eq!(report.trace.raw_segments, 2);
        assert_eq!(
            report.trace.classification.map(|c| (c.negative, c.positive)),
            Some((1, 1))
        );
    }

    #[test]
    fn steep_only_segments_leave_state_unchanged() {
        let mut det = detector();
        det.process_segments(&scenario(), 480, &forward());
        let before = *det.state();

        let steep = [
            LineSegment::new(100.0, 0.0, 101.0, 300.0),
            LineSegment::new(300.0, 0.0, 300.0, 300.0),
        ];
        let report = det.process_segments(&steep, 480, &forward());
        assert!(matches!(
            report.outcome,
            FrameOutcome::Skipped(SkipReason::InsufficientEvidence {
                negative: 0,
                positive: 0
            })
        ));
        assert_eq!(*det.state(), before);
    }

    #[test]
    fn one_sided_evidence_is_insufficient() {
        let mut det = detector();
        let report = det.process_segments(&scenario()[..1], 480, &forward());
        assert!(matches!(
            report.outcome.skip_reason(),
            Some(SkipReason::InsufficientEvidence {
                negative: 1,
                positive: 0
            })
        ));
        assert!(report.trace.estimate.is_none());
        assert!(det.last_anchor().is_none());
    }

    #[test]
    fn missing_pose_keeps_previous_anchor() {
        let mut det = detector();
        det.process_segments(&scenario(), 480, &forward());
        let before = det.last_anchor();

        let report = det.process_segments(&scenario(), 240, &None::<Vector3<f32>>);
        assert!(matches!(
            report.outcome,
            FrameOutcome::Skipped(SkipReason::Failed(FrameError::MissingCameraPose))
        ));
        // estimate is still traced, only the commit is skipped
        assert!(report.trace.estimate.is_some());
        assert_eq!(det.last_anchor(), before);
    }

    #[test]
    fn later_success_overwrites_and_reset_clears() {
        let mut det = detector();
        let first = det.process_segments(&scenario(), 480, &forward()).anchor();
        let second = det
            .process_segments(&scenario(), 800, &forward())
            .anchor()
            .unwrap();
        assert_ne!(first, Some(second));
        assert_eq!(det.last_anchor(), Some(second));

        det.reset();
        assert!(!det.state().has_estimate());
    }

    #[test]
    fn zero_height_is_a_failure() {
        let mut det = detector();
        let report = det.process_segments(&scenario(), 0, &forward());
        assert!(report
            .outcome
            .skip_reason()
            .is_some_and(SkipReason::is_failure));
    }

    #[test]
    fn invalid_buffer_is_reported() {
        let mut det = detector();
        let data = vec![0u8; 10];
        let frame = FrameView::packed(64, 64, PixelFormat::Rgb8, &data);
        let report = det.process(frame, &forward());
        assert!(matches!(
            report.outcome,
            FrameOutcome::Skipped(SkipReason::Failed(FrameError::InvalidBuffer { .. }))
        ));
        assert!(det.last_anchor().is_none());
    }

    #[test]
    fn blank_frame_has_no_evidence() {
        let mut det = detector();
        let data = vec![128u8; 64 * 48 * 3];
        let frame = FrameView::packed(64, 48, PixelFormat::Rgb8, &data);
        let report = det.process(frame, &forward());
        assert!(matches!(
            report.outcome,
            FrameOutcome::Skipped(SkipReason::InsufficientEvidence { .. })
        ));
        assert_eq!(report.trace.edge_pixels, Some(0));
        assert_eq!(report.trace.raw_segments, 0);
        assert!(report.trace.timings.stage("hough").is_some());
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let mut det = detector();
        let report = det.process_encoded(b"definitely not an image", &forward());
        assert!(matches!(
            report.outcome,
            FrameOutcome::Skipped(SkipReason::Failed(FrameError::Decode(_)))
        ));
        assert!(report.trace.timings.stage("decode").is_some());
    }

    #[test]
    fn invalid_params_are_rejected() {
        let mut params = FloorParams::default();
        params.hough.rho_resolution_px = 0.0;
        assert!(FloorDetector::new(params).is_err());

        let mut det = detector();
        assert!(det.set_params(params).is_err());
        assert_eq!(det.params().hough.rho_resolution_px, 1.0);
    }
}
