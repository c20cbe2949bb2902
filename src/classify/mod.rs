//! Slope/length filtering and left/right bucketing of raw segments.
//!
//! A segment survives when
//! - `length >= min_length_px`,
//! - its guarded slope, quantised to `slope_decimals` decimal places, lies in
//!   `[min_abs_slope, max_abs_slope]` by magnitude.
//!
//! Survivors go to the `negative` or `positive` group by the sign of the
//! quantised slope. Quantisation happens before the magnitude tests, so a
//! slope of `0.096` counts as `0.10` and passes while `0.094` does not.
//!
//! The lower bound discards shallow segments even though a floor boundary is
//! usually shallow; the thresholds are kept as-is and exposed as parameters.

mod select;

pub use select::select_longest;

use crate::segments::{LineSegment, DEFAULT_VERTICAL_EPS};
use serde::{Deserialize, Serialize};

/// Classifier thresholds.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierParams {
    /// Segments shorter than this are not trusted as boundary cues.
    pub min_length_px: f32,
    /// Quantised slopes below this magnitude are rejected (near-horizontal).
    pub min_abs_slope: f32,
    /// Quantised slopes above this magnitude are rejected (near-vertical).
    pub max_abs_slope: f32,
    /// Denominator substituted for vertical segments.
    pub vertical_eps: f32,
    /// Decimal places kept when quantising the slope.
    pub slope_decimals: u32,
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            min_length_px: 20.0,
            min_abs_slope: 0.1,
            max_abs_slope: 10.0,
            vertical_eps: DEFAULT_VERTICAL_EPS,
            slope_decimals: 2,
        }
    }
}

impl ClassifierParams {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.min_length_px >= 0.0) {
            return Err(format!("min_length_px must be >= 0, got {}", self.min_length_px));
        }
        if !(self.min_abs_slope >= 0.0 && self.min_abs_slope <= self.max_abs_slope) {
            return Err(format!(
                "slope bounds must satisfy 0 <= min <= max (min={}, max={})",
                self.min_abs_slope, self.max_abs_slope
            ));
        }
        if !(self.vertical_eps > 0.0) {
            return Err(format!("vertical_eps must be > 0, got {}", self.vertical_eps));
        }
        Ok(())
    }
}

/// Why a segment was left out of both groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    TooShort,
    TooShallow,
    TooSteep,
}

/// Slope of `seg` rounded to `params.slope_decimals` decimal places.
pub fn quantized_slope(seg: &LineSegment, params: &ClassifierParams) -> f32 {
    let slope = seg.slope_with_eps(params.vertical_eps);
    let scale = 10f32.powi(params.slope_decimals as i32);
    (slope * scale).round() / scale
}

/// Classify one segment: `Ok(slope)` with its quantised slope, or the reason
/// it was dropped.
pub fn classify_segment(seg: &LineSegment, params: &ClassifierParams) -> Result<f32, Rejection> {
    if seg.length() < params.min_length_px {
        return Err(Rejection::TooShort);
    }
    let slope = quantized_slope(seg, params);
    if slope.abs() < params.min_abs_slope {
        return Err(Rejection::TooShallow);
    }
    if slope.abs() > params.max_abs_slope {
        return Err(Rejection::TooSteep);
    }
    Ok(slope)
}

/// Two disjoint groups in discovery order, plus rejection counters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassifiedLineSet {
    pub negative: Vec<LineSegment>,
    pub positive: Vec<LineSegment>,
    pub rejected_short: usize,
    pub rejected_shallow: usize,
    pub rejected_steep: usize,
}

impl ClassifiedLineSet {
    pub fn total(&self) -> usize {
        self.negative.len()
            + self.positive.len()
            + self.rejected_short
            + self.rejected_shallow
            + self.rejected_steep
    }

    /// Both groups hold at least one segment.
    pub fn is_paired(&self) -> bool {
        !self.negative.is_empty() && !self.positive.is_empty()
    }
}

/// Filter raw segments and bucket the survivors by slope sign.
pub fn classify_segments(segments: &[LineSegment], params: &ClassifierParams) -> ClassifiedLineSet {
    let mut set = ClassifiedLineSet::default();
    for seg in segments {
        match classify_segment(seg, params) {
            Ok(slope) if slope > 0.0 => set.positive.push(*seg),
            Ok(_) => set.negative.push(*seg),
            Err(Rejection::TooShort) => set.rejected_short += 1,
            Err(Rejection::TooShallow) => set.rejected_shallow += 1,
            Err(Rejection::TooSteep) => set.rejected_steep += 1,
        }
    }
    set
}
