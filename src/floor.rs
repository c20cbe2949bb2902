//! Floor row estimate from the two selected boundary segments.
//!
//! Convention: `floor_bottom_y` is the mean of the bottom endpoint rows
//! (largest `y`) of the negative-slope and positive-slope segments. Two other
//! combinations are plausible (max of the bottoms, or mixing one segment's end
//! row with the other's); this crate uses the mean of bottoms everywhere.
//!
//! The row is mapped to a projection-space offset:
//!
//! ```text
//! y_norm = floor_bottom_y / H * 2 - 1      // [-1, 1], +1 at the bottom row
//! y_proj = -y_norm * vertical_gain          // +gain at the top, -gain at the bottom
//! ```
use crate::projector::ProjectionParams;
use crate::segments::LineSegment;
use serde::Serialize;

/// Floor boundary estimate for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorEstimate {
    /// Pixel row of the floor boundary.
    pub floor_bottom_y: f32,
    pub y_norm: f32,
    pub y_proj: f32,
    /// Forward distance used when projecting this estimate.
    pub depth_scale: f32,
}

/// Combine the best negative-slope and positive-slope segments.
///
/// Returns `None` when either side is missing or the frame has no rows.
pub fn estimate_floor(
    negative: Option<&LineSegment>,
    positive: Option<&LineSegment>,
    frame_height: usize,
    params: &ProjectionParams,
) -> Option<FloorEstimate> {
    let (neg, pos) = (negative?, positive?);
    if frame_height == 0 {
        return None;
    }
    let floor_bottom_y = (neg.bottom_y() + pos.bottom_y()) * 0.5;
    let y_norm = normalize_row(floor_bottom_y, frame_height);
    Some(FloorEstimate {
        floor_bottom_y,
        y_norm,
        y_proj: projection_offset(y_norm, params.vertical_gain),
        depth_scale: params.depth_scale,
    })
}

/// `row / height * 2 - 1`.
#[inline]
pub fn normalize_row(row: f32, height: usize) -> f32 {
    row / height as f32 * 2.0 - 1.0
}

/// `-y_norm * gain`.
#[inline]
pub fn projection_offset(y_norm: f32, gain: f32) -> f32 {
    -y_norm * gain
}

/// Inverse of `projection_offset(normalize_row(row, height), gain)`.
pub fn row_from_projection(y_proj: f32, height: usize, gain: f32) -> f32 {
    let y_norm = -y_proj / gain;
    (y_norm + 1.0) * 0.5 * height as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn gain() -> f32 {
        ProjectionParams::default().vertical_gain
    }

    #[test]
    fn reference_rows_map_to_reference_offsets() {
        let h = 480;
        assert_abs_diff_eq!(projection_offset(normalize_row(0.0, h), gain()), 0.5);
        assert_abs_diff_eq!(
            projection_offset(normalize_row(h as f32, h), gain()),
            -0.5
        );
        assert_abs_diff_eq!(
            projection_offset(normalize_row(h as f32 / 2.0, h), gain()),
            0.0
        );
    }

    #[test]
    fn inverse_recovers_row() {
        let h = 720;
        for row in [0.0f32, 13.5, 360.0, 511.25, 720.0] {
            let y_proj = projection_offset(normalize_row(row, h), gain());
            assert_abs_diff_eq!(row_from_projection(y_proj, h, gain()), row, epsilon = 1e-3);
        }
    }

    #[test]
    fn scenario_estimate_uses_mean_of_bottoms() {
        let neg = LineSegment::new(50.0, 400.0, 200.0, 300.0);
        let pos = LineSegment::new(450.0, 310.0, 600.0, 400.0);
        let est = estimate_floor(Some(&neg), Some(&pos), 480, &ProjectionParams::default())
            .unwrap();
        assert_abs_diff_eq!(est.floor_bottom_y, 400.0);
        assert_abs_diff_eq!(est.y_norm, 2.0 / 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(est.y_proj, -1.0 / 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(est.depth_scale, 2.0);
    }

    #[test]
    fn bottoms_are_averaged_not_maxed() {
        let neg = LineSegment::new(0.0, 200.0, 100.0, 100.0);
        let pos = LineSegment::new(300.0, 250.0, 400.0, 350.0);
        let est = estimate_floor(Some(&neg), Some(&pos), 400, &ProjectionParams::default())
            .unwrap();
        assert_abs_diff_eq!(est.floor_bottom_y, 275.0);
    }

    #[test]
    fn missing_side_gives_no_estimate() {
        let seg = LineSegment::new(0.0, 0.0, 100.0, 50.0);
        let params = ProjectionParams::default();
        assert!(estimate_floor(None, Some(&seg), 480, &params).is_none());
        assert!(estimate_floor(Some(&seg), None, 480, &params).is_none());
        assert!(estimate_floor(None, None, 480, &params).is_none());
    }
}
