//! Line-segment extraction from a binary edge map.
//!
//! Segments come from a progressive probabilistic Hough transform with a
//! 1 px / 1° accumulator, a vote threshold, a minimum traced extent and a
//! maximum tolerated gap between collinear edge pixels. The stage is purely
//! geometric; slope and length filtering belongs to [`crate::classify`].
//!
//! Output order follows the detector's raster-order traversal and carries no
//! meaning. An edge map without lines yields an empty list, never an error.

mod hough;
mod options;
mod segment;

pub use hough::probabilistic_hough;
pub use options::HoughOptions;
pub use segment::{LineSegment, DEFAULT_VERTICAL_EPS};

use crate::edges::EdgeMap;
use std::time::Instant;

/// Segments found in one edge map.
#[derive(Clone, Debug)]
pub struct LineResult {
    pub segments: Vec<LineSegment>,
    pub elapsed_ms: f64,
}

/// Run the Hough extractor, consuming the edge map.
pub fn extract_segments(edges: EdgeMap, options: &HoughOptions) -> LineResult {
    let start = Instant::now();
    let segments = probabilistic_hough(edges, options);
    LineResult {
        segments,
        elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
    }
}
