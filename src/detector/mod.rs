//! Stateful floor-line detector.
//!
//! Overview
//! - Converts each colour frame to grayscale, runs Canny and a morphological
//!   closing to get a binary edge map.
//! - Extracts line segments with a progressive probabilistic Hough transform.
//! - Drops short, near-horizontal and near-vertical segments and buckets the
//!   rest by slope sign; the longest segment of each bucket stands in for the
//!   left and right floor boundary.
//! - Averages the bottom endpoints of the two boundary segments into a floor
//!   row, maps it to a projection-space offset and places an anchor a fixed
//!   distance along the camera's forward direction.
//!
//! Modules
//! - [`params`] – knobs for every stage, loadable from JSON.
//! - `pipeline` – the [`FloorDetector`] implementation.
//! - `state` – the last committed estimate ([`EstimatorState`]).
//!
//! A frame that fails any stage, or shows no floor, leaves the stored estimate
//! exactly as it was.

pub mod params;
mod pipeline;
mod state;

pub use params::FloorParams;
pub use pipeline::FloorDetector;
pub use state::EstimatorState;
