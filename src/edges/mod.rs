//! Edge extraction: colour frame → binary edge map.
//!
//! The stage runs three steps on every frame:
//!
//! - BT.601 grayscale conversion of the RGB(A) frame.
//! - Canny hysteresis with a fixed low/high gradient-magnitude pair (50/150).
//! - Morphological closing with a small square neighbourhood, where dilation
//!   runs more iterations than erosion. Gaps along floor boundaries are bridged
//!   and the band is left slightly thicker than the raw Canny response.
//!
//! The output [`EdgeMap`] is scoped to one pipeline invocation and is moved
//! into the line extractor.

mod edge_map;
mod extract;
mod options;

pub use edge_map::EdgeMap;
pub use extract::{extract_edges, EdgeResult};
pub use options::EdgeOptions;
