use serde::{Deserialize, Serialize};

/// Options for the grayscale → Canny → closing chain.
///
/// - `canny_low` / `canny_high`: hysteresis thresholds on gradient magnitude.
/// - `kernel_radius`: half-size of the square structuring element (`1` → 3×3).
/// - `dilate_iterations` / `erode_iterations`: closing passes; dilation must
///   run more often than erosion.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeOptions {
    pub canny_low: f32,
    pub canny_high: f32,
    pub kernel_radius: u8,
    pub dilate_iterations: usize,
    pub erode_iterations: usize,
}

impl Default for EdgeOptions {
    fn default() -> Self {
        Self {
            canny_low: 50.0,
            canny_high: 150.0,
            kernel_radius: 1,
            dilate_iterations: 2,
            erode_iterations: 1,
        }
    }
}

impl EdgeOptions {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.canny_low >= 0.0 && self.canny_low <= self.canny_high) {
            return Err(format!(
                "canny thresholds must satisfy 0 <= low <= high (low={}, high={})",
                self.canny_low, self.canny_high
            ));
        }
        if self.kernel_radius == 0 {
            return Err("kernel_radius must be >= 1".to_string());
        }
        if self.dilate_iterations <= self.erode_iterations {
            return Err(format!(
                "dilate_iterations ({}) must exceed erode_iterations ({})",
                self.dilate_iterations, self.erode_iterations
            ));
        }
        Ok(())
    }
}
