use serde::{Deserialize, Serialize};

/// Options for the progressive probabilistic Hough transform.
///
/// - `rho_resolution_px`: distance resolution of the accumulator.
/// - `theta_resolution_deg`: angular resolution of the accumulator.
/// - `vote_threshold`: accumulator votes needed before a line is traced.
/// - `min_line_length_px`: shortest traced extent (in x or y) kept as a segment.
/// - `max_line_gap_px`: missing pixels tolerated while tracing one segment.
/// - `max_lines`: optional cap on the number of emitted segments.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughOptions {
    pub rho_resolution_px: f32,
    pub theta_resolution_deg: f32,
    pub vote_threshold: u32,
    pub min_line_length_px: u32,
    pub max_line_gap_px: u32,
    pub max_lines: Option<usize>,
}

impl Default for HoughOptions {
    fn default() -> Self {
        Self {
            rho_resolution_px: 1.0,
            theta_resolution_deg: 1.0,
            vote_threshold: 50,
            min_line_length_px: 50,
            max_line_gap_px: 10,
            max_lines: None,
        }
    }
}

impl HoughOptions {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.rho_resolution_px > 0.0) {
            return Err(format!(
                "rho_resolution_px must be > 0, got {}",
                self.rho_resolution_px
            ));
        }
        if !(self.theta_resolution_deg > 0.0 && self.theta_resolution_deg <= 180.0) {
            return Err(format!(
                "theta_resolution_deg must be in (0, 180], got {}",
                self.theta_resolution_deg
            ));
        }
        if self.vote_threshold == 0 {
            return Err("vote_threshold must be >= 1".to_string());
        }
        Ok(())
    }
}
