//! Parameter types configuring the detector stages.
//!
//! Defaults reproduce the reference behaviour: Canny 50/150, a 3×3 closing
//! with two dilations and one erosion, a 1 px / 1° Hough accumulator with 50
//! votes, 50 px minimum length and 10 px gap, segments shorter than 20 px
//! discarded, slopes kept in `[0.1, 10]` and anchors placed 2 units ahead.

use crate::classify::ClassifierParams;
use crate::edges::EdgeOptions;
use crate::error::ConfigError;
use crate::projector::ProjectionParams;
use crate::segments::HoughOptions;
use serde::{Deserialize, Serialize};

/// Detector-wide parameters.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorParams {
    /// Grayscale, Canny and closing.
    pub edges: EdgeOptions,
    /// Probabilistic Hough line extraction.
    pub hough: HoughOptions,
    /// Length and slope gates.
    pub classifier: ClassifierParams,
    /// Row normalisation and anchor placement.
    pub projection: ProjectionParams,
}

impl FloorParams {
    /// Reject combinations the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.edges.validate().map_err(invalid("edges"))?;
        self.hough.validate().map_err(invalid("hough"))?;
        self.classifier.validate().map_err(invalid("classifier"))?;
        self.projection.validate().map_err(invalid("projection"))?;
        Ok(())
    }
}

fn invalid(stage: &'static str) -> impl Fn(String) -> ConfigError {
    move |msg| ConfigError::Invalid(format!("{stage}: {msg}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(FloorParams::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let params: FloorParams =
            serde_json::from_str(r#"{ "hough": { "vote_threshold": 30 } }"#).unwrap();
        assert_eq!(params.hough.vote_threshold, 30);
        assert_eq!(params.hough.min_line_length_px, 50);
        assert_eq!(params.edges.canny_high, 150.0);
        assert_eq!(params.projection.depth_scale, 2.0);
    }

    #[test]
    fn invalid_stage_is_named() {
        let mut params = FloorParams::default();
        params.edges.dilate_iterations = 0;
        let err = params.validate().unwrap_err();
        assert!(matches!(&err, ConfigError::Invalid(msg) if msg.starts_with("edges:")));

        let mut params = FloorParams::default();
        params.classifier.min_abs_slope = 20.0;
        let err = params.validate().unwrap_err();
        assert!(matches!(&err, ConfigError::Invalid(msg) if msg.starts_with("classifier:")));

        let mut params = FloorParams::default();
        params.projection.depth_scale = 0.0;
        assert!(params.validate().is_err());
    }
}
