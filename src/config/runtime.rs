use crate::detector::{FloorDetector, FloorParams};
use crate::error::ConfigError;
use crate::output::{AnchorEncoding, FrameEndpoint, LineSink};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub encoding: AnchorEncoding,
}

/// Detector parameters plus output settings; every field is optional.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub params: FloorParams,
    pub output: OutputConfig,
}

impl RuntimeConfig {
    /// Detector and line sink wired together as configured.
    pub fn build_endpoint<W: Write>(
        &self,
        writer: W,
    ) -> Result<FrameEndpoint<LineSink<W>>, ConfigError> {
        let detector = FloorDetector::new(self.params)?;
        Ok(FrameEndpoint::new(
            detector,
            LineSink::new(writer, self.output.encoding),
        ))
    }
}

/// Read and validate a JSON config file.
pub fn load_config(path: &Path) -> Result<RuntimeConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: RuntimeConfig = serde_json::from_str(&contents)?;
    config.params.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_partial_config() {
        let file = write_config(
            r#"{
                "params": { "classifier": { "min_length_px": 30.0 } },
                "output": { "encoding": "csv" }
            }"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.params.classifier.min_length_px, 30.0);
        assert_eq!(config.params.classifier.max_abs_slope, 10.0);
        assert_eq!(config.output.encoding, AnchorEncoding::Csv);
    }

    #[test]
    fn empty_object_is_all_defaults() {
        let file = write_config("{}");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.output.encoding, AnchorEncoding::Json);
        assert_eq!(config.params.hough.vote_threshold, 50);
    }

    #[test]
    fn errors_are_classified() {
        let missing = load_config(Path::new("/nonexistent/floor-anchor.json"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));

        let bad_json = write_config("{ not json");
        assert!(matches!(
            load_config(bad_json.path()),
            Err(ConfigError::Json(_))
        ));

        let invalid = write_config(r#"{ "params": { "projection": { "depth_scale": -1.0 } } }"#);
        assert!(matches!(
            load_config(invalid.path()),
            Err(ConfigError::Invalid(_))
        ));
    }
}
