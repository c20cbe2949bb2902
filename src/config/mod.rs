//! JSON configuration for hosts embedding the detector.

pub mod runtime;

pub use runtime::{load_config, OutputConfig, RuntimeConfig};
