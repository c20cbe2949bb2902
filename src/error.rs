//! Error and skip-reason types.
//!
//! Every failure is frame-local: the detector reports it through
//! [`SkipReason`] and the output boundary never forwards it to the consumer.

/// Failure that abandons the current frame.
#[derive(thiserror::Error, Debug)]
pub enum FrameError {
    /// Encoded input could not be decoded into a raster.
    #[error("frame decode failed: {0}")]
    Decode(#[from] image::ImageError),
    /// Raw raster whose dimensions, stride and buffer disagree.
    #[error("invalid frame buffer: {reason}")]
    InvalidBuffer { reason: String },
    /// Edge or line routine could not run on this frame.
    #[error("vision routine failed: {0}")]
    VisionLibrary(String),
    /// No usable camera forward direction at projection time.
    #[error("camera pose unavailable")]
    MissingCameraPose,
}

/// Why a frame produced no anchor.
#[derive(thiserror::Error, Debug)]
pub enum SkipReason {
    /// At least one slope group was empty. Normal outcome, not a failure.
    #[error("insufficient evidence (negative={negative}, positive={positive})")]
    InsufficientEvidence { negative: usize, positive: usize },
    #[error(transparent)]
    Failed(#[from] FrameError),
}

impl SkipReason {
    /// `true` for genuine failures, `false` for "no floor visible".
    pub fn is_failure(&self) -> bool {
        matches!(self, SkipReason::Failed(_))
    }
}

/// Errors raised while loading configuration files.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid parameters: {0}")]
    Invalid(String),
}

/// Errors raised while writing debug artifacts (edge maps, traces).
#[derive(thiserror::Error, Debug)]
pub enum ArtifactError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
