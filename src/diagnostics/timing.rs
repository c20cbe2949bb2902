use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Wall time of one detector stage for one frame.
///
/// Labels used by `FloorDetector`: `decode` (encoded input only),
/// `grayscale`, `canny`, `morphology`, `hough`, `classify` and `project`.
/// A skipped frame stops at the stage that rejected it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    /// Milliseconds.
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Stage timings for one frame, in execution order. `total_ms` also covers
/// bookkeeping between stages, so it is at least the sum of the stages.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn with_total(total_ms: f64) -> Self {
        Self {
            total_ms,
            stages: Vec::new(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }

    /// Elapsed time of the first stage named `label`.
    pub fn stage(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }
}

/// Milliseconds since `start`.
#[inline]
pub(crate) fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_keep_insertion_order() {
        let mut t = TimingBreakdown::with_total(3.0);
        t.push("edges", 1.0);
        t.push("segments", 2.0);
        t.push("edges", 9.0);
        let labels: Vec<_> = t.stages.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["edges", "segments", "edges"]);
        assert_eq!(t.stage("edges"), Some(1.0));
        assert_eq!(t.stage("classify"), None);
    }

    #[test]
    fn serializes_camel_case() {
        let mut t = TimingBreakdown::with_total(1.5);
        t.push("decode", 0.5);
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["totalMs"], 1.5);
        assert_eq!(json["stages"][0]["elapsedMs"], 0.5);
    }
}
