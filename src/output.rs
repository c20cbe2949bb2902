//! Output boundary: forwards successful anchors to a consumer.
//!
//! A frame that produced no anchor emits nothing; the consumer never sees
//! errors. [`FrameEndpoint`] couples a detector with an [`AnchorSink`] and
//! enforces that rule, logging skipped frames and sink failures instead of
//! returning them.
use crate::detector::FloorDetector;
use crate::diagnostics::FrameReport;
use crate::image::FrameView;
use crate::projector::{AnchorPoint, CameraPose};
use log::warn;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Consumer of anchor points.
pub trait AnchorSink {
    fn emit(&mut self, anchor: &AnchorPoint) -> io::Result<()>;
}

impl<F: FnMut(&AnchorPoint)> AnchorSink for F {
    fn emit(&mut self, anchor: &AnchorPoint) -> io::Result<()> {
        self(anchor);
        Ok(())
    }
}

/// Wire format of one emitted anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorEncoding {
    /// `{"x":..,"y":..,"z":..}`
    #[default]
    Json,
    /// `x,y,z`
    Csv,
}

impl AnchorEncoding {
    /// Encode without a trailing newline.
    pub fn encode(&self, anchor: &AnchorPoint) -> Result<String, serde_json::Error> {
        match self {
            AnchorEncoding::Json => serde_json::to_string(anchor),
            AnchorEncoding::Csv => Ok(anchor.to_csv()),
        }
    }
}

/// Writes one line per anchor and flushes after each.
#[derive(Debug)]
pub struct LineSink<W: Write> {
    writer: W,
    encoding: AnchorEncoding,
}

impl<W: Write> LineSink<W> {
    pub fn new(writer: W, encoding: AnchorEncoding) -> Self {
        Self { writer, encoding }
    }

    pub fn encoding(&self) -> AnchorEncoding {
        self.encoding
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> AnchorSink for LineSink<W> {
    fn emit(&mut self, anchor: &AnchorPoint) -> io::Result<()> {
        let line = self.encoding.encode(anchor)?;
        writeln!(self.writer, "{line}")?;
        self.writer.flush()
    }
}

/// Detector plus sink; emits exactly once per anchored frame.
pub struct FrameEndpoint<S> {
    detector: FloorDetector,
    sink: S,
    emitted: usize,
}

impl<S: AnchorSink> FrameEndpoint<S> {
    pub fn new(detector: FloorDetector, sink: S) -> Self {
        Self {
            detector,
            sink,
            emitted: 0,
        }
    }

    /// Process one raw frame and forward the anchor, if any.
    pub fn submit(&mut self, frame: FrameView<'_>, pose: &impl CameraPose) {
        let report = self.detector.process(frame, pose);
        self.forward(&report);
    }

    /// Process one encoded image and forward the anchor, if any.
    pub fn submit_encoded(&mut self, bytes: &[u8], pose: &impl CameraPose) {
        let report = self.detector.process_encoded(bytes, pose);
        self.forward(&report);
    }

    /// Anchors handed to the sink without error so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    pub fn detector(&self) -> &FloorDetector {
        &self.detector
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_parts(self) -> (FloorDetector, S) {
        (self.detector, self.sink)
    }

    fn forward(&mut self, report: &FrameReport) {
        let Some(anchor) = report.anchor() else {
            return;
        };
        match self.sink.emit(&anchor) {
            Ok(()) => self.emitted += 1,
            Err(err) => warn!("FrameEndpoint: anchor sink failed: {err}"),
        }
    }
}
