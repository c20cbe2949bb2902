use super::{EdgeMap, EdgeOptions};
use crate::error::FrameError;
use crate::image::FrameView;
use image::GrayImage;
use imageproc::distance_transform::Norm;
use std::time::Instant;

/// Smallest frame side the 3×3 gradient operators can run on.
const MIN_SIDE: usize = 3;

/// Edge map together with per-step timings.
pub struct EdgeResult {
    pub edges: EdgeMap,
    pub grayscale_ms: f64,
    pub canny_ms: f64,
    pub morphology_ms: f64,
}

/// Grayscale → Canny → dilate×N → erode×M.
///
/// Fails with [`FrameError::VisionLibrary`] when the frame is too small for
/// the gradient operators, and with [`FrameError::InvalidBuffer`] when the
/// frame bytes do not cover its declared size.
pub fn extract_edges(frame: &FrameView, opts: &EdgeOptions) -> Result<EdgeResult, FrameError> {
    frame.validate()?;
    if frame.w < MIN_SIDE || frame.h < MIN_SIDE {
        return Err(FrameError::VisionLibrary(format!(
            "frame {}x{} below the {}x{} edge operator support",
            frame.w, frame.h, MIN_SIDE, MIN_SIDE
        )));
    }

    let gray_start = Instant::now();
    let gray = frame.to_luma();
    let grayscale_ms = gray_start.elapsed().as_secs_f64() * 1000.0;

    let canny_start = Instant::now();
    let canny = imageproc::edges::canny(&gray, opts.canny_low, opts.canny_high);
    let canny_ms = canny_start.elapsed().as_secs_f64() * 1000.0;

    let morph_start = Instant::now();
    let closed = close(canny, opts);
    let morphology_ms = morph_start.elapsed().as_secs_f64() * 1000.0;

    Ok(EdgeResult {
        edges: EdgeMap::from_gray(closed),
        grayscale_ms,
        canny_ms,
        morphology_ms,
    })
}

/// Square-neighbourhood closing with independent iteration counts.
fn close(mut img: GrayImage, opts: &EdgeOptions) -> GrayImage {
    for _ in 0..opts.dilate_iterations {
        img = imageproc::morphology::dilate(&img, Norm::LInf, opts.kernel_radius);
    }
    for _ in 0..opts.erode_iterations {
        img = imageproc::morphology::erode(&img, Norm::LInf, opts.kernel_radius);
    }
    img
}
