//! I/O helpers for frames, edge maps and JSON.
//!
//! - `decode_frame`: decode an encoded colour image (PNG/JPEG/...) held in memory.
//! - `load_frame`: read an image file into an owned RGB frame.
//! - `save_edge_map`: write an [`EdgeMap`] as a black/white PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{FrameView, ImageView, PixelFormat};
use crate::edges::EdgeMap;
use crate::error::{ArtifactError, FrameError};
use image::{GrayImage, ImageBuffer, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned, tightly packed colour frame with borrowed view conversion.
#[derive(Clone, Debug)]
pub struct OwnedFrame {
    width: usize,
    height: usize,
    format: PixelFormat,
    data: Vec<u8>,
}

impl OwnedFrame {
    /// Wraps raw packed bytes, checking the length against the dimensions.
    pub fn new(
        width: usize,
        height: usize,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self, FrameError> {
        let frame = Self {
            width,
            height,
            format,
            data,
        };
        frame.as_view().validate()?;
        Ok(frame)
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Borrow as a read-only `FrameView`
    pub fn as_view(&self) -> FrameView<'_> {
        FrameView::packed(self.width, self.height, self.format, &self.data)
    }
}

impl From<image::RgbImage> for OwnedFrame {
    fn from(img: image::RgbImage) -> Self {
        Self {
            width: img.width() as usize,
            height: img.height() as usize,
            format: PixelFormat::Rgb8,
            data: img.into_raw(),
        }
    }
}

impl From<image::RgbaImage> for OwnedFrame {
    fn from(img: image::RgbaImage) -> Self {
        Self {
            width: img.width() as usize,
            height: img.height() as usize,
            format: PixelFormat::Rgba8,
            data: img.into_raw(),
        }
    }
}

/// Decode one encoded colour image into an RGB frame.
pub fn decode_frame(bytes: &[u8]) -> Result<OwnedFrame, FrameError> {
    let img = image::load_from_memory(bytes)?.into_rgb8();
    Ok(OwnedFrame::from(img))
}

/// Load an image from disk as an RGB frame.
pub fn load_frame(path: &Path) -> Result<OwnedFrame, FrameError> {
    let img = image::open(path)?.into_rgb8();
    Ok(OwnedFrame::from(img))
}

/// Save an edge map to a PNG, edges white on black.
pub fn save_edge_map(edges: &EdgeMap, path: &Path) -> Result<(), ArtifactError> {
    ensure_parent_dir(path)?;
    let data: Vec<u8> = edges
        .rows()
        .flatten()
        .map(|&v| if v != 0 { 255 } else { 0 })
        .collect();
    let image: GrayImage =
        ImageBuffer::<Luma<u8>, Vec<u8>>::from_raw(edges.w as u32, edges.h as u32, data)
            .ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::InvalidData, "edge map size mismatch")
            })?;
    image.save(path)?;
    Ok(())
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), ArtifactError> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
