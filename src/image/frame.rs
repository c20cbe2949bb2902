use crate::error::FrameError;
use image::{GrayImage, Luma};
use serde::{Deserialize, Serialize};

/// Sample layout of a colour frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    Rgb8,
    Rgba8,
}

impl PixelFormat {
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }
}

/// Borrowed colour frame. Immutable for the lifetime of the borrow.
#[derive(Clone, Debug)]
pub struct FrameView<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub format: PixelFormat,
    pub data: &'a [u8],
}

impl<'a> FrameView<'a> {
    /// Tightly packed frame (`stride == w * channels`).
    pub fn packed(w: usize, h: usize, format: PixelFormat, data: &'a [u8]) -> Self {
        Self {
            w,
            h,
            stride: w * format.channels(),
            format,
            data,
        }
    }

    /// Checks that the stride and buffer length cover every row.
    pub fn validate(&self) -> Result<(), FrameError> {
        let row_bytes = self.w * self.format.channels();
        if self.stride < row_bytes {
            return Err(FrameError::InvalidBuffer {
                reason: format!("stride {} shorter than row of {} bytes", self.stride, row_bytes),
            });
        }
        let required = if self.h == 0 {
            0
        } else {
            self.stride * (self.h - 1) + row_bytes
        };
        if self.data.len() < required {
            return Err(FrameError::InvalidBuffer {
                reason: format!(
                    "{}x{} frame needs {} bytes, got {}",
                    self.w,
                    self.h,
                    required,
                    self.data.len()
                ),
            });
        }
        Ok(())
    }

    /// RGB triple at (x, y); alpha is ignored.
    #[inline]
    pub fn rgb(&self, x: usize, y: usize) -> [u8; 3] {
        let i = y * self.stride + x * self.format.channels();
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// ITU-R BT.601 luma, rounded to the nearest integer.
    pub fn to_luma(&self) -> GrayImage {
        let mut gray = GrayImage::new(self.w as u32, self.h as u32);
        let channels = self.format.channels();
        for (y, row) in crate::image::ImageView::rows(self).enumerate() {
            for (x, px) in row.chunks_exact(channels).enumerate() {
                let luma = 0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32;
                gray.put_pixel(x as u32, y as u32, Luma([luma.round().min(255.0) as u8]));
            }
        }
        gray
    }
}

impl<'a> crate::image::traits::ImageView for FrameView<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn channels(&self) -> usize {
        self.format.channels()
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w * self.format.channels()]
    }
}
