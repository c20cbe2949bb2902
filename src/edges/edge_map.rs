//! Binary edge raster in row-major layout (stride == width).
use crate::error::FrameError;
use image::GrayImage;

/// Binary edge map: `1` where an edge survived closing, `0` elsewhere.
#[derive(Clone, Debug)]
pub struct EdgeMap {
    /// Width in pixels
    pub w: usize,
    /// Height in pixels
    pub h: usize,
    data: Vec<u8>,
}

impl EdgeMap {
    /// Wrap a 0/1 buffer of length `w * h`. Non-zero values are normalised to 1.
    pub fn from_raw(w: usize, h: usize, mut data: Vec<u8>) -> Result<Self, FrameError> {
        if data.len() != w * h {
            return Err(FrameError::VisionLibrary(format!(
                "edge buffer of {} bytes does not match {}x{}",
                data.len(),
                w,
                h
            )));
        }
        for v in &mut data {
            *v = (*v != 0) as u8;
        }
        Ok(Self { w, h, data })
    }

    /// Binarise an 8-bit image: any non-zero sample is an edge.
    pub fn from_gray(img: GrayImage) -> Self {
        let w = img.width() as usize;
        let h = img.height() as usize;
        let data = img.into_raw().into_iter().map(|v| (v != 0) as u8).collect();
        Self { w, h, data }
    }

    #[inline]
    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        self.data[y * self.w + x] != 0
    }

    /// Number of edge pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Give up the buffer; the line extractor reuses it as its working mask.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

impl crate::image::traits::ImageView for EdgeMap {
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
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}
