/// Row-major raster read one visible row at a time.
///
/// Implemented by colour frames (interleaved RGB/RGBA samples, arbitrary
/// stride) and by edge maps (one sample per pixel, packed). `row(y)` returns
/// exactly `width() * channels()` samples; padding past the row is never
/// exposed.
pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Interleaved samples per pixel.
    fn channels(&self) -> usize {
        1
    }

    fn row(&self, y: usize) -> &[Self::Pixel];

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows {
            image: self,
            next: 0,
        }
    }
}

/// Top-to-bottom iterator over the rows of an [`ImageView`], padding
/// stripped.
pub struct Rows<'a, I: ImageView> {
    image: &'a I,
    next: usize,
}

impl<'a, I: ImageView> Iterator for Rows<'a, I> {
    type Item = &'a [I::Pixel];

    fn next(&mut self) -> Option<Self::Item> {
        let image = self.image;
        let y = self.next;
        if y >= image.height() {
            return None;
        }
        self.next += 1;
        Some(image.row(y))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.image.height().saturating_sub(self.next);
        (left, Some(left))
    }
}

impl<I: ImageView> ExactSizeIterator for Rows<'_, I> {}
