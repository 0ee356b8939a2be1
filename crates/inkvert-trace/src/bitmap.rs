//! Binary foreground bitmaps.

use image::GrayImage;
use imageproc::contrast::otsu_level;

use crate::params::Binarization;

/// A mutable binary raster; `true` cells are foreground.
///
/// Coordinates passed to [`Bitmap::get`] may lie outside the raster;
/// everything outside is background, which lets the boundary walker
/// probe neighbors without bounds checks at call sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Bitmap {
    /// Binarize a grayscale image: pixels with luminance at or below
    /// `cutoff` become foreground.
    #[must_use]
    pub fn from_gray(gray: &GrayImage, cutoff: u8) -> Self {
        let width = gray.width() as usize;
        let height = gray.height() as usize;
        let mut cells = Vec::with_capacity(width * height);
        for pixel in gray.pixels() {
            cells.push(pixel.0[0] <= cutoff);
        }
        Self {
            width,
            height,
            cells,
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Foreground test; coordinates outside the raster are background.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn get(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return false;
        }
        self.cells[y * self.width + x]
    }

    /// Toggle one cell. Out-of-range coordinates are ignored.
    #[allow(clippy::cast_sign_loss)]
    pub fn flip(&mut self, x: i64, y: i64) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = !self.cells[y * self.width + x];
        }
    }

    /// First foreground cell at or after `from` in raster order.
    #[must_use]
    pub fn next_foreground(&self, from: usize) -> Option<(usize, usize)> {
        self.cells[from.min(self.cells.len())..]
            .iter()
            .position(|&fg| fg)
            .map(|offset| {
                let index = from + offset;
                (index % self.width, index / self.width)
            })
    }

    /// Raster-order index of a cell, for use with
    /// [`Bitmap::next_foreground`].
    #[must_use]
    pub const fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }
}

/// Pick the binarization cutoff and build the bitmap.
#[must_use]
pub fn binarize(gray: &GrayImage, binarization: Binarization) -> Bitmap {
    let cutoff = match binarization {
        Binarization::Auto => otsu_level(gray),
        Binarization::Fixed(value) => value.saturating_sub(1),
    };
    Bitmap::from_gray(gray, cutoff)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use image::Luma;

    use super::*;

    fn gray(width: u32, height: u32, dark: &[(u32, u32)]) -> GrayImage {
        let mut image = GrayImage::from_pixel(width, height, Luma([255]));
        for &(x, y) in dark {
            image.put_pixel(x, y, Luma([0]));
        }
        image
    }

    #[test]
    fn outside_is_background() {
        let bitmap = Bitmap::from_gray(&gray(2, 2, &[(0, 0)]), 128);
        assert!(bitmap.get(0, 0));
        assert!(!bitmap.get(-1, 0));
        assert!(!bitmap.get(0, -1));
        assert!(!bitmap.get(2, 0));
        assert!(!bitmap.get(0, 2));
    }

    #[test]
    fn from_gray_cutoff_is_inclusive() {
        let mut image = GrayImage::from_pixel(2, 1, Luma([100]));
        image.put_pixel(1, 0, Luma([101]));
        let bitmap = Bitmap::from_gray(&image, 100);
        assert!(bitmap.get(0, 0));
        assert!(!bitmap.get(1, 0));
    }

    #[test]
    fn next_foreground_scans_in_raster_order() {
        let bitmap = Bitmap::from_gray(&gray(3, 3, &[(2, 0), (0, 2)]), 128);
        assert_eq!(bitmap.next_foreground(0), Some((2, 0)));
        let after = bitmap.index(2, 0) + 1;
        assert_eq!(bitmap.next_foreground(after), Some((0, 2)));
        let end = bitmap.index(0, 2) + 1;
        assert_eq!(bitmap.next_foreground(end), None);
    }

    #[test]
    fn flip_toggles() {
        let mut bitmap = Bitmap::from_gray(&gray(2, 2, &[]), 128);
        assert!(!bitmap.get(1, 1));
        bitmap.flip(1, 1);
        assert!(bitmap.get(1, 1));
        bitmap.flip(1, 1);
        assert!(!bitmap.get(1, 1));
    }

    #[test]
    fn auto_binarization_separates_two_tone_image() {
        let bitmap = binarize(&gray(4, 1, &[(0, 0), (1, 0)]), Binarization::Auto);
        assert!(bitmap.get(0, 0));
        assert!(bitmap.get(1, 0));
        assert!(!bitmap.get(2, 0));
        assert!(!bitmap.get(3, 0));
    }

    #[test]
    fn fixed_binarization_uses_strict_cutoff() {
        let mut image = GrayImage::from_pixel(2, 1, Luma([127]));
        image.put_pixel(1, 0, Luma([128]));
        let bitmap = binarize(&image, Binarization::Fixed(128));
        assert!(bitmap.get(0, 0));
        assert!(!bitmap.get(1, 0));
    }
}
