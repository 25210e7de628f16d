//! Owned single-channel f32 image in row-major layout (stride == width).
//!
//! The working buffer of every detection stage. Besides row access it offers
//! the few whole-image transforms the stages need: 8-bit conversion, the
//! vertical flip into display order and binary thresholding.
use super::{ImageU8, ImageView, ImageViewMut};

#[derive(Clone, Debug, PartialEq)]
pub struct ImageF32 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Number of f32 elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![0.0; w * h],
        }
    }

    /// Convert an 8-bit view to floats in `[0, 1]`.
    pub fn from_u8(gray: &ImageU8<'_>) -> Self {
        let mut out = ImageF32::new(gray.w, gray.h);
        for y in 0..gray.h {
            let src = gray.row(y);
            let dst = out.row_mut(y);
            for (d, &s) in dst.iter_mut().zip(src) {
                *d = s as f32 / 255.0;
            }
        }
        out
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }
    #[inline]
    /// Get the pixel value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }
    #[inline]
    /// Set the pixel value at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Copy with the row order reversed (row 0 becomes the last row).
    pub fn flipped_vertically(&self) -> ImageF32 {
        let mut out = ImageF32::new(self.w, self.h);
        for (y, src) in self.rows().enumerate() {
            let dst_y = self.h - 1 - y;
            out.row_mut(dst_y).copy_from_slice(src);
        }
        out
    }

    /// Binary image with `1.0` where `v > threshold` (or `v <= threshold`
    /// when `inverted`), `0.0` elsewhere.
    pub fn thresholded(&self, threshold: f32, inverted: bool) -> ImageF32 {
        let mut out = ImageF32::new(self.w, self.h);
        for (src, dst) in self.data.iter().zip(out.data.iter_mut()) {
            let on = *src > threshold;
            *dst = if on != inverted { 1.0 } else { 0.0 };
        }
        out
    }
}

impl ImageView for ImageF32 {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

impl ImageViewMut for ImageF32 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_reverses_rows() {
        let mut img = ImageF32::new(2, 3);
        img.set(0, 0, 1.0);
        img.set(1, 2, 5.0);
        let flipped = img.flipped_vertically();
        assert_eq!(flipped.get(0, 2), 1.0);
        assert_eq!(flipped.get(1, 0), 5.0);
        assert_eq!(flipped.flipped_vertically(), img);
    }

    #[test]
    fn threshold_respects_inversion() {
        let mut img = ImageF32::new(3, 1);
        img.data = vec![0.2, 0.5, 0.9];
        assert_eq!(img.thresholded(0.47, false).data, vec![0.0, 1.0, 1.0]);
        assert_eq!(img.thresholded(0.47, true).data, vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn from_u8_scales_to_unit_range() {
        let bytes = [0u8, 255, 51, 0];
        let view = ImageU8 {
            w: 3,
            h: 1,
            stride: 4,
            data: &bytes,
        };
        let img = ImageF32::from_u8(&view);
        assert_eq!(img.w, 3);
        assert!((img.get(1, 0) - 1.0).abs() < 1e-6);
        assert!((img.get(2, 0) - 0.2).abs() < 1e-6);
    }
}
