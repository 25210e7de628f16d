//! Separable smoothing filters (box and Gaussian) with clamped borders.
//!
//! The orientation estimator runs a box pass followed by a Gaussian pass to
//! suppress pixel-level noise before gradients are taken.

use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order). The kernel is assumed to be
    /// symmetric around its centre, but the implementation does not rely on it.
    fn taps(&self) -> &[f32];
}

/// Filter with taps computed at runtime.
#[derive(Clone, Debug, PartialEq)]
pub struct KernelFilter {
    taps: Vec<f32>,
}

impl KernelFilter {
    /// Normalised box (moving average) filter of `size` taps.
    pub fn box_filter(size: usize) -> Self {
        let size = size.max(1);
        Self {
            taps: vec![1.0 / size as f32; size],
        }
    }

    /// Normalised Gaussian of `size` taps (forced odd).
    ///
    /// A non-positive `sigma` is derived from the size as
    /// `0.3·((size − 1)/2 − 1) + 0.8`, which gives σ = 1.7 for 9 taps.
    pub fn gaussian(size: usize, sigma: f32) -> Self {
        let size = size.max(1) | 1;
        let sigma = if sigma > 0.0 {
            sigma
        } else {
            0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
        };
        let radius = (size / 2) as f32;
        let denom = 2.0 * sigma * sigma;
        let mut taps: Vec<f32> = (0..size)
            .map(|i| {
                let x = i as f32 - radius;
                (-(x * x) / denom).exp()
            })
            .collect();
        let sum: f32 = taps.iter().sum();
        for t in &mut taps {
            *t /= sum;
        }
        Self { taps }
    }
}

impl SeparableFilter for KernelFilter {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

/// Convolve `src` with `filter` along rows, then along columns.
pub fn apply_separable(src: &ImageF32, filter: &dyn SeparableFilter) -> ImageF32 {
    let taps = filter.taps();
    if src.is_empty() || taps.is_empty() {
        return src.clone();
    }
    let radius = (taps.len() / 2) as isize;
    let (w, h) = (src.w, src.h);

    let mut horiz = ImageF32::new(w, h);
    for y in 0..h {
        let row = src.row(y);
        let out = horiz.row_mut(y);
        for (x, dst) in out.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (k, &tap) in taps.iter().enumerate() {
                let sx = clamp_index(x as isize + k as isize - radius, w);
                acc += tap * row[sx];
            }
            *dst = acc;
        }
    }

    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        for (k, &tap) in taps.iter().enumerate() {
            let sy = clamp_index(y as isize + k as isize - radius, h);
            let src_row = horiz.row(sy);
            let dst_row = out.row_mut(y);
            for (dst, &s) in dst_row.iter_mut().zip(src_row) {
                *dst += tap * s;
            }
        }
    }
    out
}

fn clamp_index(idx: isize, upper: usize) -> usize {
    if upper == 0 {
        return 0;
    }
    if idx < 0 {
        0
    } else if (idx as usize) >= upper {
        upper - 1
    } else {
        idx as usize
    }
}
