//! Single Radon-transform column with linear splatting.

use crate::image::{ImageF32, ImageView};

/// Bins of a projection column for a `w × h` image: the diagonal plus a
/// one-bin guard on each side.
pub fn column_len(w: usize, h: usize) -> usize {
    (w as f64).hypot(h as f64).ceil() as usize + 2
}

/// Index of the zero offset inside a column of `len` bins.
#[inline]
pub fn column_center(len: usize) -> usize {
    len / 2
}

/// Projection of `image` (rows already in display order, y up) onto the unit
/// direction at angle `phi`.
///
/// Each pixel at `(x, y)` lands at offset `t = (p − c)·(cos φ, sin φ)` from the
/// image centre `c = (w/2, h/2)` and is split linearly between the two
/// neighbouring bins. The column is scaled to a unit maximum.
pub fn radon_column(image: &ImageF32, phi: f64) -> Vec<f32> {
    let len = column_len(image.w, image.h);
    let mut column = vec![0.0f32; len];
    if image.is_empty() {
        return column;
    }
    let (cos_p, sin_p) = (phi.cos(), phi.sin());
    let cx = image.w as f64 * 0.5;
    let cy = image.h as f64 * 0.5;
    let center = column_center(len) as f64;
    let last = (len - 1) as f64;

    for (y, row) in image.rows().enumerate() {
        let dy = (y as f64 - cy) * sin_p;
        for (x, &v) in row.iter().enumerate() {
            if v == 0.0 || !v.is_finite() {
                continue;
            }
            let pos = center + (x as f64 - cx) * cos_p + dy;
            if pos < 0.0 || pos > last {
                continue;
            }
            let i0 = pos.floor();
            let frac = (pos - i0) as f32;
            let i0 = i0 as usize;
            column[i0] += v * (1.0 - frac);
            if frac > 0.0 && i0 + 1 < len {
                column[i0 + 1] += v * frac;
            }
        }
    }

    let max = column.iter().copied().fold(0.0f32, f32::max);
    if max > 0.0 {
        for c in &mut column {
            *c /= max;
        }
    }
    column
}
