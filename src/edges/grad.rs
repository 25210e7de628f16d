//! Sobel image gradients and the oriented-gradient field.
//!
//! - Convolves a 3×3 kernel pair (`X` and `Y`) with border clamping.
//! - Outputs per-pixel `gx` (positive to the right), `gy` (positive down the
//!   raster) and `mag = sqrt(gx^2+gy^2)`.
//! - `oriented_gradient` packs each pixel into `gx − i·gy`: the modulus is the
//!   histogram weight, the argument the gradient direction with y pointing up.
//!
//! Complexity: O(W·H) per pass; memory: three float buffers.
use crate::image::{ImageF32, ImageView, ImageViewMut};
use nalgebra::Complex;

type Kernel3 = [[f32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Per-pixel gradient buffers.
#[derive(Clone, Debug)]
pub struct Grad {
    /// Horizontal derivative (convolution with kernel X)
    pub gx: ImageF32,
    /// Vertical derivative (convolution with kernel Y), positive down the raster
    pub gy: ImageF32,
    /// Euclidean magnitude per pixel: `sqrt(gx^2 + gy^2)`
    pub mag: ImageF32,
}

fn gradients_with_kernels(l: &ImageF32, kernel_x: &Kernel3, kernel_y: &Kernel3) -> Grad {
    let w = l.w;
    let h = l.h;
    let mut gx = ImageF32::new(w, h);
    let mut gy = ImageF32::new(w, h);
    let mut mag = ImageF32::new(w, h);

    if w == 0 || h == 0 {
        return Grad { gx, gy, mag };
    }

    for y in 0..h {
        let y_idx = [y.saturating_sub(1), y, (y + 1).min(h - 1)];
        let rows = [l.row(y_idx[0]), l.row(y_idx[1]), l.row(y_idx[2])];
        let out_gx = gx.row_mut(y);
        let out_gy = gy.row_mut(y);
        let out_mag = mag.row_mut(y);
        for x in 0..w {
            let x_idx = [x.saturating_sub(1), x, (x + 1).min(w - 1)];

            let mut sum_x = 0.0;
            let mut sum_y = 0.0;
            for (ky, yy_row) in rows.iter().enumerate() {
                let kx_row = &kernel_x[ky];
                let ky_row = &kernel_y[ky];
                sum_x += yy_row[x_idx[0]] * kx_row[0]
                    + yy_row[x_idx[1]] * kx_row[1]
                    + yy_row[x_idx[2]] * kx_row[2];
                sum_y += yy_row[x_idx[0]] * ky_row[0]
                    + yy_row[x_idx[1]] * ky_row[1]
                    + yy_row[x_idx[2]] * ky_row[2];
            }

            out_gx[x] = sum_x;
            out_gy[x] = sum_y;
            out_mag[x] = (sum_x * sum_x + sum_y * sum_y).sqrt();
        }
    }

    Grad { gx, gy, mag }
}

/// Compute Sobel gradients on a single-channel float image.
pub fn sobel_gradients(l: &ImageF32) -> Grad {
    gradients_with_kernels(l, &SOBEL_KERNEL_X, &SOBEL_KERNEL_Y)
}

/// Oriented gradient `gx − i·gy` per pixel, row-major.
pub fn oriented_gradient(grad: &Grad) -> Vec<Complex<f32>> {
    grad.gx
        .data
        .iter()
        .zip(grad.gy.data.iter())
        .map(|(&dx, &dy)| Complex::new(dx, -dy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal_step(w: usize, h: usize, split_y: usize) -> ImageF32 {
        let mut img = ImageF32::new(w, h);
        for y in split_y..h {
            for x in 0..w {
                img.set(x, y, 1.0);
            }
        }
        img
    }

    #[test]
    fn sobel_responds_to_vertical_change_only() {
        let img = horizontal_step(8, 8, 4);
        let grad = sobel_gradients(&img);
        assert!(grad.gx.data.iter().all(|&v| v == 0.0));
        assert!(grad.gy.get(3, 4) > 0.0, "bright below means positive gy");
        assert!((grad.mag.get(3, 4) - grad.gy.get(3, 4)).abs() < 1e-6);
    }

    #[test]
    fn oriented_gradient_points_down_for_bright_bottom() {
        let img = horizontal_step(8, 8, 4);
        let grad = sobel_gradients(&img);
        let field = oriented_gradient(&grad);
        let z = field[4 * 8 + 3];
        assert_eq!(z.re, 0.0);
        assert!(z.im < 0.0, "raster-down gradient becomes negative imaginary");
        assert!((z.arg() + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
