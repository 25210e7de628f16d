//! Non-maximum suppression on gradient magnitude with direction alignment.
//!
//! A Canny-style, simplified NMS using Sobel gradients to estimate local edge
//! direction. For each pixel, responses that are not strictly greater than
//! their two neighbors along the quantized gradient direction are suppressed.
//! The surviving pixels form the edge image used as a projection source.
//!
//! Border handling uses clamping in gradient computation and ignores the outer
//! 1-pixel frame in NMS to avoid out-of-bounds checks in neighbor lookup.
use crate::edges::grad::{sobel_gradients, Grad};
use crate::image::{ImageF32, ImageView};
use log::debug;
use serde::Serialize;
use std::time::Instant;

/// A sparse edge sample after NMS.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeElement {
    /// X coordinate in pixels
    pub x: u32,
    /// Y coordinate in pixels (raster rows)
    pub y: u32,
    /// Gradient magnitude at (x, y)
    pub magnitude: f32,
}

const TAN_22_5_DEG: f32 = 0.41421356237;

fn run_nms(grad: &Grad, mag_thresh: f32) -> Vec<EdgeElement> {
    let w = grad.gx.w;
    let h = grad.gx.h;
    if w < 3 || h < 3 {
        return Vec::new();
    }

    let inner_pixels = (w - 2) * (h - 2);
    let mut edges = Vec::with_capacity(inner_pixels / 8 + 1);
    for y in 1..h - 1 {
        let mag_prev = grad.mag.row(y - 1);
        let mag_row = grad.mag.row(y);
        let mag_next = grad.mag.row(y + 1);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);

        for x in 1..w - 1 {
            let mag = mag_row[x];
            if mag < mag_thresh || mag <= 0.0 {
                continue;
            }

            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();
            let same_sign = (gx >= 0.0 && gy >= 0.0) || (gx <= 0.0 && gy <= 0.0);

            let (neighbor1, neighbor2) = if abs_gx >= abs_gy {
                if abs_gy <= abs_gx * TAN_22_5_DEG {
                    (mag_row[x - 1], mag_row[x + 1])
                } else if same_sign {
                    (mag_prev[x - 1], mag_next[x + 1])
                } else {
                    (mag_prev[x + 1], mag_next[x - 1])
                }
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                (mag_prev[x], mag_next[x])
            } else if same_sign {
                (mag_prev[x - 1], mag_next[x + 1])
            } else {
                (mag_prev[x + 1], mag_next[x - 1])
            };

            // A two-pixel plateau across a step keeps one sample.
            if mag < neighbor1 || mag <= neighbor2 {
                continue;
            }

            edges.push(EdgeElement {
                x: x as u32,
                y: y as u32,
                magnitude: mag,
            });
        }
    }

    edges
}

/// Detect edges by applying Sobel gradients followed by 4-direction NMS.
///
/// A pixel is kept if its magnitude is above `mag_thresh`, not below the
/// previous neighbor and strictly above the next one along the gradient.
pub fn detect_edges_nms(l: &ImageF32, mag_thresh: f32) -> Vec<EdgeElement> {
    let start = Instant::now();
    let grad = sobel_gradients(l);
    let edges = run_nms(&grad, mag_thresh);
    debug!(
        "edges: {}x{} thresh={:.3} kept={} elapsed_ms={:.3}",
        l.w,
        l.h,
        mag_thresh,
        edges.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    edges
}

/// Binary edge image (`1.0` on NMS survivors) with the input's raster layout.
pub fn edge_map(l: &ImageF32, mag_thresh: f32) -> ImageF32 {
    let mut out = ImageF32::new(l.w, l.h);
    for e in detect_edges_nms(l, mag_thresh) {
        out.set(e.x as usize, e.y as usize, 1.0);
    }
    out
}
