//! Edge processing utilities: image gradients, the oriented-gradient field and
//! simple non-maximum suppression.
//!
//! - 3×3 Sobel gradients returning `gx`, `gy` and magnitude.
//! - The oriented gradient `dx − i·dy` consumed by the orientation estimator.
//!   The vertical component is negated so the complex argument is measured in
//!   the y-up display frame even though gradients are taken on the raster.
//! - Lightweight non-maximum suppression on the gradient magnitude, rendered
//!   into a binary edge map usable as a projection source.
//!
//! Borders are handled by clamping indices (replicate).

pub mod grad;
pub mod nms;

pub use grad::{oriented_gradient, sobel_gradients, Grad};
pub use nms::{detect_edges_nms, edge_map, EdgeElement};
