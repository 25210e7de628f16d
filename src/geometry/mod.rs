//! Trait primitives and their boundary-clipped rendering geometry.
//!
//! - [`Trait`] is the closed set of primitives: lines, segments, rays,
//!   circles and arcs. Constructors validate finiteness, positive radii and
//!   distinct defining points, so a built trait never carries NaN or ∞.
//! - [`ViewportBounds`] is the drawing rectangle: image extents, or the
//!   bounding box of the known traits when no image is loaded.
//! - [`clip_line`] / [`clip_ray`] restrict unbounded primitives to the
//!   viewport; [`render_geometry`] is the single per-kind dispatch for drawing.
//!
//! Coordinates are display coordinates with y pointing up; raster row `r` of
//! an `h`-row image sits at `y = h − 1 − r`.

mod clip;
mod primitives;
mod render;
mod viewport;

pub use clip::{clip_line, clip_ray};
pub use primitives::{Arc, Circle, Line, Ray, Segment, Trait};
pub use render::{render_geometry, RenderGeometry, CIRCLE_SAMPLES};
pub use viewport::ViewportBounds;

/// Point in display coordinates.
pub type Point = nalgebra::Point2<f64>;
