#![doc = include_str!("../README.md")]

// Public modules
pub mod config;
pub mod diagnostics;
pub mod geometry;
pub mod image;
pub mod pipeline;
pub mod session;

// Building blocks, public for tools and tests.
pub mod angle;
pub mod edges;
pub mod error;
pub mod filters;
pub mod fit;
pub mod orientation;
pub mod peaks;
pub mod projection;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{Error, Result};
pub use crate::geometry::{RenderGeometry, Trait, ViewportBounds};
pub use crate::pipeline::{run_detection, DetectionParams};
pub use crate::session::{AnnotationSession, TraitKind};

pub use crate::diagnostics::{DetectionReport, TimingBreakdown};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use trait_annotator::prelude::*;
///
/// # fn main() -> trait_annotator::Result<()> {
/// let (w, h) = (64usize, 64usize);
/// let mut img = ImageF32::new(w, h);
/// for x in 0..w {
///     img.set(x, 20, 1.0);
/// }
///
/// let report = run_detection(&img, &DetectionParams::default())?;
/// println!("lines={} total_ms={:.3}", report.traits.len(), report.timings.total_ms);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::geometry::{Arc, Circle, Line, Point, Ray, Segment};
    pub use crate::image::ImageF32;
    pub use crate::orientation::{OrientationOptions, OrientationSet};
    pub use crate::projection::{ProjectionOptions, ProjectionSource};
    pub use crate::{run_detection, AnnotationSession, DetectionParams, Trait, TraitKind};
}
