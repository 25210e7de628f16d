//! Diagnostics returned by the detection pipeline and written by the demo.
//!
//! `DetectionReport` bundles the detected traits with what each stage saw:
//! the orientation set, the peaks of every projection column and per-stage
//! timings.

mod report;
pub mod timing;

pub use report::{
    DetectionReport, InputDescriptor, OrientationStage, ProjectionColumnReport, ProjectionStage,
};
pub use timing::{StageTiming, TimingBreakdown};
