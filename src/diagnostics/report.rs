use super::TimingBreakdown;
use crate::geometry::{RenderGeometry, Trait, ViewportBounds};
use serde::Serialize;

/// Result of [`run_detection`](crate::pipeline::run_detection).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub input: InputDescriptor,
    pub orientation: OrientationStage,
    pub projection: ProjectionStage,
    pub traits: Vec<Trait>,
    /// Drawing geometry for `traits`, index-aligned.
    pub render: Vec<RenderGeometry>,
    pub viewport: ViewportBounds,
    /// Viewport grown by the export margin.
    pub export_bounds: ViewportBounds,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrientationStage {
    /// Where the orientations came from: `"estimated"` or `"manual"`.
    pub origin: String,
    pub orientations_rad: Vec<f64>,
    pub orientations_deg: Vec<f64>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionStage {
    pub source: String,
    pub columns: Vec<ProjectionColumnReport>,
}

/// Peaks of one projection column.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionColumnReport {
    pub orientation_deg: f64,
    pub peaks: Vec<usize>,
    pub line_count: usize,
}
