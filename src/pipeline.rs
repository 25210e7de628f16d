//! One-shot detection: orientations, projection lines and their rendering
//! for a single image.
//!
//! This is the non-interactive counterpart of
//! [`AnnotationSession`](crate::session::AnnotationSession): the same stages
//! run back to back and every intermediate worth inspecting ends up in the
//! returned [`DetectionReport`].

use crate::diagnostics::{
    DetectionReport, InputDescriptor, OrientationStage, ProjectionColumnReport, ProjectionStage,
    TimingBreakdown,
};
use crate::error::{Error, Result};
use crate::geometry::{render_geometry, Trait, ViewportBounds};
use crate::image::{ImageF32, ImageView};
use crate::orientation::{estimate_orientations, OrientationOptions, OrientationSet};
use crate::projection::{localize_columns, ProjectionOptions};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetectionParams {
    pub orientation: OrientationOptions,
    /// Orientations in degrees used instead of estimating them.
    pub orientations_deg: Option<Vec<f64>>,
    pub projection: ProjectionOptions,
    /// Margin added around the viewport for exported bounds.
    pub export_margin: f64,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            orientation: OrientationOptions::default(),
            orientations_deg: None,
            projection: ProjectionOptions::default(),
            export_margin: 1.0,
        }
    }
}

/// Detect straight lines in `image` (raster order, values in `[0, 1]`).
pub fn run_detection(image: &ImageF32, params: &DetectionParams) -> Result<DetectionReport> {
    if image.is_empty() {
        return Err(Error::EmptyInput("detection needs an image"));
    }
    if !(params.export_margin.is_finite() && params.export_margin >= 0.0) {
        return Err(Error::InvalidConfig(format!(
            "export margin must be finite and non-negative, got {}",
            params.export_margin
        )));
    }
    let total_start = Instant::now();
    let mut timings = TimingBreakdown::default();

    let (orientations, origin) = match &params.orientations_deg {
        Some(deg) => (
            OrientationSet::from_angles(deg.iter().map(|d| d.to_radians())),
            "manual",
        ),
        None => (
            timings.measure("orientation", || {
                estimate_orientations(image, &params.orientation)
            })?,
            "estimated",
        ),
    };
    debug!(
        "detection: {} orientation(s) [{}] ({origin})",
        orientations.len(),
        orientations.to_degrees_text()
    );

    let source = timings.measure("source", || params.projection.source.prepare(image));
    let columns = timings.measure("projection", || {
        localize_columns(&source, &orientations, &params.projection.peaks)
    })?;

    let viewport = ViewportBounds::from_image(image.w, image.h);
    let traits: Vec<Trait> = columns
        .iter()
        .flat_map(|c| c.lines.iter().copied())
        .collect();
    let render = timings.measure("render", || {
        traits
            .iter()
            .map(|t| render_geometry(t, &viewport))
            .collect::<Vec<_>>()
    });

    timings.total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
    info!(
        "detection: {}x{} orientations={} lines={} total_ms={:.3}",
        image.w,
        image.h,
        orientations.len(),
        traits.len(),
        timings.total_ms
    );

    Ok(DetectionReport {
        input: InputDescriptor {
            width: image.w,
            height: image.h,
        },
        orientation: OrientationStage {
            origin: origin.to_string(),
            orientations_rad: orientations.angles().to_vec(),
            orientations_deg: orientations.to_degrees(),
        },
        projection: ProjectionStage {
            source: params.projection.source.name().to_string(),
            columns: columns
                .iter()
                .map(|c| ProjectionColumnReport {
                    orientation_deg: c.orientation.to_degrees(),
                    peaks: c.peaks.clone(),
                    line_count: c.lines.len(),
                })
                .collect(),
        },
        traits,
        render,
        viewport,
        export_bounds: viewport.expanded(params.export_margin),
        timings,
    })
}
