//! Projection-based line localization along known orientations.
//!
//! For every orientation θ the image is projected onto the direction
//! φ = θ − π/2, perpendicular to the sought lines. Pixels on one line share a
//! single offset, so each line becomes a peak in the projection column. A
//! peak at index `i` sits at signed distance `d = i − L/2` from the image
//! centre `c`, giving the anchor `c + d·(cos φ, sin φ)`; the line runs from
//! there along `(cos θ, sin θ)`.
//!
//! The image is flipped vertically first so that pixel rows are in display
//! order (y up); the recovered lines are then directly in display
//! coordinates. Columns for different orientations are independent and are
//! computed in parallel when the `parallel` feature is on, keeping the
//! orientation order in the output.

mod radon;

pub use radon::{column_center, column_len, radon_column};

use crate::edges::edge_map;
use crate::error::{Error, Result};
use crate::geometry::{Line, Point, Trait};
use crate::image::{ImageF32, ImageView};
use crate::orientation::OrientationSet;
use crate::peaks::{find_peaks, PeakOptions};
use log::{debug, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use std::time::Instant;

/// Image fed into the projection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ProjectionSource {
    /// Intensities as loaded.
    #[default]
    Original,
    /// `1.0` above `threshold` (below or equal when `inverted`), else `0.0`.
    Binary { threshold: f32, inverted: bool },
    /// Non-maximum-suppressed Sobel edges above `magnitude_threshold`.
    Edges { magnitude_threshold: f32 },
}

impl ProjectionSource {
    /// Binary source with the usual 120/255 cut.
    pub fn binary() -> Self {
        ProjectionSource::Binary {
            threshold: 120.0 / 255.0,
            inverted: false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProjectionSource::Original => "original",
            ProjectionSource::Binary { .. } => "binary",
            ProjectionSource::Edges { .. } => "edges",
        }
    }

    /// Derive the source image from the loaded raster.
    pub fn prepare(&self, image: &ImageF32) -> ImageF32 {
        match *self {
            ProjectionSource::Original => image.clone(),
            ProjectionSource::Binary {
                threshold,
                inverted,
            } => image.thresholded(threshold, inverted),
            ProjectionSource::Edges {
                magnitude_threshold,
            } => edge_map(image, magnitude_threshold),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectionOptions {
    pub source: ProjectionSource,
    /// Peak settings for the projection columns; must not be circular.
    pub peaks: PeakOptions,
}

/// Peaks found in one projection column.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionColumn {
    pub orientation: f64,
    pub peaks: Vec<usize>,
    pub lines: Vec<Trait>,
}

/// Lines along each orientation of `orientations`, grouped by orientation in
/// set order and by ascending peak index within a group.
///
/// `image` is in raster order (row 0 at the top). Returns `EmptyInput` for an
/// empty image and `InvalidConfig` for circular peak settings. An empty
/// orientation set logs a warning and yields no lines.
pub fn localize_lines(
    image: &ImageF32,
    orientations: &OrientationSet,
    peaks: &PeakOptions,
) -> Result<Vec<Trait>> {
    let columns = localize_columns(image, orientations, peaks)?;
    Ok(columns.into_iter().flat_map(|c| c.lines).collect())
}

/// As [`localize_lines`], keeping the per-orientation peaks.
pub fn localize_columns(
    image: &ImageF32,
    orientations: &OrientationSet,
    peaks: &PeakOptions,
) -> Result<Vec<ProjectionColumn>> {
    if peaks.circular {
        return Err(Error::InvalidConfig(
            "projection peaks cannot be circular".to_string(),
        ));
    }
    peaks.validate()?;
    if image.is_empty() {
        return Err(Error::EmptyInput("projection needs an image"));
    }
    if orientations.is_empty() {
        warn!("projection: no dominant orientation available, no lines produced");
        return Ok(Vec::new());
    }

    let start = Instant::now();
    let flipped = image.flipped_vertically();
    let center = Point::new(image.w as f64 * 0.5, image.h as f64 * 0.5);
    let column_mid = column_center(column_len(image.w, image.h)) as f64;

    let project = |theta: f64| -> Result<ProjectionColumn> {
        let phi = theta - FRAC_PI_2;
        let column = radon_column(&flipped, phi);
        let peak_idx = find_peaks(&column, peaks)?;
        let normal = nalgebra::Vector2::new(phi.cos(), phi.sin());
        let along = nalgebra::Vector2::new(theta.cos(), theta.sin());
        let lines = peak_idx
            .iter()
            .map(|&i| {
                let anchor = center + normal * (i as f64 - column_mid);
                Line::through(anchor, anchor + along).map(Trait::from)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ProjectionColumn {
            orientation: theta,
            peaks: peak_idx,
            lines,
        })
    };

    #[cfg(feature = "parallel")]
    let columns: Vec<ProjectionColumn> = orientations
        .angles()
        .par_iter()
        .map(|&theta| project(theta))
        .collect::<Result<_>>()?;
    #[cfg(not(feature = "parallel"))]
    let columns: Vec<ProjectionColumn> = orientations
        .iter()
        .map(project)
        .collect::<Result<_>>()?;

    debug!(
        "projection: {}x{} orientations={} lines={} elapsed_ms={:.3}",
        image.w,
        image.h,
        orientations.len(),
        columns.iter().map(|c| c.lines.len()).sum::<usize>(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(columns)
}

/// Prepare the configured source from `image`, then localize lines on it.
pub fn detect_lines(
    image: &ImageF32,
    orientations: &OrientationSet,
    opts: &ProjectionOptions,
) -> Result<Vec<Trait>> {
    if image.is_empty() {
        return Err(Error::EmptyInput("projection needs an image"));
    }
    let source = opts.source.prepare(image);
    localize_lines(&source, orientations, &opts.peaks)
}
