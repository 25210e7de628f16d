//! Dominant-orientation estimation from image gradients.
//!
//! Overview
//! - Smooths the image with a box pass followed by a Gaussian pass.
//! - Takes 3×3 Sobel gradients on the raster and encodes each pixel as
//!   `gx − i·gy` (see [`crate::edges::oriented_gradient`]).
//! - Accumulates a magnitude-weighted circular histogram over (-π, π].
//! - Runs the circular peak finder on the normalized histogram.
//! - Turns each peak direction by a quarter turn (gradient → edge) and folds
//!   it into an orientation in (-π/2, π/2].
//!
//! The [`OrientationSet`] is also the target of manual overrides: degrees
//! typed as text, or the direction between two clicked points.

mod histogram;

use crate::angle::fold_orientation;
use crate::edges::{oriented_gradient, sobel_gradients};
use crate::error::{Error, Result};
use crate::filters::{apply_separable, KernelFilter};
use crate::image::{ImageF32, ImageView};
use crate::peaks::{find_peaks, PeakOptions};
use histogram::OrientationHistogram;
use log::debug;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use std::time::Instant;

/// Angles closer than this are the same orientation. Equals the spacing of
/// `f64` at 1e10, so in practice only exact duplicates merge.
pub const DEDUP_TOLERANCE: f64 = 1.9073486328125e-6;

/// Parameters of the orientation estimator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrientationOptions {
    /// Box blur size in pixels.
    pub box_size: usize,
    /// Gaussian blur size in pixels (forced odd).
    pub gaussian_size: usize,
    /// Gaussian sigma; non-positive derives it from the size.
    pub gaussian_sigma: f32,
    /// Histogram bins over the full circle.
    pub num_bins: usize,
    pub peaks: PeakOptions,
}

impl Default for OrientationOptions {
    fn default() -> Self {
        Self {
            box_size: 9,
            gaussian_size: 9,
            gaussian_sigma: 0.0,
            num_bins: 180 * 5,
            peaks: PeakOptions::orientation_histogram(),
        }
    }
}

impl OrientationOptions {
    pub fn validate(&self) -> Result<()> {
        if self.num_bins < 2 {
            return Err(Error::InvalidConfig(format!(
                "orientation histogram needs at least 2 bins, got {}",
                self.num_bins
            )));
        }
        self.peaks.validate()
    }
}

/// Ordered, deduplicated orientations in radians within (-π/2, π/2].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrientationSet {
    angles: Vec<f64>,
}

impl OrientationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold every angle, then drop later duplicates.
    pub fn from_angles<I: IntoIterator<Item = f64>>(angles: I) -> Self {
        let mut set = Self {
            angles: angles.into_iter().map(fold_orientation).collect(),
        };
        set.dedup();
        set
    }

    /// Parse comma-separated degrees, e.g. `"0, 90.5,"`. Empty fields are
    /// skipped; anything else that is not a finite number is an error.
    pub fn from_degrees_text(text: &str) -> Result<Self> {
        let mut angles = Vec::new();
        for field in text.split(',') {
            let field = field.trim();
            if field.is_empty() {
                continue;
            }
            let deg: f64 = field
                .parse()
                .map_err(|e| Error::Parse(format!("'{field}': {e}")))?;
            if !deg.is_finite() {
                return Err(Error::Parse(format!("'{field}' is not finite")));
            }
            angles.push(deg.to_radians());
        }
        Ok(Self::from_angles(angles))
    }

    /// Append one orientation (folded). Returns false when it duplicates an
    /// existing entry or is not finite.
    pub fn push(&mut self, angle: f64) -> bool {
        if !angle.is_finite() {
            return false;
        }
        let folded = fold_orientation(angle);
        if self
            .angles
            .iter()
            .any(|&a| (a - folded).abs() < DEDUP_TOLERANCE)
        {
            return false;
        }
        self.angles.push(folded);
        true
    }

    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.angles.iter().copied()
    }

    pub fn to_degrees(&self) -> Vec<f64> {
        self.iter().map(f64::to_degrees).collect()
    }

    /// Degrees with one decimal, comma separated; parses back with
    /// [`OrientationSet::from_degrees_text`].
    pub fn to_degrees_text(&self) -> String {
        self.iter()
            .map(|a| format!("{:.1}", a.to_degrees()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    // Backward scan: an entry goes when any earlier entry is within tolerance.
    fn dedup(&mut self) {
        let mut idx = self.angles.len();
        while idx > 0 {
            idx -= 1;
            let a = self.angles[idx];
            if self.angles[..idx]
                .iter()
                .any(|&b| (a - b).abs() < DEDUP_TOLERANCE)
            {
                self.angles.remove(idx);
            }
        }
    }
}

/// Orientation of the line through two points, `atan(dy/dx)` folded into
/// (-π/2, π/2]. A vertical pair gives π/2.
pub fn orientation_from_points(p1: &Point2<f64>, p2: &Point2<f64>) -> Result<f64> {
    let d = p2 - p1;
    if !(d.x.is_finite() && d.y.is_finite()) {
        return Err(Error::InvalidGeometry(
            "orientation points must be finite".to_string(),
        ));
    }
    if d.x == 0.0 && d.y == 0.0 {
        return Err(Error::DegenerateFit(
            "orientation needs two distinct points".to_string(),
        ));
    }
    if d.x == 0.0 {
        return Ok(FRAC_PI_2);
    }
    Ok(fold_orientation((d.y / d.x).atan()))
}

/// Magnitude-weighted gradient-direction histogram, normalized to a unit
/// maximum, together with the bin centres in radians.
pub fn gradient_histogram(image: &ImageF32, opts: &OrientationOptions) -> (Vec<f32>, Vec<f64>) {
    let boxed = apply_separable(image, &KernelFilter::box_filter(opts.box_size));
    let smoothed = apply_separable(
        &boxed,
        &KernelFilter::gaussian(opts.gaussian_size, opts.gaussian_sigma),
    );
    let grad = sobel_gradients(&smoothed);

    let mut hist = OrientationHistogram::new(opts.num_bins);
    for z in oriented_gradient(&grad) {
        let weight = z.norm();
        if weight > 0.0 {
            hist.accumulate(z.re as f64, z.im as f64, weight);
        }
    }
    let centers = (0..opts.num_bins).map(|i| hist.bin_center(i)).collect();
    (hist.normalized(), centers)
}

/// Estimate the dominant line orientations of `image`.
///
/// An empty image gives an empty set. Options are validated first.
pub fn estimate_orientations(image: &ImageF32, opts: &OrientationOptions) -> Result<OrientationSet> {
    opts.validate()?;
    if image.is_empty() {
        debug!("orientation: empty image, no orientations");
        return Ok(OrientationSet::new());
    }

    let start = Instant::now();
    let (hist, centers) = gradient_histogram(image, opts);
    let hist_ms = start.elapsed().as_secs_f64() * 1000.0;

    let peaks_start = Instant::now();
    let peaks = find_peaks(&hist, &opts.peaks)?;
    let peaks_ms = peaks_start.elapsed().as_secs_f64() * 1000.0;

    // Gradients run across edges; the edge itself is a quarter turn away.
    let set = OrientationSet::from_angles(peaks.iter().map(|&i| centers[i] + FRAC_PI_2));
    debug!(
        "orientation: {}x{} bins={} peaks={} orientations={:?} hist_ms={:.3} peaks_ms={:.3}",
        image.w,
        image.h,
        opts.num_bins,
        peaks.len(),
        set.to_degrees(),
        hist_ms,
        peaks_ms
    );
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    fn stripe_image(w: usize, h: usize, vertical: bool) -> ImageF32 {
        let mut img = ImageF32::new(w, h);
        for y in 0..h {
            for x in 0..w {
                let on = if vertical { x == w / 2 } else { y == h / 2 };
                if on {
                    img.set(x, y, 1.0);
                }
            }
        }
        img
    }

    /// One-pixel line through the centre of an odd `n × n` raster at `deg`
    /// degrees in the y-up frame, point-symmetric about the centre pixel.
    fn slanted_line(n: usize, deg: f64) -> ImageF32 {
        let mut img = ImageF32::new(n, n);
        let m = (n / 2) as f64;
        let slope = deg.to_radians().tan();
        for x in 0..n {
            let r = (m - slope * (x as f64 - m)).round();
            if r >= 0.0 && r < n as f64 {
                img.set(x, r as usize, 1.0);
            }
        }
        img
    }

    #[test]
    fn from_angles_folds_and_dedups() {
        let set = OrientationSet::from_angles([0.0, std::f64::consts::PI, 0.5, 0.5 + 1e-7, 2.0]);
        assert_eq!(set.len(), 3);
        assert!(approx_eq(set.angles()[0], 0.0, 1e-12));
        assert!(approx_eq(set.angles()[1], 0.5, 1e-12));
        assert!(approx_eq(set.angles()[2], 2.0 - std::f64::consts::PI, 1e-12));
    }

    #[test]
    fn dedup_keeps_first_occurrence_only_for_near_exact_duplicates() {
        let set = OrientationSet::from_angles([0.3, 0.3 + 1e-5, 0.3 + 1e-7]);
        assert_eq!(set.angles(), &[0.3, 0.3 + 1e-5]);
    }

    #[test]
    fn degrees_text_round_trips_through_parse() {
        let set = OrientationSet::from_degrees_text(" 0, 90.5,, -45 ,").unwrap();
        assert_eq!(set.len(), 3);
        assert!(approx_eq(set.angles()[1], 90.5f64.to_radians() - std::f64::consts::PI, 1e-12));
        assert_eq!(set.to_degrees_text(), "0.0, -89.5, -45.0");

        let err = OrientationSet::from_degrees_text("10, abc").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(OrientationSet::from_degrees_text("").unwrap().is_empty());
    }

    #[test]
    fn push_rejects_duplicates() {
        let mut set = OrientationSet::new();
        assert!(set.push(0.25));
        assert!(!set.push(0.25 + std::f64::consts::PI));
        assert!(!set.push(f64::NAN));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn orientation_from_points_cases() {
        let a = Point2::new(1.0, 1.0);
        let o = orientation_from_points(&a, &Point2::new(3.0, 3.0)).unwrap();
        assert!(approx_eq(o, std::f64::consts::FRAC_PI_4, 1e-12));
        let o = orientation_from_points(&a, &Point2::new(1.0, -4.0)).unwrap();
        assert_eq!(o, FRAC_PI_2);
        let o = orientation_from_points(&a, &Point2::new(-1.0, 1.0)).unwrap();
        assert_eq!(o, 0.0);
        assert!(matches!(
            orientation_from_points(&a, &a),
            Err(Error::DegenerateFit(_))
        ));
    }

    #[test]
    fn empty_image_has_no_orientations() {
        let img = ImageF32::new(0, 0);
        let set = estimate_orientations(&img, &OrientationOptions::default()).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn flat_image_has_no_orientations() {
        let img = ImageF32::new(24, 24);
        let set = estimate_orientations(&img, &OrientationOptions::default()).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn horizontal_stripe_is_zero_degrees() {
        let set = estimate_orientations(&stripe_image(48, 48, false), &OrientationOptions::default())
            .unwrap();
        assert_eq!(set.len(), 1, "orientations {:?}", set.to_degrees());
        assert!(approx_eq(set.angles()[0], 0.0, 0.01), "orientations {:?}", set.to_degrees());
    }

    #[test]
    fn vertical_stripe_is_ninety_degrees() {
        let set = estimate_orientations(&stripe_image(48, 48, true), &OrientationOptions::default())
            .unwrap();
        assert_eq!(set.len(), 1, "orientations {:?}", set.to_degrees());
        for a in set.iter() {
            let off = (a.abs() - FRAC_PI_2).abs();
            assert!(off < 0.01, "orientations {:?}", set.to_degrees());
        }
    }

    #[test]
    fn slanted_lines_keep_their_sign() {
        for &deg in &[30.0, -30.0] {
            let set = estimate_orientations(&slanted_line(97, deg), &OrientationOptions::default())
                .unwrap();
            assert!(!set.is_empty(), "{deg} deg: no orientation");
            for d in set.to_degrees() {
                assert!(
                    approx_eq(d, deg, 3.0),
                    "{deg} deg line estimated as {:?}",
                    set.to_degrees()
                );
            }
        }
    }

    #[test]
    fn invalid_bins_are_rejected() {
        let opts = OrientationOptions {
            num_bins: 1,
            ..OrientationOptions::default()
        };
        assert!(matches!(
            estimate_orientations(&ImageF32::new(4, 4), &opts),
            Err(Error::InvalidConfig(_))
        ));
    }
}
