use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Inclusive range of wavelet widths `min, min + step, …, ≤ max`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ScaleRange {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    /// Expanded list of widths. Assumes the range has been validated.
    pub fn scales(&self) -> Vec<f32> {
        let count = ((self.max - self.min) / self.step + 1e-4).floor() as usize + 1;
        (0..count).map(|i| self.min + i as f32 * self.step).collect()
    }

    fn validate(&self) -> Result<()> {
        let finite = self.min.is_finite() && self.max.is_finite() && self.step.is_finite();
        if !finite || self.min <= 0.0 || self.step <= 0.0 || self.max < self.min {
            return Err(Error::InvalidConfig(format!(
                "scale range must satisfy 0 < min <= max and step > 0, got {:?}",
                self
            )));
        }
        Ok(())
    }
}

/// Peak detection knobs, passed per call.
///
/// - `use_scale_space`: candidates from CWT ridge lines over `scale_range`
///   instead of plain local-maximum scanning.
/// - `refine_window`: each candidate snaps to the signal maximum within
///   ± this many samples.
/// - `min_peak_distance`: candidates closer than this merge onto the larger.
/// - `min_peak_value`: candidates below this signal value are dropped.
/// - `circular`: the signal wraps around (last sample neighbours the first).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PeakOptions {
    pub use_scale_space: bool,
    pub scale_range: ScaleRange,
    pub refine_window: usize,
    pub min_peak_distance: usize,
    pub min_peak_value: f32,
    pub circular: bool,
}

impl Default for PeakOptions {
    fn default() -> Self {
        Self::projection()
    }
}

impl PeakOptions {
    /// Settings tuned for the 900-bin orientation histogram.
    pub fn orientation_histogram() -> Self {
        Self {
            use_scale_space: true,
            scale_range: ScaleRange::new(5.0, 50.0, 5.0),
            refine_window: 20,
            min_peak_distance: 30,
            min_peak_value: 0.2,
            circular: true,
        }
    }

    /// Settings tuned for normalized projection columns.
    pub fn projection() -> Self {
        Self {
            use_scale_space: false,
            scale_range: ScaleRange::new(1.0, 8.0, 1.0),
            refine_window: 10,
            min_peak_distance: 15,
            min_peak_value: 0.5,
            circular: false,
        }
    }

    /// Rejects values the finder cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.min_peak_distance == 0 {
            return Err(Error::InvalidConfig(
                "min_peak_distance must be at least 1".to_string(),
            ));
        }
        if !self.min_peak_value.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "min_peak_value must be finite, got {}",
                self.min_peak_value
            )));
        }
        if self.use_scale_space {
            self.scale_range.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_are_inclusive() {
        assert_eq!(
            ScaleRange::new(5.0, 50.0, 5.0).scales(),
            vec![5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0]
        );
        assert_eq!(ScaleRange::new(1.0, 2.5, 1.0).scales(), vec![1.0, 2.0]);
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut opts = PeakOptions::projection();
        assert!(opts.validate().is_ok());
        opts.min_peak_distance = 0;
        assert!(matches!(opts.validate(), Err(Error::InvalidConfig(_))));

        let mut opts = PeakOptions::orientation_histogram();
        opts.scale_range.step = 0.0;
        assert!(opts.validate().is_err());

        // scale range is ignored when scale space is off
        opts.use_scale_space = false;
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let opts: PeakOptions =
            serde_json::from_str(r#"{ "minPeakDistance": 4, "circular": true }"#).unwrap();
        assert_eq!(opts.min_peak_distance, 4);
        assert!(opts.circular);
        assert_eq!(opts.refine_window, PeakOptions::projection().refine_window);
    }
}
