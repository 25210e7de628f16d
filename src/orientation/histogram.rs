use std::f64::consts::{PI, TAU};

/// Circular histogram over (-π, π] used to find dominant gradient directions.
pub(crate) struct OrientationHistogram {
    bins: Vec<f32>,
    bin_width: f64,
}

impl OrientationHistogram {
    pub(crate) fn new(num_bins: usize) -> Self {
        let num_bins = num_bins.max(1);
        OrientationHistogram {
            bins: vec![0.0; num_bins],
            bin_width: TAU / num_bins as f64,
        }
    }

    #[cfg(test)]
    pub(crate) fn bins(&self) -> &[f32] {
        &self.bins
    }

    #[cfg(test)]
    pub(crate) fn bin_width(&self) -> f64 {
        self.bin_width
    }

    /// Add `weight` to the bin of the direction `(dx, dy)` (y up).
    ///
    /// Bins are right-closed: bin `k` covers `(-π + k·w, -π + (k+1)·w]`. With
    /// an even bin count, `(dx, dy)` and `(-dx, -dy)` always land exactly
    /// half the histogram apart.
    pub(crate) fn accumulate(&mut self, dx: f64, dy: f64, weight: f32) {
        if !(dx.is_finite() && dy.is_finite()) || !(weight > 0.0) || (dx == 0.0 && dy == 0.0) {
            return;
        }
        let n = self.bins.len();
        let idx = if n % 2 == 0 {
            // Upper half-plane is (0, π]; the lower half is indexed through
            // the negated vector so antipodes share one offset.
            let upper = dy > 0.0 || (dy == 0.0 && dx < 0.0);
            let (x, y) = if upper { (dx, dy) } else { (-dx, -dy) };
            let y = if y > 0.0 { y } else { 0.0 };
            let half = n / 2;
            let k = self.offset_index(y.atan2(x)).min(half - 1);
            if upper {
                half + k
            } else {
                k
            }
        } else {
            self.offset_index(dy.atan2(dx) + PI).min(n - 1)
        };
        self.bins[idx] += weight;
    }

    /// Index of the right-closed bin holding `offset` radians past -π.
    fn offset_index(&self, offset: f64) -> usize {
        ((offset / self.bin_width).ceil().max(0.0) as usize).saturating_sub(1)
    }

    /// Bin contents scaled to a unit maximum; all zeros stay zeros.
    pub(crate) fn normalized(&self) -> Vec<f32> {
        let max = self.bins.iter().copied().fold(0.0f32, f32::max);
        if max <= 0.0 {
            return self.bins.clone();
        }
        self.bins.iter().map(|&v| v / max).collect()
    }

    pub(crate) fn bin_center(&self, index: usize) -> f64 {
        -PI + (index as f64 + 0.5) * self.bin_width
    }
}

#[cfg(test)]
mod tests {
    use super::OrientationHistogram;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn direction(angle: f64) -> (f64, f64) {
        (angle.cos(), angle.sin())
    }

    fn bin_of(num_bins: usize, dx: f64, dy: f64) -> usize {
        let mut hist = OrientationHistogram::new(num_bins);
        hist.accumulate(dx, dy, 1.0);
        hist.bins()
            .iter()
            .position(|&v| v > 0.0)
            .expect("one bin filled")
    }

    #[test]
    fn accumulate_covers_the_full_circle() {
        let mut hist = OrientationHistogram::new(8);
        let (x, y) = direction(-PI + 1e-3);
        hist.accumulate(x, y, 1.0);
        hist.accumulate(-1.0, 0.0, 2.0);
        let (x, y) = direction(0.1);
        hist.accumulate(x, y, 3.0);
        hist.accumulate(x, y, 0.0);
        hist.accumulate(f64::NAN, 1.0, 5.0);
        hist.accumulate(0.0, 0.0, 5.0);
        let bins = hist.bins();
        assert_eq!(bins[0], 1.0);
        assert_eq!(bins[7], 2.0);
        assert_eq!(bins[4], 3.0);
        assert_eq!(bins.iter().sum::<f32>(), 6.0);
    }

    #[test]
    fn opposite_directions_are_half_a_turn_apart() {
        let dirs = [
            (0.0, 1.0),
            (1.0, 0.0),
            (0.0, 4.5),
            (0.3, 0.7),
            (-2.0, 5.0),
            (1e-3, -1.0),
            (7.0, -1e-9),
        ];
        for &(dx, dy) in &dirs {
            let a = bin_of(900, dx, dy);
            let b = bin_of(900, -dx, -dy);
            assert_eq!((a + 450) % 900, b, "direction ({dx}, {dy}): bins {a} and {b}");
        }
    }

    #[test]
    fn odd_bin_count_still_fills_one_bin() {
        assert_eq!(bin_of(9, -1.0, 0.0), 8);
        assert_eq!(bin_of(9, 1.0, 0.0), 4);
    }

    #[test]
    fn normalized_has_unit_maximum() {
        let mut hist = OrientationHistogram::new(4);
        hist.accumulate(0.2, 4.0, 1.0);
        hist.accumulate(-2.0, 1.0, 0.25);
        let n = hist.normalized();
        assert_eq!(n.iter().copied().fold(0.0f32, f32::max), 1.0);
        assert!((n.iter().sum::<f32>() - 1.25).abs() < 1e-6);
        assert!(OrientationHistogram::new(4).normalized().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn bin_centers_are_symmetric() {
        let hist = OrientationHistogram::new(900);
        assert!((hist.bin_center(0) + PI - hist.bin_width() * 0.5).abs() < 1e-12);
        assert!((hist.bin_center(899) - PI + hist.bin_width() * 0.5).abs() < 1e-12);
        assert!((hist.bin_center(675) - FRAC_PI_2 - hist.bin_width() * 0.5).abs() < 1e-12);
    }
}
