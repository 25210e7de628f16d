//! Peak detection over a sampled 1-D signal.
//!
//! Shared by the orientation estimator (circular histogram) and the projection
//! line localizer (projection columns).
//!
//! Pipeline
//! - Candidates: plateau-aware local maxima, or CWT ridge lines when
//!   `use_scale_space` is set (see [`cwt`]).
//! - Refinement: each candidate snaps to the largest sample within
//!   ±`refine_window`; coincident results collapse.
//! - Merge: greedy suppression in descending value order; a candidate closer
//!   than `min_peak_distance` to an already kept one is dropped. Equal values
//!   keep the earlier index. Circular signals measure distance around the seam.
//! - Filter: candidates below `min_peak_value` are discarded.
//!
//! The result is sorted ascending and may be empty. Non-finite samples never
//! become peaks.

mod cwt;
mod options;

pub use options::{PeakOptions, ScaleRange};

use crate::error::Result;
use log::debug;
use std::cmp::Ordering;

/// Find salient local maxima of `signal`.
///
/// Fails only on options rejected by [`PeakOptions::validate`].
pub fn find_peaks(signal: &[f32], opts: &PeakOptions) -> Result<Vec<usize>> {
    opts.validate()?;
    if signal.is_empty() {
        return Ok(Vec::new());
    }

    let candidates = if opts.use_scale_space {
        cwt::ridge_candidates(signal, &opts.scale_range.scales(), opts.circular)
    } else {
        local_maxima(signal, opts.circular)
    };

    let mut refined: Vec<usize> = candidates
        .iter()
        .map(|&c| refine_candidate(signal, c, opts.refine_window, opts.circular))
        .collect();
    refined.sort_unstable();
    refined.dedup();

    let merged = suppress_close(signal, &refined, opts.min_peak_distance, opts.circular);
    let peaks: Vec<usize> = merged
        .into_iter()
        .filter(|&i| signal[i] >= opts.min_peak_value)
        .collect();

    debug!(
        "peaks: len={} scale_space={} circular={} candidates={} refined={} kept={}",
        signal.len(),
        opts.use_scale_space,
        opts.circular,
        candidates.len(),
        refined.len(),
        peaks.len()
    );
    Ok(peaks)
}

/// Distance between two indices, measured around the seam when `circular`.
#[inline]
pub(crate) fn index_distance(a: usize, b: usize, n: usize, circular: bool) -> usize {
    let d = a.abs_diff(b);
    if circular {
        d.min(n - d)
    } else {
        d
    }
}

/// Local maxima with plateau handling.
///
/// A plateau counts when both neighbours (where present) are strictly lower;
/// its middle sample (rounded down) is reported. Outside a non-circular
/// signal counts as lower. A constant signal has no maxima.
pub(crate) fn local_maxima(signal: &[f32], circular: bool) -> Vec<usize> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return if signal[0].is_finite() {
            vec![0]
        } else {
            Vec::new()
        };
    }

    // Starting a circular scan at the global minimum keeps every plateau of
    // maxima away from the seam.
    let start = if circular {
        match argmin_finite(signal) {
            Some(i) => i,
            None => return Vec::new(),
        }
    } else {
        0
    };
    let at = |k: usize| signal[(start + k) % n];

    let mut peaks = Vec::new();
    let mut i = 0usize;
    while i < n {
        let v = at(i);
        let mut j = i;
        while j + 1 < n && at(j + 1) == v {
            j += 1;
        }
        let left = if i > 0 {
            Some(at(i - 1))
        } else if circular {
            Some(at(n - 1))
        } else {
            None
        };
        let right = if j + 1 < n {
            Some(at(j + 1))
        } else if circular {
            Some(at(0))
        } else {
            None
        };
        let rises = left.map_or(true, |l| v > l);
        let falls = right.map_or(true, |r| v > r);
        if rises && falls && (left.is_some() || right.is_some()) {
            peaks.push((start + (i + j) / 2) % n);
        }
        i = j + 1;
    }
    peaks.sort_unstable();
    peaks
}

fn argmin_finite(signal: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in signal.iter().enumerate() {
        if !v.is_finite() {
            continue;
        }
        match best {
            Some((_, b)) if v >= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Snap `candidate` to the largest sample within ±`window`.
///
/// The candidate keeps its place on ties; otherwise the first maximum in
/// scan order wins.
fn refine_candidate(signal: &[f32], candidate: usize, window: usize, circular: bool) -> usize {
    let n = signal.len();
    let mut best = candidate;
    let mut best_val = signal[candidate];
    let mut consider = |idx: usize| {
        let v = signal[idx];
        if v > best_val || (best_val.is_nan() && v.is_finite()) {
            best = idx;
            best_val = v;
        }
    };
    if circular {
        let half = window.min(n / 2) as isize;
        for offset in -half..=half {
            let idx = (candidate as isize + offset).rem_euclid(n as isize) as usize;
            consider(idx);
        }
    } else {
        let lo = candidate.saturating_sub(window);
        let hi = candidate.saturating_add(window).min(n - 1);
        for idx in lo..=hi {
            consider(idx);
        }
    }
    best
}

/// Greedy minimum-distance suppression, strongest first.
fn suppress_close(signal: &[f32], candidates: &[usize], min_distance: usize, circular: bool) -> Vec<usize> {
    let n = signal.len();
    let mut order = candidates.to_vec();
    order.sort_by(|&a, &b| {
        signal[b]
            .partial_cmp(&signal[a])
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });

    let mut kept: Vec<usize> = Vec::with_capacity(order.len());
    for idx in order {
        if kept
            .iter()
            .all(|&k| index_distance(idx, k, n, circular) >= min_distance)
        {
            kept.push(idx);
        }
    }
    kept.sort_unstable();
    kept
}
