//! Continuous-wavelet candidate stage.
//!
//! The signal is convolved with Ricker wavelets at each width. Local maxima
//! with a positive response are linked across widths from the coarsest to the
//! finest; a chain (ridge) that persists over at least half of the widths marks
//! a candidate at its finest position. Isolated noise spikes only survive the
//! narrow widths and never form a long ridge.

use super::{index_distance, local_maxima};

/// Ridges may skip this many widths before they are closed.
const MAX_RIDGE_GAP: usize = 2;

/// Maxima weaker than this fraction of the strongest response in their row
/// are treated as numerical noise.
const MIN_RESPONSE_FRACTION: f32 = 1e-3;

#[derive(Clone, Copy, Debug)]
struct Ridge {
    position: usize,
    length: usize,
    gap: usize,
}

/// Ricker (Mexican hat) wavelet sampled on `points` samples with width `a`.
fn ricker(points: usize, a: f32) -> Vec<f32> {
    let amplitude = 2.0 / ((3.0 * a).sqrt() * std::f32::consts::PI.powf(0.25));
    let wsq = a * a;
    let center = (points as f32 - 1.0) * 0.5;
    (0..points)
        .map(|i| {
            let x = i as f32 - center;
            let xsq = x * x;
            amplitude * (1.0 - xsq / wsq) * (-xsq / (2.0 * wsq)).exp()
        })
        .collect()
}

/// Wavelet response at one width, same length as the input.
pub(crate) fn cwt_row(signal: &[f32], width: f32, circular: bool) -> Vec<f32> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }
    let mut points = ((10.0 * width).round() as usize).clamp(1, n);
    if points % 2 == 0 {
        points -= 1;
    }
    let kernel = ricker(points, width);
    let half = (points / 2) as isize;

    (0..n)
        .map(|i| {
            let mut acc = 0.0f32;
            for (k, &c) in kernel.iter().enumerate() {
                let j = i as isize + k as isize - half;
                let sample = if circular {
                    signal[j.rem_euclid(n as isize) as usize]
                } else if j < 0 || j >= n as isize {
                    0.0
                } else {
                    signal[j as usize]
                };
                acc += c * sample;
            }
            acc
        })
        .collect()
}

/// Candidate indices from ridge lines across `widths` (ascending order).
pub(crate) fn ridge_candidates(signal: &[f32], widths: &[f32], circular: bool) -> Vec<usize> {
    let n = signal.len();
    if n == 0 || widths.is_empty() {
        return Vec::new();
    }

    let mut active: Vec<Ridge> = Vec::new();
    let mut closed: Vec<Ridge> = Vec::new();
    for &width in widths.iter().rev() {
        let row = cwt_row(signal, width, circular);
        let max_dist = ((width / 4.0).ceil() as usize).max(1);
        let row_max = row.iter().copied().fold(0.0f32, f32::max);
        let floor = row_max * MIN_RESPONSE_FRACTION;
        let maxima: Vec<usize> = local_maxima(&row, circular)
            .into_iter()
            .filter(|&i| row[i] > floor)
            .collect();

        let mut taken = vec![false; maxima.len()];
        for ridge in active.iter_mut() {
            let nearest = maxima
                .iter()
                .enumerate()
                .filter(|(k, _)| !taken[*k])
                .map(|(k, &m)| (k, m, index_distance(ridge.position, m, n, circular)))
                .filter(|&(_, _, d)| d <= max_dist)
                .min_by_key(|&(_, _, d)| d);
            match nearest {
                Some((k, m, _)) => {
                    taken[k] = true;
                    ridge.position = m;
                    ridge.length += 1;
                    ridge.gap = 0;
                }
                None => ridge.gap += 1,
            }
        }

        let (alive, done): (Vec<Ridge>, Vec<Ridge>) =
            active.into_iter().partition(|r| r.gap <= MAX_RIDGE_GAP);
        closed.extend(done);
        active = alive;
        for (k, &m) in maxima.iter().enumerate() {
            if !taken[k] {
                active.push(Ridge {
                    position: m,
                    length: 1,
                    gap: 0,
                });
            }
        }
    }
    closed.extend(active);

    let min_length = widths.len().div_ceil(2);
    let mut out: Vec<usize> = closed
        .into_iter()
        .filter(|r| r.length >= min_length)
        .map(|r| r.position)
        .collect();
    out.sort_unstable();
    out.dedup();
    out
}
