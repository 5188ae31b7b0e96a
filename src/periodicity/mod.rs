//! Dominant-period estimation for 1-D edge-energy signals.
//!
//! Overview
//! - Sweeps the integer DFT bins covering scales in `[2, max_scale]` and
//!   records the magnitude envelope.
//! - Accepts the **first** local peak clearing a fraction of the global
//!   maximum. A period-S comb has harmonics at k, 2k, 3k, … and a harmonic is
//!   often numerically dominant; scanning from the low-frequency end biases
//!   the choice toward the fundamental, i.e. the largest plausible scale.
//! - Refines the chosen bin by parabolic interpolation of the magnitude
//!   envelope and derives the grid offset from the phase at the refined bin.
//!
//! The fitter never fails: flat or degenerate signals produce
//! `{scale: 1, offset: 0, confidence: 0}`, and a sweep without a qualifying
//! peak falls back to the strongest scanned bin without refinement.

use crate::spectrum::{probe, DftSample};
use log::{debug, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::f64::consts::PI;

/// Signals with less total energy than this are treated as flat.
const FLAT_ENERGY_EPS: f64 = 1e-4;
/// Fraction of the global maximum a local peak must clear to be accepted.
const PEAK_FRACTION: f64 = 0.4;

/// Per-axis periodicity estimate.
///
/// `scale` is the number of high-resolution pixels per logical pixel,
/// `offset` the position of the first grid line modulo `scale`, and
/// `confidence` the uncalibrated ratio of peak magnitude to mean per-period
/// energy; comparative across axes or images, never a probability.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AxisEstimate {
    pub scale: f64,
    pub offset: f64,
    pub confidence: f64,
}

impl AxisEstimate {
    /// The estimate reported for empty or flat signals.
    pub fn degenerate() -> Self {
        Self {
            scale: 1.0,
            offset: 0.0,
            confidence: 0.0,
        }
    }
}

impl Default for AxisEstimate {
    fn default() -> Self {
        Self::degenerate()
    }
}

/// Internals of one fit, surfaced in the analysis report.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FitTrace {
    /// Signal length.
    pub n: usize,
    /// Scanned bin band (inclusive).
    pub min_k: usize,
    pub max_k: usize,
    pub bins_scanned: usize,
    pub total_energy: f64,
    pub global_max_magnitude: f64,
    /// Integer bin accepted by the first-peak rule, if any.
    pub selected_bin: Option<usize>,
    /// Bin after parabolic refinement (equals the integer bin on fallback).
    pub refined_k: f64,
    /// True when no bin cleared the peak test and the strongest bin was used.
    pub fallback: bool,
    /// True when the signal was empty or flat and the sweep was skipped.
    pub degenerate: bool,
}

/// Fit the dominant period of `signal`, searching scales in `[2, max_scale]`.
pub fn fit(signal: &[f64], max_scale: usize) -> AxisEstimate {
    fit_with_trace(signal, max_scale).0
}

/// Like [`fit`], additionally returning the sweep internals.
pub fn fit_with_trace(signal: &[f64], max_scale: usize) -> (AxisEstimate, FitTrace) {
    let n = signal.len();
    let total_energy: f64 = signal.iter().sum();

    if n < 2 || total_energy < FLAT_ENERGY_EPS {
        debug!("fit: degenerate signal n={} energy={:.6}", n, total_energy);
        let trace = FitTrace {
            n,
            total_energy,
            degenerate: true,
            ..FitTrace::default()
        };
        return (AxisEstimate::degenerate(), trace);
    }

    let min_k = (n / max_scale.max(1)).max(1);
    let max_k = n / 2;
    if max_k < min_k {
        warn!("fit: empty scan band n={} max_scale={}", n, max_scale);
        let trace = FitTrace {
            n,
            min_k,
            max_k,
            total_energy,
            degenerate: true,
            ..FitTrace::default()
        };
        return (AxisEstimate::degenerate(), trace);
    }

    // Magnitude envelope over the integer band. Bins are independent, so the
    // sweep parallelizes trivially.
    let magnitudes: Vec<f64> = (min_k..max_k + 1)
        .into_par_iter()
        .map(|k| probe(signal, k as f64).magnitude)
        .collect();
    let global_max = magnitudes.iter().cloned().fold(0.0f64, f64::max);

    let selected = select_first_peak(&magnitudes, min_k, max_k, global_max);

    let (refined_k, selected_bin, fallback) = match selected {
        Some(k) => {
            let i = k - min_k;
            let refined = refine_parabolic(
                k as f64,
                magnitudes[i - 1],
                magnitudes[i],
                magnitudes[i + 1],
            );
            (refined, Some(k), false)
        }
        None => {
            // Strongest scanned bin, smallest k on ties, no refinement.
            let mut best = min_k;
            let mut best_mag = f64::MIN;
            for (i, &m) in magnitudes.iter().enumerate() {
                if m > best_mag {
                    best_mag = m;
                    best = min_k + i;
                }
            }
            debug!("fit: no qualifying peak, falling back to k={}", best);
            (best as f64, Some(best), true)
        }
    };

    let estimate = estimate_at(signal, n, refined_k, total_energy);
    debug!(
        "fit: n={} band=[{}, {}] k={:.3} scale={:.3} offset={:.3} conf={:.3} fallback={}",
        n, min_k, max_k, refined_k, estimate.scale, estimate.offset, estimate.confidence, fallback
    );

    let trace = FitTrace {
        n,
        min_k,
        max_k,
        bins_scanned: magnitudes.len(),
        total_energy,
        global_max_magnitude: global_max,
        selected_bin,
        refined_k,
        fallback,
        degenerate: false,
    };
    (estimate, trace)
}

/// First interior bin that is a local maximum above the acceptance bar.
///
/// The scan range `min_k+1 ..= max_k-1` guarantees both neighbors exist, so
/// the parabolic refinement never reads past the envelope.
fn select_first_peak(
    magnitudes: &[f64],
    min_k: usize,
    max_k: usize,
    global_max: f64,
) -> Option<usize> {
    let bar = PEAK_FRACTION * global_max;
    for k in min_k + 1..max_k {
        let i = k - min_k;
        if magnitudes[i] > magnitudes[i - 1] && magnitudes[i] > magnitudes[i + 1] && magnitudes[i] > bar
        {
            return Some(k);
        }
    }
    None
}

/// Three-point parabolic interpolation of the peak location.
///
/// Applied unconditionally when the denominator is nonzero, even if the
/// result lands outside `[k-1, k+1]`; the envelope keeps it bounded in
/// practice.
fn refine_parabolic(k: f64, left: f64, center: f64, right: f64) -> f64 {
    let d = left - 2.0 * center + right;
    if d == 0.0 {
        k
    } else {
        k + (left - right) / (2.0 * d)
    }
}

/// Evaluate scale, offset and confidence at the (possibly fractional) bin.
fn estimate_at(signal: &[f64], n: usize, k: f64, total_energy: f64) -> AxisEstimate {
    if k <= 0.0 || !k.is_finite() {
        warn!("fit: refined bin {k} is unusable");
        return AxisEstimate::degenerate();
    }

    let DftSample { magnitude, phase } = probe(signal, k);
    let scale = n as f64 / k;

    // For a delta train at O, O+S, O+2S, … the coefficient at k=N/S has
    // arg X = −2π·O/S, so O = −φ·S/(2π), reported modulo S.
    let mut offset = (-phase * scale / (2.0 * PI)).rem_euclid(scale);
    if offset >= scale {
        offset -= scale;
    }

    let confidence = magnitude / (total_energy / scale);
    AxisEstimate {
        scale,
        offset,
        confidence,
    }
}
