//! Direct evaluation of single DFT coefficients at arbitrary real bins.
//!
//! The periodicity fitter only needs O(N) low-frequency bins plus one
//! evaluation at a non-integer bin after parabolic refinement, which a plain
//! FFT cannot provide. Evaluating `X(k) = Σ s[n]·e^{−i·2π·k·n/N}` directly is
//! the simplest correct implementation and keeps the whole sweep in double
//! precision.

use num_complex::Complex;
use std::f64::consts::PI;

/// Magnitude and phase of one Fourier coefficient.
///
/// `phase` is `atan2(Im, Re)` in `(−π, π]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DftSample {
    pub magnitude: f64,
    pub phase: f64,
}

/// Evaluate the DFT coefficient of `signal` at bin `k`, which may be any
/// real number. No windowing is applied.
pub fn probe(signal: &[f64], k: f64) -> DftSample {
    let n = signal.len();
    if n == 0 {
        return DftSample::default();
    }

    let step = -2.0 * PI * k / n as f64;
    let mut acc = Complex::new(0.0f64, 0.0);
    for (i, &v) in signal.iter().enumerate() {
        acc += Complex::cis(step * i as f64) * v;
    }

    DftSample {
        magnitude: acc.norm(),
        phase: acc.arg(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn zero_bin_sums_the_signal() {
        let signal = [1.0, 2.0, 3.0, 4.0];
        let sample = probe(&signal, 0.0);
        assert!(approx_eq(sample.magnitude, 10.0));
        assert!(approx_eq(sample.phase, 0.0));
    }

    #[test]
    fn delta_train_peaks_at_its_bin() {
        // Impulses every 4 samples over N=16 -> fundamental at k=4.
        let mut signal = [0.0f64; 16];
        for i in (0..16).step_by(4) {
            signal[i] = 1.0;
        }
        let on_peak = probe(&signal, 4.0);
        let off_peak = probe(&signal, 3.0);
        assert!(approx_eq(on_peak.magnitude, 4.0));
        assert!(off_peak.magnitude < 1e-9, "off={}", off_peak.magnitude);
    }

    #[test]
    fn phase_encodes_the_train_offset() {
        // Impulses at 1, 5, 9, 13 over N=16: arg X(4) = -2π·(1/4).
        let mut signal = [0.0f64; 16];
        for i in (1..16).step_by(4) {
            signal[i] = 1.0;
        }
        let sample = probe(&signal, 4.0);
        let expected = -2.0 * PI / 4.0;
        let wrapped = (sample.phase - expected).rem_euclid(2.0 * PI);
        assert!(
            wrapped < 1e-9 || (2.0 * PI - wrapped) < 1e-9,
            "phase={} expected={}",
            sample.phase,
            expected
        );
    }

    #[test]
    fn probe_is_linear_in_the_signal() {
        let s1 = [0.4, 1.7, 0.1, 2.2, 0.9, 0.3];
        let s2 = [1.1, 0.2, 0.8, 0.5, 1.6, 0.7];
        let (a, b) = (2.5, -1.25);
        let combined: Vec<f64> = s1.iter().zip(&s2).map(|(x, y)| a * x + b * y).collect();

        for k in [1.0, 2.0, 2.5] {
            let p1 = probe(&s1, k);
            let p2 = probe(&s2, k);
            let pc = probe(&combined, k);
            let re = a * p1.magnitude * p1.phase.cos() + b * p2.magnitude * p2.phase.cos();
            let im = a * p1.magnitude * p1.phase.sin() + b * p2.magnitude * p2.phase.sin();
            assert!(approx_eq(pc.magnitude * pc.phase.cos(), re), "k={k}");
            assert!(approx_eq(pc.magnitude * pc.phase.sin(), im), "k={k}");
        }
    }
}
