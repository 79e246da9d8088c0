//! Zero-Phase Butterworth Filtering
//!
//! ## Overview
//!
//! CCD scans are noisy at the pixel level: dust, ambient flicker and ADC
//! quantization all show up as spikes that would masquerade as a tread
//! groove. A second-order low-pass removes them, and running it forward and
//! then backward cancels the phase delay so the groove stays where it is.
//!
//! ## The Recurrence
//!
//! ```text
//! y[0] = b0*x[0]
//! y[1] = b0*x[1] + b1*x[0]             - a0*y[0]
//! y[i] = b0*x[i] + b1*x[i-1] + b2*x[i-2] - a0*y[i-1] - a1*y[i-2]   (i >= 2)
//! ```
//!
//! Initial conditions are zero and the signal is not padded or reflected at
//! either end. Compared with a textbook `filtfilt`, this leaves a transient
//! at both ends of the output (the last sample starts at `b0 * x`). The
//! calibration models were fitted on exactly this output, so the transient
//! is part of the contract.
//!
//! ## Edge Cases
//!
//! - Sequences shorter than [`FILTER_MIN_LEN`] are returned unchanged.
//! - The function is pure: the same input and coefficients always yield
//!   bit-identical output.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::constants::filter::{FILTER_A, FILTER_B, FILTER_MIN_LEN};

/// Second-order IIR coefficients
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterCoefficients {
    /// Feed-forward taps `b0, b1, b2`
    pub b: [f64; 3],
    /// Feedback taps `a1, a2` (leading 1 implicit)
    pub a: [f64; 2],
}

impl Default for FilterCoefficients {
    fn default() -> Self {
        Self {
            b: FILTER_B,
            a: FILTER_A,
        }
    }
}

impl FilterCoefficients {
    /// Create coefficients from explicit taps
    pub fn new(b: [f64; 3], a: [f64; 2]) -> Self {
        Self { b, a }
    }

    /// Steady-state gain of one pass for a constant input
    ///
    /// `(b0 + b1 + b2) / (1 + a0 + a1)`. A forward-backward pass applies it
    /// twice.
    pub fn dc_gain(&self) -> f64 {
        (self.b[0] + self.b[1] + self.b[2]) / (1.0 + self.a[0] + self.a[1])
    }

    /// All taps are finite numbers
    pub fn is_finite(&self) -> bool {
        self.b.iter().chain(self.a.iter()).all(|c| c.is_finite())
    }
}

/// Forward-backward low-pass filter bound to one set of coefficients
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroPhaseFilter {
    coeffs: FilterCoefficients,
}

impl ZeroPhaseFilter {
    /// Create a filter with the given coefficients
    pub fn new(coeffs: FilterCoefficients) -> Self {
        Self { coeffs }
    }

    /// Coefficients in use
    pub fn coefficients(&self) -> &FilterCoefficients {
        &self.coeffs
    }

    /// Filter `data` with zero phase distortion
    pub fn apply(&self, data: &[f64]) -> Vec<f64> {
        filtfilt(data, &self.coeffs)
    }
}

/// Single causal pass of the recurrence with zero initial conditions
pub fn lfilter(data: &[f64], coeffs: &FilterCoefficients) -> Vec<f64> {
    let FilterCoefficients { b, a } = *coeffs;
    let mut y = Vec::with_capacity(data.len());

    for i in 0..data.len() {
        let value = match i {
            0 => b[0] * data[0],
            1 => b[0] * data[1] + b[1] * data[0] - a[0] * y[0],
            _ => {
                b[0] * data[i] + b[1] * data[i - 1] + b[2] * data[i - 2]
                    - a[0] * y[i - 1]
                    - a[1] * y[i - 2]
            }
        };
        y.push(value);
    }

    y
}

/// Zero-phase filtering: forward pass, then the same pass over the reversed
/// output, reversed back
///
/// Output has the same length as `data`. Inputs shorter than three samples
/// are copied through unchanged.
pub fn filtfilt(data: &[f64], coeffs: &FilterCoefficients) -> Vec<f64> {
    if data.len() < FILTER_MIN_LEN {
        return data.to_vec();
    }

    let mut forward = lfilter(data, coeffs);
    forward.reverse();
    let mut backward = lfilter(&forward, coeffs);
    backward.reverse();
    backward
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn short_input_passes_through() {
        let coeffs = FilterCoefficients::default();
        assert_eq!(filtfilt(&[], &coeffs), Vec::<f64>::new());
        assert_eq!(filtfilt(&[1500.0], &coeffs), vec![1500.0]);
        assert_eq!(filtfilt(&[1500.0, 1600.0], &coeffs), vec![1500.0, 1600.0]);
    }

    #[test]
    fn forward_pass_seeds_with_scaled_sample() {
        let coeffs = FilterCoefficients::default();
        let y = lfilter(&[2000.0, 2000.0, 2000.0], &coeffs);
        assert_eq!(y[0], coeffs.b[0] * 2000.0);
        assert_eq!(
            y[1],
            coeffs.b[0] * 2000.0 + coeffs.b[1] * 2000.0 - coeffs.a[0] * y[0]
        );
    }

    #[test]
    fn constant_input_settles_to_squared_dc_gain() {
        let coeffs = FilterCoefficients::default();
        let level = 2000.0;
        let out = filtfilt(&[level; 400], &coeffs);

        let expected = level * coeffs.dc_gain() * coeffs.dc_gain();
        let middle = out[200];
        assert!((middle - expected).abs() < 1e-6, "{middle} vs {expected}");
    }

    #[test]
    fn unpadded_tail_starts_from_b0() {
        // Backward pass begins at the last sample with zero history.
        let coeffs = FilterCoefficients::default();
        let forward = lfilter(&[2000.0; 100], &coeffs);
        let out = filtfilt(&[2000.0; 100], &coeffs);
        assert_eq!(out[99], coeffs.b[0] * forward[99]);
    }

    #[test]
    fn filter_struct_matches_free_function() {
        let coeffs = FilterCoefficients::new([0.2, 0.4, 0.2], [-0.5, 0.1]);
        let data: Vec<f64> = (0..64).map(|i| (i % 7) as f64 * 100.0).collect();
        let filter = ZeroPhaseFilter::new(coeffs);
        assert_eq!(filter.coefficients(), &coeffs);
        assert_eq!(filter.apply(&data), filtfilt(&data, &coeffs));
    }

    #[test]
    fn non_finite_taps_are_detected() {
        assert!(FilterCoefficients::default().is_finite());
        assert!(!FilterCoefficients::new([f64::NAN, 0.0, 0.0], [0.0, 0.0]).is_finite());
    }

    proptest! {
        #[test]
        fn preserves_length(data in prop::collection::vec(0.0f64..3300.0, 0..600)) {
            let out = filtfilt(&data, &FilterCoefficients::default());
            prop_assert_eq!(out.len(), data.len());
        }

        #[test]
        fn is_deterministic(data in prop::collection::vec(0.0f64..3300.0, 0..300)) {
            let coeffs = FilterCoefficients::default();
            let first = filtfilt(&data, &coeffs);
            let second = filtfilt(&data, &coeffs);
            prop_assert_eq!(
                first.iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
                second.iter().map(|v| v.to_bits()).collect::<Vec<_>>()
            );
        }
    }
}
