//! Valley Detection
//!
//! A tread groove sits further from the sensor than the surrounding rubber
//! and reflects less light, so it shows up as the lowest point of the
//! filtered voltage profile. This module finds that point for each sensor.
//!
//! Sensors are handled independently: a short scan on one sensor yields an
//! absent valley for that sensor only.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::{
    constants::sensors::MIN_VALLEY_SAMPLES,
    filter::{filtfilt, FilterCoefficients},
};

/// Valley of one sensor's filtered profile
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValleyResult {
    /// Minimum filtered voltage (mV), absent below the sample gate
    pub value: Option<f64>,
    /// Position of the first minimum in the filtered sequence
    pub index: Option<usize>,
    /// Samples the sensor delivered
    pub sample_count: usize,
}

impl ValleyResult {
    /// Result for a sensor that did not reach the sample gate
    pub fn absent(sample_count: usize) -> Self {
        Self {
            value: None,
            index: None,
            sample_count,
        }
    }

    /// Whether a valley was found
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }
}

/// Filters a scan and extracts its minimum
#[derive(Debug, Clone, Copy)]
pub struct ValleyDetector {
    coeffs: FilterCoefficients,
    min_samples: usize,
}

impl Default for ValleyDetector {
    fn default() -> Self {
        Self {
            coeffs: FilterCoefficients::default(),
            min_samples: MIN_VALLEY_SAMPLES,
        }
    }
}

impl ValleyDetector {
    /// Create a detector with custom coefficients and sample gate
    pub fn new(coeffs: FilterCoefficients, min_samples: usize) -> Self {
        Self {
            coeffs,
            min_samples,
        }
    }

    /// Detect the valley of one scan
    ///
    /// Scans shorter than the sample gate are not filtered at all.
    pub fn detect(&self, data: &[f64]) -> ValleyResult {
        self.detect_with_profile(data).0
    }

    /// Detect the valley and also return the filtered profile
    ///
    /// The profile is empty when the scan is below the sample gate.
    pub fn detect_with_profile(&self, data: &[f64]) -> (ValleyResult, Vec<f64>) {
        let sample_count = data.len();
        if sample_count < self.min_samples {
            return (ValleyResult::absent(sample_count), Vec::new());
        }

        let filtered = filtfilt(data, &self.coeffs);
        let valley = match argmin(&filtered) {
            Some((index, value)) => ValleyResult {
                value: Some(value),
                index: Some(index),
                sample_count,
            },
            None => ValleyResult::absent(sample_count),
        };
        (valley, filtered)
    }
}

/// Index and value of the first minimum
///
/// Ties resolve to the earliest index. NaN samples never win.
pub fn argmin(values: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, current)) if !(v < current) => {}
            _ if v.is_nan() => {}
            _ => best = Some((i, v)),
        }
    }
    best
}
