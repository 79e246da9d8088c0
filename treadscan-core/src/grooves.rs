//! Single-Sensor Groove Segmentation
//!
//! Some scan heads carry a single CCD sensor swept across the whole tread.
//! Their logs have no sensor headers, just one continuous run of pixel
//! records. Such a capture is treated as four grooves laid side by side.
//!
//! ## Algorithm
//!
//! 1. Filter the whole run with the zero-phase filter.
//! 2. Cut the filtered run into four contiguous segments. With `k = n / 4`
//!    the bounds are `[0,k) [k,2k) [2k,3k) [3k,n)`, so the last segment
//!    absorbs the remainder.
//! 3. Each segment's mean voltage goes through one global linear
//!    calibration, floored at zero, and is rounded to two decimals.
//!
//! ## Wear Flag
//!
//! A tire is worn when any groove with a positive thickness is below the
//! worn limit. The test runs on the rounded thicknesses, so a groove reported
//! as `1.60` passes and one reported as `0.00` does not count as positive. When no groove produced a positive thickness the reading is
//! useless, and the tire is flagged worn rather than passed.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::{
    config::{GrooveCalibration, PipelineConfig},
    constants::{
        condition::LEGAL_LIMIT_MM,
        sensors::{GROOVE_COUNT, MIN_VALLEY_SAMPLES},
    },
    errors::{AssessmentError, AssessmentResult},
    filter::{filtfilt, FilterCoefficients},
    parser::ParseStats,
    report::round2,
    stats::{mean, mean_std},
    units::millivolts_to_adc,
};

/// Result of segmenting one continuous scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrooveAssessment {
    /// Thickness per groove (mm, two decimals), left to right
    pub grooves: [f64; GROOVE_COUNT],
    /// Whether the tire should be flagged
    pub is_worn: bool,
    /// Smallest positive groove thickness, 0 when there is none
    pub min_groove_mm: f64,
    /// Mean of the filtered scan (mV)
    pub voltage_mean_mv: f64,
    /// Population standard deviation of the filtered scan (mV)
    pub voltage_std_mv: f64,
    /// `voltage_mean_mv` in ADC codes
    pub adc_mean: f64,
    /// `voltage_std_mv` in ADC codes
    pub adc_std: f64,
    /// Raw voltages used
    pub pixel_count: usize,
    /// Line-level statistics from parsing, when the scan came from a log
    pub stats: ParseStats,
}

/// Splits one filtered scan into four calibrated grooves
#[derive(Debug, Clone, Copy)]
pub struct GrooveSegmenter {
    coeffs: FilterCoefficients,
    calibration: GrooveCalibration,
    worn_limit_mm: f64,
    min_samples: usize,
}

impl Default for GrooveSegmenter {
    fn default() -> Self {
        Self {
            coeffs: FilterCoefficients::default(),
            calibration: GrooveCalibration::default(),
            worn_limit_mm: LEGAL_LIMIT_MM,
            min_samples: MIN_VALLEY_SAMPLES,
        }
    }
}

impl GrooveSegmenter {
    /// Create a segmenter from explicit parts
    pub fn new(
        coeffs: FilterCoefficients,
        calibration: GrooveCalibration,
        worn_limit_mm: f64,
        min_samples: usize,
    ) -> Self {
        Self {
            coeffs,
            calibration,
            worn_limit_mm,
            min_samples,
        }
    }

    /// Create a segmenter from a pipeline configuration
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(
            config.filter,
            config.groove,
            config.worn_limit_mm,
            config.min_valley_samples,
        )
    }

    /// Segment a run of raw voltages
    pub fn segment(&self, voltages: &[f64]) -> AssessmentResult<GrooveAssessment> {
        if voltages.len() < self.min_samples {
            return Err(AssessmentError::InsufficientData {
                required: self.min_samples,
                available: voltages.len(),
            });
        }

        let filtered: Vec<f64> = filtfilt(voltages, &self.coeffs);
        let grooves = segment_bounds(filtered.len()).map(|(start, end)| {
            mean(&filtered[start..end])
                .map(|v| round2(self.calibration.thickness_mm(v)))
                .unwrap_or(0.0)
        });

        let (is_worn, min_groove_mm) = self.wear(&grooves);
        let (voltage_mean_mv, voltage_std_mv) = mean_std(&filtered).unwrap_or((0.0, 0.0));

        Ok(GrooveAssessment {
            grooves,
            is_worn,
            min_groove_mm,
            voltage_mean_mv,
            voltage_std_mv,
            adc_mean: millivolts_to_adc(voltage_mean_mv),
            adc_std: millivolts_to_adc(voltage_std_mv),
            pixel_count: voltages.len(),
            stats: ParseStats::default(),
        })
    }

    fn wear(&self, grooves: &[f64; GROOVE_COUNT]) -> (bool, f64) {
        let positive = grooves.iter().copied().filter(|&g| g > 0.0);
        match positive.clone().reduce(f64::min) {
            Some(min) => (positive.clone().any(|g| g < self.worn_limit_mm), min),
            None => (true, 0.0),
        }
    }
}

/// Half-open bounds of the four segments of an `n`-sample scan
pub fn segment_bounds(n: usize) -> [(usize, usize); GROOVE_COUNT] {
    let k = n / GROOVE_COUNT;
    core::array::from_fn(|i| {
        let end = if i + 1 == GROOVE_COUNT { n } else { (i + 1) * k };
        (i * k, end)
    })
}
