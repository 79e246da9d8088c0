//! ADC Unit Conversion
//!
//! The scan head digitizes with a 12-bit converter against a 3.3 V
//! reference. Logs carry millivolts; diagnostics are also reported as raw
//! codes so they can be compared with firmware dumps.
//!
//! ```text
//! code = mV / 3300 * 4095
//! ```
//!
//! Codes are not clamped or rounded; a value outside `0..=4095` means the
//! log itself is out of range.

use crate::constants::sensors::{ADC_MAX_CODE, ADC_REFERENCE_MV};

/// Convert millivolts to (fractional) ADC codes
#[inline]
pub fn millivolts_to_adc(millivolts: f64) -> f64 {
    millivolts / ADC_REFERENCE_MV * ADC_MAX_CODE
}

/// Convert ADC codes back to millivolts
#[inline]
pub fn adc_to_millivolts(code: f64) -> f64 {
    code / ADC_MAX_CODE * ADC_REFERENCE_MV
}
