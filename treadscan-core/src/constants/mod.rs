//! Constants for Treadscan Core
//!
//! This module provides the centralized, documented constants used throughout
//! the tread-depth engine. Every numeric value that a capture log or a
//! calibration run depends on lives here, with its unit in the name.
//!
//! ## Organization
//!
//! Constants are grouped by domain:
//! - **Filter**: Butterworth low-pass coefficients for the zero-phase filter
//! - **Calibration**: Fitted depth models and the single-sensor groove line
//! - **Sensors**: CCD array geometry, pixel window and ADC characteristics
//! - **Condition**: Legal and advisory tread-depth limits
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Treat them as defaults: every one can be overridden through
//!    [`PipelineConfig`](crate::config::PipelineConfig)
//! 3. Calibration values are fixed outputs of an offline fit; do not adjust
//!    them without refitting against the same filter variant

/// Butterworth low-pass filter coefficients.
pub mod filter;

/// Fitted calibration models for depth prediction.
pub mod calibration;

/// CCD sensor array geometry, pixel window and ADC conversion.
pub mod sensors;

/// Tread-depth limits used for condition classification.
pub mod condition;

pub use filter::{FILTER_A, FILTER_B};

pub use calibration::{
    DEEP_MODEL_INTERCEPT, DEEP_MODEL_MAX_MV, DEEP_MODEL_MIN_MV, DEEP_MODEL_SLOPE,
    GROOVE_INTERCEPT_MM, GROOVE_SLOPE_MM_PER_MV, SHALLOW_MODEL_INTERCEPT, SHALLOW_MODEL_MAX_MV,
    SHALLOW_MODEL_MIN_MV, SHALLOW_MODEL_SLOPE,
};

pub use sensors::{
    ADC_MAX_CODE, ADC_REFERENCE_MV, EDGE_MIN_COUNT, EDGE_THRESHOLD_MV, GROOVE_COUNT,
    MIN_VALLEY_SAMPLES, PIXEL_WINDOW_MAX, PIXEL_WINDOW_MIN, SENSOR_COUNT,
};

pub use condition::{
    LEGAL_LIMIT_MM, NEAR_LIMIT_MM, GOOD_DEPTH_MM, WORST_SENSOR_COUNT,
};
