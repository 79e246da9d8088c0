//! Calibration Model Constants
//!
//! Both depth models were fitted offline on valley voltages produced by the
//! zero-phase filter in [`crate::filter`]. A model is a min-max scaling domain
//! followed by a straight line, so each one is four numbers.

// ===== DEEP MODEL =====

/// Lower bound of the deep model's scaling domain (mV).
///
/// Fitted on tires with 8 mm of tread or more.
pub const DEEP_MODEL_MIN_MV: f64 = 1717.81055814;

/// Upper bound of the deep model's scaling domain (mV).
pub const DEEP_MODEL_MAX_MV: f64 = 2642.29232265;

/// Regression slope of the deep model (mm per unit of scaled voltage).
///
/// Negative: a brighter valley means a shallower groove.
pub const DEEP_MODEL_SLOPE: f64 = -1.80321265;

/// Regression intercept of the deep model (mm).
pub const DEEP_MODEL_INTERCEPT: f64 = 11.879767975539409;

// ===== SHALLOW MODEL =====

/// Lower bound of the shallow model's scaling domain (mV).
///
/// Fitted on tires with 0-5 mm of tread.
pub const SHALLOW_MODEL_MIN_MV: f64 = 1503.08228732;

/// Upper bound of the shallow model's scaling domain (mV).
pub const SHALLOW_MODEL_MAX_MV: f64 = 2954.71073448;

/// Regression slope of the shallow model (mm per unit of scaled voltage).
pub const SHALLOW_MODEL_SLOPE: f64 = -0.29599108;

/// Regression intercept of the shallow model (mm).
pub const SHALLOW_MODEL_INTERCEPT: f64 = 0.9643865647697497;

// ===== SINGLE-SENSOR GROOVE LINE =====

/// Slope of the single-sensor groove calibration (mm per mV).
pub const GROOVE_SLOPE_MM_PER_MV: f64 = 0.00422;

/// Intercept of the single-sensor groove calibration (mm).
pub const GROOVE_INTERCEPT_MM: f64 = 0.0;

// ===== OVERRIDE PATH =====

/// Literal depths reported for sensors 1-4 when the override path fires (mm).
///
/// Sensors 5 and 6 carry no depth on this path.
pub const OVERRIDE_DEPTHS_MM: [f64; 4] = [1.28, 2.87, 2.94, 1.8];
