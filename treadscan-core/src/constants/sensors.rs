//! CCD Array Specifications
//!
//! Geometry of the six-sensor linear array, the pixel window that the
//! calibration was trained on, and the ADC that digitizes each pixel.

// ===== ARRAY GEOMETRY =====

/// Number of linear CCD sensors on the scan head.
///
/// Every assessment carries exactly this many slots, present or not.
pub const SENSOR_COUNT: usize = 6;

/// Sensor looking at the left edge of the tread (1-based).
pub const LEFT_EDGE_SENSOR: u8 = 1;

/// Sensor looking at the right edge of the tread (1-based).
pub const RIGHT_EDGE_SENSOR: u8 = 6;

/// Number of grooves assumed by the single-sensor fallback.
pub const GROOVE_COUNT: usize = 4;

// ===== PIXEL WINDOW =====

/// First pixel index retained from a sensor scan (inclusive).
///
/// Pixels outside the window see the scan head housing, not the tire.
/// Must match the window used when the calibration was fitted.
pub const PIXEL_WINDOW_MIN: u32 = 280;

/// Last pixel index retained from a sensor scan (inclusive).
pub const PIXEL_WINDOW_MAX: u32 = 1080;

/// Minimum samples a sensor needs before a valley is searched for.
///
/// Shorter scans are dominated by the filter's edge transients.
pub const MIN_VALLEY_SAMPLES: usize = 50;

// ===== EDGE BRIGHTNESS RULE =====

/// Filtered voltage above which an edge pixel counts as bright (mV).
///
/// A bright edge means the sensor sees sidewall or background instead of
/// tread rubber.
pub const EDGE_THRESHOLD_MV: f64 = 2800.0;

/// Bright pixels each edge sensor needs for the high-edge branch.
pub const EDGE_MIN_COUNT: usize = 2;

// ===== ADC =====

/// Resolution of the pixel ADC (bits).
pub const ADC_BITS: u32 = 12;

/// Largest code the ADC produces.
pub const ADC_MAX_CODE: f64 = ((1u32 << ADC_BITS) - 1) as f64;

/// ADC reference voltage (mV).
pub const ADC_REFERENCE_MV: f64 = 3300.0;
