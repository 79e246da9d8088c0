//! Tread Depth Limits
//!
//! Thresholds for the condition label. All comparisons are strict `<`, so a
//! depth exactly on a limit falls into the better class.

/// Legal minimum tread depth (mm). Below this the tire must be replaced.
pub const LEGAL_LIMIT_MM: f64 = 1.6;

/// Advisory limit (mm). Below this replacement should be planned.
pub const NEAR_LIMIT_MM: f64 = 2.0;

/// Depth at or above which the tread is considered good (mm).
pub const GOOD_DEPTH_MM: f64 = 3.0;

/// Number of shallowest sensors that summarize a scan.
pub const WORST_SENSOR_COUNT: usize = 4;
