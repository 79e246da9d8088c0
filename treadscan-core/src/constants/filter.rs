//! Zero-Phase Filter Coefficients
//!
//! Second-order Butterworth low-pass designed for a 548 Hz pixel clock with a
//! 10 Hz cutoff (normalized cutoff 10 / 274). The values are the rounded taps
//! the deployed calibration was fitted against, so they are kept verbatim
//! rather than recomputed from the design parameters.

/// Feed-forward taps `b0, b1, b2`.
///
/// Symmetric as expected for a low-pass biquad; `b1 = 2 * b0` up to rounding.
pub const FILTER_B: [f64; 3] = [0.0674553, 0.134911, 0.0674553];

/// Feedback taps `a1, a2` (the leading `a0 = 1` is implicit).
///
/// Stored in the sign convention of the recurrence:
/// `y[i] = ... - a[0]*y[i-1] - a[1]*y[i-2]`.
pub const FILTER_A: [f64; 2] = [-1.14298, 0.412801];

/// Shortest sequence the recurrence is applied to.
///
/// Below this the filter is a no-op and returns its input unchanged.
pub const FILTER_MIN_LEN: usize = 3;
