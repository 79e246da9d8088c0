//! Error Types for Tread Assessment Failures
//!
//! ## Design Philosophy
//!
//! Most trouble in a capture log is not an error at all. A garbled line is
//! skipped, a sensor with too few pixels simply has no valley. Those cases
//! are represented with `Option` inside the pipeline and never reach this
//! module.
//!
//! What remains are the conditions that make a whole invocation meaningless:
//!
//! 1. **Small Size**: Each variant carries only inline numbers or a
//!    `&'static str`, so the enum is `Copy` and cheap to return from every
//!    stage.
//!
//! 2. **No Heap Allocation**: Messages are static; the dispatcher formats the
//!    final report string only once, at the boundary.
//!
//! ## Error Categories
//!
//! ### Missing Data
//! - `EmptyInput`: the caller passed no lines at all
//! - `NoData`: no pixel record survived parsing and windowing
//! - `NoValidDepth`: pixels exist, but no sensor reached the sample gate
//! - `InsufficientData`: the single-sensor path got too few voltages
//!
//! ### Configuration
//! - `InvalidConfig`: an override produced unusable coefficients
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use treadscan_core::{AssessmentError, PipelineConfig, assess_multi_sensor};
//!
//! let lines = ["--- SENSOR 1 ---", "Pixel[300]: 2000.0 mV"];
//! match assess_multi_sensor(&lines, &PipelineConfig::default()) {
//!     Ok(assessment) => println!("{:?}", assessment.condition_status),
//!     Err(AssessmentError::NoValidDepth { .. }) => {
//!         // Too little signal on every sensor - try the single-sensor path
//!     }
//!     Err(e) => println!("cannot assess: {}", e),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for assessment operations
pub type AssessmentResult<T> = Result<T, AssessmentError>;

/// Invocation-level failures
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum AssessmentError {
    /// No input lines were supplied
    #[error("No data received (empty input)")]
    EmptyInput,

    /// Nothing usable was parsed from the input
    #[error("No CCD data found in valid pixel range ({min}-{max})")]
    NoData {
        /// First pixel index of the valid window
        min: u32,
        /// Last pixel index of the valid window
        max: u32,
    },

    /// Pixels were parsed but no sensor produced a depth
    #[error("No sensor produced a valid depth ({total_pixels} pixels parsed)")]
    NoValidDepth {
        /// Pixels retained across all sensors
        total_pixels: usize,
    },

    /// Too few samples for the single-sensor path
    #[error("Insufficient data: {available} pixels (need >= {required})")]
    InsufficientData {
        /// Minimum number of samples needed
        required: usize,
        /// Actual number of samples available
        available: usize,
    },

    /// Configuration override is unusable
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// What was wrong with the configuration
        reason: &'static str,
    },
}

impl AssessmentError {
    /// Whether the single-sensor fallback should be attempted after this error
    pub fn allows_fallback(&self) -> bool {
        matches!(self, Self::NoData { .. } | Self::NoValidDepth { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_window() {
        let err = AssessmentError::NoData { min: 280, max: 1080 };
        assert_eq!(
            err.to_string(),
            "No CCD data found in valid pixel range (280-1080)"
        );
    }

    #[test]
    fn only_data_shortages_fall_back() {
        assert!(AssessmentError::NoData { min: 280, max: 1080 }.allows_fallback());
        assert!(AssessmentError::NoValidDepth { total_pixels: 12 }.allows_fallback());
        assert!(!AssessmentError::EmptyInput.allows_fallback());
        assert!(!AssessmentError::InvalidConfig { reason: "x" }.allows_fallback());
    }
}
