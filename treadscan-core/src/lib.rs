//! Tread-depth engine for Treadscan
//!
//! Turns CCD reflectance scans of a tire into tread depth in millimeters
//! and a condition label. Each of up to six linear sensors sees the tread
//! groove as a voltage valley; the valley depth maps onto tread depth
//! through a fitted calibration model.
//!
//! Key constraints:
//! - Pure computation, no I/O below the dispatcher
//! - Configuration passed explicitly, never global
//! - Numerical modules build without `std` (with `alloc`)
//!
//! ```no_run
//! use treadscan_core::{dispatch, PipelineConfig};
//!
//! let log = std::fs::read_to_string("capture.log").unwrap();
//! let lines: Vec<&str> = log.lines().collect();
//!
//! let report = dispatch(&lines, &PipelineConfig::default());
//! if report.success {
//!     println!("{}", report.message);
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[macro_use]
mod logging;

pub mod classifier;
pub mod config;
pub mod constants;
pub mod errors;
pub mod filter;
pub mod grooves;
pub mod parser;
pub mod pipeline;
pub mod predictor;
pub mod profile;
pub mod report;
pub mod selector;
pub mod stats;
pub mod types;
pub mod units;
pub mod valley;

// Public API
pub use classifier::{AggregationClassifier, ConditionStatus};
pub use config::{EdgeRule, HighEdgeAction, ModelInfo, PipelineConfig};
pub use errors::{AssessmentError, AssessmentResult};
pub use filter::{filtfilt, FilterCoefficients, ZeroPhaseFilter};
pub use grooves::{GrooveAssessment, GrooveSegmenter};
pub use parser::{LogParser, ParseStats};
pub use pipeline::{
    assess_multi_sensor, assess_scan, assess_single_sensor, dispatch, predict, LogInput,
    TireAssessment,
};
pub use predictor::{CalibrationModel, DepthPredictor};
pub use profile::{profile_lines, ScanProfile};
pub use report::Report;
pub use selector::{ModelChoice, ModelSelector};
pub use types::{SensorDepth, SensorScan};
pub use valley::{ValleyDetector, ValleyResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
