//! Pipeline Configuration
//!
//! Every constant the pipeline depends on is collected into one
//! [`PipelineConfig`] value that is passed explicitly into each invocation.
//! There is no process-wide mutable state: overriding a model for one call
//! cannot leak into the next.
//!
//! ## Customization
//!
//! ```rust
//! use treadscan_core::{CalibrationModel, HighEdgeAction, PipelineConfig};
//!
//! // Deployed defaults
//! let config = PipelineConfig::default();
//!
//! // Refitted deep model, override path enabled
//! let custom = PipelineConfig::default()
//!     .with_deep_model(CalibrationModel::new(1700.0, 2650.0, -1.8, 11.9))
//!     .with_high_edge_action(HighEdgeAction::Override);
//!
//! assert!(custom.validate().is_ok());
//! ```

use crate::{
    constants::{
        calibration::{GROOVE_INTERCEPT_MM, GROOVE_SLOPE_MM_PER_MV, OVERRIDE_DEPTHS_MM},
        condition::LEGAL_LIMIT_MM,
        sensors::{
            EDGE_MIN_COUNT, EDGE_THRESHOLD_MV, MIN_VALLEY_SAMPLES, PIXEL_WINDOW_MAX,
            PIXEL_WINDOW_MIN,
        },
    },
    errors::{AssessmentError, AssessmentResult},
    filter::FilterCoefficients,
    predictor::CalibrationModel,
};

/// How a filtered sample is compared with the edge threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Comparison {
    /// `sample > threshold`
    Greater,
    /// `sample >= threshold`
    GreaterOrEqual,
}

impl Comparison {
    /// Apply the comparison
    pub fn holds(&self, sample: f64, threshold: f64) -> bool {
        match self {
            Self::Greater => sample > threshold,
            Self::GreaterOrEqual => sample >= threshold,
        }
    }
}

/// How a bright-pixel count is compared with the minimum count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CountRule {
    /// `count >= min_count`
    AtLeast,
    /// `count > min_count`
    MoreThan,
}

impl CountRule {
    /// Apply the rule
    pub fn holds(&self, count: usize, min_count: usize) -> bool {
        match self {
            Self::AtLeast => count >= min_count,
            Self::MoreThan => count > min_count,
        }
    }
}

/// Bright-edge detection rule for the model selector
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeRule {
    /// Voltage threshold (mV)
    pub threshold_mv: f64,
    /// Sample-vs-threshold comparison
    pub comparison: Comparison,
    /// Bright samples required on each edge sensor
    pub min_count: usize,
    /// Count-vs-minimum comparison
    pub count_rule: CountRule,
}

impl Default for EdgeRule {
    fn default() -> Self {
        Self {
            threshold_mv: EDGE_THRESHOLD_MV,
            comparison: Comparison::Greater,
            min_count: EDGE_MIN_COUNT,
            count_rule: CountRule::AtLeast,
        }
    }
}

impl EdgeRule {
    /// Rule of the earliest field firmware: `> 2801 mV`, more than two pixels
    pub fn legacy_strict() -> Self {
        Self {
            threshold_mv: 2801.0,
            comparison: Comparison::Greater,
            min_count: 2,
            count_rule: CountRule::MoreThan,
        }
    }

    /// Whether one filtered sample is bright
    pub fn is_bright(&self, sample: f64) -> bool {
        self.comparison.holds(sample, self.threshold_mv)
    }

    /// Whether a bright-pixel count satisfies the rule
    pub fn count_satisfied(&self, count: usize) -> bool {
        self.count_rule.holds(count, self.min_count)
    }
}

/// What the selector does when both edges are bright
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HighEdgeAction {
    /// Use the shallow calibration model
    Shallow,
    /// Skip prediction and report the fixed override depths
    Override,
}

/// Linear calibration for the single-sensor groove path
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrooveCalibration {
    /// Millimeters per millivolt
    pub slope: f64,
    /// Millimeters at zero volts
    pub intercept: f64,
}

impl Default for GrooveCalibration {
    fn default() -> Self {
        Self {
            slope: GROOVE_SLOPE_MM_PER_MV,
            intercept: GROOVE_INTERCEPT_MM,
        }
    }
}

impl GrooveCalibration {
    /// Thickness for a mean voltage, floored at zero
    pub fn thickness_mm(&self, mean_voltage_mv: f64) -> f64 {
        let t = self.slope * mean_voltage_mv + self.intercept;
        if t > 0.0 {
            t
        } else {
            0.0
        }
    }
}

/// Inclusive range of pixel indices kept from each scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelWindow {
    /// First retained pixel
    pub min: u32,
    /// Last retained pixel
    pub max: u32,
}

impl Default for PixelWindow {
    fn default() -> Self {
        Self {
            min: PIXEL_WINDOW_MIN,
            max: PIXEL_WINDOW_MAX,
        }
    }
}

impl PixelWindow {
    /// Whether a pixel index is retained
    pub fn contains(&self, pixel: u32) -> bool {
        (self.min..=self.max).contains(&pixel)
    }
}

/// Complete set of overridable pipeline constants
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PipelineConfig {
    /// Zero-phase filter taps
    pub filter: FilterCoefficients,
    /// Model used when edges look normal
    pub deep: CalibrationModel,
    /// Model used when both edges are bright (in `Shallow` mode)
    pub shallow: CalibrationModel,
    /// Bright-edge rule
    pub edge_rule: EdgeRule,
    /// Outcome of the bright-edge branch
    pub high_edge_action: HighEdgeAction,
    /// Depths reported for sensors 1-4 on the override path (mm)
    pub override_depths: [f64; 4],
    /// Single-sensor groove calibration
    pub groove: GrooveCalibration,
    /// Retained pixel window
    pub pixel_window: PixelWindow,
    /// Samples a sensor needs for a valley
    pub min_valley_samples: usize,
    /// Groove thickness below which a tire is worn (mm)
    pub worn_limit_mm: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            filter: FilterCoefficients::default(),
            deep: CalibrationModel::deep(),
            shallow: CalibrationModel::shallow(),
            edge_rule: EdgeRule::default(),
            high_edge_action: HighEdgeAction::Shallow,
            override_depths: OVERRIDE_DEPTHS_MM,
            groove: GrooveCalibration::default(),
            pixel_window: PixelWindow::default(),
            min_valley_samples: MIN_VALLEY_SAMPLES,
            worn_limit_mm: LEGAL_LIMIT_MM,
        }
    }
}

impl PipelineConfig {
    /// Defaults with the earliest firmware's stricter edge rule
    pub fn legacy_strict() -> Self {
        Self {
            edge_rule: EdgeRule::legacy_strict(),
            ..Self::default()
        }
    }

    /// Replace the filter coefficients
    pub fn with_filter(mut self, filter: FilterCoefficients) -> Self {
        self.filter = filter;
        self
    }

    /// Replace the deep model
    pub fn with_deep_model(mut self, model: CalibrationModel) -> Self {
        self.deep = model;
        self
    }

    /// Replace the shallow model
    pub fn with_shallow_model(mut self, model: CalibrationModel) -> Self {
        self.shallow = model;
        self
    }

    /// Replace the edge rule
    pub fn with_edge_rule(mut self, rule: EdgeRule) -> Self {
        self.edge_rule = rule;
        self
    }

    /// Choose what the bright-edge branch does
    pub fn with_high_edge_action(mut self, action: HighEdgeAction) -> Self {
        self.high_edge_action = action;
        self
    }

    /// Replace the override depth set
    pub fn with_override_depths(mut self, depths: [f64; 4]) -> Self {
        self.override_depths = depths;
        self
    }

    /// Replace the groove calibration
    pub fn with_groove_calibration(mut self, groove: GrooveCalibration) -> Self {
        self.groove = groove;
        self
    }

    /// Replace the pixel window
    pub fn with_pixel_window(mut self, min: u32, max: u32) -> Self {
        self.pixel_window = PixelWindow { min, max };
        self
    }

    /// Check that the configuration can drive a pipeline run
    pub fn validate(&self) -> AssessmentResult<()> {
        if !self.filter.is_finite() {
            return Err(AssessmentError::InvalidConfig {
                reason: "filter coefficients must be finite",
            });
        }
        if !self.deep.is_finite() || !self.shallow.is_finite() {
            return Err(AssessmentError::InvalidConfig {
                reason: "calibration model parameters must be finite",
            });
        }
        if !self.edge_rule.threshold_mv.is_finite() {
            return Err(AssessmentError::InvalidConfig {
                reason: "edge threshold must be finite",
            });
        }
        if !self.override_depths.iter().all(|d| d.is_finite()) {
            return Err(AssessmentError::InvalidConfig {
                reason: "override depths must be finite",
            });
        }
        if !self.groove.slope.is_finite() || !self.groove.intercept.is_finite() {
            return Err(AssessmentError::InvalidConfig {
                reason: "groove calibration must be finite",
            });
        }
        if self.pixel_window.min > self.pixel_window.max {
            return Err(AssessmentError::InvalidConfig {
                reason: "pixel window min exceeds max",
            });
        }
        if self.min_valley_samples == 0 {
            return Err(AssessmentError::InvalidConfig {
                reason: "minimum valley samples must be positive",
            });
        }
        if !self.worn_limit_mm.is_finite() {
            return Err(AssessmentError::InvalidConfig {
                reason: "worn limit must be finite",
            });
        }
        Ok(())
    }

    /// Snapshot of the active models and thresholds for diagnostics
    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            deep_model: self.deep,
            shallow_model: self.shallow,
            filter_coefficients: self.filter,
            pixel_range: self.pixel_window,
            edge_rule: self.edge_rule,
            high_edge_action: self.high_edge_action,
            groove: self.groove,
            min_valley_samples: self.min_valley_samples,
        }
    }
}

/// Diagnostic view of the active configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ModelInfo {
    /// Deep calibration model
    pub deep_model: CalibrationModel,
    /// Shallow calibration model
    pub shallow_model: CalibrationModel,
    /// Filter taps
    pub filter_coefficients: FilterCoefficients,
    /// Retained pixel window
    pub pixel_range: PixelWindow,
    /// Bright-edge rule
    pub edge_rule: EdgeRule,
    /// Outcome of the bright-edge branch
    pub high_edge_action: HighEdgeAction,
    /// Single-sensor groove calibration
    pub groove: GrooveCalibration,
    /// Samples a sensor needs for a valley
    pub min_valley_samples: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
        assert!(PipelineConfig::legacy_strict().validate().is_ok());
    }

    #[test]
    fn edge_rule_variants() {
        let rule = EdgeRule::default();
        assert!(rule.is_bright(2800.5));
        assert!(!rule.is_bright(2800.0));
        assert!(rule.count_satisfied(2));

        let strict = EdgeRule::legacy_strict();
        assert!(!strict.is_bright(2801.0));
        assert!(!strict.count_satisfied(2));
        assert!(strict.count_satisfied(3));

        let inclusive = EdgeRule {
            comparison: Comparison::GreaterOrEqual,
            ..EdgeRule::default()
        };
        assert!(inclusive.is_bright(2800.0));
    }

    #[test]
    fn malformed_overrides_are_rejected() {
        let bad_filter = PipelineConfig::default()
            .with_filter(FilterCoefficients::new([f64::NAN, 0.1, 0.1], [0.0, 0.0]));
        assert!(matches!(
            bad_filter.validate(),
            Err(AssessmentError::InvalidConfig { .. })
        ));

        let bad_model = PipelineConfig::default()
            .with_shallow_model(CalibrationModel::new(0.0, 1.0, f64::NAN, 0.0));
        assert!(bad_model.validate().is_err());

        let bad_window = PipelineConfig::default().with_pixel_window(900, 100);
        assert!(bad_window.validate().is_err());
    }

    #[test]
    fn groove_thickness_floors_at_zero() {
        let groove = GrooveCalibration {
            slope: 0.001,
            intercept: -3.0,
        };
        assert_eq!(groove.thickness_mm(1000.0), 0.0);
        assert!((groove.thickness_mm(4000.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn pixel_window_is_inclusive() {
        let window = PixelWindow::default();
        assert!(window.contains(280));
        assert!(window.contains(1080));
        assert!(!window.contains(279));
        assert!(!window.contains(1081));
    }

    #[test]
    fn model_info_reflects_overrides() {
        let model = CalibrationModel::new(1.0, 2.0, 3.0, 4.0);
        let info = PipelineConfig::default().with_deep_model(model).model_info();
        assert_eq!(info.deep_model, model);
        assert_eq!(info.pixel_range, PixelWindow { min: 280, max: 1080 });
    }
}
