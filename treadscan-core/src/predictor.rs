//! Depth Prediction
//!
//! Converts a valley voltage into millimeters of tread with a fitted
//! calibration model: min-max scaling into the model's domain, then a
//! straight line.
//!
//! ```text
//! scaled = (valley - min) / (max - min)       (0.0 when max == min)
//! depth  = slope * scaled + intercept
//! ```
//!
//! `scaled` is not clamped. A valley outside the calibration domain gives a
//! scaled value outside `[0, 1]` and the line is simply extrapolated.

use crate::constants::calibration::{
    DEEP_MODEL_INTERCEPT, DEEP_MODEL_MAX_MV, DEEP_MODEL_MIN_MV, DEEP_MODEL_SLOPE,
    SHALLOW_MODEL_INTERCEPT, SHALLOW_MODEL_MAX_MV, SHALLOW_MODEL_MIN_MV, SHALLOW_MODEL_SLOPE,
};

/// Fitted min-max domain plus linear map
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationModel {
    /// Lower bound of the scaling domain (mV)
    pub min: f64,
    /// Upper bound of the scaling domain (mV)
    pub max: f64,
    /// Millimeters per unit of scaled voltage
    pub slope: f64,
    /// Millimeters at scaled voltage zero
    pub intercept: f64,
}

impl CalibrationModel {
    /// Create a model from its four fitted parameters
    pub fn new(min: f64, max: f64, slope: f64, intercept: f64) -> Self {
        Self {
            min,
            max,
            slope,
            intercept,
        }
    }

    /// Model fitted on tires with deep tread (8 mm and more)
    pub fn deep() -> Self {
        Self::new(
            DEEP_MODEL_MIN_MV,
            DEEP_MODEL_MAX_MV,
            DEEP_MODEL_SLOPE,
            DEEP_MODEL_INTERCEPT,
        )
    }

    /// Model fitted on tires with shallow tread (0-5 mm)
    pub fn shallow() -> Self {
        Self::new(
            SHALLOW_MODEL_MIN_MV,
            SHALLOW_MODEL_MAX_MV,
            SHALLOW_MODEL_SLOPE,
            SHALLOW_MODEL_INTERCEPT,
        )
    }

    /// All parameters are finite numbers
    pub fn is_finite(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.slope.is_finite()
            && self.intercept.is_finite()
    }

    /// Scale a voltage into this model's domain
    pub fn scale(&self, valley: f64) -> f64 {
        scale(valley, self.min, self.max)
    }

    /// Depth for an already scaled voltage
    pub fn depth_for_scaled(&self, scaled: f64) -> f64 {
        predict_linear(self.slope, self.intercept, scaled)
    }
}

/// Min-max scaling with a degenerate-domain guard
pub fn scale(x: f64, min: f64, max: f64) -> f64 {
    if max == min {
        0.0
    } else {
        (x - min) / (max - min)
    }
}

/// `slope * x + intercept`
pub fn predict_linear(slope: f64, intercept: f64, x: f64) -> f64 {
    slope * x + intercept
}

/// Scaled voltage and depth for one valley
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Valley in model domain units
    pub scaled: f64,
    /// Predicted tread depth (mm)
    pub depth_mm: f64,
}

/// Applies a calibration model to valley voltages
#[derive(Debug, Clone, Copy)]
pub struct DepthPredictor {
    model: CalibrationModel,
}

impl DepthPredictor {
    /// Create a predictor for one model
    pub fn new(model: CalibrationModel) -> Self {
        Self { model }
    }

    /// Model in use
    pub fn model(&self) -> &CalibrationModel {
        &self.model
    }

    /// Predict depth for a valley; absent valley gives absent depth
    pub fn predict(&self, valley: Option<f64>) -> Option<f64> {
        self.predict_detailed(valley).map(|p| p.depth_mm)
    }

    /// Predict and keep the intermediate scaled value
    pub fn predict_detailed(&self, valley: Option<f64>) -> Option<Prediction> {
        let valley = valley?;
        let scaled = self.model.scale(valley);
        Some(Prediction {
            scaled,
            depth_mm: self.model.depth_for_scaled(scaled),
        })
    }
}
