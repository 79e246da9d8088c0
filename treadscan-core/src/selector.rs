//! Calibration Model Selection
//!
//! The two outermost sensors of the array look at the shoulders of the
//! tread. On a healthy tire they see dark rubber. When the tread is worn
//! through, or the head is placed over the sidewall, both shoulders turn
//! uniformly bright. That signature decides which calibration applies.
//!
//! This is a deterministic rule, not a classifier: there is no score, only
//! the outcomes in [`ModelChoice`].

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::{
    config::{EdgeRule, HighEdgeAction, PipelineConfig},
    filter::{filtfilt, FilterCoefficients},
};

/// Outcome of model selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelChoice {
    /// Normal edges, deep calibration
    Deep,
    /// Bright edges, shallow calibration
    Shallow,
    /// Bright edges, prediction bypassed with fixed depths for sensors 1-4
    Override([f64; 4]),
}

impl ModelChoice {
    /// Label reported as `model_used`
    pub fn label(&self) -> &'static str {
        match self {
            Self::Deep => "DALAM",
            Self::Shallow => "DANGKAL",
            Self::Override(_) => "OVERRIDE",
        }
    }

    /// Whether the bright-edge branch fired
    pub fn is_high_edge(&self) -> bool {
        !matches!(self, Self::Deep)
    }
}

/// Bright-pixel counts of the two edge sensors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EdgeCounts {
    /// Bright samples on the left edge sensor
    pub left: usize,
    /// Bright samples on the right edge sensor
    pub right: usize,
}

/// Selection result with the evidence behind it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    /// Chosen outcome
    pub choice: ModelChoice,
    /// Bright-pixel counts that drove it
    pub counts: EdgeCounts,
}

/// Chooses the calibration path from the edge sensors
#[derive(Debug, Clone, Copy)]
pub struct ModelSelector {
    coeffs: FilterCoefficients,
    rule: EdgeRule,
    action: HighEdgeAction,
    override_depths: [f64; 4],
}

impl ModelSelector {
    /// Create a selector from explicit parts
    pub fn new(
        coeffs: FilterCoefficients,
        rule: EdgeRule,
        action: HighEdgeAction,
        override_depths: [f64; 4],
    ) -> Self {
        Self {
            coeffs,
            rule,
            action,
            override_depths,
        }
    }

    /// Create a selector from a pipeline configuration
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(
            config.filter,
            config.edge_rule,
            config.high_edge_action,
            config.override_depths,
        )
    }

    /// Count bright samples in a raw edge scan
    ///
    /// Scans shorter than three samples are counted unfiltered.
    pub fn bright_count(&self, raw: &[f64]) -> usize {
        let filtered: Vec<f64> = filtfilt(raw, &self.coeffs);
        filtered.iter().filter(|&&v| self.rule.is_bright(v)).count()
    }

    /// Select from the raw scans of the left and right edge sensors
    pub fn select(&self, left: &[f64], right: &[f64]) -> Selection {
        let counts = EdgeCounts {
            left: self.bright_count(left),
            right: self.bright_count(right),
        };

        let high_edge =
            self.rule.count_satisfied(counts.left) && self.rule.count_satisfied(counts.right);

        let choice = match (high_edge, self.action) {
            (false, _) => ModelChoice::Deep,
            (true, HighEdgeAction::Shallow) => ModelChoice::Shallow,
            (true, HighEdgeAction::Override) => ModelChoice::Override(self.override_depths),
        };

        Selection { choice, counts }
    }
}
