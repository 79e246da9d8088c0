//! Assessment Pipeline and Dispatcher
//!
//! ## Flow
//!
//! ```text
//! lines ──► LogParser ──► SensorScan
//!                            │
//!            ┌───────────────┼─────────────────┐
//!            ▼               ▼                 ▼
//!      ValleyDetector   ModelSelector     (sensors 1 and 6)
//!       (per sensor)         │
//!            └──────► DepthPredictor ──► AggregationClassifier ──► TireAssessment
//! ```
//!
//! [`dispatch`] tries this six-sensor path first. When it finds no usable
//! data it retries the same lines as a single continuous scan through the
//! [`GrooveSegmenter`]. Whatever happens, the caller gets a [`Report`].
//!
//! ## Configuration
//!
//! Every function takes the [`PipelineConfig`] explicitly. Nothing is read
//! from or written to shared state, so assessments with different
//! coefficients can run side by side on different threads.

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

use crate::{
    classifier::{AggregationClassifier, ConditionStatus, WorstSensors},
    config::PipelineConfig,
    constants::sensors::{LEFT_EDGE_SENSOR, RIGHT_EDGE_SENSOR, SENSOR_COUNT},
    errors::{AssessmentError, AssessmentResult},
    grooves::{GrooveAssessment, GrooveSegmenter},
    parser::{LogParser, ParseStats},
    predictor::DepthPredictor,
    report::Report,
    selector::{EdgeCounts, ModelChoice, ModelSelector},
    types::{SensorDepth, SensorScan},
    valley::ValleyDetector,
};

/// Six-sensor tread assessment
#[derive(Debug, Clone, PartialEq)]
pub struct TireAssessment {
    /// Calibration path taken
    pub model_used: ModelChoice,
    /// Bright samples on the edge sensors
    pub edge_counts: EdgeCounts,
    /// Pixels retained across all sensors
    pub total_pixels: usize,
    /// Per-sensor results in sensor order
    pub per_sensor: [SensorDepth; SENSOR_COUNT],
    /// Shallowest sensors, shallowest first
    pub worst: WorstSensors,
    /// Smallest depth (mm)
    pub min_depth: f64,
    /// Mean depth of `worst` (mm)
    pub avg_depth: f64,
    /// Condition label
    pub condition_status: ConditionStatus,
    /// Advisory text for the label
    pub condition_detail: &'static str,
    /// Line-level statistics from parsing
    pub parse_stats: ParseStats,
}

impl TireAssessment {
    /// Sensors that ended with a depth
    pub fn assessed_sensors(&self) -> usize {
        self.per_sensor.iter().filter(|s| s.depth_mm.is_some()).count()
    }
}

/// Assess a six-sensor capture log
///
/// # Errors
///
/// - [`AssessmentError::InvalidConfig`] when `config` does not validate
/// - [`AssessmentError::EmptyInput`] for an empty slice
/// - [`AssessmentError::NoData`] when no pixel record survives parsing
/// - [`AssessmentError::NoValidDepth`] when no sensor reaches the sample gate
pub fn assess_multi_sensor<S: AsRef<str>>(
    lines: &[S],
    config: &PipelineConfig,
) -> AssessmentResult<TireAssessment> {
    checked(config)?;
    if lines.is_empty() {
        return Err(AssessmentError::EmptyInput);
    }

    let scan = LogParser::new(config.pixel_window).parse(lines);
    if scan.stats.discarded() > 0 {
        log_debug!(
            "parser discarded {} of {} lines ({} malformed, {} out of window, {} orphan)",
            scan.stats.discarded(),
            scan.stats.total_lines,
            scan.stats.skipped_lines,
            scan.stats.out_of_window,
            scan.stats.orphan_records
        );
    }

    if scan.total_pixels() == 0 {
        return Err(AssessmentError::NoData {
            min: config.pixel_window.min,
            max: config.pixel_window.max,
        });
    }

    assess_scan(&scan, config)
}

/// Assess an already parsed scan
///
/// Validation of `config` is the caller's job here; [`assess_multi_sensor`]
/// does it before parsing.
pub fn assess_scan(scan: &SensorScan, config: &PipelineConfig) -> AssessmentResult<TireAssessment> {
    let detector = ValleyDetector::new(config.filter, config.min_valley_samples);
    let readings = scan.readings();

    let mut per_sensor: [SensorDepth; SENSOR_COUNT] = core::array::from_fn(|i| {
        let valley = detector.detect(&readings[i].samples);
        if !valley.is_present() {
            log_debug!(
                "sensor {}: {} samples, no valley",
                readings[i].sensor_id,
                valley.sample_count
            );
        }
        SensorDepth {
            valley: valley.value,
            valley_index: valley.index,
            ..SensorDepth::empty(readings[i].sensor_id, valley.sample_count)
        }
    });

    let selection = ModelSelector::from_config(config).select(
        scan.samples(LEFT_EDGE_SENSOR),
        scan.samples(RIGHT_EDGE_SENSOR),
    );
    log_debug!(
        "model {} selected, edge counts {}/{}",
        selection.choice.label(),
        selection.counts.left,
        selection.counts.right
    );

    let classifier = AggregationClassifier;
    let aggregate = match selection.choice {
        ModelChoice::Override(depths) => classifier.apply_override(&mut per_sensor, depths),
        ModelChoice::Deep | ModelChoice::Shallow => {
            let model = if selection.choice.is_high_edge() {
                config.shallow
            } else {
                config.deep
            };
            let predictor = DepthPredictor::new(model);
            for slot in per_sensor.iter_mut() {
                if let Some(p) = predictor.predict_detailed(slot.valley) {
                    slot.scaled = Some(p.scaled);
                    slot.depth_mm = Some(p.depth_mm);
                }
            }
            classifier.aggregate(&per_sensor)?
        }
    };

    Ok(TireAssessment {
        model_used: selection.choice,
        edge_counts: selection.counts,
        total_pixels: scan.total_pixels(),
        per_sensor,
        worst: aggregate.worst,
        min_depth: aggregate.min_depth,
        avg_depth: aggregate.avg_depth,
        condition_status: aggregate.status,
        condition_detail: aggregate.status.detail(),
        parse_stats: scan.stats,
    })
}

/// Assess a headerless single-sensor capture as four grooves
///
/// Every pixel record is used in order; headers and the pixel window are
/// ignored.
pub fn assess_single_sensor<S: AsRef<str>>(
    lines: &[S],
    config: &PipelineConfig,
) -> AssessmentResult<GrooveAssessment> {
    checked(config)?;
    if lines.is_empty() {
        return Err(AssessmentError::EmptyInput);
    }

    let (voltages, stats) = LogParser::new(config.pixel_window).parse_voltages(lines);
    let mut assessment = GrooveSegmenter::from_config(config).segment(&voltages)?;
    assessment.stats = stats;
    Ok(assessment)
}

/// Run the six-sensor path and fall back to the single-sensor path
///
/// Never fails: every error becomes a report with `success == false`.
pub fn dispatch<S: AsRef<str>>(lines: &[S], config: &PipelineConfig) -> Report {
    match assess_multi_sensor(lines, config) {
        Ok(assessment) => Report::multi_sensor(&assessment),
        Err(e) if e.allows_fallback() => {
            log_warn!("multi-sensor assessment failed ({}), trying single-sensor", e);
            match assess_single_sensor(lines, config) {
                Ok(grooves) => Report::single_sensor(&grooves),
                Err(e) => Report::failure(&e),
            }
        }
        Err(e) => Report::failure(&e),
    }
}

/// Where a capture log comes from
#[derive(Debug, Clone, PartialEq)]
pub enum LogInput {
    /// Lines already split
    Lines(Vec<String>),
    /// Raw log text
    Text(String),
    /// Log file on disk
    #[cfg(feature = "std")]
    Path(std::path::PathBuf),
}

impl LogInput {
    /// Resolve the input into lines
    ///
    /// A path that cannot be read is treated as log text itself, so a caller
    /// that cannot tell paths from logs can always pass [`LogInput::Path`].
    pub fn into_lines(self) -> Vec<String> {
        match self {
            Self::Lines(lines) => lines,
            Self::Text(text) => split_lines(&text),
            #[cfg(feature = "std")]
            Self::Path(path) => match std::fs::read_to_string(&path) {
                Ok(text) => split_lines(&text),
                Err(_e) => {
                    log_debug!("{} is not readable ({}), using it as text", path.display(), _e);
                    split_lines(&path.to_string_lossy())
                }
            },
        }
    }
}

impl From<Vec<String>> for LogInput {
    fn from(lines: Vec<String>) -> Self {
        Self::Lines(lines)
    }
}

impl From<&str> for LogInput {
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}

/// Resolve an input and dispatch it
pub fn predict(input: LogInput, config: &PipelineConfig) -> Report {
    let lines = input.into_lines();
    dispatch(&lines, config)
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(String::from).collect()
}

fn checked(config: &PipelineConfig) -> AssessmentResult<()> {
    config.validate().map_err(|e| {
        log_warn!("configuration rejected: {}", e);
        e
    })
}
