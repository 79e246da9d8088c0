//! Structured Results
//!
//! Every dispatcher call ends in exactly one [`Report`], whether it
//! succeeded or not. Callers on the other side of a process or language
//! boundary serialize it to JSON and never have to handle a panic or a
//! Rust error type.
//!
//! ## Shapes
//!
//! ```text
//! { "success": false, "message": "No data received (empty input)" }
//!
//! { "success": true, "message": "Assessed 6/6 sensors with DALAM model",
//!   "model_used": "DALAM", "total_pixels": 4806, "data": [...6],
//!   "worst_4": [...], "min_depth": 3.42, "avg_depth": 3.61,
//!   "condition_status": "BAIK", "condition_detail": "...", ... }
//!
//! { "success": true, "message": "Min groove: 2.31 mm -> AMAN",
//!   "alur1": 2.31, "alur2": 2.57, "alur3": 2.55, "alur4": 2.40,
//!   "is_worn": false, "adc_mean": 690.12, "adc_std": 41.7,
//!   "voltage_mV": 556.14, "pixel_count": 2400, ... }
//! ```
//!
//! The two success bodies are flattened into the top-level object. Multi
//! sensor values are reported unrounded; single-sensor values are rounded
//! to two decimals, the precision the groove calibration was fitted at.

#[cfg(not(feature = "std"))]
use alloc::{format, string::String, string::ToString};

use crate::{
    classifier::{ConditionStatus, WorstSensors},
    constants::sensors::SENSOR_COUNT,
    errors::AssessmentError,
    grooves::GrooveAssessment,
    pipeline::TireAssessment,
    selector::EdgeCounts,
    types::SensorDepth,
};

/// Outcome of one dispatcher call
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Report {
    /// Whether a tread assessment was produced
    pub success: bool,
    /// Human-readable summary or failure reason
    pub message: String,
    /// Assessment payload, absent on failure
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub body: Option<ReportBody>,
}

/// Assessment payload of a successful report
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ReportBody {
    /// Six-sensor depth assessment
    MultiSensor(MultiSensorReport),
    /// Single-sensor four-groove assessment
    SingleSensor(SingleSensorReport),
}

/// Payload of the six-sensor path
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MultiSensorReport {
    /// `DALAM`, `DANGKAL` or `OVERRIDE`
    pub model_used: &'static str,
    /// Bright samples on the edge sensors
    pub edge_counts: EdgeCounts,
    /// Pixels retained across all sensors
    pub total_pixels: usize,
    /// Per-sensor results in sensor order
    pub data: [SensorDepth; SENSOR_COUNT],
    /// Shallowest sensors, shallowest first
    pub worst_4: WorstSensors,
    /// Smallest depth (mm)
    pub min_depth: f64,
    /// Mean depth of `worst_4` (mm)
    pub avg_depth: f64,
    /// Condition label
    pub condition_status: ConditionStatus,
    /// Advisory text for the label
    pub condition_detail: &'static str,
    /// Input lines that were not usable records
    pub skipped_lines: usize,
}

/// Payload of the single-sensor path
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SingleSensorReport {
    /// Groove 1 thickness (mm)
    pub alur1: f64,
    /// Groove 2 thickness (mm)
    pub alur2: f64,
    /// Groove 3 thickness (mm)
    pub alur3: f64,
    /// Groove 4 thickness (mm)
    pub alur4: f64,
    /// Whether the tire should be flagged
    pub is_worn: bool,
    /// Smallest positive groove thickness (mm)
    pub min_groove: f64,
    /// Mean of the filtered scan in ADC codes
    pub adc_mean: f64,
    /// Spread of the filtered scan in ADC codes
    pub adc_std: f64,
    /// Mean of the filtered scan (mV)
    #[cfg_attr(feature = "serde", serde(rename = "voltage_mV"))]
    pub voltage_mv: f64,
    /// Raw voltages used
    pub pixel_count: usize,
    /// Input lines that were not pixel records
    pub skipped_lines: usize,
}

impl Report {
    /// Failed report carrying the error's message
    pub fn failure(error: &AssessmentError) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            body: None,
        }
    }

    /// Report for a six-sensor assessment
    pub fn multi_sensor(assessment: &TireAssessment) -> Self {
        let message = format!(
            "Assessed {}/{} sensors with {} model",
            assessment.assessed_sensors(),
            SENSOR_COUNT,
            assessment.model_used.label()
        );
        Self {
            success: true,
            message,
            body: Some(ReportBody::MultiSensor(MultiSensorReport {
                model_used: assessment.model_used.label(),
                edge_counts: assessment.edge_counts,
                total_pixels: assessment.total_pixels,
                data: assessment.per_sensor,
                worst_4: assessment.worst.clone(),
                min_depth: assessment.min_depth,
                avg_depth: assessment.avg_depth,
                condition_status: assessment.condition_status,
                condition_detail: assessment.condition_detail,
                skipped_lines: assessment.parse_stats.discarded(),
            })),
        }
    }

    /// Report for a single-sensor assessment
    pub fn single_sensor(grooves: &GrooveAssessment) -> Self {
        let verdict = if grooves.is_worn { "AUS" } else { "AMAN" };
        let [alur1, alur2, alur3, alur4] = grooves.grooves.map(round2);
        Self {
            success: true,
            message: format!("Min groove: {:.2} mm -> {}", grooves.min_groove_mm, verdict),
            body: Some(ReportBody::SingleSensor(SingleSensorReport {
                alur1,
                alur2,
                alur3,
                alur4,
                is_worn: grooves.is_worn,
                min_groove: round2(grooves.min_groove_mm),
                adc_mean: round2(grooves.adc_mean),
                adc_std: round2(grooves.adc_std),
                voltage_mv: round2(grooves.voltage_mean_mv),
                pixel_count: grooves.pixel_count,
                skipped_lines: grooves.stats.skipped_lines,
            })),
        }
    }

    /// Six-sensor payload, if that path produced this report
    pub fn multi_sensor_body(&self) -> Option<&MultiSensorReport> {
        match &self.body {
            Some(ReportBody::MultiSensor(r)) => Some(r),
            _ => None,
        }
    }

    /// Single-sensor payload, if that path produced this report
    pub fn single_sensor_body(&self) -> Option<&SingleSensorReport> {
        match &self.body {
            Some(ReportBody::SingleSensor(r)) => Some(r),
            _ => None,
        }
    }
}

/// Round half away from zero to two decimals
pub fn round2(value: f64) -> f64 {
    libm::round(value * 100.0) / 100.0
}
