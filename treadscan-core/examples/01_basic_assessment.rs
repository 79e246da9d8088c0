//! Basic Tread Assessment Example
//!
//! Builds a six-sensor capture log in memory, runs it through the
//! dispatcher and walks the result.
//!
//! ## What You'll Learn
//!
//! - The capture log format the parser expects
//! - Running the full pipeline with default calibration
//! - Reading per-sensor depths and the condition label
//! - Switching the bright-edge behavior to the override path
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_basic_assessment
//! ```

use treadscan_core::{assess_multi_sensor, dispatch, HighEdgeAction, PipelineConfig};

fn capture(edge_mv: f64) -> Vec<String> {
    let mut lines = vec!["scan head ready".to_string()];
    for sensor in 1..=6 {
        lines.push(format!("--- SENSOR {} ---", sensor));
        let level = if sensor == 1 || sensor == 6 { edge_mv } else { 2100.0 };
        for pixel in 280..=480 {
            let groove = if (370..390).contains(&pixel) { 500.0 } else { 0.0 };
            lines.push(format!("Pixel[{}]: {:.2} mV", pixel, level - groove));
        }
    }
    lines
}

fn main() {
    println!("Treadscan Basic Assessment Example");
    println!("==================================\n");

    let config = PipelineConfig::default();
    let lines = capture(2000.0);
    println!("Capture: {} lines", lines.len());

    match assess_multi_sensor(&lines, &config) {
        Ok(assessment) => {
            println!("Model: {}", assessment.model_used.label());
            for s in &assessment.per_sensor {
                match (s.valley, s.depth_mm) {
                    (Some(v), Some(d)) => {
                        println!("  sensor {}: valley {:7.2} mV -> {:5.2} mm", s.sensor, v, d)
                    }
                    _ => println!("  sensor {}: no valley ({} px)", s.sensor, s.pixel_count),
                }
            }
            println!(
                "Condition: {} (min {:.2} mm, avg {:.2} mm)",
                assessment.condition_status.as_str(),
                assessment.min_depth,
                assessment.avg_depth
            );
            println!("  {}", assessment.condition_detail);
        }
        Err(e) => println!("Assessment failed: {}", e),
    }
    println!();

    // Bright shoulders trip the edge rule. With the override path enabled
    // the fixed depth set is reported instead of a prediction.
    let bright = capture(3000.0);
    for action in [HighEdgeAction::Shallow, HighEdgeAction::Override] {
        let report = dispatch(&bright, &config.with_high_edge_action(action));
        println!("{:?}: {}", action, report.message);
        if let Some(body) = report.multi_sensor_body() {
            println!("  condition {}", body.condition_status.as_str());
        }
    }
}
