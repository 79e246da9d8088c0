//! Single-Sensor Groove Example
//!
//! A headerless capture from a one-sensor head falls back to four-groove
//! segmentation. Also shows the per-sensor diagnostics and ADC units.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_single_sensor
//! ```

use treadscan_core::{
    dispatch, profile_lines, units::millivolts_to_adc, GrooveSegmenter, PipelineConfig,
};

fn main() {
    println!("Treadscan Single-Sensor Example");
    println!("===============================\n");

    let config = PipelineConfig::default();

    // Four grooves of decreasing voltage, no sensor headers.
    let levels = [520.0, 470.0, 430.0, 340.0];
    let lines: Vec<String> = (0..400)
        .map(|i| format!("Pixel[{}]: {:.2} mV", i, levels[i / 100]))
        .collect();

    let report = dispatch(&lines, &config);
    println!("{}", report.message);
    if let Some(body) = report.single_sensor_body() {
        println!(
            "  grooves: {:.2} | {:.2} | {:.2} | {:.2} mm",
            body.alur1, body.alur2, body.alur3, body.alur4
        );
        println!("  mean {:.2} mV = {:.2} ADC codes", body.voltage_mv, body.adc_mean);
    }
    println!();

    // The segmenter can also be driven directly with voltages.
    let voltages: Vec<f64> = (0..400).map(|i| levels[i / 100]).collect();
    match GrooveSegmenter::from_config(&config).segment(&voltages) {
        Ok(g) => println!("Direct: worn = {}, min {:.3} mm", g.is_worn, g.min_groove_mm),
        Err(e) => println!("Direct: {}", e),
    }
    println!("3300 mV full scale = {} codes", millivolts_to_adc(3300.0));
    println!();

    // Diagnostics for a multi-sensor capture.
    let mut capture = Vec::new();
    for sensor in 1..=3 {
        capture.push(format!("--- SENSOR {} ---", sensor));
        for pixel in 280..(280 + 40 * sensor) {
            capture.push(format!("Pixel[{}]: {:.2} mV", pixel, 2000.0 + (pixel % 7) as f64));
        }
    }
    let profile = profile_lines(&capture, &config);
    println!("Profile: {}/6 sensors usable", profile.usable_sensors());
    for s in profile.sensors.iter().filter(|s| s.pixel_count > 0) {
        match (s.raw, s.filtered) {
            (Some(raw), Some(filtered)) => println!(
                "  sensor {}: raw {:.2}±{:.2}, filtered {:.2}±{:.2}",
                s.sensor, raw.mean, raw.std, filtered.mean, filtered.std
            ),
            _ => println!("  sensor {}: {} px, below gate", s.sensor, s.pixel_count),
        }
    }
}
