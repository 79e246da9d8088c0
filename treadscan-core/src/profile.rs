//! Per-sensor signal diagnostics
//!
//! Used while aligning a scan head: for every sensor that reaches the
//! sample gate, report how much the filter flattened the signal and where
//! the valley ended up. No depth is computed here.

use crate::{
    config::PipelineConfig,
    constants::sensors::SENSOR_COUNT,
    parser::{LogParser, ParseStats},
    stats::mean_std,
    types::SensorScan,
    valley::{ValleyDetector, ValleyResult},
};

/// Mean and population standard deviation of a signal (mV)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SignalStats {
    /// Mean (mV)
    pub mean: f64,
    /// Population standard deviation (mV)
    pub std: f64,
}

impl SignalStats {
    fn of(values: &[f64]) -> Option<Self> {
        mean_std(values).map(|(mean, std)| Self { mean, std })
    }
}

/// Diagnostics for one sensor
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SensorProfile {
    /// Sensor number, 1-based
    pub sensor: u8,
    /// Retained pixels
    pub pixel_count: usize,
    /// Statistics of the raw scan, absent below the sample gate
    pub raw: Option<SignalStats>,
    /// Statistics of the filtered scan, absent below the sample gate
    pub filtered: Option<SignalStats>,
    /// Valley of the filtered scan
    pub valley: ValleyResult,
}

impl SensorProfile {
    /// Whether the sensor reached the sample gate
    pub fn is_usable(&self) -> bool {
        self.filtered.is_some()
    }
}

/// Diagnostics for a whole capture
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScanProfile {
    /// One entry per sensor
    pub sensors: [SensorProfile; SENSOR_COUNT],
    /// Pixels retained across all sensors
    pub total_pixels: usize,
    /// Line-level statistics from parsing
    pub parse_stats: ParseStats,
}

impl ScanProfile {
    /// Sensors that reached the sample gate
    pub fn usable_sensors(&self) -> usize {
        self.sensors.iter().filter(|s| s.is_usable()).count()
    }
}

/// Profile one sensor's raw samples
pub fn profile_sensor(sensor: u8, samples: &[f64], config: &PipelineConfig) -> SensorProfile {
    let detector = ValleyDetector::new(config.filter, config.min_valley_samples);
    let (valley, filtered) = detector.detect_with_profile(samples);

    if !valley.is_present() {
        log_debug!("sensor {}: {} samples, below gate", sensor, samples.len());
    }

    SensorProfile {
        sensor,
        pixel_count: samples.len(),
        raw: valley.is_present().then(|| SignalStats::of(samples)).flatten(),
        filtered: SignalStats::of(&filtered),
        valley,
    }
}

/// Profile every sensor of a parsed scan
pub fn profile_scan(scan: &SensorScan, config: &PipelineConfig) -> ScanProfile {
    let readings = scan.readings();
    ScanProfile {
        sensors: core::array::from_fn(|i| {
            profile_sensor(readings[i].sensor_id, &readings[i].samples, config)
        }),
        total_pixels: scan.total_pixels(),
        parse_stats: scan.stats,
    }
}

/// Parse a capture and profile every sensor
pub fn profile_lines<S: AsRef<str>>(lines: &[S], config: &PipelineConfig) -> ScanProfile {
    let scan = LogParser::new(config.pixel_window).parse(lines);
    profile_scan(&scan, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_sensor_has_no_statistics() {
        let profile = profile_sensor(2, &[2000.0; 49], &PipelineConfig::default());
        assert_eq!(profile.pixel_count, 49);
        assert!(profile.raw.is_none());
        assert!(profile.filtered.is_none());
        assert!(!profile.is_usable());
    }

    #[test]
    fn filter_reduces_spread_of_noisy_scan() {
        // Long enough that the end transients do not dominate the spread.
        let samples: Vec<f64> = (0..3700)
            .map(|i| if i % 2 == 0 { 2300.0 } else { 1700.0 })
            .collect();
        let profile = profile_sensor(1, &samples, &PipelineConfig::default());

        let raw = profile.raw.unwrap();
        assert_eq!(raw.mean, 2000.0);
        assert_eq!(raw.std, 300.0);
        assert!(profile.filtered.unwrap().std < raw.std);
        assert!(profile.valley.is_present());
    }

    #[test]
    fn scan_profile_counts_usable_sensors() {
        let scan = SensorScan::from_samples([(1, vec![2000.0; 60]), (4, vec![2000.0; 10])]);
        let profile = profile_scan(&scan, &PipelineConfig::default());
        assert_eq!(profile.usable_sensors(), 1);
        assert_eq!(profile.total_pixels, 70);
        assert_eq!(profile.sensors[3].pixel_count, 10);
    }
}
