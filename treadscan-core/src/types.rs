//! Core data types shared by the pipeline stages
//!
//! A capture is parsed into a [`SensorScan`]: exactly six [`SensorReading`]
//! slots, one per CCD sensor, each holding the retained pixel voltages in
//! spatial order. Sensors that sent nothing keep an empty slot instead of
//! disappearing, so every later stage can index by sensor number.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::{constants::sensors::SENSOR_COUNT, parser::ParseStats};

/// Pixel voltages of one CCD sensor
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SensorReading {
    /// Sensor number, 1-based
    pub sensor_id: u8,
    /// Voltages in millivolts, in pixel order
    pub samples: Vec<f64>,
}

impl SensorReading {
    /// Create a reading for one sensor
    pub fn new(sensor_id: u8, samples: Vec<f64>) -> Self {
        Self { sensor_id, samples }
    }

    /// Number of retained pixels
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the sensor delivered no pixels
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// All six sensor slots of one capture
#[derive(Debug, Clone, PartialEq)]
pub struct SensorScan {
    readings: [SensorReading; SENSOR_COUNT],
    /// Line-level statistics from parsing
    pub stats: ParseStats,
}

impl Default for SensorScan {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorScan {
    /// Scan with six empty slots
    pub fn new() -> Self {
        Self {
            readings: core::array::from_fn(|i| SensorReading::new(i as u8 + 1, Vec::new())),
            stats: ParseStats::default(),
        }
    }

    /// Build a scan from `(sensor_id, samples)` pairs
    ///
    /// Ids outside `1..=6` are ignored.
    pub fn from_samples<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = (u8, Vec<f64>)>,
    {
        let mut scan = Self::new();
        for (id, data) in samples {
            if let Some(slot) = scan.sensor_mut(id) {
                slot.samples = data;
            }
        }
        scan
    }

    /// Reading of one sensor (1-based)
    pub fn sensor(&self, sensor_id: u8) -> Option<&SensorReading> {
        slot_index(sensor_id).map(|i| &self.readings[i])
    }

    /// Mutable reading of one sensor (1-based)
    pub fn sensor_mut(&mut self, sensor_id: u8) -> Option<&mut SensorReading> {
        slot_index(sensor_id).map(move |i| &mut self.readings[i])
    }

    /// Samples of one sensor, empty when the id is out of range
    pub fn samples(&self, sensor_id: u8) -> &[f64] {
        self.sensor(sensor_id)
            .map(|r| r.samples.as_slice())
            .unwrap_or(&[])
    }

    /// All six readings in sensor order
    pub fn readings(&self) -> &[SensorReading; SENSOR_COUNT] {
        &self.readings
    }

    /// Pixels retained across all sensors
    pub fn total_pixels(&self) -> usize {
        self.readings.iter().map(SensorReading::len).sum()
    }
}

fn slot_index(sensor_id: u8) -> Option<usize> {
    let id = sensor_id as usize;
    (1..=SENSOR_COUNT).contains(&id).then(|| id - 1)
}

/// Per-sensor result of the multi-sensor pipeline
///
/// `depth_mm` is present exactly when `valley` is present, except on the
/// override path where depths are supplied literally.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SensorDepth {
    /// Sensor number, 1-based
    pub sensor: u8,
    /// Valley voltage (mV)
    pub valley: Option<f64>,
    /// Position of the valley in the filtered profile
    pub valley_index: Option<usize>,
    /// Valley in model domain units
    pub scaled: Option<f64>,
    /// Tread depth (mm)
    #[cfg_attr(feature = "serde", serde(rename = "depth"))]
    pub depth_mm: Option<f64>,
    /// Retained pixels for this sensor
    pub pixel_count: usize,
}

impl SensorDepth {
    /// Slot with nothing measured
    pub fn empty(sensor: u8, pixel_count: usize) -> Self {
        Self {
            sensor,
            valley: None,
            valley_index: None,
            scaled: None,
            depth_mm: None,
            pixel_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_scan_has_six_empty_slots() {
        let scan = SensorScan::new();
        assert_eq!(scan.readings().len(), 6);
        for (i, reading) in scan.readings().iter().enumerate() {
            assert_eq!(reading.sensor_id as usize, i + 1);
            assert!(reading.is_empty());
        }
        assert_eq!(scan.total_pixels(), 0);
    }

    #[test]
    fn out_of_range_ids_are_ignored() {
        let scan = SensorScan::from_samples([(0, vec![1.0]), (3, vec![2.0, 3.0]), (7, vec![4.0])]);
        assert_eq!(scan.total_pixels(), 2);
        assert_eq!(scan.samples(3), &[2.0, 3.0]);
        assert!(scan.sensor(0).is_none());
        assert!(scan.samples(7).is_empty());
    }
}
