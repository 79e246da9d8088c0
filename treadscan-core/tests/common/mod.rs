//! Common capture-log generators for integration tests
//!
//! Builds text logs in the scan head's format:
//! - sensor sections with headers and windowed pixel indices
//! - headerless single-sensor runs
//! - grooved profiles with deterministic pseudo-random noise
//! - interleaved junk lines the parser must skip

#![allow(dead_code)]

use treadscan_core::constants::sensors::PIXEL_WINDOW_MIN;

/// Builder for capture logs
pub struct CaptureBuilder {
    lines: Vec<String>,
    seed: u32,
}

impl Default for CaptureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureBuilder {
    /// Empty capture with a fixed noise seed
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            seed: 42,
        }
    }

    /// Append a sensor section with explicit voltages
    pub fn sensor(mut self, id: u8, samples: &[f64]) -> Self {
        self.lines.push(format!("--- SENSOR {} ---", id));
        for (i, mv) in samples.iter().enumerate() {
            self.lines
                .push(format!("Pixel[{}]: {:.2} mV", PIXEL_WINDOW_MIN as usize + i, mv));
        }
        self
    }

    /// Append a sensor section of identical voltages
    pub fn constant_sensor(self, id: u8, count: usize, mv: f64) -> Self {
        self.sensor(id, &vec![mv; count])
    }

    /// Append a sensor section with one groove in the middle
    ///
    /// The groove is a triangular dip from `base_mv` down to `valley_mv`,
    /// `width` pixels wide, plus uniform noise of `±noise_mv`.
    pub fn grooved_sensor(
        mut self,
        id: u8,
        count: usize,
        base_mv: f64,
        valley_mv: f64,
        width: usize,
        noise_mv: f64,
    ) -> Self {
        let center = count / 2;
        let half = (width / 2).max(1) as f64;
        let samples: Vec<f64> = (0..count)
            .map(|i| {
                let distance = (i as f64 - center as f64).abs();
                let dip = (1.0 - distance / half).max(0.0) * (base_mv - valley_mv);
                base_mv - dip + self.noise(noise_mv)
            })
            .collect();
        self.sensor(id, &samples)
    }

    /// Append pixel records without any sensor header
    pub fn raw_pixels(mut self, count: usize, mv: f64) -> Self {
        for i in 0..count {
            self.lines.push(format!("Pixel[{}]: {:.2} mV", i, mv));
        }
        self
    }

    /// Append an arbitrary line
    pub fn line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    /// Finish as owned lines
    pub fn build(self) -> Vec<String> {
        self.lines
    }

    /// Finish as one text blob
    pub fn text(self) -> String {
        self.lines.join("\n")
    }

    fn noise(&mut self, amplitude: f64) -> f64 {
        self.seed = self.seed.wrapping_mul(1664525).wrapping_add(1013904223);
        let uniform = self.seed as f64 / u32::MAX as f64;
        (uniform - 0.5) * 2.0 * amplitude
    }
}

/// Six identical flat sensors
pub fn flat_capture(count: usize, mv: f64) -> Vec<String> {
    (1..=6)
        .fold(CaptureBuilder::new(), |b, id| b.constant_sensor(id, count, mv))
        .build()
}

/// Bright edge sensors with short middle sensors
pub fn bright_edge_capture() -> Vec<String> {
    CaptureBuilder::new()
        .constant_sensor(1, 100, 3000.0)
        .constant_sensor(2, 30, 2000.0)
        .constant_sensor(3, 30, 2000.0)
        .constant_sensor(4, 30, 2000.0)
        .constant_sensor(5, 30, 2000.0)
        .constant_sensor(6, 100, 3000.0)
        .build()
}
