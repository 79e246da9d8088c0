//! Capture Log Parsing
//!
//! The scan head prints one text line per pixel, grouped under sensor
//! headers:
//!
//! ```text
//! --- SENSOR 1 ---
//! Pixel[ 280]: 2143.07 mV
//! Pixel[ 281]: 2139.88 mV
//! ...
//! --- SENSOR 2 ---
//! ...
//! ```
//!
//! Logs come off a serial or Bluetooth link and are often noisy: truncated
//! lines, interleaved status messages, firmware banners. Anything that does
//! not match a record is skipped and counted, never reported as an error.
//!
//! ## Recognized Records
//!
//! - **Header**: `--- SENSOR <n> ---`, case-insensitive, flexible spacing.
//!   A line that starts with `---` but is not a valid header for sensors
//!   1-6 ends the current sensor context.
//! - **Pixel**: `Pixel[<index>]: <millivolts> mV` anywhere in the line,
//!   case-insensitive, unit suffix optional. Only indices inside the
//!   configured [`PixelWindow`] are kept.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::{config::PixelWindow, constants::sensors::SENSOR_COUNT, types::SensorScan};

const HEADER_FENCE: &str = "---";
const HEADER_KEYWORD: &str = "sensor";
const PIXEL_KEYWORD: &str = "pixel[";

/// Line-level parsing statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParseStats {
    /// Lines seen
    pub total_lines: usize,
    /// Empty or whitespace-only lines
    pub blank_lines: usize,
    /// Valid sensor headers
    pub header_lines: usize,
    /// Pixel records kept
    pub pixel_records: usize,
    /// Lines matching neither record, including rejected headers
    pub skipped_lines: usize,
    /// Pixel records outside the pixel window
    pub out_of_window: usize,
    /// Pixel records with no active sensor
    pub orphan_records: usize,
}

impl ParseStats {
    /// Every line that contributed nothing to the scan
    pub fn discarded(&self) -> usize {
        self.skipped_lines + self.out_of_window + self.orphan_records
    }
}

/// One recognized line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogRecord {
    /// Sensor header with its number as printed
    Header(u32),
    /// Line that looks like a header but is not a valid one
    BadHeader,
    /// Pixel index and voltage (mV)
    Pixel {
        /// Pixel index on the sensor
        index: u32,
        /// Voltage (mV)
        millivolts: f64,
    },
}

/// Parser for CCD capture logs
#[derive(Debug, Clone, Copy, Default)]
pub struct LogParser {
    window: PixelWindow,
}

impl LogParser {
    /// Create a parser that keeps pixels inside `window`
    pub fn new(window: PixelWindow) -> Self {
        Self { window }
    }

    /// Parse a multi-sensor capture into six sensor slots
    pub fn parse<S: AsRef<str>>(&self, lines: &[S]) -> SensorScan {
        let mut scan = SensorScan::new();
        let mut stats = ParseStats::default();
        let mut current: Option<u8> = None;

        for raw in lines {
            stats.total_lines += 1;
            let line = raw.as_ref().trim();
            if line.is_empty() {
                stats.blank_lines += 1;
                continue;
            }

            match parse_record(line) {
                Some(LogRecord::Header(n)) if (1..=SENSOR_COUNT as u32).contains(&n) => {
                    stats.header_lines += 1;
                    current = Some(n as u8);
                }
                Some(LogRecord::Header(_)) | Some(LogRecord::BadHeader) => {
                    stats.skipped_lines += 1;
                    current = None;
                }
                Some(LogRecord::Pixel { index, millivolts }) => {
                    let Some(sensor) = current else {
                        stats.orphan_records += 1;
                        continue;
                    };
                    if !self.window.contains(index) {
                        stats.out_of_window += 1;
                        continue;
                    }
                    if let Some(slot) = scan.sensor_mut(sensor) {
                        slot.samples.push(millivolts);
                        stats.pixel_records += 1;
                    }
                }
                None => stats.skipped_lines += 1,
            }
        }

        scan.stats = stats;
        scan
    }

    /// Collect every pixel voltage in order, ignoring headers and the window
    ///
    /// Used for single-sensor captures, which carry no headers.
    pub fn parse_voltages<S: AsRef<str>>(&self, lines: &[S]) -> (Vec<f64>, ParseStats) {
        let mut voltages = Vec::new();
        let mut stats = ParseStats::default();

        for raw in lines {
            stats.total_lines += 1;
            let line = raw.as_ref().trim();
            if line.is_empty() {
                stats.blank_lines += 1;
                continue;
            }
            match parse_pixel(line) {
                Some((_, millivolts)) => {
                    voltages.push(millivolts);
                    stats.pixel_records += 1;
                }
                None => stats.skipped_lines += 1,
            }
        }

        (voltages, stats)
    }
}

/// Recognize one trimmed line
pub fn parse_record(line: &str) -> Option<LogRecord> {
    if line.starts_with(HEADER_FENCE) {
        return Some(match parse_header(line) {
            Some(n) => LogRecord::Header(n),
            None => LogRecord::BadHeader,
        });
    }
    parse_pixel(line).map(|(index, millivolts)| LogRecord::Pixel { index, millivolts })
}

/// `--- SENSOR <n> ---`
fn parse_header(line: &str) -> Option<u32> {
    let rest = line.strip_prefix(HEADER_FENCE)?.trim_start();
    let rest = strip_prefix_ignore_case(rest, HEADER_KEYWORD)?;

    // At least one space between the keyword and the number.
    let trimmed = rest.trim_start();
    if trimmed.len() == rest.len() {
        return None;
    }

    let (digits, rest) = split_leading(trimmed, |c| c.is_ascii_digit());
    let number = digits.parse::<u32>().ok()?;
    rest.trim_start().starts_with(HEADER_FENCE).then_some(number)
}

/// `Pixel[<index>]: <value> [mV]` anywhere in the line
fn parse_pixel(line: &str) -> Option<(u32, f64)> {
    let start = find_ignore_case(line, PIXEL_KEYWORD)?;
    let rest = line[start + PIXEL_KEYWORD.len()..].trim_start();

    let (digits, rest) = split_leading(rest, |c| c.is_ascii_digit());
    let index = digits.parse::<u32>().ok()?;

    let rest = rest.trim_start().strip_prefix("]:")?.trim_start();
    let (number, _unit) = split_leading(rest, |c| c.is_ascii_digit() || c == '.');
    // Overlong digit runs parse to infinity, which would poison the filter.
    let millivolts = number.parse::<f64>().ok().filter(|v| v.is_finite())?;

    Some((index, millivolts))
}

fn split_leading(s: &str, pred: impl Fn(char) -> bool) -> (&str, &str) {
    let end = s.find(|c: char| !pred(c)).unwrap_or(s.len());
    s.split_at(end)
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_headers() {
        assert_eq!(parse_record("--- SENSOR 3 ---"), Some(LogRecord::Header(3)));
        assert_eq!(parse_record("---sensor   12---"), Some(LogRecord::Header(12)));
        assert_eq!(parse_record("--- Sensor 1 --- extra"), Some(LogRecord::Header(1)));
        assert_eq!(parse_record("--- SENSOR x ---"), Some(LogRecord::BadHeader));
        assert_eq!(parse_record("--- SENSOR1 ---"), Some(LogRecord::BadHeader));
        assert_eq!(parse_record("--- END OF SCAN ---"), Some(LogRecord::BadHeader));
    }

    #[test]
    fn recognizes_pixels() {
        assert_eq!(
            parse_record("Pixel[ 300]: 2143.07 mV"),
            Some(LogRecord::Pixel { index: 300, millivolts: 2143.07 })
        );
        assert_eq!(
            parse_record("[12:01:03] pixel[281 ]:1999 MV"),
            Some(LogRecord::Pixel { index: 281, millivolts: 1999.0 })
        );
        assert_eq!(
            parse_record("PIXEL[400]: 2500.5"),
            Some(LogRecord::Pixel { index: 400, millivolts: 2500.5 })
        );
        assert_eq!(parse_record("Pixel[]: 2000 mV"), None);
        assert_eq!(parse_record("Pixel[300]: abc mV"), None);
        assert_eq!(parse_record("Pixels[300]: 2000"), None);
        assert_eq!(parse_record("Pixel[300] 2000 mV"), None);
    }

    #[test]
    fn overflowing_voltage_is_skipped() {
        let huge = format!("Pixel[300]: {} mV", "9".repeat(400));
        assert_eq!(parse_record(&huge), None);

        let mut lines = vec!["--- SENSOR 2 ---".to_string()];
        lines.extend((0..60).map(|i| format!("Pixel[{}]: 2000.0 mV", 300 + i)));
        lines.push(huge);
        let scan = LogParser::default().parse(&lines);
        assert_eq!(scan.samples(2).len(), 60);
        assert_eq!(scan.stats.skipped_lines, 1);
        assert!(crate::valley::ValleyDetector::default().detect(scan.samples(2)).is_present());

        let (voltages, stats) = LogParser::default().parse_voltages(&lines[1..]);
        assert_eq!(voltages.len(), 60);
        assert_eq!(stats.skipped_lines, 1);
    }

    #[test]
    fn parse_groups_by_sensor_and_window() {
        let lines = [
            "boot ok",
            "--- SENSOR 1 ---",
            "Pixel[279]: 1000.0 mV",
            "Pixel[280]: 2000.0 mV",
            "Pixel[1080]: 2100.0 mV",
            "Pixel[1081]: 1000.0 mV",
            "",
            "--- SENSOR 6 ---",
            "Pixel[500]: 2200.0 mV",
            "garbage",
        ];
        let scan = LogParser::default().parse(&lines);

        assert_eq!(scan.samples(1), &[2000.0, 2100.0]);
        assert_eq!(scan.samples(6), &[2200.0]);
        assert_eq!(scan.total_pixels(), 3);

        let stats = scan.stats;
        assert_eq!(stats.total_lines, 10);
        assert_eq!(stats.blank_lines, 1);
        assert_eq!(stats.header_lines, 2);
        assert_eq!(stats.pixel_records, 3);
        assert_eq!(stats.out_of_window, 2);
        assert_eq!(stats.skipped_lines, 2);
        assert_eq!(stats.discarded(), 4);
    }

    #[test]
    fn bad_header_ends_sensor_context() {
        let lines = [
            "--- SENSOR 2 ---",
            "Pixel[300]: 2000.0 mV",
            "--- SENSOR 9 ---",
            "Pixel[301]: 2000.0 mV",
            "--- CHECKSUM ---",
            "Pixel[302]: 2000.0 mV",
        ];
        let scan = LogParser::default().parse(&lines);
        assert_eq!(scan.samples(2), &[2000.0]);
        assert_eq!(scan.stats.orphan_records, 2);
        assert_eq!(scan.stats.skipped_lines, 2);
    }

    #[test]
    fn voltages_ignore_headers_and_window() {
        let lines = ["--- SENSOR 1 ---", "Pixel[0]: 10.0 mV", "Pixel[5000]: 20.0 mV", "noise"];
        let (voltages, stats) = LogParser::default().parse_voltages(&lines);
        assert_eq!(voltages, vec![10.0, 20.0]);
        assert_eq!(stats.pixel_records, 2);
        assert_eq!(stats.skipped_lines, 2);
    }
}
