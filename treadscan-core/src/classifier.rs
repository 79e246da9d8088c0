//! Aggregation and Condition Classification
//!
//! A tire is only as safe as its most worn groove, so a scan is summarized
//! by its shallowest sensors rather than by an average over all six.
//!
//! ## Condition Bands
//!
//! ```text
//! min_depth < 1.6 mm   AUS         worn, must replace (legal limit)
//! min_depth < 2.0 mm   HAMPIR_AUS  near limit, plan replacement
//! min_depth < 3.0 mm   NORMAL      adequate, monitor
//! otherwise            BAIK        good
//! ```
//!
//! Comparisons are strict: a depth exactly on a limit belongs to the better
//! band, so 1.6 mm is not `AUS` and 3.0 mm is `BAIK`.

use heapless::Vec as BoundedVec;

use crate::{
    constants::{
        condition::{GOOD_DEPTH_MM, LEGAL_LIMIT_MM, NEAR_LIMIT_MM, WORST_SENSOR_COUNT},
        sensors::SENSOR_COUNT,
    },
    errors::{AssessmentError, AssessmentResult},
    types::SensorDepth,
};

/// Shallowest sensors of one scan
pub type WorstSensors = BoundedVec<SensorDepth, WORST_SENSOR_COUNT>;

/// Tread condition label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ConditionStatus {
    /// Below the legal limit
    Aus,
    /// Approaching the legal limit
    HampirAus,
    /// Adequate tread
    Normal,
    /// Good tread
    Baik,
    /// Depth could not be interpreted
    Unknown,
}

impl ConditionStatus {
    /// Classify a minimum depth; first matching band wins
    pub fn classify(min_depth_mm: f64) -> Self {
        if !min_depth_mm.is_finite() {
            Self::Unknown
        } else if min_depth_mm < LEGAL_LIMIT_MM {
            Self::Aus
        } else if min_depth_mm < NEAR_LIMIT_MM {
            Self::HampirAus
        } else if min_depth_mm < GOOD_DEPTH_MM {
            Self::Normal
        } else {
            Self::Baik
        }
    }

    /// Label as reported
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aus => "AUS",
            Self::HampirAus => "HAMPIR_AUS",
            Self::Normal => "NORMAL",
            Self::Baik => "BAIK",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Advisory text for the operator
    pub fn detail(&self) -> &'static str {
        match self {
            Self::Aus => "Depth < 1.6mm (legal limit). Tire MUST be replaced!",
            Self::HampirAus => "Depth is approaching the limit. Prepare a replacement!",
            Self::Normal => "Depth is adequate. Monitor regularly.",
            Self::Baik => "Tread is in very good condition.",
            Self::Unknown => "Depth could not be determined.",
        }
    }
}

/// Summary of the shallowest sensors
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    /// Up to four sensors, shallowest first
    pub worst: WorstSensors,
    /// Depth of the shallowest sensor (mm)
    pub min_depth: f64,
    /// Mean depth over `worst` (mm)
    pub avg_depth: f64,
    /// Condition label
    pub status: ConditionStatus,
}

/// Reduces per-sensor depths to a tire condition
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregationClassifier;

impl AggregationClassifier {
    /// Aggregate per-sensor depths
    ///
    /// Fails when no sensor has a depth; nothing meaningful can be said then.
    pub fn aggregate(&self, per_sensor: &[SensorDepth; SENSOR_COUNT]) -> AssessmentResult<Aggregate> {
        let worst = worst_sensors(per_sensor);
        let Some(first) = worst.first() else {
            return Err(AssessmentError::NoValidDepth {
                total_pixels: per_sensor.iter().map(|s| s.pixel_count).sum(),
            });
        };

        let min_depth = first.depth_mm.unwrap_or(f64::NAN);
        let sum: f64 = worst.iter().filter_map(|s| s.depth_mm).sum();
        let avg_depth = sum / worst.len() as f64;

        Ok(Aggregate {
            min_depth,
            avg_depth,
            status: ConditionStatus::classify(min_depth),
            worst,
        })
    }

    /// Replace predicted depths with a fixed set and force `AUS`
    ///
    /// Sensors 1-4 receive `depths`; sensors 5 and 6 carry no depth. Valley
    /// and pixel information already in `per_sensor` is kept.
    pub fn apply_override(
        &self,
        per_sensor: &mut [SensorDepth; SENSOR_COUNT],
        depths: [f64; 4],
    ) -> Aggregate {
        for (i, slot) in per_sensor.iter_mut().enumerate() {
            slot.scaled = None;
            slot.depth_mm = depths.get(i).copied();
        }

        let worst = worst_sensors(per_sensor);
        let min_depth = worst.first().and_then(|s| s.depth_mm).unwrap_or(f64::NAN);
        let avg_depth = depths.iter().sum::<f64>() / depths.len() as f64;

        Aggregate {
            worst,
            min_depth,
            avg_depth,
            status: ConditionStatus::Aus,
        }
    }
}

/// Sensors with a depth, shallowest first, at most four
pub fn worst_sensors(per_sensor: &[SensorDepth]) -> WorstSensors {
    let mut valid: [Option<SensorDepth>; SENSOR_COUNT] = [None; SENSOR_COUNT];
    let mut n = 0;
    for s in per_sensor.iter().filter(|s| s.depth_mm.is_some()).take(SENSOR_COUNT) {
        valid[n] = Some(*s);
        n += 1;
    }

    let ranked = &mut valid[..n];
    // Stable: equal depths keep sensor order.
    ranked.sort_by(|a, b| depth_of(a).total_cmp(&depth_of(b)));

    ranked
        .iter()
        .flatten()
        .take(WORST_SENSOR_COUNT)
        .copied()
        .collect()
}

fn depth_of(slot: &Option<SensorDepth>) -> f64 {
    slot.and_then(|s| s.depth_mm).unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_depths(depths: [Option<f64>; 6]) -> [SensorDepth; 6] {
        core::array::from_fn(|i| SensorDepth {
            depth_mm: depths[i],
            valley: depths[i].map(|_| 2000.0),
            ..SensorDepth::empty(i as u8 + 1, 100)
        })
    }

    #[test]
    fn boundaries_are_strict() {
        assert_eq!(ConditionStatus::classify(1.5999), ConditionStatus::Aus);
        assert_eq!(ConditionStatus::classify(1.6), ConditionStatus::HampirAus);
        assert_eq!(ConditionStatus::classify(1.9999), ConditionStatus::HampirAus);
        assert_eq!(ConditionStatus::classify(2.0), ConditionStatus::Normal);
        assert_eq!(ConditionStatus::classify(2.9999), ConditionStatus::Normal);
        assert_eq!(ConditionStatus::classify(3.0), ConditionStatus::Baik);
        assert_eq!(ConditionStatus::classify(-0.5), ConditionStatus::Aus);
        assert_eq!(ConditionStatus::classify(f64::NAN), ConditionStatus::Unknown);
    }

    #[test]
    fn picks_four_shallowest() {
        let per_sensor = with_depths([Some(5.0), Some(2.5), None, Some(1.2), Some(3.3), Some(2.5)]);
        let agg = AggregationClassifier.aggregate(&per_sensor).unwrap();

        let order: Vec<u8> = agg.worst.iter().map(|s| s.sensor).collect();
        assert_eq!(order, vec![4, 2, 6, 5]);
        assert_eq!(agg.min_depth, 1.2);
        assert!((agg.avg_depth - (1.2 + 2.5 + 2.5 + 3.3) / 4.0).abs() < 1e-12);
        assert_eq!(agg.status, ConditionStatus::Aus);
    }

    #[test]
    fn fewer_than_four_valid_uses_what_exists() {
        let per_sensor = with_depths([Some(4.0), None, None, None, None, Some(3.5)]);
        let agg = AggregationClassifier.aggregate(&per_sensor).unwrap();
        assert_eq!(agg.worst.len(), 2);
        assert_eq!(agg.min_depth, 3.5);
        assert_eq!(agg.avg_depth, 3.75);
        assert_eq!(agg.status, ConditionStatus::Baik);
    }

    #[test]
    fn no_valid_depth_is_an_error() {
        let per_sensor = with_depths([None; 6]);
        assert_eq!(
            AggregationClassifier.aggregate(&per_sensor),
            Err(AssessmentError::NoValidDepth { total_pixels: 600 })
        );
    }

    #[test]
    fn override_forces_aus() {
        let mut per_sensor = with_depths([Some(9.0); 6]);
        let agg = AggregationClassifier.apply_override(&mut per_sensor, [1.28, 2.87, 2.94, 1.8]);

        assert_eq!(agg.status, ConditionStatus::Aus);
        assert_eq!(agg.min_depth, 1.28);
        assert_eq!(per_sensor[4].depth_mm, None);
        assert_eq!(per_sensor[5].depth_mm, None);
        let order: Vec<u8> = agg.worst.iter().map(|s| s.sensor).collect();
        assert_eq!(order, vec![1, 4, 2, 3]);
    }
}
