//! # Staff Readings
//!
//! The raw field-book input: one [`Reading`] per surveyed station, in
//! survey order. A reading holds the staff sightings taken at that
//! station plus the interval distance walked from the previous one.
//!
//! ## Absent vs Zero
//!
//! Every sighting field is an `Option<f64>`. `None` means "not recorded
//! at this station"; `Some(0.0)` is a legitimate staff reading of zero.
//! The two must never be conflated - a sentinel value like NaN or a magic
//! zero would misclassify genuine measurements.
//!
//! ## Entry Modes
//!
//! Field crews record four kinds of points, and the constructors mirror
//! them:
//!
//! - [`Reading::opening_benchmark`] - starting BM: backsight + known RL
//! - [`Reading::intermediate`] - intersight only
//! - [`Reading::change_point`] - foresight closing the old reference plus
//!   a backsight establishing the new one
//! - [`Reading::closing_benchmark`] - final foresight + known RL for the
//!   misclosure check
//!
//! ## Example
//!
//! ```rust
//! use level_core::readings::Reading;
//!
//! let readings = vec![
//!     Reading::opening_benchmark("BM-A", 1.500, 100.000),
//!     Reading::intermediate("S1", 40.0, 1.320),
//!     Reading::change_point("CP1", 35.0, 1.100, 1.850),
//!     Reading::closing_benchmark("BM-B", 45.0, 1.420, 100.500),
//! ];
//!
//! assert!(readings.iter().all(|r| r.validate().is_ok()));
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{LevelError, LevelResult};

/// One recorded station in the field book.
///
/// Readings are immutable once recorded; edits by the host replace the
/// whole sequence and every derived value is recomputed from scratch.
///
/// ## JSON Example
///
/// ```json
/// {
///   "station": "CP1",
///   "interval_distance_m": 35.0,
///   "backsight_m": 1.85,
///   "intersight_m": null,
///   "foresight_m": 1.1,
///   "known_elevation_m": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Display label for this station (e.g., "BM-A", "CP1", "S3")
    pub station: String,

    /// Distance from the previous station in metres (0 for the first)
    pub interval_distance_m: f64,

    /// Backsight: staff reading establishing a new reference height
    pub backsight_m: Option<f64>,

    /// Intersight: staff reading to an intermediate point
    pub intersight_m: Option<f64>,

    /// Foresight: staff reading closing out the current reference height
    pub foresight_m: Option<f64>,

    /// Externally surveyed elevation, supplied at benchmarks
    pub known_elevation_m: Option<f64>,
}

impl Reading {
    /// Opening benchmark: a backsight onto a point of known elevation.
    ///
    /// This is the first reading of a traverse; its interval distance is 0.
    pub fn opening_benchmark(
        station: impl Into<String>,
        backsight_m: f64,
        known_elevation_m: f64,
    ) -> Self {
        Reading {
            station: station.into(),
            interval_distance_m: 0.0,
            backsight_m: Some(backsight_m),
            intersight_m: None,
            foresight_m: None,
            known_elevation_m: Some(known_elevation_m),
        }
    }

    /// Intermediate point: an intersight that does not move the reference.
    pub fn intermediate(
        station: impl Into<String>,
        interval_distance_m: f64,
        intersight_m: f64,
    ) -> Self {
        Reading {
            station: station.into(),
            interval_distance_m,
            backsight_m: None,
            intersight_m: Some(intersight_m),
            foresight_m: None,
            known_elevation_m: None,
        }
    }

    /// Change point: a foresight closing the current reference and a
    /// backsight establishing the next one.
    pub fn change_point(
        station: impl Into<String>,
        interval_distance_m: f64,
        foresight_m: f64,
        backsight_m: f64,
    ) -> Self {
        Reading {
            station: station.into(),
            interval_distance_m,
            backsight_m: Some(backsight_m),
            intersight_m: None,
            foresight_m: Some(foresight_m),
            known_elevation_m: None,
        }
    }

    /// Closing benchmark: the final foresight onto a point of known
    /// elevation, enabling the misclosure check.
    pub fn closing_benchmark(
        station: impl Into<String>,
        interval_distance_m: f64,
        foresight_m: f64,
        known_elevation_m: f64,
    ) -> Self {
        Reading {
            station: station.into(),
            interval_distance_m,
            backsight_m: None,
            intersight_m: None,
            foresight_m: Some(foresight_m),
            known_elevation_m: Some(known_elevation_m),
        }
    }

    /// Attach a known elevation (e.g., to turn any reading into a benchmark).
    pub fn with_known_elevation(mut self, known_elevation_m: f64) -> Self {
        self.known_elevation_m = Some(known_elevation_m);
        self
    }

    /// The sight used for reduction at this station: the intersight if one
    /// was recorded, otherwise the foresight. `None` means the row is
    /// incomplete and its reduced level stays undefined.
    pub fn sight(&self) -> Option<f64> {
        self.intersight_m.or(self.foresight_m)
    }

    /// Whether both a foresight and a backsight were recorded here.
    pub fn is_change_point(&self) -> bool {
        self.foresight_m.is_some() && self.backsight_m.is_some()
    }

    /// Validate this reading at the host boundary.
    ///
    /// All recorded numeric fields must be finite and non-negative:
    /// distances cannot run backwards and a levelling staff has no
    /// negative graduations. Absent optional fields are always valid.
    pub fn validate(&self) -> LevelResult<()> {
        if !self.interval_distance_m.is_finite() || self.interval_distance_m < 0.0 {
            return Err(LevelError::invalid_input(
                "interval_distance_m",
                self.interval_distance_m.to_string(),
                format!(
                    "Interval distance must be non-negative (station '{}')",
                    self.station
                ),
            ));
        }

        let staff_fields = [
            ("backsight_m", self.backsight_m),
            ("intersight_m", self.intersight_m),
            ("foresight_m", self.foresight_m),
            ("known_elevation_m", self.known_elevation_m),
        ];
        for (field, value) in staff_fields {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(LevelError::invalid_input(
                        field,
                        v.to_string(),
                        format!(
                            "Recorded values must be finite and non-negative (station '{}')",
                            self.station
                        ),
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sight_prefers_intersight() {
        let mut reading = Reading::change_point("CP1", 30.0, 1.2, 1.8);
        assert_eq!(reading.sight(), Some(1.2));

        reading.intersight_m = Some(1.5);
        assert_eq!(reading.sight(), Some(1.5));
    }

    #[test]
    fn test_sight_absent_on_incomplete_row() {
        let reading = Reading {
            station: "S1".to_string(),
            interval_distance_m: 20.0,
            backsight_m: None,
            intersight_m: None,
            foresight_m: None,
            known_elevation_m: None,
        };
        assert_eq!(reading.sight(), None);
    }

    #[test]
    fn test_zero_sight_is_a_reading() {
        // A staff reading of exactly 0.000 is a measurement, not absence.
        let reading = Reading::intermediate("S1", 10.0, 0.0);
        assert_eq!(reading.sight(), Some(0.0));
        assert!(reading.validate().is_ok());
    }

    #[test]
    fn test_change_point_detection() {
        assert!(Reading::change_point("CP1", 30.0, 1.1, 1.85).is_change_point());
        assert!(!Reading::intermediate("S1", 20.0, 1.3).is_change_point());
        assert!(!Reading::opening_benchmark("BM-A", 1.5, 100.0).is_change_point());
    }

    #[test]
    fn test_validate_rejects_negative_distance() {
        let mut reading = Reading::intermediate("S1", 20.0, 1.3);
        reading.interval_distance_m = -5.0;
        let err = reading.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_validate_rejects_non_finite_staff() {
        let mut reading = Reading::intermediate("S1", 20.0, 1.3);
        reading.intersight_m = Some(f64::NAN);
        assert!(reading.validate().is_err());

        reading.intersight_m = Some(-0.5);
        assert!(reading.validate().is_err());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let reading = Reading::opening_benchmark("BM-A", 1.5, 100.0);
        let json = serde_json::to_string(&reading).unwrap();
        let roundtrip: Reading = serde_json::from_str(&json).unwrap();
        assert_eq!(reading, roundtrip);
    }

    #[test]
    fn test_absent_fields_serialize_as_null() {
        let reading = Reading::intermediate("S1", 20.0, 1.3);
        let json = serde_json::to_string(&reading).unwrap();
        assert!(json.contains("\"backsight_m\":null"));
        assert!(json.contains("\"intersight_m\":1.3"));
    }
}
