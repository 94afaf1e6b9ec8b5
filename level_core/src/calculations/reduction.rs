//! # Rise-and-Fall Reduction
//!
//! The sequential core of the level book: turns ordered staff readings
//! into reduced levels, one station at a time. Each station depends only
//! on the stations before it, threaded through an explicit carried state
//! (reference staff + running elevation) rather than scattered loop
//! variables, so every step is reproducible and testable on its own.
//!
//! ## Algorithm
//!
//! 1. Cumulative distance is the running sum of interval distances.
//! 2. Station 0's reduced level is its known elevation if recorded, else
//!    the caller-supplied default; the reference staff starts at its
//!    backsight (0 when none was taken).
//! 3. For each later station, the governing sight is the intersight if
//!    present, else the foresight. The height difference is
//!    `reference staff - sight`: positive is a rise, otherwise a fall
//!    (a difference of exactly 0 is recorded as a fall of magnitude 0).
//! 4. A new backsight at a sighted station is a change point and becomes
//!    the carried reference; otherwise the sight just taken does.
//!
//! A station with no sight at all is an incomplete row: its reduced level
//! stays absent and the carried state is untouched, so later rows still
//! reduce correctly against the last valid reference.

use serde::{Deserialize, Serialize};

use crate::readings::Reading;

/// Derived values for one station, parallel to the input [`Reading`]
/// sequence. The correction fields stay absent until the distributor
/// runs (which requires a closing benchmark).
///
/// ## JSON Example
///
/// ```json
/// {
///   "station": "CP1",
///   "cumulative_distance_m": 75.0,
///   "rise_m": 0.22,
///   "fall_m": null,
///   "reduced_level_m": 100.4,
///   "correction_m": -0.001,
///   "adjusted_level_m": 100.399
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReducedStation {
    /// Station label copied from the input reading
    pub station: String,

    /// Running sum of interval distances up to and including this station (m)
    pub cumulative_distance_m: f64,

    /// Height gained since the previous reduced station (m); mutually
    /// exclusive with `fall_m`
    pub rise_m: Option<f64>,

    /// Height lost since the previous reduced station (m)
    pub fall_m: Option<f64>,

    /// Computed absolute elevation (m); absent when the row has no sight
    pub reduced_level_m: Option<f64>,

    /// Signed misclosure correction (m); absent until distribution runs,
    /// and always absent for the anchored first station
    pub correction_m: Option<f64>,

    /// Reduced level after correction (m)
    pub adjusted_level_m: Option<f64>,
}

impl ReducedStation {
    fn from_reading(reading: &Reading, cumulative_distance_m: f64) -> Self {
        ReducedStation {
            station: reading.station.clone(),
            cumulative_distance_m,
            rise_m: None,
            fall_m: None,
            reduced_level_m: None,
            correction_m: None,
            adjusted_level_m: None,
        }
    }

    /// The elevation a host should display: the adjusted level when the
    /// misclosure has been distributed, the raw reduced level otherwise.
    pub fn final_level_m(&self) -> Option<f64> {
        self.adjusted_level_m.or(self.reduced_level_m)
    }
}

/// State carried through the station-by-station fold.
#[derive(Debug, Clone, Copy)]
struct Carry {
    /// Most recent reference staff reading (m): the last backsight, or
    /// the last sight taken where no new backsight was recorded.
    reference_staff_m: f64,

    /// Running reduced level (m) at the last station that had a sight.
    elevation_m: f64,
}

/// Reduce an ordered reading sequence to per-station levels.
///
/// Pure and total: malformed-but-numeric input still folds
/// deterministically, incomplete rows simply yield absent reduced levels,
/// and an empty sequence yields an empty result. Validation of host input
/// happens before this is called (see `SurveyInput::validate`).
pub fn reduce(readings: &[Reading], default_start_elevation_m: f64) -> Vec<ReducedStation> {
    let mut stations = Vec::with_capacity(readings.len());

    let Some(first) = readings.first() else {
        return stations;
    };

    let mut cumulative_m = first.interval_distance_m;
    let start_elevation_m = first.known_elevation_m.unwrap_or(default_start_elevation_m);

    let mut carry = Carry {
        reference_staff_m: first.backsight_m.unwrap_or(0.0),
        elevation_m: start_elevation_m,
    };

    let mut opening = ReducedStation::from_reading(first, cumulative_m);
    opening.reduced_level_m = Some(start_elevation_m);
    stations.push(opening);

    for reading in &readings[1..] {
        cumulative_m += reading.interval_distance_m;
        let mut station = ReducedStation::from_reading(reading, cumulative_m);

        if let Some(sight_m) = reading.sight() {
            let diff_m = carry.reference_staff_m - sight_m;
            if diff_m > 0.0 {
                station.rise_m = Some(diff_m);
            } else {
                // Zero difference counts as a fall of magnitude 0.
                station.fall_m = Some(diff_m.abs());
            }

            carry.elevation_m += diff_m;
            station.reduced_level_m = Some(carry.elevation_m);

            carry.reference_staff_m = match reading.backsight_m {
                // Change point: the new backsight re-establishes the reference.
                Some(backsight_m) => backsight_m,
                None => sight_m,
            };
        }
        // No sight recorded: leave the row's derived fields absent and the
        // carry untouched. The gap must not propagate as zero.

        stations.push(station);
    }

    stations
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_empty_sequence() {
        assert!(reduce(&[], 100.0).is_empty());
    }

    #[test]
    fn test_single_station_uses_known_elevation() {
        let readings = vec![Reading::opening_benchmark("BM-A", 1.5, 123.456)];
        let stations = reduce(&readings, 100.0);
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].reduced_level_m, Some(123.456));
        assert_eq!(stations[0].rise_m, None);
        assert_eq!(stations[0].fall_m, None);
    }

    #[test]
    fn test_single_station_falls_back_to_default() {
        let readings = vec![Reading {
            station: "S0".to_string(),
            interval_distance_m: 0.0,
            backsight_m: Some(1.5),
            intersight_m: None,
            foresight_m: None,
            known_elevation_m: None,
        }];
        let stations = reduce(&readings, 100.0);
        assert_eq!(stations[0].reduced_level_m, Some(100.0));
    }

    #[test]
    fn test_two_station_rise() {
        // BS 1.500 at RL 100.000, FS 1.200 fifty metres on: a 0.300 rise.
        let readings = vec![
            Reading::opening_benchmark("BM-A", 1.500, 100.000),
            Reading::closing_benchmark("BM-B", 50.0, 1.200, 100.300),
        ];
        let stations = reduce(&readings, 100.0);

        assert!((stations[1].rise_m.unwrap() - 0.300).abs() < EPS);
        assert_eq!(stations[1].fall_m, None);
        assert!((stations[1].reduced_level_m.unwrap() - 100.300).abs() < EPS);
        assert!((stations[1].cumulative_distance_m - 50.0).abs() < EPS);
    }

    #[test]
    fn test_fall_recorded_as_positive_magnitude() {
        let readings = vec![
            Reading::opening_benchmark("BM-A", 1.200, 100.000),
            Reading::intermediate("S1", 25.0, 1.750),
        ];
        let stations = reduce(&readings, 100.0);

        assert_eq!(stations[1].rise_m, None);
        assert!((stations[1].fall_m.unwrap() - 0.550).abs() < EPS);
        assert!((stations[1].reduced_level_m.unwrap() - 99.450).abs() < EPS);
    }

    #[test]
    fn test_zero_difference_is_a_fall_of_zero() {
        let readings = vec![
            Reading::opening_benchmark("BM-A", 1.500, 100.000),
            Reading::intermediate("S1", 25.0, 1.500),
        ];
        let stations = reduce(&readings, 100.0);

        assert_eq!(stations[1].rise_m, None);
        assert_eq!(stations[1].fall_m, Some(0.0));
        // Not the -0.0 bit pattern either.
        assert!(stations[1].fall_m.unwrap().is_sign_positive());
        assert!((stations[1].reduced_level_m.unwrap() - 100.000).abs() < EPS);
    }

    #[test]
    fn test_change_point_swaps_reference() {
        // CP1 closes the first bay with FS 1.100 then opens the next with
        // BS 1.850; S2's sight reduces against 1.850, not 1.100.
        let readings = vec![
            Reading::opening_benchmark("BM-A", 1.500, 100.000),
            Reading::change_point("CP1", 40.0, 1.100, 1.850),
            Reading::intermediate("S2", 30.0, 1.700),
        ];
        let stations = reduce(&readings, 100.0);

        assert!((stations[1].reduced_level_m.unwrap() - 100.400).abs() < EPS);
        // 1.850 - 1.700 = 0.150 rise.
        assert!((stations[2].rise_m.unwrap() - 0.150).abs() < EPS);
        assert!((stations[2].reduced_level_m.unwrap() - 100.550).abs() < EPS);
    }

    #[test]
    fn test_reference_carries_forward_without_backsight() {
        // Without a new BS, the sight just taken becomes the reference.
        let readings = vec![
            Reading::opening_benchmark("BM-A", 1.500, 100.000),
            Reading::intermediate("S1", 20.0, 1.300),
            Reading::intermediate("S2", 20.0, 1.100),
        ];
        let stations = reduce(&readings, 100.0);

        // S1: 1.5 - 1.3 = +0.2; S2: 1.3 - 1.1 = +0.2.
        assert!((stations[1].reduced_level_m.unwrap() - 100.200).abs() < EPS);
        assert!((stations[2].reduced_level_m.unwrap() - 100.400).abs() < EPS);
    }

    #[test]
    fn test_incomplete_row_leaves_gap_without_corrupting_downstream() {
        let blank = Reading {
            station: "S1".to_string(),
            interval_distance_m: 20.0,
            backsight_m: None,
            intersight_m: None,
            foresight_m: None,
            known_elevation_m: None,
        };
        let readings = vec![
            Reading::opening_benchmark("BM-A", 1.500, 100.000),
            blank,
            Reading::intermediate("S2", 30.0, 1.200),
        ];
        let stations = reduce(&readings, 100.0);

        // The gap row has no derived values but keeps its chainage.
        assert_eq!(stations[1].reduced_level_m, None);
        assert_eq!(stations[1].rise_m, None);
        assert_eq!(stations[1].fall_m, None);
        assert!((stations[1].cumulative_distance_m - 20.0).abs() < EPS);

        // S2 still reduces against BM-A's backsight: 1.5 - 1.2 = +0.3.
        assert!((stations[2].rise_m.unwrap() - 0.300).abs() < EPS);
        assert!((stations[2].reduced_level_m.unwrap() - 100.300).abs() < EPS);
        assert!((stations[2].cumulative_distance_m - 50.0).abs() < EPS);
    }

    #[test]
    fn test_backsight_on_unsighted_row_is_ignored() {
        // A stray BS with no closing sight does not move the reference.
        let stray = Reading {
            station: "S1".to_string(),
            interval_distance_m: 20.0,
            backsight_m: Some(9.999),
            intersight_m: None,
            foresight_m: None,
            known_elevation_m: None,
        };
        let readings = vec![
            Reading::opening_benchmark("BM-A", 1.500, 100.000),
            stray,
            Reading::intermediate("S2", 30.0, 1.200),
        ];
        let stations = reduce(&readings, 100.0);
        assert!((stations[2].rise_m.unwrap() - 0.300).abs() < EPS);
    }

    #[test]
    fn test_missing_opening_backsight_defaults_reference_to_zero() {
        let bare = Reading {
            station: "S0".to_string(),
            interval_distance_m: 0.0,
            backsight_m: None,
            intersight_m: None,
            foresight_m: None,
            known_elevation_m: Some(100.0),
        };
        let readings = vec![bare, Reading::intermediate("S1", 10.0, 0.250)];
        let stations = reduce(&readings, 100.0);

        // Reference 0.0 - sight 0.250 = fall of 0.250.
        assert!((stations[1].fall_m.unwrap() - 0.250).abs() < EPS);
        assert!((stations[1].reduced_level_m.unwrap() - 99.750).abs() < EPS);
    }

    #[test]
    fn test_cumulative_distance_is_running_sum() {
        let readings = vec![
            Reading::opening_benchmark("BM-A", 1.5, 100.0),
            Reading::intermediate("S1", 12.5, 1.4),
            Reading::intermediate("S2", 17.5, 1.3),
            Reading::closing_benchmark("BM-B", 20.0, 1.2, 100.3),
        ];
        let stations = reduce(&readings, 100.0);
        let distances: Vec<f64> = stations.iter().map(|s| s.cumulative_distance_m).collect();
        assert_eq!(distances, vec![0.0, 12.5, 30.0, 50.0]);
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_exactly_one_of_rise_fall_per_sighted_row() {
        let readings = vec![
            Reading::opening_benchmark("BM-A", 1.5, 100.0),
            Reading::intermediate("S1", 10.0, 1.2),
            Reading::intermediate("S2", 10.0, 1.9),
            Reading::intermediate("S3", 10.0, 1.9),
        ];
        let stations = reduce(&readings, 100.0);
        for station in &stations[1..] {
            assert!(station.rise_m.is_some() != station.fall_m.is_some());
            let rise = station.rise_m.unwrap_or(0.0);
            let fall = station.fall_m.unwrap_or(0.0);
            assert!(rise >= 0.0 && fall >= 0.0);
        }
    }

    #[test]
    fn test_reduced_level_matches_rise_fall_bookkeeping() {
        let readings = vec![
            Reading::opening_benchmark("BM-A", 1.5, 100.0),
            Reading::intermediate("S1", 10.0, 1.2),
            Reading::change_point("CP1", 10.0, 1.8, 0.9),
            Reading::closing_benchmark("BM-B", 10.0, 1.4, 99.0),
        ];
        let stations = reduce(&readings, 100.0);
        for pair in stations.windows(2) {
            let (prev, curr) = (&pair[0], &pair[1]);
            let delta = curr.rise_m.unwrap_or(0.0) - curr.fall_m.unwrap_or(0.0);
            let expected = prev.reduced_level_m.unwrap() + delta;
            assert!((curr.reduced_level_m.unwrap() - expected).abs() < EPS);
        }
    }

    #[test]
    fn test_idempotent_over_unmodified_input() {
        let readings = vec![
            Reading::opening_benchmark("BM-A", 1.5, 100.0),
            Reading::change_point("CP1", 40.0, 1.1, 1.85),
            Reading::closing_benchmark("BM-B", 45.0, 1.42, 100.5),
        ];
        assert_eq!(reduce(&readings, 100.0), reduce(&readings, 100.0));
    }
}
