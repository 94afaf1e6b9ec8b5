//! # Leveling Calculations
//!
//! The computational core of the level book. The calculation follows the
//! same pattern as every other part of the crate's API:
//!
//! - [`SurveyInput`] - input parameters (JSON-serializable)
//! - [`SurveyOutput`] - calculation results (JSON-serializable)
//! - [`calculate`] - pure function from one to the other
//!
//! Data flows strictly forward through the three sub-modules:
//!
//! - [`reduction`] - staff readings to cumulative distance, rise/fall,
//!   reduced levels
//! - [`misclosure`] - closing error and allowable-error threshold
//! - [`adjustment`] - distance-proportional corrections
//!
//! No component depends on anything computed after it, and nothing is
//! cached between invocations: every call re-derives the whole result set
//! from the current reading sequence, so the engine is safe to invoke
//! from concurrent contexts on independent inputs.

pub mod adjustment;
pub mod misclosure;
pub mod reduction;

use serde::{Deserialize, Serialize};

use crate::errors::LevelResult;
use crate::readings::Reading;

// Re-export commonly used types
pub use misclosure::Misclosure;
pub use reduction::ReducedStation;

/// Default starting elevation when the first station has no known RL (m)
pub const DEFAULT_START_ELEVATION_M: f64 = 100.000;

/// Default adjustment constant k for ordinary leveling (mm)
pub const DEFAULT_K_MM: f64 = 12.0;

/// Input parameters for a leveling run.
///
/// ## JSON Example
///
/// ```json
/// {
///   "readings": [
///     { "station": "BM-A", "interval_distance_m": 0.0, "backsight_m": 1.5,
///       "intersight_m": null, "foresight_m": null, "known_elevation_m": 100.0 },
///     { "station": "BM-B", "interval_distance_m": 50.0, "backsight_m": null,
///       "intersight_m": null, "foresight_m": 1.2, "known_elevation_m": 100.3 }
///   ],
///   "start_elevation_m": 100.0,
///   "k_mm": 12.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyInput {
    /// Ordered staff readings, one per station
    pub readings: Vec<Reading>,

    /// Fallback starting elevation when station 0 has no known RL (m)
    pub start_elevation_m: f64,

    /// Adjustment constant k for the allowable-error formula (mm)
    pub k_mm: f64,
}

impl SurveyInput {
    /// Build an input with the standard defaults (start RL 100.000 m,
    /// k = 12.0 mm).
    pub fn new(readings: Vec<Reading>) -> Self {
        SurveyInput {
            readings,
            start_elevation_m: DEFAULT_START_ELEVATION_M,
            k_mm: DEFAULT_K_MM,
        }
    }

    /// Override the adjustment constant.
    pub fn with_k(mut self, k_mm: f64) -> Self {
        self.k_mm = k_mm;
        self
    }

    /// Override the fallback starting elevation.
    pub fn with_start_elevation(mut self, start_elevation_m: f64) -> Self {
        self.start_elevation_m = start_elevation_m;
        self
    }

    /// Validate host input before computation.
    ///
    /// The reduction itself assumes validated numeric inputs; this is
    /// the host boundary where that assumption is enforced.
    pub fn validate(&self) -> LevelResult<()> {
        use crate::errors::LevelError;

        if !self.start_elevation_m.is_finite() {
            return Err(LevelError::invalid_input(
                "start_elevation_m",
                self.start_elevation_m.to_string(),
                "Starting elevation must be finite",
            ));
        }
        if !self.k_mm.is_finite() || self.k_mm < 0.0 {
            return Err(LevelError::invalid_input(
                "k_mm",
                self.k_mm.to_string(),
                "Adjustment constant must be finite and non-negative",
            ));
        }
        for reading in &self.readings {
            reading.validate()?;
        }
        Ok(())
    }
}

impl Default for SurveyInput {
    fn default() -> Self {
        SurveyInput::new(Vec::new())
    }
}

/// Whole-survey summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveySummary {
    /// Total traverse chainage (m)
    pub total_distance_m: f64,

    /// Misclosure check; absent when there is no closing benchmark or the
    /// traverse is too short to close (fewer than two stations)
    pub misclosure: Option<Misclosure>,
}

/// Results of a leveling run: per-station records plus the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyOutput {
    /// One record per input reading, in survey order
    pub stations: Vec<ReducedStation>,

    /// Whole-survey statistics
    pub summary: SurveySummary,
}

impl SurveyOutput {
    /// Tolerance verdict, when a misclosure check ran.
    pub fn within_tolerance(&self) -> Option<bool> {
        self.summary.misclosure.as_ref().map(|m| m.within_tolerance)
    }
}

/// Run the full leveling computation.
///
/// Reduces the readings, evaluates the misclosure when the final station
/// carries a known elevation (and the traverse has at least two
/// stations), then distributes corrections. Expected field conditions -
/// incomplete rows, a missing closing benchmark, a zero-length traverse,
/// an out-of-tolerance result - are all ordinary outputs, never errors.
///
/// # Example
///
/// ```rust
/// use level_core::calculations::{calculate, SurveyInput};
/// use level_core::readings::Reading;
///
/// let input = SurveyInput::new(vec![
///     Reading::opening_benchmark("BM-A", 1.500, 100.000),
///     Reading::closing_benchmark("BM-B", 50.0, 1.200, 100.300),
/// ]);
///
/// let output = calculate(&input).unwrap();
/// let closing = output.stations.last().unwrap();
/// assert!((closing.reduced_level_m.unwrap() - 100.300).abs() < 1e-9);
/// assert!(output.within_tolerance().unwrap());
/// ```
pub fn calculate(input: &SurveyInput) -> LevelResult<SurveyOutput> {
    input.validate()?;

    let mut stations = reduction::reduce(&input.readings, input.start_elevation_m);

    let total_distance_m = stations
        .last()
        .map(|s| s.cumulative_distance_m)
        .unwrap_or(0.0);

    // A traverse needs at least two stations, a computed closing level,
    // and a closing benchmark before there is anything to check.
    let misclosure = match (stations.last(), input.readings.last()) {
        (Some(last_station), Some(last_reading)) if stations.len() >= 2 => {
            match (last_station.reduced_level_m, last_reading.known_elevation_m) {
                (Some(reduced_m), Some(known_m)) => Some(misclosure::evaluate(
                    reduced_m,
                    known_m,
                    total_distance_m,
                    input.k_mm,
                )),
                _ => None,
            }
        }
        _ => None,
    };

    if let Some(check) = &misclosure {
        adjustment::distribute(&mut stations, check.obtained_error_m, total_distance_m);
    }

    Ok(SurveyOutput {
        stations,
        summary: SurveySummary {
            total_distance_m,
            misclosure,
        },
    })
}
