//! # Misclosure & Tolerance
//!
//! Compares the computed closing level against the known benchmark and
//! derives the allowable error for the distance traversed.
//!
//! The allowable misclosure follows the standard order-of-accuracy rule:
//! `k * sqrt(distance in km)` millimetres, where `k` is the surveyor's
//! adjustment constant in millimetres (12.0 for ordinary leveling).

use serde::{Deserialize, Serialize};

use crate::units::{Kilometres, Metres, Millimetres};

/// Outcome of the misclosure check at the closing benchmark.
///
/// An out-of-tolerance verdict is a valid, fully computed result telling
/// the surveyor to re-run the traverse; it is never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Misclosure {
    /// Computed minus known closing elevation (m). Positive means the
    /// traverse overestimated elevation.
    pub obtained_error_m: f64,

    /// Magnitude threshold for an acceptable traverse (m)
    pub allowable_error_m: f64,

    /// `|obtained_error| <= allowable_error`
    pub within_tolerance: bool,
}

impl Misclosure {
    /// Obtained error in millimetres, for display.
    pub fn obtained_error_mm(&self) -> f64 {
        Millimetres::from(Metres(self.obtained_error_m)).value()
    }

    /// Allowable error in millimetres, for display.
    pub fn allowable_error_mm(&self) -> f64 {
        Millimetres::from(Metres(self.allowable_error_m)).value()
    }
}

/// Evaluate the misclosure at the closing benchmark.
///
/// A zero-length traverse degenerates cleanly: the allowable error is 0
/// and the check becomes an exact-match test. No division is involved, so
/// there is nothing to guard beyond that.
///
/// # Arguments
///
/// * `final_reduced_level_m` - the engine's computed level at the last station
/// * `final_known_elevation_m` - the benchmarked closing elevation
/// * `total_distance_m` - total traverse chainage
/// * `k_mm` - adjustment constant in millimetres
pub fn evaluate(
    final_reduced_level_m: f64,
    final_known_elevation_m: f64,
    total_distance_m: f64,
    k_mm: f64,
) -> Misclosure {
    let obtained_error_m = final_reduced_level_m - final_known_elevation_m;

    let total_distance_km = Kilometres::from(Metres(total_distance_m));
    let allowable_mm = Millimetres(k_mm * total_distance_km.value().sqrt());
    let allowable_error_m = Metres::from(allowable_mm).value();

    Misclosure {
        obtained_error_m,
        allowable_error_m,
        within_tolerance: obtained_error_m.abs() <= allowable_error_m,
    }
}
