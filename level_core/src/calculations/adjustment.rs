//! # Proportional Adjustment
//!
//! Distributes the obtained misclosure back over the traverse in
//! proportion to each station's cumulative distance. The first station is
//! the fixed anchor and never receives a correction; the final station's
//! correction equals the negated obtained error exactly, closing the
//! traverse onto the benchmark.

use crate::calculations::reduction::ReducedStation;

/// Apply distance-proportional corrections in place.
///
/// For each station after the anchor,
/// `correction = -(obtained_error * cumulative_distance / total_distance)`.
/// A station whose reduced level is absent (incomplete row) still gets its
/// correction - its chainage share of the misclosure is well defined - but
/// no adjusted level.
///
/// With zero total distance there is no chainage to apportion over, so no
/// corrections are applied; the anchor's adjusted level is still pinned to
/// its reduced level.
pub fn distribute(stations: &mut [ReducedStation], obtained_error_m: f64, total_distance_m: f64) {
    let Some((anchor, rest)) = stations.split_first_mut() else {
        return;
    };
    anchor.adjusted_level_m = anchor.reduced_level_m;

    if total_distance_m <= 0.0 {
        return;
    }

    for station in rest {
        let correction_m =
            -(obtained_error_m * station.cumulative_distance_m / total_distance_m);
        station.correction_m = Some(correction_m);
        station.adjusted_level_m = station.reduced_level_m.map(|level| level + correction_m);
    }
}
