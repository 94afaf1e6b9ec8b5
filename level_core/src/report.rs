//! # Field Book Presentation
//!
//! Turns calculation output into the strings a host renders: the classic
//! ten-column field book (station, chainage, BS/IS/FS, rise/fall, RL,
//! correction, adjusted RL) and the misclosure assessment line.
//!
//! Formatting conventions follow the printed field book:
//! - staff readings and levels at three decimals
//! - corrections at four decimals with an explicit sign
//! - a dash for anything not recorded or not applicable - a blank cell is
//!   never rendered as `0.000`
//! - misclosure figures quoted in millimetres at two decimals
//!
//! Only plain strings are produced here; laying them out on paper or
//! screen is the host's job.

use serde::{Deserialize, Serialize};

use crate::calculations::{Misclosure, ReducedStation, SurveyOutput};
use crate::readings::Reading;

/// One display row of the field book: every cell pre-formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldBookRow {
    pub station: String,
    pub cumulative_distance: String,
    pub backsight: String,
    pub intersight: String,
    pub foresight: String,
    pub rise: String,
    pub fall: String,
    pub reduced_level: String,
    pub correction: String,
    pub adjusted_level: String,
}

/// Format a staff reading or level at three decimals, dash when absent.
pub fn format_level(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.3}", v),
        None => "-".to_string(),
    }
}

/// Format a chainage at one decimal.
pub fn format_distance(value: f64) -> String {
    format!("{:.1}", value)
}

/// Format a signed correction at four decimals.
///
/// Absent and zero both render as a dash: a zero correction carries no
/// information in the book.
pub fn format_signed(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 => format!("{:+.4}", v),
        _ => "-".to_string(),
    }
}

/// Build display rows by pairing readings with their derived stations.
///
/// The two sequences are parallel by construction (`calculate` emits one
/// station per reading, in order); rows are paired by index.
pub fn field_book_rows(readings: &[Reading], stations: &[ReducedStation]) -> Vec<FieldBookRow> {
    readings
        .iter()
        .zip(stations.iter())
        .map(|(reading, station)| FieldBookRow {
            station: station.station.clone(),
            cumulative_distance: format_distance(station.cumulative_distance_m),
            backsight: format_level(reading.backsight_m),
            intersight: format_level(reading.intersight_m),
            foresight: format_level(reading.foresight_m),
            rise: format_level(station.rise_m),
            fall: format_level(station.fall_m),
            reduced_level: format_level(station.reduced_level_m),
            correction: format_signed(station.correction_m),
            adjusted_level: format_level(station.adjusted_level_m),
        })
        .collect()
}

/// Verdict label for the assessment line.
pub fn verdict(misclosure: &Misclosure) -> &'static str {
    if misclosure.within_tolerance {
        "ACCEPTABLE"
    } else {
        "OUT OF LIMIT"
    }
}

/// The assessment block under the table, one string per line.
///
/// Without a closing benchmark there is nothing to assess, and the block
/// says so rather than quoting zeros.
pub fn assessment_lines(output: &SurveyOutput) -> Vec<String> {
    match &output.summary.misclosure {
        Some(check) => vec![
            format!("Obtained Error: {:.2} mm", check.obtained_error_mm()),
            format!("Allowable Error: ±{:.2} mm", check.allowable_error_mm()),
            format!("Status: {}", verdict(check)),
        ],
        None => vec!["No closing benchmark - misclosure not checked".to_string()],
    }
}
