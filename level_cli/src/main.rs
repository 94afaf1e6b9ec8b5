//! # Levelbook CLI Application
//!
//! Terminal front end for the leveling reduction engine. Pass a saved
//! `.lvl` draft to reduce every line in it, or run with no arguments for
//! a built-in demo traverse.

use std::env;
use std::path::Path;
use std::process::ExitCode;

use level_core::calculations::{calculate, SurveyOutput};
use level_core::file_io::load_draft;
use level_core::project::AdjustmentSettings;
use level_core::readings::Reading;
use level_core::report::{assessment_lines, field_book_rows, FieldBookRow};

fn demo_readings() -> Vec<Reading> {
    vec![
        Reading::opening_benchmark("BM-A", 1.500, 100.000),
        Reading::intermediate("S1", 40.0, 1.320),
        Reading::change_point("CP1", 35.0, 1.100, 1.850),
        Reading::intermediate("S2", 30.0, 1.700),
        Reading::closing_benchmark("BM-B", 45.0, 1.420, 100.828),
    ]
}

fn print_field_book(readings: &[Reading], output: &SurveyOutput) {
    println!(
        "{:<8} {:>9} {:>7} {:>7} {:>7} {:>7} {:>7} {:>9} {:>9} {:>9}",
        "Station", "Cum.Dist", "BS", "IS", "FS", "Rise", "Fall", "RL", "Corr", "Adj RL"
    );
    println!("{}", "-".repeat(88));

    for row in field_book_rows(readings, &output.stations) {
        let FieldBookRow {
            station,
            cumulative_distance,
            backsight,
            intersight,
            foresight,
            rise,
            fall,
            reduced_level,
            correction,
            adjusted_level,
        } = row;
        println!(
            "{:<8} {:>9} {:>7} {:>7} {:>7} {:>7} {:>7} {:>9} {:>9} {:>9}",
            station,
            cumulative_distance,
            backsight,
            intersight,
            foresight,
            rise,
            fall,
            reduced_level,
            correction,
            adjusted_level
        );
    }

    println!();
    for line in assessment_lines(output) {
        println!("  {}", line);
    }
}

fn run_demo() -> ExitCode {
    println!("Running built-in demo traverse (pass a .lvl draft to use your own)...");
    println!();

    let readings = demo_readings();
    let settings = AdjustmentSettings::default();
    let input = level_core::SurveyInput::new(readings.clone())
        .with_k(settings.k_mm)
        .with_start_elevation(settings.default_start_elevation_m);

    match calculate(&input) {
        Ok(output) => {
            print_field_book(&readings, &output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Calculation failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_draft(path: &Path) -> ExitCode {
    let project = match load_draft(path) {
        Ok(project) => project,
        Err(e) => {
            eprintln!("Could not load '{}': {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    println!("Project:  {}", project.meta.name);
    println!("Location: {}", project.meta.location);
    println!("Surveyor: {}", project.meta.surveyor);
    println!("Date:     {}", project.meta.survey_date);
    println!();

    if project.lines.is_empty() {
        println!("Draft contains no leveling lines.");
        return ExitCode::SUCCESS;
    }

    let mut failed = false;
    for line in project.lines.values() {
        println!("═══════════════════════════════════════");
        println!("  LINE: {}", line.label);
        println!("═══════════════════════════════════════");
        println!();

        match calculate(&line.to_input(&project.settings)) {
            Ok(output) => print_field_book(&line.readings, &output),
            Err(e) => {
                eprintln!("Line '{}' failed: {}", line.label, e);
                failed = true;
            }
        }
        println!();
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn main() -> ExitCode {
    println!("Levelbook CLI - Rise and Fall Reduction");
    println!("=======================================");
    println!();

    match env::args().nth(1) {
        Some(arg) => run_draft(Path::new(&arg)),
        None => run_demo(),
    }
}
