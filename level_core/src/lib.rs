//! # level_core - Field Leveling Reduction Engine
//!
//! `level_core` is the computational heart of Levelbook, reducing
//! rise-and-fall staff readings to adjusted elevations with a clean,
//! host-friendly API. All inputs and outputs are JSON-serializable, so a
//! GUI, CLI, or export layer can drive the engine without bespoke glue.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results;
//!   every evaluation re-derives everything from the current readings
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Absent is not zero**: Optional sightings are `Option<f64>`, never
//!   sentinel values
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use level_core::calculations::{calculate, SurveyInput};
//! use level_core::readings::Reading;
//!
//! let input = SurveyInput::new(vec![
//!     Reading::opening_benchmark("BM-A", 1.500, 100.000),
//!     Reading::change_point("CP1", 40.0, 1.100, 1.850),
//!     Reading::closing_benchmark("BM-B", 45.0, 1.420, 100.828),
//! ]);
//!
//! let output = calculate(&input).unwrap();
//! println!("total distance: {:.1} m", output.summary.total_distance_m);
//! ```
//!
//! ## Modules
//!
//! - [`readings`] - Raw staff readings (the field-book input)
//! - [`calculations`] - Reduction, misclosure, and adjustment
//! - [`project`] - Project container, metadata, and settings
//! - [`report`] - Field-book display rows and assessment strings
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Draft persistence with atomic saves and locking

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod project;
pub mod readings;
pub mod report;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, Misclosure, ReducedStation, SurveyInput, SurveyOutput};
pub use errors::{LevelError, LevelResult};
pub use file_io::{load_draft, save_draft, FileLock};
pub use project::{AdjustmentSettings, ProjectMetadata, SurveyLine, SurveyProject};
pub use readings::Reading;
