//! # Project Data Structures
//!
//! The `SurveyProject` struct is the root container for a field book.
//! Projects serialize to `.lvl` (Levelbook) files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! SurveyProject
//! ├── meta: ProjectMetadata (version, surveyor, location, timestamps)
//! ├── settings: AdjustmentSettings (constant k, default start RL)
//! └── lines: HashMap<Uuid, SurveyLine> (independent leveling lines)
//! ```
//!
//! Lines in the same project are evaluated independently - this is a
//! container, not a network; adjusting lines against each other is out of
//! scope.
//!
//! ## Example
//!
//! ```rust
//! use level_core::project::SurveyProject;
//!
//! let project = SurveyProject::new("Canal Embankment", "Sector 7", "R. Achebe");
//!
//! // Serialize to JSON
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! # assert!(json.contains("Canal Embankment"));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{SurveyInput, DEFAULT_K_MM, DEFAULT_START_ELEVATION_M};
use crate::readings::Reading;

/// Current schema version for .lvl files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// This is the top-level struct that gets serialized to `.lvl` files.
/// Lines are stored in a flat UUID-keyed map so host references stay
/// stable when lines are added or removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyProject {
    /// Project metadata (version, surveyor, job info)
    pub meta: ProjectMetadata,

    /// Adjustment settings shared by all lines
    pub settings: AdjustmentSettings,

    /// All leveling lines, keyed by UUID
    pub lines: HashMap<Uuid, SurveyLine>,
}

impl SurveyProject {
    /// Create a new empty project dated today.
    ///
    /// # Arguments
    ///
    /// * `name` - Project name
    /// * `location` - Site location
    /// * `surveyor` - Chief surveyor
    ///
    /// # Example
    ///
    /// ```rust
    /// use level_core::project::SurveyProject;
    ///
    /// let project = SurveyProject::new("Canal Embankment", "Sector 7", "R. Achebe");
    /// assert_eq!(project.meta.surveyor, "R. Achebe");
    /// ```
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        surveyor: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        SurveyProject {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                name: name.into(),
                location: location.into(),
                surveyor: surveyor.into(),
                instrument_id: String::new(),
                survey_date: now.date_naive(),
                created: now,
                modified: now,
            },
            settings: AdjustmentSettings::default(),
            lines: HashMap::new(),
        }
    }

    /// Add a leveling line to the project.
    ///
    /// Returns the UUID assigned to the line.
    pub fn add_line(&mut self, line: SurveyLine) -> Uuid {
        let id = Uuid::new_v4();
        self.lines.insert(id, line);
        self.touch();
        id
    }

    /// Remove a leveling line by UUID.
    ///
    /// Returns the removed line if it existed.
    pub fn remove_line(&mut self, id: &Uuid) -> Option<SurveyLine> {
        let line = self.lines.remove(id);
        if line.is_some() {
            self.touch();
        }
        line
    }

    /// Get a leveling line by UUID.
    pub fn get_line(&self, id: &Uuid) -> Option<&SurveyLine> {
        self.lines.get(id)
    }

    /// Get a mutable reference to a leveling line by UUID.
    ///
    /// Getting a mutable reference marks the project as modified.
    pub fn get_line_mut(&mut self, id: &Uuid) -> Option<&mut SurveyLine> {
        if self.lines.contains_key(id) {
            self.meta.modified = Utc::now();
            self.lines.get_mut(id)
        } else {
            None
        }
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Number of leveling lines in the project.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

impl Default for SurveyProject {
    fn default() -> Self {
        SurveyProject::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Project name
    pub name: String,

    /// Site location
    pub location: String,

    /// Chief surveyor
    pub surveyor: String,

    /// Instrument identifier (serial or asset tag)
    pub instrument_id: String,

    /// Date the field work was carried out
    pub survey_date: NaiveDate,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Adjustment settings shared by every line in the project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentSettings {
    /// Adjustment constant k for the allowable-error formula (mm)
    pub k_mm: f64,

    /// Starting elevation used when a line's first station has no known RL (m)
    pub default_start_elevation_m: f64,
}

impl Default for AdjustmentSettings {
    fn default() -> Self {
        AdjustmentSettings {
            k_mm: DEFAULT_K_MM,
            default_start_elevation_m: DEFAULT_START_ELEVATION_M,
        }
    }
}

/// One leveling line: an ordered run of staff readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyLine {
    /// User label for this line (e.g., "Run A", "Embankment LHS")
    pub label: String,

    /// Staff readings in survey order
    pub readings: Vec<Reading>,
}

impl SurveyLine {
    /// Create an empty line.
    pub fn new(label: impl Into<String>) -> Self {
        SurveyLine {
            label: label.into(),
            readings: Vec::new(),
        }
    }

    /// Append a reading at the end of the line.
    pub fn push_reading(&mut self, reading: Reading) {
        self.readings.push(reading);
    }

    /// Number of recorded stations.
    pub fn reading_count(&self) -> usize {
        self.readings.len()
    }

    /// Build the calculation input for this line under the given settings.
    pub fn to_input(&self, settings: &AdjustmentSettings) -> SurveyInput {
        SurveyInput::new(self.readings.clone())
            .with_k(settings.k_mm)
            .with_start_elevation(settings.default_start_elevation_m)
    }
}
