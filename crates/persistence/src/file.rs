// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PersistenceError;
use crate::memory::InMemoryStore;
use crew_schedule::Snapshot;
use crew_schedule_domain::{
    Assignment, GridConfig, ProjectInfo, ReferenceDirectory, WorkerInfo,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// The on-disk form of a schedule: grid settings, reference data and records.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScheduleFile {
    /// Grid and drag settings.
    #[serde(default)]
    pub grid: GridConfig,
    /// Known employees.
    #[serde(default)]
    pub workers: Vec<WorkerInfo>,
    /// Known projects.
    #[serde(default)]
    pub projects: Vec<ProjectInfo>,
    /// Assignment records.
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl ScheduleFile {
    /// Parses a schedule from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a record is invalid.
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        let file: Self = serde_json::from_str(json)?;
        debug!(
            assignments = file.assignments.len(),
            workers = file.workers.len(),
            projects = file.projects.len(),
            "Parsed schedule"
        );
        Ok(file)
    }

    /// Renders the schedule as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Loads a schedule file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path: &Path = path.as_ref();
        info!(path = %path.display(), "Loading schedule");
        let json: String = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Writes the schedule file, replacing any existing content.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PersistenceError> {
        let path: &Path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        info!(
            path = %path.display(),
            assignments = self.assignments.len(),
            "Saved schedule"
        );
        Ok(())
    }

    /// Builds the reference directory from the workers and projects.
    #[must_use]
    pub fn directory(&self) -> ReferenceDirectory {
        ReferenceDirectory::from_parts(self.workers.clone(), self.projects.clone())
    }

    /// Builds a store seeded with the assignment records.
    ///
    /// # Errors
    ///
    /// Returns an error if two records of one row overlap.
    pub fn store(&self) -> Result<InMemoryStore, PersistenceError> {
        InMemoryStore::with_records(self.assignments.clone())
    }

    /// Replaces the assignment records with the contents of `snapshot`.
    pub fn replace_assignments(&mut self, snapshot: &Snapshot) {
        self.assignments = snapshot.records().cloned().collect();
    }
}
