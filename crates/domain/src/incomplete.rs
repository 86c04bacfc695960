// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference data lookups and placeholder detection.

use crate::types::{Allocation, Assignment, ProjectId, WorkerId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Display data for an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerInfo {
    /// The employee.
    pub id: WorkerId,
    /// Display name.
    pub name: String,
}

/// Display data for a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// The project.
    pub id: ProjectId,
    /// Display name.
    pub name: String,
}

/// Read-only resolution of worker and project references.
pub trait ReferenceLookup {
    /// Resolves a worker reference.
    fn worker(&self, id: &WorkerId) -> Option<&WorkerInfo>;

    /// Resolves a project reference.
    fn project(&self, id: &ProjectId) -> Option<&ProjectInfo>;
}

/// In-memory reference directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceDirectory {
    workers: HashMap<WorkerId, WorkerInfo>,
    projects: HashMap<ProjectId, ProjectInfo>,
}

impl ReferenceDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a directory from lists of workers and projects.
    #[must_use]
    pub fn from_parts(workers: Vec<WorkerInfo>, projects: Vec<ProjectInfo>) -> Self {
        Self {
            workers: workers.into_iter().map(|w| (w.id.clone(), w)).collect(),
            projects: projects.into_iter().map(|p| (p.id.clone(), p)).collect(),
        }
    }

    /// Adds or replaces a worker.
    pub fn add_worker(&mut self, worker: WorkerInfo) {
        self.workers.insert(worker.id.clone(), worker);
    }

    /// Adds or replaces a project.
    pub fn add_project(&mut self, project: ProjectInfo) {
        self.projects.insert(project.id.clone(), project);
    }
}

impl ReferenceLookup for ReferenceDirectory {
    fn worker(&self, id: &WorkerId) -> Option<&WorkerInfo> {
        self.workers.get(id)
    }

    fn project(&self, id: &ProjectId) -> Option<&ProjectInfo> {
        self.projects.get(id)
    }
}

/// Returns true if the record is a placeholder still being defined.
///
/// A record is incomplete when its project does not resolve, its allocation
/// is exactly zero, and either its trade or its project id is blank. Only
/// incomplete records may be deleted from the grid or carved into a range.
#[must_use]
pub fn is_incomplete<L: ReferenceLookup + ?Sized>(assignment: &Assignment, lookup: &L) -> bool {
    lookup.project(&assignment.project_id).is_none()
        && assignment.allocation == Allocation::new(0)
        && (assignment.trade.is_blank() || assignment.project_id.is_blank())
}
