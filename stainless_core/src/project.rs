//! # Project Data Structures
//!
//! The `Project` struct is the root container for a set of designed members.
//! Projects serialize to `.sdp` (stainless design project) files as
//! human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: ProjectSettings (unit system, solver settings)
//! └── members: BTreeMap<Uuid, DesignMember> (member + demands)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use stainless_core::project::Project;
//!
//! let project = Project::new("Jane Engineer", "25-042", "ACME Corp");
//! let json = serde_json::to_string_pretty(&project)?;
//! assert!(json.contains("25-042"));
//! # Ok::<(), serde_json::Error>(())
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::{Analysis, AnalysisReport, Demands};
use crate::effective_section::SectionSolverSettings;
use crate::errors::CalcResult;
use crate::member::Member;
use crate::solver::SolverSettings;
use crate::units::UnitSystem;

/// Current schema version for .sdp files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub meta: ProjectMetadata,
    pub settings: ProjectSettings,
    /// Designed members, keyed by UUID
    pub members: BTreeMap<Uuid, DesignMember>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Arguments
    ///
    /// * `engineer` - Name of the responsible engineer
    /// * `job_id` - Job/project number (e.g., "25-001")
    /// * `client` - Client name
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: ProjectSettings::default(),
            members: BTreeMap::new(),
        }
    }

    /// Add a member to the project. Returns the UUID assigned to it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stainless_core::analysis::Demands;
    /// use stainless_core::materials::catalog;
    /// use stainless_core::member::{DesignParameters, Member};
    /// use stainless_core::project::{DesignMember, Project};
    /// use stainless_core::section::{Profile, ProfileShape};
    /// use stainless_core::units::UnitSystem;
    ///
    /// let mut project = Project::new("Engineer", "25-001", "Client");
    /// let shape = ProfileShape::Channel { h: 6.0, b: 1.625, t: 0.06, r_out: 0.15375 };
    /// let member = Member::new(
    ///     Profile::new("C6", shape)?,
    ///     catalog::lookup("SA301_1_4Hard")?,
    ///     DesignParameters::default(),
    ///     48.0,
    ///     UnitSystem::Imperial,
    /// )?;
    ///
    /// let id = project.add_member(DesignMember::new("J-1", member, Demands::default()));
    /// assert!(project.get_member(&id).is_some());
    /// # Ok::<(), stainless_core::errors::CalcError>(())
    /// ```
    pub fn add_member(&mut self, member: DesignMember) -> Uuid {
        let id = Uuid::new_v4();
        self.members.insert(id, member);
        self.touch();
        id
    }

    /// Remove a member by UUID, returning it if it existed.
    pub fn remove_member(&mut self, id: &Uuid) -> Option<DesignMember> {
        let member = self.members.remove(id);
        if member.is_some() {
            self.touch();
        }
        member
    }

    pub fn get_member(&self, id: &Uuid) -> Option<&DesignMember> {
        self.members.get(id)
    }

    /// Mutable access; marks the project as modified when the member exists.
    pub fn get_member_mut(&mut self, id: &Uuid) -> Option<&mut DesignMember> {
        if self.members.contains_key(id) {
            self.meta.modified = Utc::now();
            self.members.get_mut(id)
        } else {
            None
        }
    }

    /// Find a member by its label
    pub fn find_by_label(&self, label: &str) -> Option<(&Uuid, &DesignMember)> {
        self.members.iter().find(|(_, m)| m.label == label)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Analyze every member, in UUID order.
    ///
    /// The project's solver settings replace each member's own.
    pub fn analyze_all(&self) -> CalcResult<Vec<(Uuid, AnalysisReport)>> {
        self.members
            .iter()
            .map(|(id, m)| {
                let member = m
                    .member
                    .clone()
                    .with_solver(self.settings.solver)?
                    .with_section_solver(self.settings.section_solver);
                Ok((*id, Analysis::new(&member).run(&m.demands)?))
            })
            .collect()
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,
    pub engineer: String,
    pub job_id: String,
    pub client: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Project-wide settings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// Unit system new members are entered in
    pub units: UnitSystem,
    #[serde(default)]
    pub solver: SolverSettings,
    #[serde(default)]
    pub section_solver: SectionSolverSettings,
}

/// A labelled member with the factored demands it is checked against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignMember {
    /// User label (e.g., "J-1", "Stud 3")
    pub label: String,
    pub member: Member,
    #[serde(default)]
    pub demands: Demands,
}

impl DesignMember {
    pub fn new(label: impl Into<String>, member: Member, demands: Demands) -> Self {
        DesignMember {
            label: label.into(),
            member,
            demands,
        }
    }

    pub fn analyze(&self) -> CalcResult<AnalysisReport> {
        Analysis::new(&self.member).run(&self.demands)
    }
}
