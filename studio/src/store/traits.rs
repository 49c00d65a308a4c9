//! The persistence contract for simulation records.
//!
//! This module defines the `SimulationStore` trait - the abstraction over
//! the platform API the builder talks to. The wizard never mutates its
//! local copy of a record: it sends a patch, the store applies it, and the
//! session refetches the authoritative record.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use blueprint::{SkillRef, Simulation, SimulationTask, Visibility};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Error types for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Store is not reachable
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Transport-level failure
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with an error envelope
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// The server answered with a body we cannot interpret
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Core trait for simulation persistence.
///
/// Implementations are a REST client against the platform API and an
/// in-memory mock for tests. All methods are total: a missing record is
/// `Ok(None)` from `fetch`, never a panic.
#[async_trait]
pub trait SimulationStore: Send + Sync {
    /// Fetch the authoritative record. `Ok(None)` means no record exists
    /// under this id.
    async fn fetch(&self, id: &str) -> Result<Option<Simulation>, StoreError>;

    /// Apply a partial update. Returns no record; callers refetch to see
    /// the result.
    async fn update_fields(&self, id: &str, patch: &SimulationPatch)
        -> Result<(), StoreError>;

    /// Mark the record published. Completion gating happens in the
    /// session before this is called.
    async fn publish(&self, id: &str) -> Result<(), StoreError>;
}

/// Partial update to a simulation record.
///
/// Only set fields serialize, so a PATCH body carries exactly the fields
/// one wizard step's form owns. Fields cannot be unset through a patch;
/// the forms never null a field, they overwrite it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct SimulationPatch {
    // Metadata step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_type: Option<String>,

    // Outcomes step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_outcomes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation_skills: Option<Vec<SkillRef>>,

    // Tasks step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation_tasks: Option<Vec<SimulationTask>>,

    // Assessment step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grading_criteria: Option<String>,

    // Branding step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_work_here: Option<String>,

    // Certification step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_director_name: Option<String>,

    // Visibility step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,

    // Analytics step; replaces the whole tag list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics_tags: Option<Vec<String>>,
}

impl SimulationPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no field is set. Sessions skip the round trip for these.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn with_certificate_enabled(mut self, enabled: bool) -> Self {
        self.certificate_enabled = Some(enabled);
        self
    }

    pub fn with_analytics_tags(mut self, tags: Vec<String>) -> Self {
        self.analytics_tags = Some(tags);
        self
    }

    /// Apply the set fields onto a record, the way the server's partial
    /// update behaves. Used by the in-memory store and tests.
    pub fn apply_to(&self, sim: &mut Simulation) {
        if let Some(v) = &self.title {
            sim.title = Some(v.clone());
        }
        if let Some(v) = &self.short_description {
            sim.short_description = Some(v.clone());
        }
        if let Some(v) = &self.description {
            sim.description = Some(v.clone());
        }
        if let Some(v) = &self.industry {
            sim.industry = Some(v.clone());
        }
        if let Some(v) = &self.target_role {
            sim.target_role = Some(v.clone());
        }
        if let Some(v) = &self.program_type {
            sim.program_type = Some(v.clone());
        }
        if let Some(v) = &self.learning_outcomes {
            sim.learning_outcomes = v.clone();
        }
        if let Some(v) = &self.simulation_skills {
            sim.simulation_skills = v.clone();
        }
        if let Some(v) = &self.simulation_tasks {
            sim.simulation_tasks = v.clone();
        }
        if let Some(v) = &self.duration {
            sim.duration = Some(v.clone());
        }
        if let Some(v) = &self.difficulty_level {
            sim.difficulty_level = Some(v.clone());
        }
        if let Some(v) = &self.target_audience {
            sim.target_audience = Some(v.clone());
        }
        if let Some(v) = &self.grading_criteria {
            sim.grading_criteria = Some(v.clone());
        }
        if let Some(v) = &self.company_logo_url {
            sim.company_logo_url = Some(v.clone());
        }
        if let Some(v) = &self.banner_url {
            sim.banner_url = Some(v.clone());
        }
        if let Some(v) = &self.about_company {
            sim.about_company = Some(v.clone());
        }
        if let Some(v) = &self.why_work_here {
            sim.why_work_here = Some(v.clone());
        }
        if let Some(v) = self.certificate_enabled {
            sim.certificate_enabled = Some(v);
        }
        if let Some(v) = &self.certificate_director_name {
            sim.certificate_director_name = Some(v.clone());
        }
        if let Some(v) = self.visibility {
            sim.visibility = Some(v);
        }
        if let Some(v) = &self.analytics_tags {
            sim.analytics_tags = v.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = SimulationPatch::new()
            .with_title("Treasury Analyst")
            .with_certificate_enabled(false);

        let json = serde_json::to_value(&patch).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["title"], "Treasury Analyst");
        assert_eq!(object["certificate_enabled"], false);
    }

    #[test]
    fn test_empty_patch() {
        assert!(SimulationPatch::new().is_empty());
        assert!(!SimulationPatch::new().with_title("x").is_empty());
    }

    #[test]
    fn test_apply_overwrites_only_set_fields() {
        let mut sim = Simulation::new("sim-1");
        sim.title = Some("Old title".into());
        sim.industry = Some("Finance".into());

        SimulationPatch::new()
            .with_title("New title")
            .apply_to(&mut sim);

        assert_eq!(sim.title.as_deref(), Some("New title"));
        assert_eq!(sim.industry.as_deref(), Some("Finance"));
    }

    #[test]
    fn test_apply_replaces_whole_lists() {
        let mut sim = Simulation::new("sim-1");
        sim.learning_outcomes = vec!["old".into()];

        let patch = SimulationPatch {
            learning_outcomes: Some(vec!["first".into(), "second".into()]),
            ..Default::default()
        };
        patch.apply_to(&mut sim);

        assert_eq!(sim.learning_outcomes, vec!["first", "second"]);
    }
}
